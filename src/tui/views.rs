//! TUI Views
//!
//! Layout:
//!
//! ```text
//! ┌ Tasks ──────┐┌ Task ───────────────────┐
//! │ [ ] one     ││ text, created, updated  │
//! │ [x] two     │└─────────────────────────┘
//! │             │┌ Subtasks ───────────────┐
//! │             ││ [ ] step                │
//! └─────────────┘└─────────────────────────┘
//!  input / notification line
//!  key hints
//! ```

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use super::colors;
use super::state::{AppState, InteractionMode, NotificationLevel, Pane};
use crate::store::{Task, TaskStore};

const KEY_HINTS: &[(&str, &str)] = &[
    ("a", "add"),
    ("s", "subtask"),
    ("e", "edit"),
    ("space", "done"),
    ("d", "delete"),
    ("g", "generate"),
    ("tab", "pane"),
    ("q", "quit"),
];

/// Draw the whole screen.
pub fn render(frame: &mut Frame, state: &AppState, store: &TaskStore) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3), Constraint::Length(1)])
        .split(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let selected = state.selected_task_id(store).and_then(|id| store.task(id));

    render_tasks(frame, columns[0], state, store);
    render_details(frame, columns[1], state, selected);
    render_bottom_line(frame, rows[1], state);
    render_hints(frame, rows[2]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(colors::HEADER)
    } else {
        Style::default().fg(colors::DIM)
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

/// One list row: checkbox plus text, highlighted when selected.
fn format_row(text: &str, completed: bool, selected: bool) -> ListItem<'static> {
    let (mark, color) = if completed {
        ("[x] ", colors::COMPLETE)
    } else {
        ("[ ] ", colors::PENDING)
    };

    let mut text_style = Style::default();
    if completed {
        text_style = text_style.add_modifier(Modifier::CROSSED_OUT).fg(colors::DIM);
    }

    let line = Line::from(vec![
        Span::styled(mark, Style::default().fg(color)),
        Span::styled(text.to_string(), text_style),
    ]);

    let row_style = if selected {
        Style::default().bg(colors::SELECTED).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(line).style(row_style)
}

fn render_tasks(frame: &mut Frame, area: Rect, state: &AppState, store: &TaskStore) {
    let items: Vec<ListItem> = store
        .visible_tasks()
        .enumerate()
        .map(|(i, task)| format_row(&task.text, task.completed, i == state.task_cursor))
        .collect();

    let title = format!(" Tasks ({}) ", items.len());
    let list = List::new(items).block(pane_block(title, state.focus == Pane::Tasks));
    frame.render_widget(list, area);
}

fn render_details(frame: &mut Frame, area: Rect, state: &AppState, task: Option<&Task>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let Some(task) = task else {
        let empty = Paragraph::new("No task selected")
            .style(Style::default().fg(colors::DIM))
            .block(pane_block(" Task ".to_string(), false));
        frame.render_widget(empty, chunks[0]);
        frame.render_widget(
            List::new(Vec::<ListItem>::new()).block(pane_block(" Subtasks ".to_string(), state.focus == Pane::Subtasks)),
            chunks[1],
        );
        return;
    };

    let label = Style::default().fg(colors::HEADER);
    let info = vec![
        Line::from(vec![Span::styled("Task:    ", label), Span::raw(task.text.clone())]),
        Line::from(vec![
            Span::styled("Created: ", label),
            Span::raw(task.created_at.clone().unwrap_or_default()),
        ]),
        Line::from(vec![
            Span::styled("Updated: ", label),
            Span::raw(task.updated_at.clone().unwrap_or_default()),
        ]),
    ];
    let info = Paragraph::new(info)
        .wrap(Wrap { trim: true })
        .block(pane_block(format!(" Task #{} ", task.id), false));
    frame.render_widget(info, chunks[0]);

    let focused = state.focus == Pane::Subtasks;
    let items: Vec<ListItem> = task
        .visible_subtasks()
        .enumerate()
        .map(|(i, sub)| format_row(&sub.text, sub.completed, focused && i == state.subtask_cursor))
        .collect();

    let title = format!(" Subtasks ({}) ", items.len());
    frame.render_widget(List::new(items).block(pane_block(title, focused)), chunks[1]);
}

fn render_bottom_line(frame: &mut Frame, area: Rect, state: &AppState) {
    let widget = match state.mode {
        InteractionMode::Input(purpose) => {
            let title = format!(" {} (Enter to save, Esc to cancel) ", purpose.prompt());
            Paragraph::new(state.input.content().to_string())
                .block(Block::default().borders(Borders::ALL).title(title))
        }
        InteractionMode::Normal => {
            let (text, color) = match &state.notification {
                Some(n) => {
                    let color = match n.level {
                        NotificationLevel::Info => colors::HEADER,
                        NotificationLevel::Warning => colors::WARNING,
                        NotificationLevel::Error => colors::ERROR,
                    };
                    (n.message.clone(), color)
                }
                None => (String::new(), colors::DIM),
            };
            Paragraph::new(text)
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL))
        }
    };
    frame.render_widget(widget, area);

    if let InteractionMode::Input(_) = state.mode {
        let prefix: String = state.input.content().chars().take(state.input.cursor()).collect();
        let x = area.x + 1 + Line::raw(prefix).width() as u16;
        frame.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn render_hints(frame: &mut Frame, area: Rect) {
    let spans: Vec<Span> = KEY_HINTS
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(format!(" <{}>", key), Style::default().fg(colors::KEYBIND)),
                Span::styled(format!(" {}", action), Style::default().fg(colors::DIM)),
            ]
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
