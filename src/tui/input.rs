//! Keyboard input
//!
//! `KeyAction` is what a key means while navigating; `TextInput` is the
//! one-line editor used while typing a task.

use crossterm::event::{KeyCode, KeyModifiers};

/// Key press with the bits the UI cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Key without modifiers
    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn is_ctrl_c(&self) -> bool {
        self.code == KeyCode::Char('c') && self.modifiers.contains(KeyModifiers::CONTROL)
    }
}

impl From<crossterm::event::KeyEvent> for KeyEvent {
    fn from(key: crossterm::event::KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

/// Meaning of a key in navigation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Up,
    Down,
    SwitchPane,
    AddTask,
    AddSubtask,
    Edit,
    ToggleStatus,
    Hide,
    Generate,
    Dismiss,
    None,
}

impl KeyAction {
    pub fn from_key(key: &KeyEvent) -> Self {
        if key.is_ctrl_c() {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Up | KeyCode::Char('k') => KeyAction::Up,
            KeyCode::Down | KeyCode::Char('j') => KeyAction::Down,
            KeyCode::Tab => KeyAction::SwitchPane,
            KeyCode::Char('a') => KeyAction::AddTask,
            KeyCode::Char('s') => KeyAction::AddSubtask,
            KeyCode::Char('e') => KeyAction::Edit,
            KeyCode::Char(' ') => KeyAction::ToggleStatus,
            KeyCode::Char('d') => KeyAction::Hide,
            KeyCode::Char('g') => KeyAction::Generate,
            KeyCode::Esc => KeyAction::Dismiss,
            _ => KeyAction::None,
        }
    }
}

/// Single-line text buffer with a cursor.
///
/// The cursor counts characters, not bytes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextInput {
    content: String,
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding `content` with the cursor at the end
    pub fn with_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            cursor: content.chars().count(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `index` (or the end).
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map(|(offset, _)| offset)
            .unwrap_or(self.content.len())
    }

    pub fn insert(&mut self, c: char) {
        let offset = self.byte_offset(self.cursor);
        self.content.insert(offset, c);
        self.cursor += 1;
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.content.remove(offset);
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let offset = self.byte_offset(self.cursor);
            self.content.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Take the content, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.content)
    }

    /// Apply an editing key. Returns false for keys the editor ignores.
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::plain(KeyCode::Char(c))
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(KeyAction::from_key(&key('q')), KeyAction::Quit);
        assert_eq!(
            KeyAction::from_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            KeyAction::Quit
        );
        assert_eq!(KeyAction::from_key(&key('j')), KeyAction::Down);
        assert_eq!(KeyAction::from_key(&KeyEvent::plain(KeyCode::Up)), KeyAction::Up);
        assert_eq!(KeyAction::from_key(&KeyEvent::plain(KeyCode::Tab)), KeyAction::SwitchPane);
        assert_eq!(KeyAction::from_key(&key(' ')), KeyAction::ToggleStatus);
        assert_eq!(KeyAction::from_key(&key('d')), KeyAction::Hide);
        assert_eq!(KeyAction::from_key(&key('g')), KeyAction::Generate);
        assert_eq!(KeyAction::from_key(&key('x')), KeyAction::None);
    }

    #[test]
    fn test_text_input_editing() {
        let mut input = TextInput::new();
        for c in "hllo".chars() {
            input.insert(c);
        }
        input.move_home();
        input.move_right();
        input.insert('e');
        assert_eq!(input.content(), "hello");
        assert_eq!(input.cursor(), 2);

        input.move_end();
        input.backspace();
        assert_eq!(input.content(), "hell");

        input.move_home();
        input.delete();
        assert_eq!(input.content(), "ell");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_text_input_multibyte() {
        let mut input = TextInput::with_content("买牛奶");
        assert_eq!(input.cursor(), 3);

        input.move_left();
        input.backspace();
        assert_eq!(input.content(), "买奶");
        assert_eq!(input.cursor(), 1);

        input.delete();
        assert_eq!(input.content(), "买");
    }

    #[test]
    fn test_text_input_bounds() {
        let mut input = TextInput::with_content("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
        input.delete();
        assert_eq!(input.content(), "ab");

        input.move_home();
        input.move_left();
        input.backspace();
        assert_eq!(input.cursor(), 0);
        assert_eq!(input.content(), "ab");
    }

    #[test]
    fn test_text_input_take() {
        let mut input = TextInput::with_content("hello");
        assert_eq!(input.take(), "hello");
        assert_eq!(input, TextInput::new());
    }

    #[test]
    fn test_text_input_handle_key() {
        let mut input = TextInput::new();
        assert!(input.handle_key(&key('a')));
        assert!(input.handle_key(&KeyEvent::plain(KeyCode::Backspace)));
        assert_eq!(input.content(), "");
        assert!(!input.handle_key(&KeyEvent::plain(KeyCode::F(1))));
        assert!(!input.handle_key(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }
}
