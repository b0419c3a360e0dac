use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;

use aitodo::commands::{AppContext, Command, Outcome};
use aitodo::config::Config;
use aitodo::llm::{ChatCompletionClient, CompletionClient};
use aitodo::store::{Subtask, Task, TaskStore};
use cli::Cli;
use cli::commands::Commands;

fn setup_logging(default_level: &str) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aitodo")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("aitodo.log");

    // File output keeps the terminal UI clean
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

async fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    let store = TaskStore::load(&config.tasks_file)
        .context(format!("Failed to load tasks from {}", config.tasks_file.display()))?;
    let client = ChatCompletionClient::from_config(config).context("Failed to create completion client")?;
    let mut context = AppContext::new(store, client);

    match &cli.command {
        None => {
            info!("Launching TUI mode");
            aitodo::tui::run(context).await
        }
        Some(Commands::List { all }) => {
            print_tasks(context.store(), *all);
            Ok(())
        }
        Some(subcommand) => match subcommand.to_command() {
            Some(command) => run_command(&mut context, command, cli.is_verbose()).await,
            None => Ok(()),
        },
    }
}

async fn run_command<C: CompletionClient>(context: &mut AppContext<C>, command: Command, verbose: bool) -> Result<()> {
    info!("Handling command: {:?}", command);

    if let Command::GenerateSubtasks { parent: Some(id) } = command {
        println!("{} subtasks for task {}...", "Generating".cyan(), id);
    }

    let outcome = context.dispatch(command).await?;

    match outcome {
        Outcome::Added(id) => println!("{} {}", "Added:".green(), id),
        Outcome::Updated(id) => println!("{} {}", "Updated:".green(), id),
        Outcome::Hidden(id) => println!("{} {}", "Deleted:".red(), id),
        Outcome::Generated { parent, count } => {
            println!("{} {} subtask(s) for task {}", "Generated:".green(), count, parent);
            if verbose && let Some(task) = context.store().task(parent) {
                for subtask in task.visible_subtasks() {
                    print_subtask(subtask, false);
                }
            }
        }
        Outcome::Ignored => println!("{}", "Nothing to do: text is empty".yellow()),
    }
    Ok(())
}

fn checkbox(completed: bool) -> ColoredString {
    if completed { "[x]".green() } else { "[ ]".yellow() }
}

fn print_task(task: &Task, all: bool) {
    let mut line = format!("{:>4} {} {}", task.id, checkbox(task.completed), task.text);
    if task.hidden {
        line = format!("{} {}", line.dimmed(), "(deleted)".red());
    }
    println!("{}", line);

    for subtask in task.subtasks().filter(|s| all || !s.hidden) {
        print_subtask(subtask, subtask.hidden);
    }
}

fn print_subtask(subtask: &Subtask, hidden: bool) {
    let line = format!("     {:>4} {} {}", subtask.id, checkbox(subtask.completed), subtask.text);
    if hidden {
        println!("{} {}", line.dimmed(), "(deleted)".red());
    } else {
        println!("{}", line);
    }
}

fn print_tasks(store: &TaskStore, all: bool) {
    let tasks: Vec<&Task> = if all {
        store.all_tasks().iter().collect()
    } else {
        store.visible_tasks().collect()
    };

    if tasks.is_empty() {
        println!("{}", "No tasks".dimmed());
        return;
    }

    for task in tasks {
        print_task(task, all);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; without it there is nothing to talk to
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let level = if cli.is_verbose() {
        "debug"
    } else {
        config.log_level.as_deref().unwrap_or("info")
    };
    setup_logging(level).context("Failed to setup logging")?;

    info!("Starting with config: {:?}", config);

    // Run the main application logic
    run_application(&cli, &config).await.context("Application failed")?;

    Ok(())
}
