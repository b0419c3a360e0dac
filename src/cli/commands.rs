//! CLI command definitions using clap.
//!
//! With no subcommand the interactive UI starts. The subcommands cover the
//! same operations for scripted use:
//! - list: print tasks and subtasks
//! - add / edit / done / undone / hide: single-record changes
//! - add-subtask / generate: subtask creation

use aitodo::commands::Command;
use aitodo::store::TaskId;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// aitodo - A terminal to-do list with AI-assisted subtask generation
#[derive(Parser, Debug)]
#[command(name = "aitodo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List tasks and their subtasks
    List {
        /// Include deleted (hidden) tasks
        #[arg(short, long)]
        all: bool,
    },

    /// Add a top-level task
    Add {
        /// Task text
        text: String,
    },

    /// Change the text of a task or subtask
    Edit {
        /// Task or subtask ID
        id: TaskId,

        /// New text
        text: String,
    },

    /// Mark a task or subtask as completed
    Done {
        /// Task or subtask ID
        id: TaskId,
    },

    /// Mark a task or subtask as not completed
    Undone {
        /// Task or subtask ID
        id: TaskId,
    },

    /// Delete (hide) a task or subtask
    Hide {
        /// Task or subtask ID
        id: TaskId,
    },

    /// Add a subtask to a task
    AddSubtask {
        /// Parent task ID
        parent: TaskId,

        /// Subtask text
        text: String,
    },

    /// Ask the model to break a task into subtasks
    Generate {
        /// Parent task ID
        parent: TaskId,
    },
}

impl Commands {
    /// The store command this subcommand stands for; `None` for read-only ones.
    pub fn to_command(&self) -> Option<Command> {
        let command = match self {
            Commands::List { .. } => return None,
            Commands::Add { text } => Command::AddTask { text: text.clone() },
            Commands::Edit { id, text } => Command::EditTask {
                id: *id,
                text: text.clone(),
            },
            Commands::Done { id } => Command::SetStatus {
                id: *id,
                completed: true,
            },
            Commands::Undone { id } => Command::SetStatus {
                id: *id,
                completed: false,
            },
            Commands::Hide { id } => Command::HideTask { id: *id },
            Commands::AddSubtask { parent, text } => Command::AddSubtask {
                parent: Some(*parent),
                text: text.clone(),
            },
            Commands::Generate { parent } => Command::GenerateSubtasks { parent: Some(*parent) },
        };
        Some(command)
    }
}
