//! aitodo - A terminal to-do list with AI-assisted subtask generation
//!
//! Tasks and their one level of subtasks live in a single JSON file. A
//! chat-completion endpoint can be asked to break a task into numbered
//! steps, which are appended as new subtasks.

pub mod commands;
pub mod config;
pub mod error;
pub mod generator;
pub mod id;
pub mod llm;
pub mod store;
pub mod tui;

pub use error::{GenerationError, Result, TodoError};
