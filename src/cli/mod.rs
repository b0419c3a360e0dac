//! CLI module for aitodo - command-line interface and subcommands.
//!
//! Provides the main entry point: the interactive UI by default, and
//! one-shot subcommands for scripting.

pub mod commands;

pub use commands::Cli;
