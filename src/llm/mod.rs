//! LLM Client Layer - chat-completion API integration
//!
//! This module provides:
//! - Message and request/response types
//! - CompletionClient trait for API abstraction
//! - ChatCompletionClient implementation over HTTP
//! - MockCompletionClient for tests

pub mod chat;
pub mod client;
pub mod types;

pub use chat::ChatCompletionClient;
pub use client::{CompletionClient, MockCompletionClient};
pub use types::{ChatRequest, ChatResponse, Choice, ChoiceMessage, Message, Role};
