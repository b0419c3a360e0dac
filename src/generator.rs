//! Subtask generation
//!
//! Turns a task's text into a chat-completion request, sends it through a
//! `CompletionClient`, and turns each non-empty line of the reply into a new
//! subtask appended after the existing ones.

use log::{debug, info, warn};

use crate::error::Result;
use crate::id::{IdAllocator, now_timestamp};
use crate::llm::{ChatRequest, CompletionClient};
use crate::store::Subtask;

/// Sampling temperature sent with every generation request
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// The single user message sent for `task_text`.
pub fn build_prompt(task_text: &str) -> String {
    format!(
        "Break this task down into concrete subtask steps (numbered): {}",
        task_text
    )
}

/// Split a completion into subtask texts: one per non-blank line, trimmed.
pub fn parse_subtask_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Generates subtasks for a task via a completion client.
pub struct SubtaskGenerator<C: CompletionClient> {
    client: C,
}

impl<C: CompletionClient> SubtaskGenerator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// The request body that `generate` sends for `task_text`.
    pub fn request_for(&self, task_text: &str) -> ChatRequest {
        ChatRequest::new(self.client.model(), DEFAULT_TEMPERATURE).with_user_message(build_prompt(task_text))
    }

    /// Ask for subtasks of `task_text` and merge them after `existing`.
    ///
    /// IDs are drawn from `ids` only once a usable reply is in hand, so a
    /// failed call leaves the allocator untouched. Running out of IDs part
    /// way through fails the whole call.
    pub async fn generate(
        &self,
        task_text: &str,
        existing: &[Subtask],
        ids: &mut IdAllocator,
    ) -> Result<Vec<Subtask>> {
        let request = self.request_for(task_text);
        debug!("Requesting subtasks from model {}", request.model);

        let content = self.client.complete(&request).await.inspect_err(|e| {
            warn!("Subtask generation failed: {}", e);
        })?;

        let lines = parse_subtask_lines(&content);
        info!("Generated {} subtask(s)", lines.len());

        let now = now_timestamp();
        let mut merged = existing.to_vec();
        for text in lines {
            merged.push(Subtask::new(ids.next_id()?, text, &now));
        }
        Ok(merged)
    }
}

impl<C: CompletionClient + std::fmt::Debug> std::fmt::Debug for SubtaskGenerator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubtaskGenerator").field("client", &self.client).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{GenerationError, TodoError};
    use crate::llm::{MockCompletionClient, Role};

    fn existing() -> Vec<Subtask> {
        vec![
            Subtask::new(2, "A", "2024-01-01 10:00:00"),
            Subtask::new(3, "B", "2024-01-01 10:00:00"),
        ]
    }

    #[test]
    fn test_parse_subtask_lines() {
        assert_eq!(parse_subtask_lines("1. X\n2. Y\n\n"), vec!["1. X", "2. Y"]);
        assert_eq!(parse_subtask_lines("  a  \r\n\t\n b"), vec!["a", "b"]);
        assert!(parse_subtask_lines("").is_empty());
        assert!(parse_subtask_lines("\n  \n").is_empty());
    }

    #[test]
    fn test_build_prompt_contains_task() {
        let prompt = build_prompt("plan a trip");
        assert!(prompt.ends_with("plan a trip"));
        assert!(prompt.contains("numbered"));
    }

    #[test]
    fn test_request_for() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new());
        let request = generator.request_for("plan a trip");

        assert_eq!(request.model, "mock-model");
        assert_eq!(request.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, Role::User);
        assert_eq!(request.messages[0].content, build_prompt("plan a trip"));
    }

    #[tokio::test]
    async fn test_generate_merges_after_existing() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new().with_response("1. X\n2. Y\n\n"));
        let mut ids = IdAllocator::starting_after(3);

        let merged = generator.generate("task", &existing(), &mut ids).await.unwrap();

        let texts: Vec<&str> = merged.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "1. X", "2. Y"]);
        assert_eq!(merged[0], existing()[0]);
        assert_eq!(merged[1], existing()[1]);
        assert_eq!(merged[2].id, 4);
        assert_eq!(merged[3].id, 5);
        assert!(!merged[2].completed);
        assert!(!merged[2].hidden);
        assert!(merged[2].created_at.is_some());
        assert_eq!(merged[2].created_at, merged[2].updated_at);
        assert_eq!(ids.peek(), Some(6));
    }

    #[tokio::test]
    async fn test_generate_sends_prompt() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new().with_response("one"));
        let mut ids = IdAllocator::new();

        generator.generate("write report", &[], &mut ids).await.unwrap();

        let requests = generator.client().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], generator.request_for("write report"));
    }

    #[tokio::test]
    async fn test_generate_failure_leaves_ids_untouched() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new().with_error(GenerationError::Http {
            status: 500,
            message: "boom".to_string(),
        }));
        let mut ids = IdAllocator::starting_after(3);

        let result = generator.generate("task", &existing(), &mut ids).await;

        assert!(matches!(
            result,
            Err(TodoError::Generation(GenerationError::Http { status: 500, .. }))
        ));
        assert_eq!(ids.peek(), Some(4));
    }

    #[tokio::test]
    async fn test_generate_blank_reply_keeps_existing() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new().with_response("\n\n"));
        let mut ids = IdAllocator::starting_after(3);

        let merged = generator.generate("task", &existing(), &mut ids).await.unwrap();
        assert_eq!(merged, existing());
        assert_eq!(ids.peek(), Some(4));
    }

    #[tokio::test]
    async fn test_generate_out_of_ids() {
        let generator = SubtaskGenerator::new(MockCompletionClient::new().with_response("1. X\n2. Y\n"));
        let mut ids = IdAllocator::starting_after(u64::MAX - 1);

        let result = generator.generate("task", &existing(), &mut ids).await;
        assert!(matches!(result, Err(TodoError::IdExhausted)));
    }
}
