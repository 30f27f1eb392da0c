//! Action items extracted from meeting transcripts
//!
//! The language model is asked for a JSON list of tasks. Its reply is parsed
//! leniently: Markdown fences are stripped, missing fields get defaults, and
//! anything unparseable becomes an empty list rather than an error.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::agent::prompts::{PromptTemplate, TASK_EXTRACTION_TEMPLATE};
use crate::agent::{GenerationOptions, Message};
use crate::core::LlmProvider;
use crate::error::{Error, Result};

/// Summary used when the caller has none
pub const DEFAULT_SUMMARY: &str = "Here's what I understood from your meeting.";

/// One action item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTask")]
pub struct Task {
    pub person: String,
    pub task: String,
    pub deadline: String,
    pub status: String,
}

/// Wire shape of a task; nulls and missing keys both fall back to defaults
#[derive(Deserialize)]
struct RawTask {
    person: Option<String>,
    task: Option<String>,
    deadline: Option<String>,
    status: Option<String>,
}

impl From<RawTask> for Task {
    fn from(raw: RawTask) -> Self {
        Task {
            person: raw.person.unwrap_or_else(|| "Someone".into()),
            task: raw.task.unwrap_or_default(),
            deadline: raw.deadline.unwrap_or_else(|| "N/A".into()),
            status: raw.status.unwrap_or_else(|| "Pending".into()),
        }
    }
}

impl Task {
    /// `<person> → <task> (Deadline: <deadline>)`
    pub fn display_line(&self) -> String {
        format!("{} → {} (Deadline: {})", self.person, self.task, self.deadline)
    }
}

/// Parse a model reply into tasks. Never fails; bad JSON gives no tasks.
pub fn parse_tasks(raw: &str) -> Vec<Task> {
    let body = strip_code_fence(raw);

    if let Ok(tasks) = serde_json::from_str::<Vec<Task>>(body) {
        return tasks;
    }

    // Models sometimes wrap the list in prose
    if let (Some(start), Some(end)) = (body.find('['), body.rfind(']')) {
        if start < end {
            if let Ok(tasks) = serde_json::from_str::<Vec<Task>>(&body[start..=end]) {
                return tasks;
            }
        }
    }

    warn!(reply_len = raw.len(), "Task reply was not a JSON list, ignoring it");
    Vec::new()
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Pulls tasks out of a transcript with one model call
pub struct TaskExtractor {
    provider: Arc<dyn LlmProvider>,
}

impl TaskExtractor {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        TaskExtractor { provider }
    }

    pub async fn extract(&self, transcript: &str) -> Result<Vec<Task>> {
        if transcript.trim().is_empty() {
            return Err(Error::InvalidInput("Transcript is empty".into()));
        }

        let prompt = PromptTemplate::new("task_extraction", TASK_EXTRACTION_TEMPLATE)?
            .render(&serde_json::json!({ "transcript": transcript }))?;

        debug!(model = self.provider.default_model(), "Extracting tasks");
        let response = self
            .provider
            .generate(&[Message::user(prompt)], &GenerationOptions::precise())
            .await?;

        let tasks = parse_tasks(&response.content);
        info!(count = tasks.len(), "Extracted tasks");
        Ok(tasks)
    }
}

/// A meeting's summary and its tasks, as remembered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingNotes {
    pub summary: String,
    pub tasks: Vec<Task>,
}

impl MeetingNotes {
    pub fn new(summary: Option<String>, tasks: Vec<Task>) -> Self {
        MeetingNotes {
            summary: summary
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SUMMARY.to_string()),
            tasks,
        }
    }

    /// Text to store in memory, or `None` when there is nothing to remember
    pub fn memory_text(&self) -> Option<String> {
        if self.tasks.is_empty() {
            return None;
        }

        let mut text = format!("Meeting Summary: {}\nTasks:\n", self.summary);
        for task in &self.tasks {
            text.push_str(&task.display_line());
            text.push('\n');
        }
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::testing::MockProvider;

    const REPLY: &str = r#"[
  {"person": "Riya", "task": "Finalize the campaign", "deadline": "Friday", "status": "Pending"},
  {"person": "Arjun", "task": "Contact vendors", "deadline": "Tomorrow"}
]"#;

    #[test]
    fn test_parse_plain_list() {
        let tasks = parse_tasks(REPLY);
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].status, "Pending");
        assert_eq!(
            tasks[0].display_line(),
            "Riya → Finalize the campaign (Deadline: Friday)"
        );
    }

    #[test]
    fn test_parse_strips_code_fence() {
        let fenced = format!("```json\n{}\n```", REPLY);
        assert_eq!(parse_tasks(&fenced).len(), 2);
        let bare = format!("```\n{}\n```", REPLY);
        assert_eq!(parse_tasks(&bare).len(), 2);
    }

    #[test]
    fn test_parse_list_inside_prose() {
        let reply = format!("Sure! Here are the tasks:\n{}\nLet me know.", REPLY);
        assert_eq!(parse_tasks(&reply).len(), 2);
    }

    #[test]
    fn test_missing_and_null_fields_get_defaults() {
        let tasks = parse_tasks(r#"[{"task": "Book venue", "person": null}]"#);
        assert_eq!(
            tasks,
            vec![Task {
                person: "Someone".into(),
                task: "Book venue".into(),
                deadline: "N/A".into(),
                status: "Pending".into(),
            }]
        );
    }

    #[test]
    fn test_invalid_json_is_empty() {
        assert!(parse_tasks("no tasks today").is_empty());
        assert!(parse_tasks(r#"{"person": "Riya"}"#).is_empty());
    }

    #[test]
    fn test_memory_text_format() {
        let notes = MeetingNotes::new(None, parse_tasks(REPLY));
        assert_eq!(
            notes.memory_text().unwrap(),
            "Meeting Summary: Here's what I understood from your meeting.\nTasks:\n\
             Riya → Finalize the campaign (Deadline: Friday)\n\
             Arjun → Contact vendors (Deadline: Tomorrow)\n"
        );
    }

    #[test]
    fn test_no_tasks_nothing_to_remember() {
        let notes = MeetingNotes::new(Some("Quick sync".into()), Vec::new());
        assert_eq!(notes.summary, "Quick sync");
        assert!(notes.memory_text().is_none());
    }

    #[tokio::test]
    async fn test_extract_sends_transcript() {
        let provider = Arc::new(MockProvider::replying(format!("```json\n{}\n```", REPLY)));
        let extractor = TaskExtractor::new(provider.clone());

        let tasks = extractor
            .extract("Riya will finalize the campaign by Friday.")
            .await
            .unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(provider.calls(), 1);
        assert!(provider
            .last_prompt()
            .unwrap()
            .ends_with("Riya will finalize the campaign by Friday."));
    }

    #[tokio::test]
    async fn test_extract_rejects_empty_transcript() {
        let provider = Arc::new(MockProvider::replying("[]"));
        let extractor = TaskExtractor::new(provider.clone());

        assert!(matches!(
            extractor.extract("  ").await,
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_extract_propagates_provider_error() {
        let extractor = TaskExtractor::new(Arc::new(MockProvider::failing()));
        assert!(extractor.extract("Riya: I'll do it").await.is_err());
    }
}
