//! Prompt templates and engineering

use crate::error::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// System instruction for answer synthesis
pub const SYNTHESIS_SYSTEM_PROMPT: &str = "You are a professional meeting assistant. \
Read the context below and answer the user's question in one short, clear, natural sentence only. \
Avoid lists, options, or restating the question.";

/// User prompt for answer synthesis
pub const SYNTHESIS_TEMPLATE: &str = "Question: {{query}}\nContext:\n{{context}}";

/// Prompt for extracting action items from a transcript
pub const TASK_EXTRACTION_TEMPLATE: &str = r#"You are an AI agent that extracts actionable tasks from meeting notes.
Return the output in valid JSON format as a list of objects with keys:
person, task, deadline, and status (default status is 'Pending').

Example:
Input:
Riya will finalize the campaign by Friday.
Arjun to contact vendors tomorrow.

Output:
[
  {"person": "Riya", "task": "Finalize the campaign", "deadline": "Friday", "status": "Pending"},
  {"person": "Arjun", "task": "Contact vendors", "deadline": "Tomorrow", "status": "Pending"}
]

Now extract tasks from this transcript:
{{transcript}}"#;

/// A prompt template using Handlebars syntax
pub struct PromptTemplate {
    /// Template name
    name: String,
    /// Handlebars registry
    registry: Handlebars<'static>,
}

impl PromptTemplate {
    /// Create a new prompt template
    pub fn new(name: impl Into<String>, template: &str) -> Result<Self> {
        let name = name.into();
        let mut registry = Handlebars::new();
        // Prompts are plain text; quotes and arrows must reach the model as-is
        registry.register_escape_fn(handlebars::no_escape);

        registry
            .register_template_string(&name, template)
            .map_err(|e| Error::Internal(format!("Invalid template: {}", e)))?;

        Ok(PromptTemplate { name, registry })
    }

    /// Render the template with given data
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String> {
        self.registry
            .render(&self.name, data)
            .map_err(|e| Error::Internal(format!("Template render error: {}", e)))
    }
}
