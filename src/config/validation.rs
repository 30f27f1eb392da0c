//! Configuration validation
//!
//! Validates configuration and reports issues.

use super::types::Config;

/// Result of configuration validation
#[derive(Debug, Clone)]
pub struct ConfigValidationResult {
    /// Whether the config is valid
    pub valid: bool,
    /// Validation errors (critical)
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings (non-critical)
    pub warnings: Vec<ValidationIssue>,
}

impl ConfigValidationResult {
    /// Create a valid result
    pub fn valid() -> Self {
        ConfigValidationResult {
            valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Add an error
    pub fn with_error(mut self, issue: ValidationIssue) -> Self {
        self.valid = false;
        self.errors.push(issue);
        self
    }

    /// Add a warning
    pub fn with_warning(mut self, issue: ValidationIssue) -> Self {
        self.warnings.push(issue);
        self
    }
}

/// A validation issue
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Path to the config field
    pub path: String,
    /// Issue message
    pub message: String,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl ValidationIssue {
    /// Create a new issue
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationIssue {
            path: path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> ConfigValidationResult {
    let mut result = ConfigValidationResult::valid();

    result = validate_provider_config(config, result);
    result = validate_memory_config(config, result);
    result = validate_embedding_config(config, result);

    result
}

fn validate_provider_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    use secrecy::ExposeSecret;

    if config.openrouter.api_key.expose_secret().is_empty() {
        result = result.with_warning(
            ValidationIssue::new(
                "openrouter.api_key",
                "No OpenRouter API key configured. Answers fall back to the raw memory lines and transcripts cannot be ingested.",
            )
            .with_suggestion("Set OPENROUTER_API_KEY environment variable or configure openrouter.api_key"),
        );
    }

    result
}

fn validate_memory_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    if config.memory.dimension == 0 {
        result = result.with_error(ValidationIssue::new(
            "memory.dimension",
            "Embedding dimension must be greater than zero",
        ));
    }
    if config.memory.top_k == 0 {
        result = result.with_error(
            ValidationIssue::new("memory.top_k", "top_k must be greater than zero")
                .with_suggestion("The default is 3"),
        );
    }
    if config.memory.max_context_lines == 0 {
        result = result.with_error(
            ValidationIssue::new(
                "memory.max_context_lines",
                "max_context_lines must be greater than zero",
            )
            .with_suggestion("The default is 3"),
        );
    }
    if config.memory.index_file == config.memory.texts_file {
        result = result.with_error(ValidationIssue::new(
            "memory.texts_file",
            "Index and text files must be distinct",
        ));
    }

    result
}

fn validate_embedding_config(config: &Config, mut result: ConfigValidationResult) -> ConfigValidationResult {
    use crate::memory::embedding::ModelChoice;

    match config.embedding.model.parse::<ModelChoice>() {
        Ok(choice) if choice.dimensions() != config.memory.dimension => {
            result = result.with_error(ValidationIssue::new(
                "memory.dimension",
                format!(
                    "Model {} produces {} dimensions, memory.dimension is {}",
                    config.embedding.model,
                    choice.dimensions(),
                    config.memory.dimension
                ),
            ));
        }
        Ok(_) => {}
        Err(e) => {
            result = result.with_error(
                ValidationIssue::new("embedding.model", e.to_string())
                    .with_suggestion("Use all-minilm-l6-v2, multilingual-e5-small or bge-small-en-v1.5"),
            );
        }
    }

    result
}
