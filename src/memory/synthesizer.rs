//! Answer synthesis from reduced memory context
//!
//! One language-model call turns the reduced context and the question into
//! a single sentence. Any failure along the way (no provider, request error,
//! empty reply) returns the context itself, so a question is always answered.

use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::agent::prompts::{PromptTemplate, SYNTHESIS_SYSTEM_PROMPT, SYNTHESIS_TEMPLATE};
use crate::agent::{GenerationOptions, Message};
use crate::core::LlmProvider;
use crate::error::{Error, Result};

/// Meta phrases that signal the model answered with options or commentary
const META_PHRASES: [&str; 9] = [
    "Option",
    "option",
    "suggestion",
    "example",
    "Here are",
    "Here's",
    "Here’s",
    "Alternative",
    "Let's refine",
];

type ProviderFactory = Box<dyn Fn() -> Result<Arc<dyn LlmProvider>> + Send + Sync>;

/// Turns reduced context plus a query into one natural sentence
pub struct AnswerSynthesizer {
    factory: ProviderFactory,
    provider: OnceCell<Arc<dyn LlmProvider>>,
}

impl AnswerSynthesizer {
    /// Build the provider with `factory` on first use and reuse it after.
    /// A factory error is retried on the next answer.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<Arc<dyn LlmProvider>> + Send + Sync + 'static,
    {
        AnswerSynthesizer {
            factory: Box::new(factory),
            provider: OnceCell::new(),
        }
    }

    /// Use an already-built provider
    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        AnswerSynthesizer {
            factory: Box::new(|| Err(Error::Internal("provider already set".into()))),
            provider: OnceCell::new_with(Some(provider)),
        }
    }

    /// Never calls a model; answers are the reduced context verbatim
    pub fn disabled() -> Self {
        Self::new(|| Err(Error::Config("answer synthesis is disabled".into())))
    }

    /// Answer `query` from `context`. Never fails.
    pub async fn answer(&self, context: &str, query: &str) -> String {
        match self.try_answer(context, query).await {
            Ok(answer) if !answer.is_empty() => answer,
            Ok(_) => {
                debug!("Model returned an empty answer, using context verbatim");
                context.to_string()
            }
            Err(e) => {
                warn!(error = %e, "Answer synthesis failed, using context verbatim");
                context.to_string()
            }
        }
    }

    async fn try_answer(&self, context: &str, query: &str) -> Result<String> {
        let provider = self
            .provider
            .get_or_try_init(|| async { (self.factory)() })
            .await?;

        let prompt = PromptTemplate::new("synthesis", SYNTHESIS_TEMPLATE)?.render(
            &serde_json::json!({ "query": query, "context": context }),
        )?;

        let messages = [
            Message::system(SYNTHESIS_SYSTEM_PROMPT),
            Message::user(prompt),
        ];
        let response = provider
            .generate(&messages, &GenerationOptions::brief())
            .await?;

        Ok(clean_answer(&response.content))
    }
}

/// Reduce a model reply to its first line
pub fn clean_answer(reply: &str) -> String {
    let reply = reply.trim();
    if META_PHRASES.iter().any(|p| reply.contains(p)) {
        debug!("Model reply contained a meta phrase, keeping its first line");
    }
    reply.lines().next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::testing::MockProvider;

    const CONTEXT: &str = "Riya → Finalize campaign (Deadline: Friday)";

    #[test]
    fn test_clean_answer_keeps_first_line() {
        assert_eq!(
            clean_answer("  Riya finalizes the campaign by Friday.\nOption 2: ask Arjun."),
            "Riya finalizes the campaign by Friday."
        );
        assert_eq!(clean_answer("Here's the plan:\n- a\n- b"), "Here's the plan:");
        assert_eq!(clean_answer(""), "");
    }

    #[tokio::test]
    async fn test_answer_uses_model_reply() {
        let provider = Arc::new(MockProvider::replying(
            "Riya has to finalize the campaign by Friday.\nAlternative: ask her.",
        ));
        let synthesizer = AnswerSynthesizer::with_provider(provider.clone());

        let answer = synthesizer.answer(CONTEXT, "deadline for Riya").await;

        assert_eq!(answer, "Riya has to finalize the campaign by Friday.");
        assert_eq!(provider.calls(), 1);
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.contains("Question: deadline for Riya"));
        assert!(prompt.contains(CONTEXT));
    }

    #[tokio::test]
    async fn test_failure_returns_context_verbatim() {
        let provider = Arc::new(MockProvider::failing());
        let synthesizer = AnswerSynthesizer::with_provider(provider.clone());

        assert_eq!(synthesizer.answer(CONTEXT, "deadline").await, CONTEXT);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_empty_reply_returns_context() {
        let synthesizer = AnswerSynthesizer::with_provider(Arc::new(MockProvider::replying("  \n ")));
        assert_eq!(synthesizer.answer(CONTEXT, "deadline").await, CONTEXT);
    }

    #[tokio::test]
    async fn test_provider_built_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let builds = Arc::new(AtomicUsize::new(0));
        let counter = builds.clone();
        let synthesizer = AnswerSynthesizer::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Arc::new(MockProvider::replying("Friday.")) as Arc<dyn LlmProvider>)
        });

        assert_eq!(builds.load(Ordering::SeqCst), 0);
        synthesizer.answer(CONTEXT, "when").await;
        synthesizer.answer(CONTEXT, "when").await;
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_disabled_returns_context() {
        let synthesizer = AnswerSynthesizer::disabled();
        assert_eq!(synthesizer.answer(CONTEXT, "when").await, CONTEXT);
    }
}
