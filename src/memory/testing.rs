//! Counting test doubles for the embedder and provider seams

use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::agent::{GenerationOptions, Message};
use crate::core::{Embedder, LlmProvider, LlmResponse, ProviderMeta};
use crate::error::{Error, Result};

pub const MOCK_DIMENSION: usize = 8;

/// Bag-of-words embedder: each lowercase word bumps one hashed bucket
#[derive(Default)]
pub struct MockEmbedder {
    calls: AtomicUsize,
    failing: AtomicBool,
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Embedding("mock embedder is down".into()));
        }

        let mut vector = vec![0.0; MOCK_DIMENSION];
        for word in text.split_whitespace() {
            let mut hasher = DefaultHasher::new();
            word.to_lowercase().hash(&mut hasher);
            vector[(hasher.finish() % MOCK_DIMENSION as u64) as usize] += 1.0;
        }
        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        MOCK_DIMENSION
    }
}

/// Provider with a canned reply (or a failure) that records its prompts
pub struct MockProvider {
    meta: ProviderMeta,
    reply: Option<String>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockProvider {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self::build(Some(reply.into()))
    }

    pub fn failing() -> Self {
        Self::build(None)
    }

    fn build(reply: Option<String>) -> Self {
        MockProvider {
            meta: ProviderMeta {
                id: "mock".into(),
                name: "Mock".into(),
                base_url: "http://localhost".into(),
            },
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Content of the last user message sent
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn generate(
        &self,
        messages: &[Message],
        _options: &GenerationOptions,
    ) -> Result<LlmResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(last) = messages.last() {
            self.prompts.lock().unwrap().push(last.content.clone());
        }

        match &self.reply {
            Some(content) => Ok(LlmResponse {
                model: "mock-model".into(),
                content: content.clone(),
                finish_reason: Some("stop".into()),
                usage: None,
            }),
            None => Err(Error::OpenRouter("mock provider is down".into())),
        }
    }
}
