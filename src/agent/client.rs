//! OpenRouter API client

use crate::agent::types::*;
use crate::config::OpenRouterConfig;
use crate::core::provider::{LlmProvider, LlmResponse, ProviderMeta, UsageStats};
use crate::error::{Error, Result};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use reqwest::{header, Client};
use secrecy::ExposeSecret;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenRouter API client
#[derive(Clone)]
pub struct OpenRouterClient {
    /// HTTP client
    client: Client,
    /// Configuration
    config: OpenRouterConfig,
    /// Provider metadata
    meta: ProviderMeta,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        if config.api_key.expose_secret().is_empty() {
            return Err(Error::Config("OPENROUTER_API_KEY is required".to_string()));
        }

        let mut headers = header::HeaderMap::new();

        // Add authorization header
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!(
                "Bearer {}",
                config.api_key.expose_secret()
            ))
            .map_err(|e| Error::Config(format!("Invalid API key format: {}", e)))?,
        );

        // Add OpenRouter-specific headers
        if let Some(ref site_url) = config.site_url {
            if let Ok(value) = header::HeaderValue::from_str(site_url) {
                headers.insert("HTTP-Referer", value);
            }
        }
        if let Some(ref site_name) = config.site_name {
            if let Ok(value) = header::HeaderValue::from_str(site_name) {
                headers.insert("X-Title", value);
            }
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let meta = ProviderMeta {
            id: "openrouter".to_string(),
            name: "OpenRouter".to_string(),
            base_url: config.base_url.clone(),
        };

        Ok(OpenRouterClient {
            client,
            config,
            meta,
        })
    }

    /// Create a chat completion with a specific model
    pub async fn chat_with_model(
        &self,
        model: &str,
        messages: Vec<Message>,
        options: &GenerationOptions,
    ) -> Result<ChatCompletionResponse> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            stop: options.stop.clone(),
            stream: Some(false),
        };

        self.send_with_retry(&request).await
    }

    /// Send a request, retrying transient failures up to `max_retries` times
    async fn send_with_retry(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        let policy = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(500))
            .with_max_elapsed_time(Some(Duration::from_secs(self.config.timeout_secs)))
            .build();

        let max_retries = self.config.max_retries;
        let attempts = AtomicU32::new(0);
        let attempts = &attempts;

        backoff::future::retry(policy, || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed);
            self.send_request(request).await.map_err(|e| {
                if e.is_retryable() && attempt < max_retries {
                    warn!(attempt = attempt + 1, error = %e, "Retrying OpenRouter request");
                    backoff::Error::transient(e)
                } else {
                    backoff::Error::permanent(e)
                }
            })
        })
        .await
    }

    /// Send a request to the OpenRouter API
    async fn send_request(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        debug!("Sending request to OpenRouter: model={}", request.model);

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();

        if status.is_success() {
            let body = response.json::<ChatCompletionResponse>().await?;

            if let Some(ref usage) = body.usage {
                info!(
                    "OpenRouter response: model={}, tokens={}",
                    body.model, usage.total_tokens
                );
            }

            Ok(body)
        } else {
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!("Rate limit exceeded: {}", error_text);
                Err(Error::RateLimit(error_text))
            } else if status.as_u16() == 401 {
                Err(Error::Unauthorized("Invalid API key".to_string()))
            } else if status.as_u16() == 408 || status.as_u16() == 504 {
                Err(Error::Timeout(error_text))
            } else {
                Err(Error::OpenRouter(format!(
                    "API error ({}): {}",
                    status, error_text
                )))
            }
        }
    }
}

#[async_trait]
impl LlmProvider for OpenRouterClient {
    fn meta(&self) -> &ProviderMeta {
        &self.meta
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }

    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<LlmResponse> {
        let model = options
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);

        let response = self
            .chat_with_model(model, messages.to_vec(), options)
            .await?;

        let choice = response.choices.into_iter().next();

        Ok(LlmResponse {
            model: response.model,
            content: choice
                .as_ref()
                .map(|c| c.message.content.clone())
                .unwrap_or_default(),
            finish_reason: choice.and_then(|c| c.finish_reason),
            usage: response.usage.map(|u| UsageStats {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            }),
        })
    }
}
