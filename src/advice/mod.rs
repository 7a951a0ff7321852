/// Advice collaborator
///
/// Fetches a one-sentence affirmation for a mood. Providers may fail; the
/// `AdviceCollaborator` wrapper never does. It applies a fixed timeout and
/// substitutes fallback text for empty answers, provider errors, timeouts
/// and crashed fetches.

pub mod gemini;
pub mod offline;

pub use gemini::GeminiAdviceProvider;
pub use offline::OfflineAdviceProvider;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::config::AdviceConfig;
use crate::domain::Mood;

/// Used when the provider answers with nothing
pub const EMPTY_ADVICE_FALLBACK: &str = "Take it slowly today. 🌿";
/// Used when the provider fails or times out
pub const FAILED_ADVICE_FALLBACK: &str = "The wind carries gentle thoughts your way.";
/// Used when the fetch itself crashed
pub const GENERIC_ADVICE_FALLBACK: &str = "Be gentle with yourself today.";

/// What the provider is asked about
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceRequest {
    pub mood: Mood,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
}

impl AdviceRequest {
    pub fn for_mood(mood: Mood) -> Self {
        Self { mood, task: None }
    }
}

/// Errors a provider can report
#[derive(Error, Debug)]
pub enum AdviceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Provider is not configured: {0}")]
    NotConfigured(String),
}

/// Source of affirmations
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    /// Produce a short affirmation for the request
    async fn advice(&self, request: &AdviceRequest) -> Result<String, AdviceError>;

    /// Short provider name for logs
    fn name(&self) -> &str;
}

/// Infallible front for an `AdviceProvider`
#[derive(Clone)]
pub struct AdviceCollaborator {
    provider: Arc<dyn AdviceProvider>,
    timeout: Duration,
}

impl AdviceCollaborator {
    pub fn new(provider: Arc<dyn AdviceProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Collaborator backed by the built-in offline phrases
    pub fn offline() -> Self {
        Self::new(Arc::new(OfflineAdviceProvider::new()), Duration::from_secs(1))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Fetch advice; always yields displayable text
    pub async fn get_advice(&self, request: AdviceRequest) -> String {
        let provider = Arc::clone(&self.provider);
        let mood = request.mood;
        let mut fetch = tokio::spawn(async move { provider.advice(&request).await });

        match tokio::time::timeout(self.timeout, &mut fetch).await {
            Ok(Ok(Ok(text))) => {
                let text = text.trim();
                if text.is_empty() {
                    EMPTY_ADVICE_FALLBACK.to_string()
                } else {
                    text.to_string()
                }
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!("{} advice failed for {}: {}", self.provider.name(), mood, e);
                FAILED_ADVICE_FALLBACK.to_string()
            }
            Ok(Err(e)) => {
                tracing::error!("{} advice task crashed: {}", self.provider.name(), e);
                GENERIC_ADVICE_FALLBACK.to_string()
            }
            Err(_) => {
                fetch.abort();
                tracing::warn!(
                    "{} advice timed out after {:?} for {}",
                    self.provider.name(),
                    self.timeout,
                    mood
                );
                FAILED_ADVICE_FALLBACK.to_string()
            }
        }
    }
}

/// Pick the provider for a configuration
///
/// Uses Gemini when an API key is configured and the client builds;
/// otherwise the offline phrases.
pub fn collaborator_for(config: &AdviceConfig) -> AdviceCollaborator {
    if !config.has_api_key() {
        tracing::info!("No advice API key configured, using offline advice");
        return AdviceCollaborator::offline();
    }

    match GeminiAdviceProvider::new(config) {
        Ok(provider) => {
            tracing::info!("Using {} for advice", config.model);
            AdviceCollaborator::new(Arc::new(provider), config.timeout)
        }
        Err(e) => {
            tracing::warn!("Could not set up remote advice ({}), using offline advice", e);
            AdviceCollaborator::offline()
        }
    }
}
