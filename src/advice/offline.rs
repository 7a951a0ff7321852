/// Offline advice provider
///
/// Answers from a small built-in set of phrases. Used when no remote
/// provider is configured, so the check-in still gets a reply.

use async_trait::async_trait;

use crate::advice::{AdviceError, AdviceProvider, AdviceRequest};
use crate::domain::Mood;

#[derive(Debug, Default)]
pub struct OfflineAdviceProvider;

impl OfflineAdviceProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn phrase_for(mood: Mood) -> &'static str {
        match mood {
            Mood::VerySatisfied => "Let this brightness rest lightly in your hands.",
            Mood::Satisfied => "Enough is a quiet, complete garden.",
            Mood::Neutral => "Stillness, too, is a way of moving forward.",
            Mood::Dissatisfied => "Cracked bowls hold tea just as warmly.",
            Mood::Cloudy => "Clouds drift; the sky beneath them stays.",
        }
    }
}

#[async_trait]
impl AdviceProvider for OfflineAdviceProvider {
    async fn advice(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        Ok(Self::phrase_for(request.mood).to_string())
    }

    fn name(&self) -> &str {
        "offline"
    }
}
