/// Gemini-backed advice provider
///
/// Calls the `generateContent` endpoint with a short wabi-sabi style prompt.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::advice::{AdviceError, AdviceProvider, AdviceRequest};
use crate::config::AdviceConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: u32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

pub struct GeminiAdviceProvider {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiAdviceProvider {
    /// Build a provider from config; fails without an API key
    pub fn new(config: &AdviceConfig) -> Result<Self, AdviceError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AdviceError::NotConfigured("missing API key".to_string()))?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("softday-companion/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Prompt sent for a request
pub fn build_prompt(request: &AdviceRequest) -> String {
    let task = match &request.task {
        Some(task) => format!(" They want to do: \"{}\".", task),
        None => String::new(),
    };
    format!(
        "The user is feeling {}.{} Provide a very short, gentle, and poetic piece of encouragement \
         (max 12 words) in a Japanese minimalist philosophy style (Wabi-sabi/Ikigai).",
        request.mood, task
    )
}

fn response_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[async_trait]
impl AdviceProvider for GeminiAdviceProvider {
    async fn advice(&self, request: &AdviceRequest) -> Result<String, AdviceError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(build_prompt(request)),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.8,
                top_k: 40,
                top_p: 0.95,
            },
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdviceError::Status(status.as_u16()));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(response_text(parsed))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
