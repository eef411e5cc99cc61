pub mod ideas;

pub use ideas::{build_prompt, fallback_ideas, split_titles, IdeaGenerator};

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use trendscope_core::{AppConfig, CoreError, LlmError};

const PROVIDER: &str = "huggingface";

/// A hosted model that turns a prompt into free text.
pub trait TextGenerator {
    async fn generate_text(&self, prompt: &str) -> Result<String, CoreError>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

/// Hugging Face Inference API, text-generation task.
#[derive(Debug, Clone)]
pub struct HuggingFaceProvider {
    http_client: Client,
    api_url: String,
    api_key: String,
    timeout_secs: u64,
}

impl HuggingFaceProvider {
    pub fn new(api_url: String, api_key: String, config: &AppConfig) -> Result<Self, CoreError> {
        let http_client = Client::builder().timeout(config.idea_timeout()).build()?;
        Ok(Self {
            http_client,
            api_url,
            api_key,
            timeout_secs: config.idea_timeout_secs,
        })
    }

    /// `None` when no API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, CoreError> {
        match &config.huggingface_key {
            Some(key) => Ok(Some(Self::new(
                config.huggingface_api_url.clone(),
                key.clone(),
                config,
            )?)),
            None => Ok(None),
        }
    }
}

impl TextGenerator for HuggingFaceProvider {
    async fn generate_text(&self, prompt: &str) -> Result<String, CoreError> {
        info!("Requesting text generation from {}", PROVIDER);
        let response = self
            .http_client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs: prompt })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CoreError::Llm(LlmError::RequestTimeout {
                        provider: PROVIDER.to_string(),
                    })
                } else {
                    CoreError::Network(e)
                }
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let error = match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::InvalidApiKey {
                    provider: PROVIDER.to_string(),
                },
                StatusCode::NOT_FOUND => LlmError::ModelNotAvailable {
                    model: self.api_url.clone(),
                },
                s => LlmError::ServiceUnavailable {
                    provider: PROVIDER.to_string(),
                    status_code: s.as_u16(),
                },
            };
            return Err(error.into());
        }

        let body = response.text().await?;
        let text = parse_generated_text(&body)?;
        debug!(
            "Received {} characters of generated text within {}s timeout",
            text.len(),
            self.timeout_secs
        );
        Ok(text)
    }
}

/// The body must be a JSON list whose first element carries `generated_text`.
fn parse_generated_text(body: &str) -> Result<String, CoreError> {
    let malformed = |details: String| {
        CoreError::Llm(LlmError::InvalidResponseFormat {
            provider: PROVIDER.to_string(),
            details,
        })
    };

    let items: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| malformed(format!("expected a list: {e}")))?;
    let first = items
        .into_iter()
        .next()
        .ok_or_else(|| malformed("empty list".to_string()))?;
    let generated = GeneratedText::deserialize(first)
        .map_err(|e| malformed(format!("first element: {e}")))?;

    Ok(generated.generated_text)
}
