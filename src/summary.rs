//! Conversational summary generation
//!
//! Gemini-backed client for turning scoring results or free-form chat into a
//! short supportive reply. The chatbot only sees the [`SummaryGenerator`]
//! trait; failures surface as errors the dispatcher replaces with a fixed
//! fallback message.

use crate::error::EngineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Fixed reply used when the summary generator fails
pub const SUMMARY_FALLBACK: &str = "Oops, I had trouble thinking that through. Mind trying again?";

/// Default Gemini model
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Capability interface for the external summary generator
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Generate a reply for `prompt`; any failure is surfaced as an error
    async fn summarize(&self, prompt: &str) -> Result<String, EngineError>;
}

/// Configuration for the Gemini client
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,

    /// Model to use (default: gemini-2.5-flash)
    pub model: String,

    /// API base URL, overridable for tests
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("GEMINI_API_KEY")
                .or_else(|_| env::var("GOOGLE_API_KEY"))
                .unwrap_or_default(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Gemini-backed summary generator
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    thinking_config: ThinkingConfig,
}

/// Thinking is pinned off; replies should come back immediately
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GeminiClient {
    /// Create a client with custom config
    pub fn new(config: GeminiConfig) -> Result<Self, EngineError> {
        if config.api_key.is_empty() {
            return Err(EngineError::ConfigError(
                "GEMINI_API_KEY not set".to_string(),
            ));
        }

        Ok(Self {
            config,
            client: reqwest::Client::new(),
        })
    }

    /// Create with default config
    pub fn with_default() -> Result<Self, EngineError> {
        Self::new(GeminiConfig::default())
    }

    /// Make one generateContent call
    async fn call_api(&self, prompt: &str) -> Result<String, EngineError> {
        debug!("Calling Gemini API");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url, self.config.model
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(EngineError::SummaryApiError(format!(
                "API request failed with status {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| EngineError::SummaryApiError(format!("Failed to parse response: {}", e)))?;

        api_response
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.clone())
            .ok_or_else(|| EngineError::SummaryApiError("Empty response from API".to_string()))
    }
}

#[async_trait]
impl SummaryGenerator for GeminiClient {
    async fn summarize(&self, prompt: &str) -> Result<String, EngineError> {
        self.call_api(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config_uses_flash_model() {
        let config = GeminiConfig::default();
        assert_eq!(config.model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = GeminiConfig {
            api_key: String::new(),
            ..GeminiConfig::default()
        };
        assert!(matches!(
            GeminiClient::new(config),
            Err(EngineError::ConfigError(_))
        ));
    }

    #[test]
    fn test_request_wire_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };

        let json: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&request).unwrap()).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(
            json["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            0
        );
    }

    #[test]
    fn test_response_wire_shape() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "You're doing great!"}]
                }
            }]
        }"#;

        let response: GenerateContentResponse = serde_json::from_str(json).unwrap();
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone());

        assert_eq!(text, Some("You're doing great!".to_string()));
    }

    #[tokio::test]
    #[ignore] // Requires GEMINI_API_KEY
    async fn test_live_summarize() {
        let client = GeminiClient::with_default().unwrap();
        let reply = client
            .summarize("Say a short encouraging sentence.")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
