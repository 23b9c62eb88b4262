use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::CompletionClient;
use crate::config::{API_KEY_ENV, TranslateConfig};
use crate::error::{Result, VttError};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the Gemini generateContent API
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiClient {
    pub fn new(config: &TranslateConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            VttError::NotConfigured(format!(
                "API key is required. Please configure your Gemini API key or set {}.",
                API_KEY_ENV
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn url(&self) -> String {
        let base = if self.endpoint.ends_with("/v1beta") || self.endpoint.ends_with("/v1") {
            self.endpoint.clone()
        } else {
            format!("{}/v1beta", self.endpoint)
        };
        format!("{}/models/{}:generateContent", base, self.model)
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: prompt.to_string() }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let url = self.url();
        debug!("Sending generateContent request to: {}", url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| VttError::Provider(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| VttError::Provider(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(VttError::Provider(format!("[{}] {}", status, body)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| VttError::Provider(format!("Failed to parse response: {}", e)))?;

        let text = extract_text(&parsed);
        debug!("Raw model response: {}", text);

        if text.trim().is_empty() {
            warn!("Model returned an empty response");
        }

        Ok(text)
    }
}

/// Concatenated text parts of the first candidate
fn extract_text(response: &GenerateContentResponse) -> String {
    response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .map(|part| part.text.as_str())
                .collect::<String>()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> TranslateConfig {
        TranslateConfig {
            api_key: Some("test-key".to_string()),
            ..TranslateConfig::default()
        }
    }

    #[test]
    fn test_url_adds_api_version() {
        let client = GeminiClient::new(&config_with_key()).unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash-exp:generateContent"
        );

        let mut config = config_with_key();
        config.endpoint = "http://localhost:8080/v1/".to_string();
        config.model = "gemini-1.5-flash".to_string();
        let client = GeminiClient::new(&config).unwrap();
        assert_eq!(client.url(), "http://localhost:8080/v1/models/gemini-1.5-flash:generateContent");
    }

    #[test]
    fn test_request_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: "hi".to_string() }],
            }],
            generation_config: GenerationConfig { temperature: 0.5 },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"1. \"a\"\n"},{"text":"2. \"b\""}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(extract_text(&parsed), "1. \"a\"\n2. \"b\"");

        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(extract_text(&parsed), "");
    }
}
