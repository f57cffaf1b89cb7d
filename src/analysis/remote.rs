//! OpenAI-compatible chat completion analyzer
//!
//! Works against Groq and OpenAI. The request asks for a JSON object
//! response; the message content is parsed leniently through
//! [`SeedAnalysis::from_json_value`].

use reqwest::blocking::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::{SeedAnalysis, SemanticAnalyzer};
use crate::config::{AnalyzerConfig, ProviderKind};
use crate::{PaletteError, Result};

const SYSTEM_PROMPT: &str = "You are a color theory expert and designer. Given a text prompt, \
analyze its emotional tone and suggest fitting colors. Respond with a JSON object of the form \
{\"mood\": \"short mood description\", \"base_color\": \"#RRGGBB\", \
\"color_names\": [\"name1\", \"name2\", \"name3\", \"name4\", \"name5\"]}. \
Color names should be creative and evocative. Consider emotional tone (warm, cool, energetic, calm), \
cultural associations, time of day or season, and professional context.";

/// Remote analyzer for a chat completions endpoint
#[derive(Clone)]
pub struct ChatCompletionAnalyzer {
    provider: ProviderKind,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    max_tokens: u32,
    client: Client,
}

impl std::fmt::Debug for ChatCompletionAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionAnalyzer")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ChatCompletionAnalyzer {
    /// Build from configuration
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::AdapterUnavailable`] for the keyword provider,
    /// a missing API key, or an HTTP client that cannot be built.
    pub fn from_config(config: &AnalyzerConfig) -> Result<Self> {
        let provider = config.provider;
        let unavailable = |reason: &str| PaletteError::adapter(provider.as_str(), reason);

        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| unavailable("no API key configured"))?;
        let endpoint = config
            .resolved_endpoint()
            .ok_or_else(|| unavailable("no endpoint for provider"))?;
        let model = config
            .resolved_model()
            .ok_or_else(|| unavailable("no model for provider"))?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| unavailable(&format!("HTTP client: {}", e)))?;

        Ok(Self {
            provider,
            endpoint,
            model,
            api_key,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": format!("Generate a color palette for: {}", prompt)}
            ],
            "response_format": {"type": "json_object"},
            "temperature": self.temperature,
            "max_tokens": self.max_tokens
        })
    }

    fn unavailable(&self, reason: impl Into<String>) -> PaletteError {
        PaletteError::adapter(self.provider.as_str(), reason)
    }
}

/// Parse a chat completion response body into an analysis
///
/// # Errors
///
/// Returns [`PaletteError::AdapterUnavailable`] when the body has no message
/// content or the content is not JSON.
pub fn parse_completion(provider: &str, body: &Value) -> Result<SeedAnalysis> {
    let content = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| PaletteError::adapter(provider, "response has no message content"))?;

    let value: Value = serde_json::from_str(content)
        .map_err(|e| PaletteError::adapter(provider, format!("message content is not JSON: {}", e)))?;
    Ok(SeedAnalysis::from_json_value(&value))
}

impl SemanticAnalyzer for ChatCompletionAnalyzer {
    fn name(&self) -> &'static str {
        self.provider.as_str()
    }

    fn analyze(&self, prompt: &str) -> Result<SeedAnalysis> {
        debug!(provider = self.name(), model = %self.model, "requesting prompt analysis");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| self.unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(self.unavailable(format!("HTTP {}", status)));
        }

        let body: Value = response
            .json()
            .map_err(|e| self.unavailable(format!("invalid response body: {}", e)))?;
        parse_completion(self.name(), &body)
    }
}
