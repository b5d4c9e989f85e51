//! Gemini `generateContent` API client.
//!
//! DESIGN
//! ======
//! Thin HTTP wrapper around the Generative Language API. The backend endpoint
//! is stateless, so each call replays the running turn history alongside the
//! persona and the new message — conversational memory lives with the caller.
//! Pure parsing in `parse_response` for testability.

use std::time::Duration;

use serde::Serialize;

use super::config::GeminiConfig;
use super::types::{ChatModel, ChatReply, ChatTurn, LlmError, TurnRole};

// =============================================================================
// CLIENT
// =============================================================================

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Build a Gemini client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the HTTP client fails
    /// to build.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(GeminiConfig::from_env()?)
    }

    /// Build a Gemini client from a parsed typed config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: GeminiConfig) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| LlmError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, api_key: config.api_key, model: config.model, base_url: config.base_url })
    }

    /// Return the configured model name (e.g. `"gemini-2.5-flash"`).
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        system: &str,
        temperature: f32,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatReply, LlmError> {
        let mut contents: Vec<WireContent<'_>> = history.iter().map(WireContent::from).collect();
        contents.push(WireContent { role: "user", parts: vec![WirePart { text: message }] });

        let body = ApiRequest {
            system_instruction: WireSystem { parts: vec![WirePart { text: system }] },
            contents,
            generation_config: WireGenerationConfig { temperature },
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::ApiRequest(e.to_string()))?;

        if status != 200 {
            return Err(LlmError::ApiResponse { status, body: text });
        }

        parse_response(&text)
    }
}

#[async_trait::async_trait]
impl ChatModel for GeminiClient {
    async fn send(
        &self,
        system: &str,
        temperature: f32,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatReply, LlmError> {
        self.generate(system, temperature, history, message).await
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct ApiRequest<'a> {
    #[serde(rename = "systemInstruction")]
    system_instruction: WireSystem<'a>,
    contents: Vec<WireContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: WireGenerationConfig,
}

#[derive(Serialize)]
struct WireSystem<'a> {
    parts: Vec<WirePart<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    role: &'a str,
    parts: Vec<WirePart<'a>>,
}

impl<'a> From<&'a ChatTurn> for WireContent<'a> {
    fn from(turn: &'a ChatTurn) -> Self {
        let role = match turn.role {
            TurnRole::User => "user",
            TurnRole::Model => "model",
        };
        Self { role, parts: vec![WirePart { text: &turn.text }] }
    }
}

#[derive(Serialize)]
struct WirePart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct WireGenerationConfig {
    temperature: f32,
}

#[derive(serde::Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata", default)]
    usage: Option<UsageMetadata>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(serde::Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount", default)]
    prompt_tokens: u64,
    #[serde(rename = "candidatesTokenCount", default)]
    candidate_tokens: u64,
}

// =============================================================================
// PARSING
// =============================================================================

/// Parse a `generateContent` response body.
///
/// A response without candidates or text parts yields an empty `text` — the
/// session layer maps that to its canned empty-reply string.
fn parse_response(json: &str) -> Result<ChatReply, LlmError> {
    let api: ApiResponse = serde_json::from_str(json).map_err(|e| LlmError::ApiParse(e.to_string()))?;

    let text = api
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let (input_tokens, output_tokens) = api
        .usage
        .map_or((0, 0), |u| (u.prompt_tokens, u.candidate_tokens));

    Ok(ChatReply { text, input_tokens, output_tokens })
}

#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;
