//! LLM types — backend-neutral conversation turns and errors.

use serde::{Deserialize, Serialize};

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by the generative-AI backend client.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// The required API key environment variable is not set (or empty).
    #[error("missing API key: env var {var} not set")]
    MissingApiKey { var: String },

    /// The HTTP request to the backend failed.
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The backend returned a non-success HTTP status.
    #[error("API response error: status {status}")]
    ApiResponse { status: u16, body: String },

    /// The backend response body could not be deserialized.
    #[error("API response parse failed: {0}")]
    ApiParse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CONVERSATION TURNS
// =============================================================================

/// Originator of a conversation turn, in the backend's role vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Model,
}

/// A single turn in the running conversation sent to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: TurnRole,
    pub text: String,
}

impl ChatTurn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: TurnRole::User, text: text.into() }
    }

    #[must_use]
    pub fn model(text: impl Into<String>) -> Self {
        Self { role: TurnRole::Model, text: text.into() }
    }
}

/// Response from a backend chat call.
///
/// `text` may be empty when the backend answered without any usable text
/// (callers decide how to surface that).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
}

// =============================================================================
// CHAT MODEL TRAIT
// =============================================================================

/// Backend-neutral async trait for generative chat. Enables mocking in tests.
#[async_trait::async_trait]
pub trait ChatModel: Send + Sync {
    /// Send the persona, sampling temperature, running history, and the next
    /// user message to the backend and return its reply.
    ///
    /// # Errors
    ///
    /// Returns an [`LlmError`] if the request fails or the response is
    /// malformed.
    async fn send(
        &self,
        system: &str,
        temperature: f32,
        history: &[ChatTurn],
        message: &str,
    ) -> Result<ChatReply, LlmError>;
}
