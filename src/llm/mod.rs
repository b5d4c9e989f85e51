//! LLM — Gemini backend adapter for the support-chat assistant.
//!
//! DESIGN
//! ======
//! One backend (Gemini `generateContent`), configured from environment
//! variables. The [`ChatModel`] trait is the seam the rest of the app talks
//! through, so tests can substitute a mock backend.

pub mod config;
pub mod gemini;
pub mod types;

pub use gemini::GeminiClient;
pub use types::{ChatModel, ChatReply, ChatTurn, LlmError, TurnRole};
