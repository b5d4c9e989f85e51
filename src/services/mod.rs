//! Support-chat services: session management, context injection, and the
//! conversation state machine.

pub mod chat;
pub mod context;
pub mod conversation;
pub mod delay;
