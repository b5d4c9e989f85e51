//! Support-chat API.
//!
//! DESIGN
//! ======
//! Every handler locks the single conversation, applies one state-machine
//! transition, and returns a full snapshot — the client re-renders from the
//! snapshot rather than patching local state. Holding the lock across the
//! backend round-trip is deliberate: it serializes sends, so log appends
//! always land in causal order.
//!
//! Opening chat from a product or order screen clears prior history here at
//! the call site (fresh conversation per topic); closing never clears.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::services::context::ChatContext;
use crate::services::conversation::{ChatPhase, Conversation, HANDOFF_DELAY, IMAGE_ACK_DELAY, Message};
use crate::state::AppState;

// =============================================================================
// WIRE TYPES
// =============================================================================

/// Full view of the chat widget state returned by every chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatSnapshot {
    /// False when no backend credential was configured (offline mode banner).
    pub online: bool,
    pub phase: ChatPhase,
    pub waiting: bool,
    pub transferring: bool,
    pub quick_replies: Vec<String>,
    pub messages: Vec<Message>,
}

async fn snapshot_of(state: &AppState, conversation: &Conversation) -> ChatSnapshot {
    ChatSnapshot {
        online: state.chat.is_online().await,
        phase: conversation.phase(),
        waiting: conversation.is_waiting(),
        transferring: conversation.is_transferring(),
        quick_replies: conversation
            .quick_replies()
            .iter()
            .map(ToString::to_string)
            .collect(),
        messages: conversation.messages().to_vec(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "context", rename_all = "lowercase")]
pub enum OpenChatBody {
    /// Open from the product detail screen.
    Product,
    /// Open from an order row.
    Order { order_id: String },
    /// Open without an active item.
    General,
}

#[derive(Debug, Deserialize)]
pub struct SendBody {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachBody {
    /// Reference to the uploaded image (URL or object handle).
    pub src: String,
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /api/chat` — current widget state.
pub async fn snapshot(State(state): State<AppState>) -> Json<ChatSnapshot> {
    let conversation = state.conversation.lock().await;
    Json(snapshot_of(&state, &conversation).await)
}

/// `POST /api/chat/open` — open the widget with the given context.
pub async fn open(
    State(state): State<AppState>,
    Json(body): Json<OpenChatBody>,
) -> Result<Json<ChatSnapshot>, StatusCode> {
    let context = match body {
        OpenChatBody::Product => Some(ChatContext::Product((*state.product).clone())),
        OpenChatBody::Order { order_id } => {
            let order = state
                .orders
                .iter()
                .find(|o| o.id == order_id)
                .ok_or(StatusCode::NOT_FOUND)?;
            Some(ChatContext::Order(order.clone()))
        }
        OpenChatBody::General => None,
    };

    let mut conversation = state.conversation.lock().await;
    match context {
        // Fresh topic: discard the previous conversation before opening.
        Some(ctx) => {
            conversation.reset();
            conversation.open(ctx);
        }
        None => conversation.open(ChatContext::General),
    }
    Ok(Json(snapshot_of(&state, &conversation).await))
}

/// `POST /api/chat/close` — close the widget, retaining the log.
pub async fn close(State(state): State<AppState>) -> Json<ChatSnapshot> {
    let mut conversation = state.conversation.lock().await;
    conversation.close();
    Json(snapshot_of(&state, &conversation).await)
}

/// `POST /api/chat/send` — send a user message and wait for the bot reply.
pub async fn send(State(state): State<AppState>, Json(body): Json<SendBody>) -> Json<ChatSnapshot> {
    let mut conversation = state.conversation.lock().await;
    conversation.send_text(&body.text, &state.chat).await;
    Json(snapshot_of(&state, &conversation).await)
}

/// `POST /api/chat/attach` — attach an image; scripted reply, no model call.
///
/// The lock is released during the simulated review delay so other chat
/// requests are not blocked behind the timer.
pub async fn attach(State(state): State<AppState>, Json(body): Json<AttachBody>) -> Json<ChatSnapshot> {
    state.conversation.lock().await.attach_image(&body.src);

    state.delay.sleep(IMAGE_ACK_DELAY).await;

    let mut conversation = state.conversation.lock().await;
    conversation.acknowledge_image();
    Json(snapshot_of(&state, &conversation).await)
}

/// `POST /api/chat/handoff` — escalate to a human agent. A repeated request
/// while a handoff is already in flight returns the current snapshot without
/// scheduling a second transfer notice.
pub async fn handoff(State(state): State<AppState>) -> Json<ChatSnapshot> {
    let begun = state.conversation.lock().await.begin_handoff();

    if begun {
        state.delay.sleep(HANDOFF_DELAY).await;
        state.conversation.lock().await.complete_handoff();
    }

    let conversation = state.conversation.lock().await;
    Json(snapshot_of(&state, &conversation).await)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
