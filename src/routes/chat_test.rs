use std::sync::Arc;

use super::*;
use crate::services::chat::OFFLINE_REPLY;
use crate::services::conversation::{MessageBody, MessageSender};
use crate::services::delay::Delay;
use crate::state::AppState;
use crate::state::test_helpers::test_app_state;

fn last_text(snapshot: &ChatSnapshot) -> &str {
    match &snapshot.messages.last().unwrap().body {
        MessageBody::Text { text } | MessageBody::Image { text, .. } => text,
        MessageBody::Card { title, .. } => title,
    }
}

// =========================================================================
// open
// =========================================================================

#[tokio::test]
async fn open_product_greets_and_suggests_product_replies() {
    let state = test_app_state();
    let snapshot = open(State(state.clone()), Json(OpenChatBody::Product))
        .await
        .unwrap()
        .0;

    assert!(!snapshot.online);
    assert_eq!(snapshot.phase, ChatPhase::Open);
    assert_eq!(snapshot.messages.len(), 1);
    assert!(last_text(&snapshot).contains(&state.product.title));
    assert_eq!(snapshot.quick_replies.len(), 3);
}

#[tokio::test]
async fn open_unknown_order_is_not_found() {
    let state = test_app_state();
    let result = open(
        State(state),
        Json(OpenChatBody::Order { order_id: "ORD-000000".into() }),
    )
    .await;
    assert!(matches!(result, Err(StatusCode::NOT_FOUND)));
}

#[tokio::test]
async fn open_order_context_clears_previous_topic() {
    let state = test_app_state();
    open(State(state.clone()), Json(OpenChatBody::Product))
        .await
        .unwrap();
    send(State(state.clone()), Json(SendBody { text: "有货吗".into() })).await;

    let order_id = state.orders[0].id.clone();
    let snapshot = open(State(state), Json(OpenChatBody::Order { order_id: order_id.clone() }))
        .await
        .unwrap()
        .0;

    // Fresh conversation per topic: only the new greeting survives.
    assert_eq!(snapshot.messages.len(), 1);
    assert!(last_text(&snapshot).contains(&order_id));
    assert_eq!(snapshot.quick_replies.len(), 2);
}

// =========================================================================
// send
// =========================================================================

#[tokio::test]
async fn offline_send_grows_log_by_two_with_offline_reply() {
    let state = test_app_state();
    open(State(state.clone()), Json(OpenChatBody::General))
        .await
        .unwrap();

    let snapshot = send(State(state), Json(SendBody { text: "请问退货流程？".into() })).await.0;

    // Greeting + user message + canned offline reply.
    assert_eq!(snapshot.messages.len(), 3);
    assert_eq!(snapshot.messages[1].sender, MessageSender::User);
    assert_eq!(snapshot.messages[2].sender, MessageSender::Bot);
    assert_eq!(last_text(&snapshot), OFFLINE_REPLY);
    assert!(!snapshot.waiting);
}

#[tokio::test]
async fn whitespace_send_changes_nothing() {
    let state = test_app_state();
    open(State(state.clone()), Json(OpenChatBody::General))
        .await
        .unwrap();

    let snapshot = send(State(state), Json(SendBody { text: "   ".into() })).await.0;
    assert_eq!(snapshot.messages.len(), 1);
}

// =========================================================================
// attach
// =========================================================================

#[tokio::test]
async fn attach_grows_log_by_two_without_backend() {
    let state = test_app_state();
    open(State(state.clone()), Json(OpenChatBody::General))
        .await
        .unwrap();

    let snapshot = attach(State(state), Json(AttachBody { src: "blob:upload-1".into() })).await.0;

    assert_eq!(snapshot.messages.len(), 3);
    assert!(matches!(
        &snapshot.messages[1].body,
        MessageBody::Image { src, .. } if src == "blob:upload-1"
    ));
    assert_eq!(snapshot.messages[2].sender, MessageSender::Bot);
    assert!(!snapshot.waiting);
}

// =========================================================================
// handoff
// =========================================================================

/// Sleep seam that blocks until the test releases it, keeping the first
/// handoff in flight while a second request arrives.
struct GatedDelay {
    notify: tokio::sync::Notify,
}

#[async_trait::async_trait]
impl Delay for GatedDelay {
    async fn sleep(&self, _duration: std::time::Duration) {
        self.notify.notified().await;
    }
}

#[tokio::test]
async fn concurrent_handoff_requests_append_one_notice() {
    let gate = Arc::new(GatedDelay { notify: tokio::sync::Notify::new() });
    let state = AppState::with_delay(None, gate.clone());
    open(State(state.clone()), Json(OpenChatBody::General))
        .await
        .unwrap();

    let first = tokio::spawn({
        let state = state.clone();
        async move { handoff(State(state)).await.0 }
    });

    // Wait until the first request has flipped the transferring flag.
    loop {
        if state.conversation.lock().await.is_transferring() {
            break;
        }
        tokio::task::yield_now().await;
    }

    // Second request while transferring: no-op beyond the snapshot.
    let second = handoff(State(state.clone())).await.0;
    assert!(second.transferring);
    assert_eq!(second.messages.len(), 1);

    gate.notify.notify_one();
    let first = first.await.unwrap();

    assert!(!first.transferring);
    assert_eq!(first.messages.len(), 2);
    assert_eq!(first.messages[1].sender, MessageSender::System);
}

// =========================================================================
// close
// =========================================================================

#[tokio::test]
async fn close_retains_messages() {
    let state = test_app_state();
    open(State(state.clone()), Json(OpenChatBody::General))
        .await
        .unwrap();

    let snapshot = close(State(state)).await.0;
    assert_eq!(snapshot.phase, ChatPhase::Idle);
    assert_eq!(snapshot.messages.len(), 1);
}
