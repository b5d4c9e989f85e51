//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! single conversation lives behind one async mutex, so chat mutations are
//! serialized and log appends happen in causal order even though each send
//! suspends on the backend round-trip.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::catalog::{self, Order, Product};
use crate::llm::ChatModel;
use crate::services::chat::ChatService;
use crate::services::conversation::Conversation;
use crate::services::delay::{Delay, TokioDelay};

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum — all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    /// The featured demo product.
    pub product: Arc<Product>,
    /// The demo order history.
    pub orders: Arc<Vec<Order>>,
    /// Session manager. Offline (canned replies) when built without a model.
    pub chat: Arc<ChatService>,
    /// The one conversation, serialized behind a single writer.
    pub conversation: Arc<Mutex<Conversation>>,
    /// Sleep seam for the simulated image-review and handoff latencies.
    pub delay: Arc<dyn Delay>,
}

impl AppState {
    #[must_use]
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self::with_delay(model, Arc::new(TokioDelay))
    }

    #[must_use]
    pub fn with_delay(model: Option<Arc<dyn ChatModel>>, delay: Arc<dyn Delay>) -> Self {
        Self {
            product: Arc::new(catalog::demo_product()),
            orders: Arc::new(catalog::demo_orders()),
            chat: Arc::new(ChatService::new(model)),
            conversation: Arc::new(Mutex::new(Conversation::new())),
            delay,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
