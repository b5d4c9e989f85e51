//! Context injection — grounding outgoing messages in what the user is viewing.
//!
//! DESIGN
//! ======
//! When support is opened from a product or order screen, that item becomes
//! the active chat context. Before a user message is forwarded to the model,
//! a structured annotation with the item's concrete facts is appended so the
//! reply can cite real data instead of guessing. Pure formatting: the same
//! context always produces byte-identical annotations.

use crate::catalog::{Order, Product};

/// What the user was viewing when they opened support. At most one item is
/// active; opening chat with a new context replaces the previous one.
#[derive(Debug, Clone, Default)]
pub enum ChatContext {
    /// No specific item — general support.
    #[default]
    General,
    /// Asking about a product detail page.
    Product(Product),
    /// Asking about a specific order.
    Order(Order),
}

impl ChatContext {
    /// The structured annotation for this context, or `None` for general chat.
    #[must_use]
    pub fn annotation(&self) -> Option<String> {
        let detail = match self {
            Self::General => return None,
            Self::Product(p) => format!("商品: {}, 价格: ¥{}, 库存: {}.", p.title, p.price, p.stock),
            Self::Order(o) => format!("订单号: {}, 状态: {}, 商品: {}.", o.id, o.status, o.product.title),
        };
        Some(format!("\n[系统上下文]: 用户当前正在浏览: {detail}"))
    }

    /// Append the context annotation to an outgoing user message.
    #[must_use]
    pub fn inject(&self, user_text: &str) -> String {
        match self.annotation() {
            Some(annotation) => format!("{user_text}{annotation}"),
            None => user_text.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod tests;
