//! Conversation — the client-side chat state machine.
//!
//! DESIGN
//! ======
//! Explicit finite state: `Idle` (widget closed) or `Open`, with two in-flight
//! flags — `waiting` while a reply is pending and `transferring` while the
//! simulated human handoff runs. The message log is strictly append-only and
//! ordered by insertion; ids increase monotonically and are never reused,
//! so a user message always precedes the reply it triggered.
//!
//! The simulated latencies (image review, handoff) are split into begin /
//! complete transitions. The route layer sleeps between the two without
//! holding the conversation lock, which keeps the idempotency guard on
//! `begin_handoff` reachable and lets unit tests drive transitions with no
//! timers at all.
//!
//! Opening chat on a fresh topic clears prior history at the call site (the
//! route layer calls `reset` before `open`), never automatically on close.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::chat::ChatService;
use super::context::ChatContext;

/// Simulated time to "review" an uploaded image before acknowledging it.
pub const IMAGE_ACK_DELAY: Duration = Duration::from_millis(1500);

/// Simulated time to reach a human agent.
pub const HANDOFF_DELAY: Duration = Duration::from_millis(2000);

/// Caption shown on an uploaded-image message.
pub const IMAGE_SENT_TEXT: &str = "已发送图片";

/// Scripted acknowledgement for an uploaded image — no model call involved.
pub const IMAGE_ACK_REPLY: &str = "亲，图片收到了，我正在帮您核实问题。🕵️‍♀️";

/// System notice appended once the handoff delay elapses.
pub const HANDOFF_NOTICE: &str = "正在为您转接高级专员... (预计等待: 2分钟)";

/// Generic greeting when chat is opened without an active item.
pub const GENERAL_GREETING: &str = "欢迎来到拼多多官方客服！亲，今天有什么可以帮您的？";

// =============================================================================
// MESSAGES
// =============================================================================

/// Originator of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    Bot,
    User,
    System,
}

/// Message payload, tagged by content kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MessageBody {
    /// Plain text.
    Text { text: String },
    /// An uploaded image with its caption.
    Image { text: String, src: String },
    /// A structured card summarizing an item.
    Card { title: String, subtitle: String },
}

/// One entry in the conversation log. Never mutated or removed once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique, monotonically increasing per conversation.
    pub id: u64,
    pub sender: MessageSender,
    #[serde(flatten)]
    pub body: MessageBody,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

// =============================================================================
// STATE MACHINE
// =============================================================================

/// Whether the chat widget is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatPhase {
    Idle,
    Open,
}

/// The conversation state machine: message log, active context, and the
/// in-flight flags. All mutation goes through the transition methods below.
pub struct Conversation {
    phase: ChatPhase,
    context: ChatContext,
    log: Vec<Message>,
    next_id: u64,
    waiting: bool,
    transferring: bool,
}

impl Conversation {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: ChatPhase::Idle,
            context: ChatContext::General,
            log: Vec::new(),
            next_id: 1,
            waiting: false,
            transferring: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    #[must_use]
    pub fn context(&self) -> &ChatContext {
        &self.context
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.log
    }

    /// True while a reply (model or scripted) is pending.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// True while the simulated human handoff is running.
    #[must_use]
    pub fn is_transferring(&self) -> bool {
        self.transferring
    }

    /// Context-dependent canned suggestions. Picking one simply goes through
    /// [`Conversation::send_text`] with the fixed string.
    #[must_use]
    pub fn quick_replies(&self) -> &'static [&'static str] {
        match self.context {
            ChatContext::Product(_) => &["这件还有货吗？", "现在有优惠吗？", "什么时候能发货？"],
            ChatContext::Order(_) => &["我的快递到哪了？", "我要申请退货。"],
            ChatContext::General => &["查看最近订单", "退款政策是什么？"],
        }
    }

    /// Discard the message log ahead of a fresh-topic open. Ids keep counting
    /// up so no id is ever reused within the process.
    pub fn reset(&mut self) {
        self.log.clear();
    }

    /// Open the chat widget with the given context, replacing any prior one.
    /// Iff the log is empty, synthesizes exactly one context-dependent
    /// greeting; an ongoing conversation is never re-greeted.
    pub fn open(&mut self, context: ChatContext) {
        self.context = context;
        self.phase = ChatPhase::Open;
        if self.log.is_empty() {
            let greeting = match &self.context {
                ChatContext::Product(p) => {
                    format!("亲，您看中这款【{}】了吗？我可以帮您查库存或介绍规格哦！🛍️", p.title)
                }
                ChatContext::Order(o) => {
                    format!("亲，看到您在咨询订单 {}，是想查询物流还是申请退换货呢？📦", o.id)
                }
                ChatContext::General => GENERAL_GREETING.to_string(),
            };
            self.push(MessageSender::Bot, MessageBody::Text { text: greeting });
        }
    }

    /// Close the widget. The log is retained; only a later fresh-topic open
    /// clears it.
    pub fn close(&mut self) {
        self.phase = ChatPhase::Idle;
    }

    /// Send a user message and wait for the bot reply.
    ///
    /// Whitespace-only input is silently ignored. Otherwise the user message
    /// is appended synchronously before the backend round-trip, and exactly
    /// one bot message follows — [`ChatService::send`] is infallible, so the
    /// waiting flag always clears.
    pub async fn send_text(&mut self, text: &str, service: &ChatService) {
        if text.trim().is_empty() {
            return;
        }

        self.push(MessageSender::User, MessageBody::Text { text: text.to_string() });
        self.waiting = true;

        let reply = service.send(text, &self.context).await;

        self.push(MessageSender::Bot, MessageBody::Text { text: reply });
        self.waiting = false;
    }

    /// Attach an image: appends the image-type user message immediately and
    /// marks a reply pending. The scripted acknowledgement follows via
    /// [`Conversation::acknowledge_image`] after [`IMAGE_ACK_DELAY`]; the
    /// backend is never contacted on this path.
    pub fn attach_image(&mut self, src: &str) {
        self.push(
            MessageSender::User,
            MessageBody::Image { text: IMAGE_SENT_TEXT.to_string(), src: src.to_string() },
        );
        self.waiting = true;
    }

    /// Append the canned image acknowledgement and clear the waiting flag.
    pub fn acknowledge_image(&mut self) {
        self.push(MessageSender::Bot, MessageBody::Text { text: IMAGE_ACK_REPLY.to_string() });
        self.waiting = false;
    }

    /// Start a human handoff. Returns false (and changes nothing) when one is
    /// already in flight, so at most one transfer notice is ever appended per
    /// handoff window.
    pub fn begin_handoff(&mut self) -> bool {
        if self.transferring {
            return false;
        }
        self.transferring = true;
        true
    }

    /// Append the transfer notice and clear the transferring flag, after
    /// [`HANDOFF_DELAY`] has elapsed at the call site.
    pub fn complete_handoff(&mut self) {
        self.push(MessageSender::System, MessageBody::Text { text: HANDOFF_NOTICE.to_string() });
        self.transferring = false;
    }

    fn push(&mut self, sender: MessageSender, body: MessageBody) {
        let id = self.next_id;
        self.next_id += 1;
        self.log
            .push(Message { id, sender, body, timestamp: OffsetDateTime::now_utc() });
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
