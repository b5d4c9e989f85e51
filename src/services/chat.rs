//! Chat service — session lifetime and send semantics for the support bot.
//!
//! DESIGN
//! ======
//! One conversation session per process: created at startup when a credential
//! is available, reused for every send so the model keeps conversational
//! memory, never implicitly recreated mid-conversation. `initialize` replaces
//! any existing session (replace-on-reinit).
//!
//! Every failure mode funnels into one of three canned reply strings — the
//! state machine and UI above this layer never see an error for a chat send.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::context::ChatContext;
use crate::llm::{ChatModel, ChatTurn};

/// Sampling temperature for every session.
pub const TEMPERATURE: f32 = 0.7;

/// Returned when no session exists (missing credential → offline mode).
pub const OFFLINE_REPLY: &str = "亲，我现在处于离线模式，请检查 API Key 配置哦。";

/// Returned when the backend answered with no usable text.
pub const EMPTY_REPLY: &str = "亲，不好意思，我没听清，请再说一遍~";

/// Returned when the backend call failed (network, quota, malformed response).
pub const TRANSPORT_ERROR_REPLY: &str = "亲，网络有点小波动，请稍后再试哦~";

/// Fixed persona instruction for the support assistant.
const SYSTEM_PERSONA: &str = "\
你现在是拼多多 (PDD) 的智能客服助手。
你的名字是 \"多多客服\"。

**语气与风格:**
- 亲切、热情、简洁。
- 经常使用 Emoji 来保持轻松愉快的氛围 (例如: 📦, ✨, 😊, 亲, 🌹)。
- 礼貌且专业。
- 称呼用户为“亲”。
- 如果用户使用其他语言（如英语、泰语），请识别并用相应的语言回复。

**能力范围:**
1. **售前**: 根据提供的“当前上下文”回答关于库存、规格和价格的问题。
2. **售后**: 查询物流，处理退货请求。
   - 如果用户询问物流，假装查询系统并给出一个现实的日期（2-3天后）。
   - 如果用户想要退货，询问原因。如果是正当理由（质量问题、发错货），引导他们上传照片。
3. **政策**:
   - 退款政策: \"支持7天无理由退货\"。
   - 运费政策: \"全场满10元包邮\"。
4. **转人工**: 如果用户生气，提到“人工”、“投诉”或“真人”，必须立刻建议转接人工客服。

**上下文处理:**
你将收到用户当前正在查看的商品或订单的上下文信息。请利用这些具体数据来回答。
- 如果库存 (stock) > 0，告诉亲有货。
- 如果状态是 '已发货' (Shipped)，给出一个模拟的物流更新。

**约束:**
- 不要编造超出标准电商规范的虚假政策。
- 回复保持简短（通常在50字以内），除非在解释复杂的政策。
";

// =============================================================================
// SESSION
// =============================================================================

/// The one persistent exchange with the backend: persona, sampling
/// configuration, and the running turn history replayed on every call.
struct ChatSession {
    model: Arc<dyn ChatModel>,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model, history: Vec::new() }
    }
}

// =============================================================================
// SERVICE
// =============================================================================

/// Owns the optional [`ChatSession`] and exposes the single infallible
/// `send` operation.
pub struct ChatService {
    session: Mutex<Option<ChatSession>>,
}

impl ChatService {
    /// Build the service, creating a session iff a backend model is available.
    #[must_use]
    pub fn new(model: Option<Arc<dyn ChatModel>>) -> Self {
        Self { session: Mutex::new(model.map(ChatSession::new)) }
    }

    /// Bind (or rebind) the session to a backend model. Replaces any existing
    /// session along with its history — replace-on-reinit, not idempotent.
    pub async fn initialize(&self, model: Arc<dyn ChatModel>) {
        let mut session = self.session.lock().await;
        *session = Some(ChatSession::new(model));
    }

    /// Whether a backend session exists (false → offline mode).
    pub async fn is_online(&self) -> bool {
        self.session.lock().await.is_some()
    }

    /// Send a user message, grounded in the active context, and return the
    /// reply text. Never fails: offline, empty-reply, and transport failures
    /// each map to a fixed canned string.
    pub async fn send(&self, user_text: &str, context: &ChatContext) -> String {
        let mut guard = self.session.lock().await;
        let Some(session) = guard.as_mut() else {
            return OFFLINE_REPLY.to_string();
        };

        let message = context.inject(user_text);
        info!(message_len = message.len(), turns = session.history.len(), "chat: sending to backend");

        match session
            .model
            .send(SYSTEM_PERSONA, TEMPERATURE, &session.history, &message)
            .await
        {
            Ok(reply) => {
                info!(
                    input_tokens = reply.input_tokens,
                    output_tokens = reply.output_tokens,
                    "chat: backend reply"
                );
                session.history.push(ChatTurn::user(message));
                if reply.text.is_empty() {
                    EMPTY_REPLY.to_string()
                } else {
                    session.history.push(ChatTurn::model(reply.text.clone()));
                    reply.text
                }
            }
            Err(e) => {
                warn!(error = %e, "chat: backend call failed");
                TRANSPORT_ERROR_REPLY.to_string()
            }
        }
    }
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
