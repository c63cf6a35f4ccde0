//! Append-only chat transcript for a notebook session.

use tracing::warn;

use fablab_core::{AssistBackend, ChatMessage, ChatRole, LanguageTag, LexiconChain, SummaryInput};

/// Lexicon key for the in-line reply shown when a chat turn fails.
pub const CHAT_ERROR_KEY: &str = "chat.error_reply";

/// Ordered chat transcript. Messages are appended in send order and never
/// reordered or mutated afterwards.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Send one chat turn against the given context sources.
    ///
    /// The user message is appended synchronously before the request goes
    /// out; the model reply is appended only once that specific request
    /// resolves. A failed turn degrades to an in-line placeholder reply
    /// resolved through the lexicon: the transcript never loses the user's
    /// message and the failure never escapes as an error.
    pub async fn send<A: AssistBackend + ?Sized>(
        &mut self,
        assist: &A,
        sources: &[SummaryInput],
        message: &str,
        language: &LanguageTag,
        lexicon: &LexiconChain,
    ) -> ChatMessage {
        let history = self.messages.clone();
        self.messages.push(ChatMessage::new(ChatRole::User, message));

        let content = match assist.chat(&history, sources, message, language).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    subsystem = "session",
                    component = "chat",
                    language = %language,
                    error = %e,
                    "Chat turn failed; inserting placeholder reply"
                );
                lexicon.resolve(CHAT_ERROR_KEY).to_string()
            }
        };

        let reply = ChatMessage::new(ChatRole::Model, content);
        self.messages.push(reply.clone());
        reply
    }
}
