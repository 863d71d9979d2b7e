use serde::Serialize;

pub const USER_SENDER: &str = "You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

/// Append-only message log for one focused agent view. Nothing is delivered
/// anywhere and nothing answers.
#[derive(Debug, Clone)]
pub struct ChatLog {
    agent_id: String,
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new(agent_id: impl Into<String>) -> Self {
        Self {
            agent_id: agent_id.into(),
            messages: Vec::new(),
        }
    }

    pub fn agent_id(&self) -> &str {
        &self.agent_id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append `text` as a user message. Blank input is ignored and yields `None`.
    pub fn send_message(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            sender: USER_SENDER.to_string(),
            text: text.to_string(),
        });
        tracing::debug!(agent_id = %self.agent_id, count = self.messages.len(), "Chat message appended");
        self.messages.last()
    }
}
