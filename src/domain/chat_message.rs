//! Chat transcript entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Greeting every Aura+ conversation opens with.
pub const GREETING: &str = "Namaste! I am Aura+, your personal event curator. Before we begin crafting your cinematic experience, may I know your name?";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// The site visitor.
    User,
    /// The assistant.
    Model,
}

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChatMessage {
    /// Unique message identifier.
    pub id: uuid::Uuid,
    /// Author of the message.
    pub role: ChatRole,
    /// Message body.
    pub text: String,
    /// When the message was recorded.
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Creates a message stamped with the current time.
    #[must_use]
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// The opening assistant greeting.
    #[must_use]
    pub fn greeting() -> Self {
        Self::new(ChatRole::Model, GREETING)
    }
}
