//! Chat session DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ChatMessage;
use crate::service::ChatMode;

/// Response body for `POST /chat/sessions` (201 Created).
#[derive(Debug, Serialize, ToSchema)]
pub struct CreateSessionResponse {
    /// New session id.
    pub session_id: Uuid,
    /// Live or offline.
    pub mode: ChatMode,
    /// Opening transcript (the greeting).
    pub messages: Vec<ChatMessage>,
}

/// Request body for `POST /chat/sessions/{id}/messages`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    /// Visitor's message.
    pub message: String,
}

/// Response body for `POST /chat/sessions/{id}/messages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SendMessageResponse {
    /// Session the reply belongs to.
    pub session_id: Uuid,
    /// Assistant reply.
    pub reply: ChatMessage,
}

/// Response body for `GET /chat/sessions/{id}/messages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TranscriptResponse {
    /// Session id.
    pub session_id: Uuid,
    /// Every message, oldest first.
    pub messages: Vec<ChatMessage>,
}
