//! Saved event DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{EventType, SavedEvent};

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSavedEventRequest {
    /// Name for the plan, e.g. "Rohini's Wedding".
    pub name: String,
    /// Event category.
    #[serde(default)]
    pub event_type: EventType,
    /// Planned budget in rupees.
    pub budget: u64,
}

/// Response body for `GET /events`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SavedEventListResponse {
    /// Saved events, newest first.
    pub data: Vec<SavedEvent>,
    /// Number of saved events.
    pub total: usize,
}
