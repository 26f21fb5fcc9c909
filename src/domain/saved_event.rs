//! Draft events saved from the budget estimator.
//!
//! [`SavedEventStore`] keeps drafts newest-first behind a
//! [`tokio::sync::RwLock`]. Entries are only ever appended or flipped to
//! [`SavedEventStatus::Booked`]; nothing is deleted.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use super::EventType;
use super::booking::MIN_BUDGET;
use super::currency::format_inr;
use crate::error::GatewayError;

/// Lifecycle of a saved event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub enum SavedEventStatus {
    /// Saved from the estimator, not yet booked.
    Draft,
    /// A booking referencing this draft succeeded.
    Booked,
}

/// A named budget plan the customer kept for later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedEvent {
    /// Unique identifier.
    pub id: Uuid,
    /// Customer-chosen name, e.g. "Rohini's Wedding".
    pub name: String,
    /// Event category.
    pub event_type: EventType,
    /// Planned budget in rupees.
    pub budget: u64,
    /// When the draft was saved.
    pub created_at: DateTime<Utc>,
    /// Draft or booked.
    pub status: SavedEventStatus,
}

/// In-memory, newest-first list of saved events.
#[derive(Debug, Default)]
pub struct SavedEventStore {
    events: RwLock<Vec<SavedEvent>>,
}

impl SavedEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a new draft and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] if the trimmed name is empty
    /// or the budget is below the booking minimum.
    pub async fn save(
        &self,
        name: &str,
        event_type: EventType,
        budget: u64,
    ) -> Result<SavedEvent, GatewayError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Please give the event a name.".to_string(),
            ));
        }
        if budget < MIN_BUDGET {
            return Err(GatewayError::InvalidRequest(format!(
                "Budget must be at least {}.",
                format_inr(MIN_BUDGET)
            )));
        }

        let event = SavedEvent {
            id: Uuid::new_v4(),
            name: name.to_string(),
            event_type,
            budget,
            created_at: Utc::now(),
            status: SavedEventStatus::Draft,
        };
        self.events.write().await.insert(0, event.clone());
        tracing::info!(event_id = %event.id, %event_type, budget, "saved event draft");
        Ok(event)
    }

    /// Returns every saved event, newest first.
    pub async fn list(&self) -> Vec<SavedEvent> {
        self.events.read().await.clone()
    }

    /// Returns a single saved event.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SavedEventNotFound`] if no event has this id.
    pub async fn get(&self, id: Uuid) -> Result<SavedEvent, GatewayError> {
        self.events
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(GatewayError::SavedEventNotFound(id))
    }

    /// Marks a saved event as booked.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SavedEventNotFound`] if no event has this id.
    pub async fn mark_booked(&self, id: Uuid) -> Result<(), GatewayError> {
        let mut events = self.events.write().await;
        let event = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(GatewayError::SavedEventNotFound(id))?;
        event.status = SavedEventStatus::Booked;
        Ok(())
    }

    /// Returns the number of saved events.
    pub async fn len(&self) -> usize {
        self.events.read().await.len()
    }

    /// Returns `true` if nothing has been saved.
    pub async fn is_empty(&self) -> bool {
        self.events.read().await.is_empty()
    }
}
