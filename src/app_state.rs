//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::domain::SavedEventStore;
use crate::service::{BookingService, ChatService, DeliveryService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Booking validation and delivery.
    pub booking_service: Arc<BookingService>,
    /// Aura+ chat sessions.
    pub chat_service: Arc<ChatService>,
    /// Saved draft events, shared with the booking service.
    pub saved_events: Arc<SavedEventStore>,
}

impl AppState {
    /// Wires services over a fresh saved event store.
    #[must_use]
    pub fn new(delivery: DeliveryService, chat: ChatService) -> Self {
        let saved_events = Arc::new(SavedEventStore::new());
        Self {
            booking_service: Arc::new(BookingService::new(
                Arc::new(delivery),
                Arc::clone(&saved_events),
            )),
            chat_service: Arc::new(chat),
            saved_events,
        }
    }

    /// Builds every service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client or the site links cannot be built.
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let delivery = DeliveryService::from_config(&config.delivery)?;
        let chat = ChatService::new(config.chat.clone())?;
        Ok(Self::new(delivery, chat))
    }
}
