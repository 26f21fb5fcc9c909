//! OpenAPI document for the gateway.

use utoipa::OpenApi;

use super::dto::{
    BookingResponse, CreateBookingRequest, CreateSavedEventRequest, CreateSessionResponse,
    EstimateRequest, EstimateResponse, GuestsInput, SavedEventListResponse, SendMessageRequest,
    SendMessageResponse, TranscriptResponse,
};
use super::handlers::{booking, budget, chat, events, system};
use crate::domain::budget::BudgetLine;
use crate::domain::{BookingId, ChatMessage, ChatRole, EventType, SavedEvent, SavedEventStatus};
use crate::error::{ErrorBody, ErrorResponse};
use crate::service::ChatMode;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "StarVnt Gateway",
        description = "Booking requests, budget estimates, saved events and the Aura+ chat assistant."
    ),
    paths(
        booking::create_booking,
        chat::create_session,
        chat::send_message,
        chat::get_transcript,
        chat::close_session,
        budget::estimate_budget,
        events::create_event,
        events::list_events,
        events::get_event,
        system::health_handler,
        system::event_types_handler,
    ),
    components(schemas(
        BookingId,
        BookingResponse,
        BudgetLine,
        ChatMessage,
        ChatMode,
        ChatRole,
        CreateBookingRequest,
        CreateSavedEventRequest,
        CreateSessionResponse,
        ErrorBody,
        ErrorResponse,
        EstimateRequest,
        EstimateResponse,
        EventType,
        GuestsInput,
        SavedEvent,
        SavedEventListResponse,
        SavedEventStatus,
        SendMessageRequest,
        SendMessageResponse,
        TranscriptResponse,
    )),
    tags(
        (name = "Bookings", description = "Booking request submission"),
        (name = "Chat", description = "Aura+ chat assistant"),
        (name = "Budget", description = "Budget estimator"),
        (name = "Saved Events", description = "Draft events kept for later booking"),
        (name = "System", description = "Health and catalog"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/bookings",
            "/api/v1/chat/sessions",
            "/api/v1/chat/sessions/{id}",
            "/api/v1/chat/sessions/{id}/messages",
            "/api/v1/budget/estimate",
            "/api/v1/events",
            "/api/v1/events/{id}",
            "/health",
            "/config/event-types",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
