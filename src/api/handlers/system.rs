//! System endpoints: health check and event-type catalog.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::domain::EventType;
use crate::service::ChatMode;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    delivery_channel: &'static str,
    chat_mode: ChatMode,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, timestamp, the configured delivery channel and whether chat runs live or offline.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            delivery_channel: state.booking_service.channel_name(),
            chat_mode: state.chat_service.mode(),
        }),
    )
}

/// Event type info.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventTypeInfo {
    event_type: EventType,
    label: &'static str,
    description: &'static str,
}

const fn describe(event_type: EventType) -> &'static str {
    match event_type {
        EventType::Wedding => "Cinematic weddings, receptions and Sangeet nights",
        EventType::Corporate => "MICE, tech summits, launches and office parties",
        EventType::Birthday => "Milestone birthdays and private celebrations",
        EventType::Concert => "Concerts, live shows and stage production",
        EventType::General => "Any other occasion",
    }
}

/// `GET /config/event-types` — List bookable event types.
#[utoipa::path(
    get,
    path = "/config/event-types",
    tag = "System",
    summary = "List event types",
    description = "Returns the event categories a booking can name. Bookings without one are recorded as a general event.",
    responses(
        (status = 200, description = "Event type catalog", body = Vec<EventTypeInfo>),
    )
)]
pub async fn event_types_handler() -> impl IntoResponse {
    let types: Vec<EventTypeInfo> = EventType::SELECTABLE
        .into_iter()
        .map(|event_type| EventTypeInfo {
            event_type,
            label: event_type.label(),
            description: describe(event_type),
        })
        .collect();
    (StatusCode::OK, Json(types))
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/config/event-types", get(event_types_handler))
}
