//! Saved event handlers: create, list, get.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{CreateSavedEventRequest, SavedEventListResponse};
use crate::app_state::AppState;
use crate::domain::SavedEvent;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /events` — Save a draft event.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a blank name or a budget
/// below the booking minimum.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    tag = "Saved Events",
    summary = "Save a draft event",
    request_body = CreateSavedEventRequest,
    responses(
        (status = 201, description = "Draft saved", body = SavedEvent),
        (status = 400, description = "Invalid name or budget", body = ErrorResponse),
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    Json(req): Json<CreateSavedEventRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let event = state
        .saved_events
        .save(&req.name, req.event_type, req.budget)
        .await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /events` — List saved events, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    tag = "Saved Events",
    summary = "List saved events",
    responses(
        (status = 200, description = "Saved events", body = SavedEventListResponse),
    )
)]
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    let data = state.saved_events.list().await;
    let total = data.len();
    Json(SavedEventListResponse { data, total })
}

/// `GET /events/:id` — Get one saved event.
///
/// # Errors
///
/// Returns [`GatewayError::SavedEventNotFound`] for an unknown id.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    tag = "Saved Events",
    summary = "Get a saved event",
    params(
        ("id" = Uuid, Path, description = "Saved event UUID"),
    ),
    responses(
        (status = 200, description = "Saved event", body = SavedEvent),
        (status = 404, description = "Saved event not found", body = ErrorResponse),
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SavedEvent>, GatewayError> {
    Ok(Json(state.saved_events.get(id).await?))
}

/// Saved event routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event).get(list_events))
        .route("/events/{id}", get(get_event))
}
