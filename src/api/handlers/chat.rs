//! Aura+ chat session handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, post};
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{
    CreateSessionResponse, SendMessageRequest, SendMessageResponse, TranscriptResponse,
};
use crate::app_state::AppState;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /chat/sessions` — Open a chat session.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions",
    tag = "Chat",
    summary = "Open a chat session",
    description = "Starts an Aura+ conversation. The session is live when an AI key is configured and offline otherwise; the transcript opens with the greeting.",
    responses(
        (status = 201, description = "Session opened", body = CreateSessionResponse),
    )
)]
pub async fn create_session(State(state): State<AppState>) -> impl IntoResponse {
    let (session_id, mode, messages) = state.chat_service.create_session().await;
    (
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            mode,
            messages,
        }),
    )
}

/// `POST /chat/sessions/:id/messages` — Send a message to Aura+.
///
/// # Errors
///
/// Returns [`GatewayError::InvalidRequest`] for a blank message and
/// [`GatewayError::SessionNotFound`] for an unknown session.
#[utoipa::path(
    post,
    path = "/api/v1/chat/sessions/{id}/messages",
    tag = "Chat",
    summary = "Send a chat message",
    description = "Sends one visitor message and returns the assistant reply. Backend failures are answered with an apology rather than an error.",
    params(
        ("id" = Uuid, Path, description = "Chat session UUID"),
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Assistant reply", body = SendMessageResponse),
        (status = 400, description = "Blank message", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<impl IntoResponse, GatewayError> {
    let reply = state.chat_service.send_message(id, &req.message).await?;
    Ok(Json(SendMessageResponse {
        session_id: id,
        reply,
    }))
}

/// `GET /chat/sessions/:id/messages` — Session transcript.
///
/// # Errors
///
/// Returns [`GatewayError::SessionNotFound`] for an unknown session.
#[utoipa::path(
    get,
    path = "/api/v1/chat/sessions/{id}/messages",
    tag = "Chat",
    summary = "Get a chat transcript",
    params(
        ("id" = Uuid, Path, description = "Chat session UUID"),
    ),
    responses(
        (status = 200, description = "Transcript, oldest first", body = TranscriptResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    let messages = state.chat_service.transcript(id).await?;
    Ok(Json(TranscriptResponse {
        session_id: id,
        messages,
    }))
}

/// `DELETE /chat/sessions/:id` — Close a session.
///
/// # Errors
///
/// Returns [`GatewayError::SessionNotFound`] for an unknown session.
#[utoipa::path(
    delete,
    path = "/api/v1/chat/sessions/{id}",
    tag = "Chat",
    summary = "Close a chat session",
    params(
        ("id" = Uuid, Path, description = "Chat session UUID"),
    ),
    responses(
        (status = 204, description = "Session closed"),
        (status = 404, description = "Session not found", body = ErrorResponse),
    )
)]
pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, GatewayError> {
    state.chat_service.close_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Chat routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat/sessions", post(create_session))
        .route("/chat/sessions/{id}", delete(close_session))
        .route(
            "/chat/sessions/{id}/messages",
            post(send_message).get(get_transcript),
        )
}
