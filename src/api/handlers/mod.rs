//! REST endpoint handlers organized by resource.

pub mod booking;
pub mod budget;
pub mod chat;
pub mod events;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api/v1`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(booking::routes())
        .merge(chat::routes())
        .merge(budget::routes())
        .merge(events::routes())
}
