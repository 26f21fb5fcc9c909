//! Budget estimator handler.

use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{EstimateRequest, EstimateResponse};
use crate::app_state::AppState;
use crate::domain::budget::estimate;
use crate::domain::currency::format_inr;
use crate::error::{ErrorResponse, GatewayError};

/// `POST /budget/estimate` — Split a budget across cost heads.
///
/// # Errors
///
/// Returns [`GatewayError::BudgetOutOfRange`] outside ₹9,999 – ₹1 crore.
#[utoipa::path(
    post,
    path = "/api/v1/budget/estimate",
    tag = "Budget",
    summary = "Estimate a budget breakdown",
    description = "Distributes the total across typical cost heads for weddings, corporate events, or everything else.",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Budget breakdown", body = EstimateResponse),
        (status = 400, description = "Budget out of range", body = ErrorResponse),
    )
)]
pub async fn estimate_budget(
    Json(req): Json<EstimateRequest>,
) -> Result<Json<EstimateResponse>, GatewayError> {
    let event_type = req.event_type.unwrap_or_default();
    let lines = estimate(req.budget, event_type)?;
    Ok(Json(EstimateResponse {
        total: req.budget,
        formatted_total: format_inr(req.budget),
        event_type,
        lines,
    }))
}

/// Budget routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/budget/estimate", post(estimate_budget))
}
