//! Budget estimator DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::EventType;
use crate::domain::budget::BudgetLine;

/// Request body for `POST /budget/estimate`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct EstimateRequest {
    /// Total budget in rupees.
    pub budget: u64,
    /// Event category; omitted uses the general split.
    #[serde(default)]
    pub event_type: Option<EventType>,
}

/// Response body for `POST /budget/estimate`.
#[derive(Debug, Serialize, ToSchema)]
pub struct EstimateResponse {
    /// Total budget in rupees.
    pub total: u64,
    /// Total formatted as INR.
    pub formatted_total: String,
    /// Category the split was computed for.
    pub event_type: EventType,
    /// Cost heads, largest share first.
    pub lines: Vec<BudgetLine>,
}
