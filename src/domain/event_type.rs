//! Event categories offered by the planner.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of event a booking or saved draft refers to.
///
/// The four named categories are the ones the site sells directly.
/// [`EventType::General`] is the fallback used when a booking arrives
/// without any event-type context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum EventType {
    /// Weddings and receptions.
    Wedding,
    /// Corporate MICE, summits and office parties.
    Corporate,
    /// Birthday celebrations.
    Birthday,
    /// Concerts and live shows.
    Concert,
    /// No specific category.
    #[default]
    #[serde(rename = "General Event")]
    General,
}

impl EventType {
    /// Categories a customer can pick explicitly.
    pub const SELECTABLE: [Self; 4] = [Self::Wedding, Self::Corporate, Self::Birthday, Self::Concert];

    /// Returns the display label (`"Wedding"`, `"General Event"`, ...).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Wedding => "Wedding",
            Self::Corporate => "Corporate",
            Self::Birthday => "Birthday",
            Self::Concert => "Concert",
            Self::General => "General Event",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
