//! Client-style booking reference token.
//!
//! [`BookingId`] is a short opaque token of the form `BK-XXXXXXXXX` (nine
//! uppercase alphanumerics). It correlates a submission with the
//! notification eventually sent for it.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Prefix shared by every generated booking id.
pub const BOOKING_ID_PREFIX: &str = "BK-";

/// Number of random characters following [`BOOKING_ID_PREFIX`].
const TOKEN_LEN: usize = 9;

/// Opaque booking identifier.
///
/// Generated once per successful validation and never reused. The random
/// part is drawn from a fresh UUID v4 so no extra RNG is needed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookingId(String);

impl BookingId {
    /// Generates a new random booking id.
    #[must_use]
    pub fn generate() -> Self {
        let token: String = uuid::Uuid::new_v4()
            .simple()
            .to_string()
            .chars()
            .take(TOKEN_LEN)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(format!("{BOOKING_ID_PREFIX}{token}"))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for BookingId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
