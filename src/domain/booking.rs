//! Booking form input, validation rules and the validated submission.
//!
//! [`BookingFields`] is the raw, editable form. [`validate_booking`] runs
//! the business rules in a fixed order and stops at the first failure; only
//! when every rule passes does it produce a [`BookingSubmission`]. The
//! submission has no public constructor, so nothing downstream can be handed
//! an unvalidated booking.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::{BookingId, EventType};

/// Smallest budget, in rupees, that can be booked.
pub const MIN_BUDGET: u64 = 9_999;

/// Furthest ahead a booking may be made, in years.
pub const BOOKING_HORIZON_YEARS: i32 = 2;

/// Sentinel stored when the customer has not picked a venue yet.
pub const VENUE_UNDECIDED: &str = "Not Decided";

/// Sentinel stored when the venue address is not known yet.
pub const ADDRESS_UNDECIDED: &str = "N/A";

/// Required length of an Indian mobile number.
const PHONE_DIGITS: usize = 10;

/// The first violated booking rule.
///
/// `Display` yields the sentence shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BookingValidationError {
    /// Email is not shaped like `local@domain.tld`.
    #[error("Please enter a valid email address (e.g., user@example.com)")]
    InvalidEmail,
    /// Phone is not a 10-digit number starting with 6, 7, 8 or 9.
    #[error("Please enter a valid 10-digit mobile number.")]
    InvalidPhone,
    /// Event date is missing or not a `YYYY-MM-DD` date.
    #[error("Please choose an event date.")]
    InvalidDate,
    /// Event date is today or in the past.
    #[error("Event date must be from tomorrow onwards.")]
    DateTooSoon,
    /// Event date is more than two years away.
    #[error("Bookings are only open for the next 2 years.")]
    DateTooFar,
    /// Budget is below [`MIN_BUDGET`].
    #[error("Minimum budget requirement is ₹9,999")]
    BudgetTooLow,
    /// Customer name is blank.
    #[error("Please enter your full name.")]
    MissingName,
}

impl BookingValidationError {
    /// Machine-readable kind, e.g. `"invalid_email"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhone => "invalid_phone",
            Self::InvalidDate => "invalid_date",
            Self::DateTooSoon => "date_too_soon",
            Self::DateTooFar => "date_too_far",
            Self::BudgetTooLow => "budget_too_low",
            Self::MissingName => "missing_name",
        }
    }
}

/// Raw booking form contents as typed by the customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFields {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Mobile number. Kept sanitized by [`sanitize_phone`] on every edit.
    pub phone: String,
    /// Event date as entered (`YYYY-MM-DD`).
    pub event_date: String,
    /// Venue name, may be blank.
    pub venue: String,
    /// Venue address, may be blank.
    pub address: String,
    /// Approximate guest count as entered.
    pub guests: String,
}

/// A booking that passed every validation rule.
///
/// Immutable once built. Serialized as the booking record handed to the
/// delivery channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSubmission {
    booking_id: BookingId,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    event_date: NaiveDate,
    venue_name: String,
    venue_address: String,
    guest_count: u32,
    event_type: EventType,
    amount_paid: u64,
}

impl BookingSubmission {
    /// Booking reference token.
    #[must_use]
    pub const fn booking_id(&self) -> &BookingId {
        &self.booking_id
    }

    /// Trimmed customer name.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Trimmed customer email; also the confirmation address.
    #[must_use]
    pub fn customer_email(&self) -> &str {
        &self.customer_email
    }

    /// Ten-digit mobile number.
    #[must_use]
    pub fn customer_phone(&self) -> &str {
        &self.customer_phone
    }

    /// Event date.
    #[must_use]
    pub const fn event_date(&self) -> NaiveDate {
        self.event_date
    }

    /// Venue name or [`VENUE_UNDECIDED`].
    #[must_use]
    pub fn venue_name(&self) -> &str {
        &self.venue_name
    }

    /// Venue address or [`ADDRESS_UNDECIDED`].
    #[must_use]
    pub fn venue_address(&self) -> &str {
        &self.venue_address
    }

    /// Approximate guest count.
    #[must_use]
    pub const fn guest_count(&self) -> u32 {
        self.guest_count
    }

    /// Event category.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        self.event_type
    }

    /// Budget in whole rupees.
    #[must_use]
    pub const fn amount_paid(&self) -> u64 {
        self.amount_paid
    }
}

/// Validates a booking form and builds the submission.
///
/// Rules run in this order and the first failure is returned: email,
/// phone, event date (present, after `today`, within two years), budget,
/// name. `event_type` of `None` books a [`EventType::General`] event.
///
/// # Errors
///
/// Returns the first violated [`BookingValidationError`].
pub fn validate_booking(
    fields: &BookingFields,
    event_type: Option<EventType>,
    amount_paid: u64,
    today: NaiveDate,
) -> Result<BookingSubmission, BookingValidationError> {
    let email = fields.email.trim();
    if !is_valid_email(email) {
        return Err(BookingValidationError::InvalidEmail);
    }

    let phone = fields.phone.trim();
    if !is_valid_phone(phone) {
        return Err(BookingValidationError::InvalidPhone);
    }

    let event_date = parse_event_date(&fields.event_date)?;
    check_date_window(event_date, today)?;

    if amount_paid < MIN_BUDGET {
        return Err(BookingValidationError::BudgetTooLow);
    }

    let name = fields.name.trim();
    if name.is_empty() {
        return Err(BookingValidationError::MissingName);
    }

    Ok(BookingSubmission {
        booking_id: BookingId::generate(),
        customer_name: name.to_string(),
        customer_email: email.to_string(),
        customer_phone: phone.to_string(),
        event_date,
        venue_name: or_sentinel(&fields.venue, VENUE_UNDECIDED),
        venue_address: or_sentinel(&fields.address, ADDRESS_UNDECIDED),
        guest_count: parse_guest_count(&fields.guests),
        event_type: event_type.unwrap_or_default(),
        amount_paid,
    })
}

/// Structural email check: `x@y.z` where no part holds whitespace or `@`.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |part: &str| {
        !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@')
    };
    if !clean(local) || !clean(domain) {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Indian mobile number check: ten digits, leading 6–9.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS
        && phone.chars().all(|c| c.is_ascii_digit())
        && phone.starts_with(['6', '7', '8', '9'])
}

/// Strips non-digits and truncates to ten digits.
#[must_use]
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_digit)
        .take(PHONE_DIGITS)
        .collect()
}

/// Parses the leading digits of `raw`; anything else counts as zero guests.
#[must_use]
pub fn parse_guest_count(raw: &str) -> u32 {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().unwrap_or(0)
}

/// Last date that can still be booked from `today`: same day and month,
/// two years on. A Feb 29 with no counterpart rolls over to Mar 1.
#[must_use]
pub fn latest_bookable_date(today: NaiveDate) -> NaiveDate {
    let year = today.year().saturating_add(BOOKING_HORIZON_YEARS);
    today
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28).and_then(|d| d.succ_opt()))
        .unwrap_or(NaiveDate::MAX)
}

fn parse_event_date(raw: &str) -> Result<NaiveDate, BookingValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| BookingValidationError::InvalidDate)
}

fn check_date_window(date: NaiveDate, today: NaiveDate) -> Result<(), BookingValidationError> {
    if date <= today {
        return Err(BookingValidationError::DateTooSoon);
    }
    if date > latest_bookable_date(today) {
        return Err(BookingValidationError::DateTooFar);
    }
    Ok(())
}

/// A fixed, already-valid submission for service tests.
#[cfg(test)]
pub(crate) fn sample_submission() -> BookingSubmission {
    BookingSubmission {
        booking_id: BookingId::generate(),
        customer_name: "Rohini Sen".to_string(),
        customer_email: "rohini@example.com".to_string(),
        customer_phone: "9876543210".to_string(),
        event_date: NaiveDate::from_ymd_opt(2027, 1, 15).unwrap_or_default(),
        venue_name: "Taj Bengal".to_string(),
        venue_address: ADDRESS_UNDECIDED.to_string(),
        guest_count: 300,
        event_type: EventType::Wedding,
        amount_paid: 500_000,
    }
}

fn or_sentinel(value: &str, sentinel: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        sentinel.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use chrono::Days;

    fn today() -> NaiveDate {
        let Some(d) = NaiveDate::from_ymd_opt(2026, 3, 10) else {
            panic!("valid date");
        };
        d
    }

    fn date_str(d: NaiveDate) -> String {
        d.format("%Y-%m-%d").to_string()
    }

    fn valid_fields() -> BookingFields {
        let Some(date) = today().checked_add_days(Days::new(30)) else {
            panic!("valid date");
        };
        BookingFields {
            name: "  Rohini Sen ".to_string(),
            email: " rohini@example.com ".to_string(),
            phone: "9876543210".to_string(),
            event_date: date_str(date),
            venue: String::new(),
            address: "  ".to_string(),
            guests: "250".to_string(),
        }
    }

    fn check(fields: &BookingFields, amount: u64) -> Result<BookingSubmission, BookingValidationError> {
        validate_booking(fields, Some(EventType::Wedding), amount, today())
    }

    #[test]
    fn valid_form_builds_trimmed_submission() {
        let Ok(sub) = check(&valid_fields(), MIN_BUDGET) else {
            panic!("expected valid booking");
        };
        assert_eq!(sub.customer_name(), "Rohini Sen");
        assert_eq!(sub.customer_email(), "rohini@example.com");
        assert_eq!(sub.venue_name(), VENUE_UNDECIDED);
        assert_eq!(sub.venue_address(), ADDRESS_UNDECIDED);
        assert_eq!(sub.guest_count(), 250);
        assert_eq!(sub.event_type(), EventType::Wedding);
        assert_eq!(sub.amount_paid(), MIN_BUDGET);
        assert!(sub.booking_id().as_str().starts_with("BK-"));
    }

    #[test]
    fn missing_event_type_falls_back_to_general() {
        let Ok(sub) = validate_booking(&valid_fields(), None, 50_000, today()) else {
            panic!("expected valid booking");
        };
        assert_eq!(sub.event_type(), EventType::General);
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in [
            "",
            "plainaddress",
            "user@domain",
            "user@.com",
            "user@domain.",
            "us er@domain.com",
            "user@@domain.com",
            "@domain.com",
            "user@dom@ain.com",
        ] {
            let mut fields = valid_fields();
            fields.email = email.to_string();
            assert_eq!(
                check(&fields, MIN_BUDGET),
                Err(BookingValidationError::InvalidEmail),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_structurally_valid_emails() {
        for email in ["a@b.co", "first.last@sub.domain.in", "x+y@d.io"] {
            assert!(is_valid_email(email), "{email:?} should pass");
        }
    }

    #[test]
    fn phone_rules() {
        assert!(is_valid_phone("9876543210"));
        assert!(is_valid_phone("6000000000"));
        assert!(!is_valid_phone("1234567890"));
        assert!(!is_valid_phone("5876543210"));
        assert!(!is_valid_phone("98765432"));
        assert!(!is_valid_phone("98765432101"));
        assert!(!is_valid_phone("98765a3210"));
    }

    #[test]
    fn invalid_phone_is_reported_after_email() {
        let mut fields = valid_fields();
        fields.phone = "1234567890".to_string();
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::InvalidPhone));

        fields.email = "broken".to_string();
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::InvalidEmail));
    }

    #[test]
    fn sanitize_phone_strips_and_truncates() {
        assert_eq!(sanitize_phone("98765-43210"), "9876543210");
        assert_eq!(sanitize_phone("(987) 654 3210 99"), "9876543210");
        assert_eq!(sanitize_phone("abc"), "");
    }

    #[test]
    fn today_is_too_soon_and_tomorrow_is_fine() {
        let mut fields = valid_fields();
        fields.event_date = date_str(today());
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::DateTooSoon));

        let Some(tomorrow) = today().succ_opt() else {
            panic!("valid date");
        };
        fields.event_date = date_str(tomorrow);
        assert!(check(&fields, MIN_BUDGET).is_ok());
    }

    #[test]
    fn past_dates_are_too_soon() {
        let mut fields = valid_fields();
        fields.event_date = "2020-01-01".to_string();
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::DateTooSoon));
    }

    #[test]
    fn two_year_horizon_is_inclusive() {
        let limit = latest_bookable_date(today());
        assert_eq!(limit, NaiveDate::from_ymd_opt(2028, 3, 10).unwrap_or_default());

        let mut fields = valid_fields();
        fields.event_date = date_str(limit);
        assert!(check(&fields, MIN_BUDGET).is_ok());

        let Some(beyond) = limit.succ_opt() else {
            panic!("valid date");
        };
        fields.event_date = date_str(beyond);
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::DateTooFar));
    }

    #[test]
    fn leap_day_horizon_rolls_into_march() {
        let Some(leap) = NaiveDate::from_ymd_opt(2028, 2, 29) else {
            panic!("valid date");
        };
        let limit = latest_bookable_date(leap);
        assert_eq!(limit, NaiveDate::from_ymd_opt(2030, 3, 1).unwrap_or_default());

        let mut fields = valid_fields();
        fields.event_date = "2030-03-01".to_string();
        assert_eq!(
            validate_booking(&fields, Some(EventType::Wedding), MIN_BUDGET, leap).map(|_| ()),
            Ok(())
        );
        fields.event_date = "2030-03-02".to_string();
        assert_eq!(
            validate_booking(&fields, Some(EventType::Wedding), MIN_BUDGET, leap).map(|_| ()),
            Err(BookingValidationError::DateTooFar)
        );
    }

    #[test]
    fn ordinary_day_keeps_day_and_month() {
        let Some(day) = NaiveDate::from_ymd_opt(2026, 2, 28) else {
            panic!("valid date");
        };
        assert_eq!(
            latest_bookable_date(day),
            NaiveDate::from_ymd_opt(2028, 2, 28).unwrap_or_default()
        );
    }

    #[test]
    fn missing_or_garbled_date_is_invalid() {
        for raw in ["", "tomorrow", "2026-13-01", "10/04/2026"] {
            let mut fields = valid_fields();
            fields.event_date = raw.to_string();
            assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::InvalidDate));
        }
    }

    #[test]
    fn budget_floor() {
        assert_eq!(
            check(&valid_fields(), MIN_BUDGET - 1),
            Err(BookingValidationError::BudgetTooLow)
        );
        assert!(check(&valid_fields(), MIN_BUDGET).is_ok());
    }

    #[test]
    fn blank_name_is_checked_last() {
        let mut fields = valid_fields();
        fields.name = "   ".to_string();
        assert_eq!(check(&fields, MIN_BUDGET), Err(BookingValidationError::MissingName));
        assert_eq!(check(&fields, 10), Err(BookingValidationError::BudgetTooLow));
    }

    #[test]
    fn guest_count_parsing() {
        assert_eq!(parse_guest_count("120"), 120);
        assert_eq!(parse_guest_count(" 80 approx"), 80);
        assert_eq!(parse_guest_count("many"), 0);
        assert_eq!(parse_guest_count("-5"), 0);
        assert_eq!(parse_guest_count(""), 0);
    }

    #[test]
    fn error_messages_are_sentences() {
        assert_eq!(
            BookingValidationError::BudgetTooLow.to_string(),
            "Minimum budget requirement is ₹9,999"
        );
        assert_eq!(BookingValidationError::DateTooFar.kind(), "date_too_far");
    }
}
