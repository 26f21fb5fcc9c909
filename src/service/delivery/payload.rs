//! Transport payload sent to the notification channels.

use chrono::Days;
use reqwest::Url;
use serde::Serialize;

use crate::domain::BookingSubmission;
use crate::domain::currency::format_inr;

const CALENDAR_TEMPLATE_URL: &str = "https://calendar.google.com/calendar/render";

/// Site settings used to derive per-booking links.
#[derive(Debug, Clone)]
pub struct SiteLinks {
    base: Url,
    calendar: Url,
    support_email: String,
}

impl SiteLinks {
    /// Parses the public site root.
    ///
    /// # Errors
    ///
    /// Returns an error if `site_base_url` is not an absolute URL.
    pub fn new(site_base_url: &str, support_email: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base: Url::parse(site_base_url)?,
            calendar: Url::parse(CALENDAR_TEMPLATE_URL)?,
            support_email: support_email.to_string(),
        })
    }

    fn page(&self, page: &str, key: &str, booking_id: &str) -> String {
        let mut url = self.base.clone();
        let path = format!("{}/{page}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url.query_pairs_mut().clear().append_pair(key, booking_id);
        url.into()
    }

    fn calendar(&self, submission: &BookingSubmission, manage_link: &str) -> String {
        let start = submission.event_date();
        let end = start.checked_add_days(Days::new(1)).unwrap_or(start);
        let dates = format!("{}/{}", start.format("%Y%m%d"), end.format("%Y%m%d"));
        let title = format!(
            "{} with StarVnt ({})",
            submission.event_type(),
            submission.booking_id()
        );
        let details = format!(
            "Booking ID: {}\nVenue: {}\nManage your booking: {manage_link}",
            submission.booking_id(),
            submission.venue_name()
        );

        let mut url = self.calendar.clone();
        url.query_pairs_mut()
            .append_pair("action", "TEMPLATE")
            .append_pair("text", &title)
            .append_pair("dates", &dates)
            .append_pair("details", &details)
            .append_pair("location", submission.venue_address());
        url.into()
    }
}

/// JSON body handed to a delivery channel.
///
/// Carries every submission field, the formatted budget, several
/// recipient aliases (email templates differ in which one they read) and
/// links derived from the booking id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryPayload {
    /// Booking reference token.
    pub booking_id: String,
    /// Customer name.
    pub customer_name: String,
    /// Customer email.
    pub customer_email: String,
    /// Customer mobile number.
    pub customer_phone: String,
    /// Event category label.
    pub event_type: String,
    /// Event date, `YYYY-MM-DD`.
    pub event_date: String,
    /// Approximate guest count.
    pub guest_count: u32,
    /// Venue name or sentinel.
    pub venue_name: String,
    /// Venue address or sentinel.
    pub venue_address: String,
    /// Budget in rupees.
    pub amount_paid: u64,
    /// Budget formatted as INR.
    pub budget: String,
    /// Recipient alias.
    pub to_email: String,
    /// Recipient alias.
    pub user_email: String,
    /// Recipient alias.
    pub email: String,
    /// Reply-to address.
    pub reply_to: String,
    /// Booking management page.
    pub manage_booking_link: String,
    /// Add-to-calendar link.
    pub calendar_link: String,
    /// Email preference page.
    pub preferences_link: String,
    /// Unsubscribe page.
    pub unsubscribe_link: String,
    /// Support contact.
    pub support_email: String,
}

impl DeliveryPayload {
    /// Builds the payload for `submission`.
    #[must_use]
    pub fn build(submission: &BookingSubmission, links: &SiteLinks) -> Self {
        let id = submission.booking_id().as_str();
        let email = submission.customer_email().to_string();
        let manage_booking_link = links.page("manage-booking", "id", id);
        let calendar_link = links.calendar(submission, &manage_booking_link);

        Self {
            booking_id: id.to_string(),
            customer_name: submission.customer_name().to_string(),
            customer_email: email.clone(),
            customer_phone: submission.customer_phone().to_string(),
            event_type: submission.event_type().label().to_string(),
            event_date: submission.event_date().format("%Y-%m-%d").to_string(),
            guest_count: submission.guest_count(),
            venue_name: submission.venue_name().to_string(),
            venue_address: submission.venue_address().to_string(),
            amount_paid: submission.amount_paid(),
            budget: format_inr(submission.amount_paid()),
            to_email: email.clone(),
            user_email: email.clone(),
            email: email.clone(),
            reply_to: email,
            manage_booking_link,
            calendar_link,
            preferences_link: links.page("email-preferences", "booking", id),
            unsubscribe_link: links.page("unsubscribe", "booking", id),
            support_email: links.support_email.clone(),
        }
    }
}
