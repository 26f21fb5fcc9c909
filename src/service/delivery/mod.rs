//! Booking notification delivery with a simulated-success safety net.
//!
//! [`DeliveryService`] turns a [`BookingSubmission`] into a
//! [`DeliveryPayload`] and hands it to the configured [`DeliveryChannel`].
//! The outcome is classified once, here, for every channel:
//!
//! - channel unreachable (connect refused, DNS, timeout) → success with
//!   `simulated: true` and a `DEMO-SIMULATION-` reference;
//! - channel answered with an error → [`DeliveryError::ChannelRejected`]
//!   carrying the channel's own message;
//! - channel accepted → success with the channel's reference id.

pub mod email_api;
pub mod payload;
pub mod relay;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{ChannelConfig, DeliveryConfig};
use crate::domain::BookingSubmission;

pub use email_api::EmailApiChannel;
pub use payload::{DeliveryPayload, SiteLinks};
pub use relay::RelayChannel;

/// Prefix of reference ids produced while the channel is unreachable.
pub const SIMULATION_PREFIX: &str = "DEMO-SIMULATION-";

/// Why a delivery attempt did not produce a real reference id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    /// The channel could not be reached at all. Never surfaced to callers
    /// of [`DeliveryService::deliver`].
    #[error("notification channel unreachable: {0}")]
    TransportUnavailable(String),

    /// The channel answered but refused the booking. The message is the
    /// channel's own, verbatim.
    #[error("{0}")]
    ChannelRejected(String),
}

impl DeliveryError {
    /// Machine-readable kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::TransportUnavailable(_) => "transport_unavailable",
            Self::ChannelRejected(_) => "channel_rejected",
        }
    }
}

/// Sorts a client-side HTTP failure into unreachable vs. rejected.
///
/// Only connection and timeout failures count as "unreachable". Anything
/// else (request building, body encoding, redirect loops, decoding) is a
/// real fault and is reported as a rejection.
pub(crate) fn classify_transport_error(channel: &str, err: &reqwest::Error) -> DeliveryError {
    if err.is_connect() || err.is_timeout() {
        DeliveryError::TransportUnavailable(err.to_string())
    } else {
        DeliveryError::ChannelRejected(format!(
            "The booking request could not be sent to the {channel}: {err}."
        ))
    }
}

/// Successful delivery outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DeliveryResult {
    /// Always `true`; failures are reported as [`DeliveryError`].
    pub ok: bool,
    /// Channel-provided (or simulated) reference.
    pub reference_id: String,
    /// `true` when the channel was unreachable and success was synthesized.
    pub simulated: bool,
}

impl DeliveryResult {
    /// A real delivery acknowledged by the channel.
    #[must_use]
    pub fn delivered(reference_id: String) -> Self {
        Self {
            ok: true,
            reference_id,
            simulated: false,
        }
    }

    /// A synthesized success used while the channel is offline.
    #[must_use]
    pub fn simulated() -> Self {
        Self {
            ok: true,
            reference_id: format!("{SIMULATION_PREFIX}{}", Utc::now().timestamp_millis()),
            simulated: true,
        }
    }
}

/// A way of getting a booking notification to the customer.
///
/// Implementations only transport; outcome classification belongs to
/// [`DeliveryService`]. Return [`DeliveryError::TransportUnavailable`]
/// when the far end could not be reached.
#[async_trait]
pub trait DeliveryChannel: Send + Sync + fmt::Debug {
    /// Short channel name for logs.
    fn name(&self) -> &'static str;

    /// Sends the payload and returns the channel's reference id.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::TransportUnavailable`] when unreachable,
    /// [`DeliveryError::ChannelRejected`] when the channel refused.
    async fn send(&self, payload: &DeliveryPayload) -> Result<String, DeliveryError>;
}

/// Delivers booking submissions over a single configured channel.
#[derive(Debug, Clone)]
pub struct DeliveryService {
    channel: Arc<dyn DeliveryChannel>,
    links: SiteLinks,
}

impl DeliveryService {
    /// Creates a service over an explicit channel.
    #[must_use]
    pub fn new(channel: Arc<dyn DeliveryChannel>, links: SiteLinks) -> Self {
        Self { channel, links }
    }

    /// Builds the HTTP client and the channel selected in `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the site base URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_config(config: &DeliveryConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        let channel: Arc<dyn DeliveryChannel> = match &config.channel {
            ChannelConfig::Relay { url } => Arc::new(RelayChannel::new(client, url.clone())),
            ChannelConfig::EmailApi(api) => Arc::new(EmailApiChannel::new(client, api.clone())),
        };
        let links = SiteLinks::new(&config.site_base_url, &config.support_email)?;
        tracing::info!(channel = channel.name(), "delivery channel configured");
        Ok(Self::new(channel, links))
    }

    /// Name of the underlying channel.
    #[must_use]
    pub fn channel_name(&self) -> &'static str {
        self.channel.name()
    }

    /// Delivers a validated booking.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::ChannelRejected`] when the channel refused
    /// the booking. An unreachable channel is not an error: it yields a
    /// simulated [`DeliveryResult`].
    pub async fn deliver(
        &self,
        submission: &BookingSubmission,
    ) -> Result<DeliveryResult, DeliveryError> {
        let payload = DeliveryPayload::build(submission, &self.links);
        let booking_id = submission.booking_id();
        let channel = self.channel.name();

        match self.channel.send(&payload).await {
            Ok(reference_id) => {
                tracing::info!(%booking_id, channel, %reference_id, "booking notification sent");
                Ok(DeliveryResult::delivered(reference_id))
            }
            Err(DeliveryError::TransportUnavailable(reason)) => {
                let result = DeliveryResult::simulated();
                tracing::warn!(
                    %booking_id,
                    channel,
                    %reason,
                    reference_id = %result.reference_id,
                    "notification channel unreachable, simulating success"
                );
                Ok(result)
            }
            Err(err) => {
                tracing::warn!(%booking_id, channel, error = %err, "notification channel rejected booking");
                Err(err)
            }
        }
    }
}


#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use super::testing::{StubChannel, service};
    use crate::domain::booking::sample_submission;

    #[tokio::test]
    async fn accepted_delivery_returns_channel_reference() {
        let stub = StubChannel::accepting("msg-123");
        let svc = service(Arc::clone(&stub));
        let submission = sample_submission();

        let Ok(result) = svc.deliver(&submission).await else {
            panic!("expected success");
        };
        assert_eq!(result, DeliveryResult::delivered("msg-123".to_string()));

        let seen = stub.seen();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen.first().map(|p| p.booking_id.as_str()),
            Some(submission.booking_id().as_str())
        );
    }

    #[tokio::test]
    async fn unreachable_channel_is_simulated_success() {
        let stub = StubChannel::new(Err(DeliveryError::TransportUnavailable(
            "connection refused".to_string(),
        )));
        let Ok(result) = service(stub).deliver(&sample_submission()).await else {
            panic!("transport failure must not surface");
        };
        assert!(result.ok);
        assert!(result.simulated);
        assert!(result.reference_id.starts_with(SIMULATION_PREFIX));
    }

    #[tokio::test]
    async fn rejection_is_propagated_verbatim() {
        let message = "Invalid login: 535-5.7.8 Username and Password not accepted";
        let stub = StubChannel::new(Err(DeliveryError::ChannelRejected(message.to_string())));
        let result = service(stub).deliver(&sample_submission()).await;
        let Err(err) = result else {
            panic!("expected rejection");
        };
        assert_eq!(err.to_string(), message);
        assert_eq!(err.kind(), "channel_rejected");
    }

    #[test]
    fn from_config_selects_relay_by_default() {
        let Ok(svc) = DeliveryService::from_config(&DeliveryConfig::default()) else {
            panic!("default config must build");
        };
        assert_eq!(svc.channel_name(), "relay");
    }

    #[test]
    fn from_config_selects_email_api() {
        let config = DeliveryConfig {
            channel: ChannelConfig::EmailApi(crate::config::EmailApiConfig {
                url: crate::config::DEFAULT_EMAIL_API_URL.to_string(),
                service_id: "service".to_string(),
                template_id: "template".to_string(),
                public_key: "key".to_string(),
            }),
            ..DeliveryConfig::default()
        };
        let Ok(svc) = DeliveryService::from_config(&config) else {
            panic!("email api config must build");
        };
        assert_eq!(svc.channel_name(), "email_api");
    }
}
