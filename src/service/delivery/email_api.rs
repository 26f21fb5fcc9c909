//! Secondary channel: call the vendor email API directly.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::{DeliveryChannel, DeliveryError, DeliveryPayload, classify_transport_error};
use crate::config::EmailApiConfig;

const FALLBACK_MESSAGE: &str = "Failed to send booking request via the email service.";

/// EmailJS-style template send.
///
/// The vendor answers `200 OK` with a plain-text body on success and a
/// plain-text error sentence otherwise (e.g. "The recipients address is
/// empty"), which is passed through unchanged.
#[derive(Debug, Clone)]
pub struct EmailApiChannel {
    client: reqwest::Client,
    config: EmailApiConfig,
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a DeliveryPayload,
}

impl EmailApiChannel {
    /// Creates a channel using the given credentials.
    #[must_use]
    pub fn new(client: reqwest::Client, config: EmailApiConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl DeliveryChannel for EmailApiChannel {
    fn name(&self) -> &'static str {
        "email_api"
    }

    async fn send(&self, payload: &DeliveryPayload) -> Result<String, DeliveryError> {
        let request = SendRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: payload,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_transport_error("email service", &e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(format!("EMAILJS-{}", Utc::now().timestamp_millis()));
        }

        let text = response.text().await.unwrap_or_default();
        let message = text.trim();
        Err(DeliveryError::ChannelRejected(if message.is_empty() {
            FALLBACK_MESSAGE.to_string()
        } else {
            message.to_string()
        }))
    }
}
