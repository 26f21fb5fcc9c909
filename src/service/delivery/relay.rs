//! Primary channel: POST the payload to the local email relay.

use async_trait::async_trait;
use serde_json::Value;

use super::{DeliveryChannel, DeliveryError, DeliveryPayload, classify_transport_error};

/// HTTP relay that actually sends the confirmation email.
///
/// A 2xx answer must carry a JSON body; the reference id is read from
/// `messageId`, `message_id`, `reference_id` or `id`. Any other status is a
/// rejection whose message comes from the body's `error` / `message` field.
#[derive(Debug, Clone)]
pub struct RelayChannel {
    client: reqwest::Client,
    url: String,
}

impl RelayChannel {
    /// Creates a relay channel posting to `url`.
    #[must_use]
    pub fn new(client: reqwest::Client, url: String) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl DeliveryChannel for RelayChannel {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn send(&self, payload: &DeliveryPayload) -> Result<String, DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| classify_transport_error("booking relay", &e))?;

        // The relay has answered; from here on nothing counts as unreachable.
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => Some(body),
            Err(err) => {
                tracing::warn!(status = status.as_u16(), error = %err, "booking relay body unreadable");
                None
            }
        };
        let json = body.and_then(|b| serde_json::from_str::<Value>(&b).ok());

        if !status.is_success() {
            let message = json
                .as_ref()
                .and_then(error_message)
                .unwrap_or_else(|| {
                    format!(
                        "The booking relay responded with HTTP status {}.",
                        status.as_u16()
                    )
                });
            return Err(DeliveryError::ChannelRejected(message));
        }

        let json = json.ok_or_else(|| {
            DeliveryError::ChannelRejected(
                "The booking relay returned an unreadable response.".to_string(),
            )
        })?;
        Ok(reference_id(&json).unwrap_or_else(|| format!("RELAY-{}", payload.booking_id)))
    }
}

/// Reference id reported by the relay, if any.
fn reference_id(json: &Value) -> Option<String> {
    ["messageId", "message_id", "reference_id", "id"]
        .iter()
        .find_map(|key| json.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Error sentence reported by the relay, if any.
fn error_message(json: &Value) -> Option<String> {
    let error = json.get("error");
    error
        .and_then(Value::as_str)
        .or_else(|| error.and_then(|e| e.get("message")).and_then(Value::as_str))
        .or_else(|| json.get("message").and_then(Value::as_str))
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
