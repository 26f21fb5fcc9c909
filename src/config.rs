//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The environment is read exactly once,
//! in [`GatewayConfig::from_env`]; services receive the resulting plain
//! structs so tests can build them by hand.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};

/// Default Gemini REST endpoint.
pub const DEFAULT_CHAT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default local relay endpoint.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api/send-booking-email";

/// Default EmailJS-compatible send endpoint.
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Booking notification settings.
    pub delivery: DeliveryConfig,

    /// Aura+ chat settings.
    pub chat: ChatConfig,
}

/// Which notification channel carries booking emails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelConfig {
    /// POST the payload to a local HTTP relay.
    Relay {
        /// Full relay endpoint URL.
        url: String,
    },
    /// Call the vendor email API directly with template parameters.
    EmailApi(EmailApiConfig),
}

/// Credentials for the vendor email API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailApiConfig {
    /// Send endpoint.
    pub url: String,
    /// Vendor service identifier.
    pub service_id: String,
    /// Vendor template identifier.
    pub template_id: String,
    /// Public (user) key.
    pub public_key: String,
}

/// Settings for the Delivery Service.
#[derive(Debug, Clone)]
pub struct DeliveryConfig {
    /// Selected channel.
    pub channel: ChannelConfig,

    /// Timeout for a single delivery attempt.
    pub timeout: Duration,

    /// Public site root used to build booking links (no trailing slash).
    pub site_base_url: String,

    /// Support address included in notifications.
    pub support_email: String,
}

/// Settings for the Aura+ chat.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Generative-AI API key. `None` selects the offline session.
    pub api_key: Option<String>,

    /// API base URL.
    pub api_url: String,

    /// Model name.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Simulated thinking delay of the offline session.
    pub offline_delay: Duration,

    /// Timeout for a single live request.
    pub timeout: Duration,

    /// Sessions idle for longer than this are dropped.
    pub session_idle_timeout: Duration,

    /// Most sessions kept at once; the least recently used goes first.
    pub max_sessions: usize,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            channel: ChannelConfig::Relay {
                url: DEFAULT_RELAY_URL.to_string(),
            },
            timeout: Duration::from_secs(10),
            site_base_url: "https://starvnt.com".to_string(),
            support_email: "events@starvnt.com".to_string(),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: DEFAULT_CHAT_API_URL.to_string(),
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.7,
            offline_delay: Duration::from_millis(1500),
            timeout: Duration::from_secs(30),
            session_idle_timeout: Duration::from_secs(30 * 60),
            max_sessions: 1000,
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` cannot be parsed, if
    /// `DELIVERY_CHANNEL` names an unknown channel, or if the email API
    /// channel is selected without its credentials.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let delivery_defaults = DeliveryConfig::default();
        let channel = match env_or("DELIVERY_CHANNEL", "relay").as_str() {
            "relay" => ChannelConfig::Relay {
                url: env_or("RELAY_URL", DEFAULT_RELAY_URL),
            },
            "email_api" => ChannelConfig::EmailApi(EmailApiConfig {
                url: env_or("EMAIL_API_URL", DEFAULT_EMAIL_API_URL),
                service_id: required("EMAIL_API_SERVICE_ID")?,
                template_id: required("EMAIL_API_TEMPLATE_ID")?,
                public_key: required("EMAIL_API_PUBLIC_KEY")?,
            }),
            other => bail!("unknown DELIVERY_CHANNEL {other:?} (expected relay or email_api)"),
        };

        let delivery = DeliveryConfig {
            channel,
            timeout: Duration::from_secs(parse_env("DELIVERY_TIMEOUT_SECS", 10)),
            site_base_url: env_or("SITE_BASE_URL", &delivery_defaults.site_base_url)
                .trim_end_matches('/')
                .to_string(),
            support_email: env_or("SUPPORT_EMAIL", &delivery_defaults.support_email),
        };

        let chat_defaults = ChatConfig::default();
        let chat = ChatConfig {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            api_url: env_or("CHAT_API_URL", &chat_defaults.api_url),
            model: env_or("CHAT_MODEL", &chat_defaults.model),
            temperature: parse_env("CHAT_TEMPERATURE", chat_defaults.temperature),
            offline_delay: Duration::from_millis(parse_env("CHAT_OFFLINE_DELAY_MS", 1500)),
            timeout: Duration::from_secs(parse_env("CHAT_TIMEOUT_SECS", 30)),
            session_idle_timeout: Duration::from_secs(parse_env(
                "CHAT_SESSION_IDLE_SECS",
                chat_defaults.session_idle_timeout.as_secs(),
            )),
            max_sessions: parse_env("CHAT_MAX_SESSIONS", chat_defaults.max_sessions).max(1),
        };

        Ok(Self {
            listen_addr,
            delivery,
            chat,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Reads an environment variable, returning `default` when unset.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reads an environment variable, treating blank values as unset.
fn non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(key: &str) -> anyhow::Result<String> {
    non_empty(key).with_context(|| format!("{key} must be set when DELIVERY_CHANNEL=email_api"))
}
