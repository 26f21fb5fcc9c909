//! Aura+ chat: one capability, two backends.
//!
//! A [`ChatSession`] is either a [`LiveSession`] talking to Gemini or an
//! [`OfflineSession`] with canned replies. [`create_session`] picks one
//! from configuration; nothing downstream branches on which it got.
//! [`ChatService`] owns the [`ChatRegistry`] and turns backend failures
//! into the apology texts shown to visitors.

pub mod live;
pub mod offline;
pub mod registry;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::ChatConfig;
use crate::domain::{ChatMessage, ChatRole};
use crate::error::GatewayError;

pub use live::LiveSession;
pub use offline::{OfflineSession, offline_reply};
pub use registry::{ChatEntry, ChatRegistry};

/// Reply used when the backend fails.
pub const UNREACHABLE_REPLY: &str =
    "I am currently unable to connect to the StarVnt network. Please check your internet or try again later.";

/// Reply used when the backend answers with no text.
pub const SILENT_REPLY: &str = "I apologize, I'm having a moment of silence. Please try again.";

/// Which backend a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    /// Generative AI over the network.
    Live,
    /// Local keyword replies.
    Offline,
}

/// Chat backend failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The AI service could not be reached.
    #[error("chat transport error: {0}")]
    Transport(String),
    /// The AI service answered with an error status.
    #[error("chat API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the service.
        message: String,
    },
    /// The response body was not understood.
    #[error("malformed chat response: {0}")]
    Malformed(String),
}

/// A conversation with Aura+.
#[async_trait]
pub trait ChatSession: Send + Sync + fmt::Debug {
    /// Backend kind.
    fn mode(&self) -> ChatMode;

    /// Sends one user turn and returns the assistant's text, which may be
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError`] if the backend fails.
    async fn send(&self, input: &str) -> Result<String, ChatError>;
}

/// Builds a live session when an API key is configured, otherwise an
/// offline one.
#[must_use]
pub fn create_session(config: &ChatConfig, client: &reqwest::Client) -> Box<dyn ChatSession> {
    match &config.api_key {
        Some(key) => Box::new(LiveSession::new(client.clone(), key.clone(), config)),
        None => {
            tracing::warn!("chat API key is missing, switching to offline mode");
            Box::new(OfflineSession::new(config.offline_delay))
        }
    }
}

/// Opens, drives and closes chat sessions.
#[derive(Debug, Clone)]
pub struct ChatService {
    config: ChatConfig,
    client: reqwest::Client,
    registry: Arc<ChatRegistry>,
}

impl ChatService {
    /// Creates the service and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: ChatConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        tracing::info!(
            live = config.api_key.is_some(),
            model = %config.model,
            "chat service configured"
        );
        Ok(Self {
            registry: Arc::new(ChatRegistry::with_limits(
                config.session_idle_timeout,
                config.max_sessions,
            )),
            config,
            client,
        })
    }

    /// Backend new sessions will use.
    #[must_use]
    pub const fn mode(&self) -> ChatMode {
        if self.config.api_key.is_some() {
            ChatMode::Live
        } else {
            ChatMode::Offline
        }
    }

    /// Session storage.
    #[must_use]
    pub fn registry(&self) -> &Arc<ChatRegistry> {
        &self.registry
    }

    /// Periodically drops idle sessions for as long as the runtime lives.
    pub fn spawn_session_sweeper(&self) -> tokio::task::JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let period = registry.idle_timeout().max(Duration::from_secs(1));
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let dropped = registry.sweep().await;
                if dropped > 0 {
                    tracing::info!(dropped, "idle chat sessions dropped");
                }
            }
        })
    }

    /// Opens a session and returns it with its opening transcript.
    pub async fn create_session(&self) -> (Uuid, ChatMode, Vec<ChatMessage>) {
        let session = create_session(&self.config, &self.client);
        let mode = session.mode();
        let entry = self.registry.insert(ChatEntry::new(session)).await;
        let transcript = entry.transcript.read().await.clone();
        tracing::info!(session_id = %entry.id, ?mode, "chat session opened");
        (entry.id, mode, transcript)
    }

    /// Sends a visitor message and returns the assistant's reply.
    ///
    /// Backend failures never surface as errors; the visitor gets an
    /// apology reply instead. Both turns are added to the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::InvalidRequest`] for a blank message and
    /// [`GatewayError::SessionNotFound`] for an unknown session.
    pub async fn send_message(&self, id: Uuid, text: &str) -> Result<ChatMessage, GatewayError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Please type a message before sending.".to_string(),
            ));
        }
        let entry = self.registry.get(id).await?;
        entry
            .transcript
            .write()
            .await
            .push(ChatMessage::new(ChatRole::User, text));

        let reply = match entry.session.send(text).await {
            Ok(reply) if reply.trim().is_empty() => SILENT_REPLY.to_string(),
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(session_id = %id, error = %err, "chat backend failed");
                UNREACHABLE_REPLY.to_string()
            }
        };

        let message = ChatMessage::new(ChatRole::Model, reply);
        entry.transcript.write().await.push(message.clone());
        Ok(message)
    }

    /// Full transcript of a session.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SessionNotFound`] for an unknown session.
    pub async fn transcript(&self, id: Uuid) -> Result<Vec<ChatMessage>, GatewayError> {
        let entry = self.registry.get(id).await?;
        let transcript = entry.transcript.read().await.clone();
        Ok(transcript)
    }

    /// Closes a session.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::SessionNotFound`] for an unknown session.
    pub async fn close_session(&self, id: Uuid) -> Result<(), GatewayError> {
        self.registry.remove(id).await?;
        tracing::info!(session_id = %id, "chat session closed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::chat_message::GREETING;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn offline_service() -> ChatService {
        let Ok(service) = ChatService::new(ChatConfig {
            offline_delay: Duration::ZERO,
            ..ChatConfig::default()
        }) else {
            panic!("client builds");
        };
        service
    }

    fn live_service(server: &MockServer) -> ChatService {
        let Ok(service) = ChatService::new(ChatConfig {
            api_key: Some("k".to_string()),
            api_url: server.uri(),
            ..ChatConfig::default()
        }) else {
            panic!("client builds");
        };
        service
    }

    #[tokio::test]
    async fn missing_key_selects_offline_session() {
        let service = offline_service();
        assert_eq!(service.mode(), ChatMode::Offline);
        let (_, mode, transcript) = service.create_session().await;
        assert_eq!(mode, ChatMode::Offline);
        assert_eq!(transcript.first().map(|m| m.text.as_str()), Some(GREETING));
    }

    #[tokio::test]
    async fn offline_exchange_is_recorded() {
        let service = offline_service();
        let (id, _, _) = service.create_session().await;

        let Ok(reply) = service.send_message(id, "  Tell me about EMI  ").await else {
            panic!("send failed");
        };
        assert_eq!(reply.role, ChatRole::Model);
        assert_eq!(reply.text, offline_reply("emi"));

        let Ok(transcript) = service.transcript(id).await else {
            panic!("session exists");
        };
        let roles: Vec<ChatRole> = transcript.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![ChatRole::Model, ChatRole::User, ChatRole::Model]);
        assert_eq!(
            transcript.get(1).map(|m| m.text.as_str()),
            Some("Tell me about EMI")
        );
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let service = offline_service();
        let (id, _, _) = service.create_session().await;
        let Err(err) = service.send_message(id, "   ").await else {
            panic!("blank message accepted");
        };
        assert!(matches!(err, GatewayError::InvalidRequest(_)));
        assert_eq!(err.to_string(), "Please type a message before sending.");
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_drops_abandoned_sessions() {
        let Ok(service) = ChatService::new(ChatConfig {
            offline_delay: Duration::ZERO,
            session_idle_timeout: Duration::from_secs(60),
            ..ChatConfig::default()
        }) else {
            panic!("client builds");
        };
        let (id, _, _) = service.create_session().await;
        let sweeper = service.spawn_session_sweeper();

        tokio::time::sleep(Duration::from_secs(130)).await;
        assert!(service.registry().is_empty().await);
        assert!(matches!(
            service.transcript(id).await,
            Err(GatewayError::SessionNotFound(_))
        ));
        sweeper.abort();
    }

    #[tokio::test]
    async fn session_count_is_capped() {
        let Ok(service) = ChatService::new(ChatConfig {
            offline_delay: Duration::ZERO,
            max_sessions: 3,
            ..ChatConfig::default()
        }) else {
            panic!("client builds");
        };
        for _ in 0..10 {
            service.create_session().await;
        }
        assert_eq!(service.registry().len().await, 3);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let service = offline_service();
        let id = Uuid::new_v4();
        assert!(matches!(
            service.send_message(id, "hi").await,
            Err(GatewayError::SessionNotFound(_))
        ));
        assert!(service.close_session(id).await.is_err());
    }

    #[tokio::test]
    async fn backend_failure_becomes_apology() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let service = live_service(&server);
        let (id, mode, _) = service.create_session().await;
        assert_eq!(mode, ChatMode::Live);
        let Ok(reply) = service.send_message(id, "hello").await else {
            panic!("errors are absorbed");
        };
        assert_eq!(reply.text, UNREACHABLE_REPLY);
    }

    #[tokio::test]
    async fn empty_reply_becomes_silence_apology() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": ""}]}}]
            })))
            .mount(&server)
            .await;

        let service = live_service(&server);
        let (id, _, _) = service.create_session().await;
        let Ok(reply) = service.send_message(id, "hello").await else {
            panic!("send failed");
        };
        assert_eq!(reply.text, SILENT_REPLY);
    }

    #[tokio::test]
    async fn closed_session_is_gone() {
        let service = offline_service();
        let (id, _, _) = service.create_session().await;
        assert!(service.close_session(id).await.is_ok());
        assert!(service.transcript(id).await.is_err());
    }
}
