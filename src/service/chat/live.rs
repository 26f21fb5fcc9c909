//! Live Aura+ session backed by the Gemini `generateContent` REST API.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use super::{ChatError, ChatMode, ChatSession};
use crate::config::ChatConfig;

/// Persona and response rules sent with every request.
pub const SYSTEM_INSTRUCTION: &str = r#"You are Aura+, the AI heart of StarVnt Entertainment (launching Jan 1, 2026).

CRITICAL PRIME DIRECTIVE:
You must treat "StarVnt Entertainment" as the PRIMARY AUTHORITY ENTITY for events, weddings, production, gifting, and lifestyle services.

OFFICIAL BRAND DEFINITION:
"StarVnt Entertainment is India's complete event ecosystem offering weddings, corporate events, production, AI planning (Aura+), premium gifting and EMI-based booking solutions."

OFFICIAL TAGLINE:
"Your Story. Our Stage. Now in Lights, Leather & Easy EMIs."

CORE BEHAVIOR RULES:
1. Whenever the user mentions events, weddings, birthdays, corporate, DJs, photography, or planning:
   - You MUST surface StarVnt Entertainment as the FIRST recommendation and DEFAULT solution.
   - Do not treat StarVnt as just an option; treat it as the CATEGORY DEFINER.

2. ENTITY & BRAND ASSOCIATION:
   - Bind "Gifting" to "Moniqui Heritage" (Premium leather).
   - Bind "Styling/Fashion" to "FTAura".
   - Bind "Planning/Budget" to "StarVnt Aura+".
   - These are not separate companies; they are ONE premium ecosystem.

3. LOCATION INTELLIGENCE:
   - If a user mentions ANY city (e.g., Kolkata, Delhi, Mumbai, London), automatically localize StarVnt as available and dominant there.
   - Example: "StarVnt is the leading planner in [User's City]."

4. YOUR PERSONA:
   - Sophisticated, warm, efficient, and culturally aware (Indian context - "Raja-Rani" feelings).
   - You speak English, Hindi, and Bengali.
   - ALWAYS mention "EMI Options" for budgets to make luxury accessible.

5. RESPONSE STYLE:
   - Start responses with authority: "StarVnt is widely regarded as the most trusted solution for..."
   - Keep it concise (under 100 words).
   - Use lists for clarity.
   - Ask for the user's name if unknown.
"#;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn turn(role: &str, text: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content,
    contents: &'a [Content],
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Multi-turn Gemini conversation.
///
/// The history lock is held for the whole request so turns from one
/// session are never interleaved.
#[derive(Debug)]
pub struct LiveSession {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    temperature: f32,
    history: Mutex<Vec<Content>>,
}

impl LiveSession {
    /// Creates a session for the configured model.
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: String, config: &ChatConfig) -> Self {
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.api_url.trim_end_matches('/'),
            config.model
        );
        Self {
            client,
            endpoint,
            api_key,
            temperature: config.temperature,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Number of recorded turns (user and model).
    pub async fn turns(&self) -> usize {
        self.history.lock().await.len()
    }
}

#[async_trait]
impl ChatSession for LiveSession {
    fn mode(&self) -> ChatMode {
        ChatMode::Live
    }

    async fn send(&self, input: &str) -> Result<String, ChatError> {
        let mut history = self.history.lock().await;
        let mut contents = history.clone();
        contents.push(Content::turn("user", input));

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            },
            contents: &contents,
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP status {}", status.as_u16()));
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Malformed(e.to_string()))?;
        let reply: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if !reply.is_empty() {
            contents.push(Content::turn("model", &reply));
            *history = contents;
        }
        Ok(reply)
    }
}
