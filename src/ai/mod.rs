//! AI module - Gemini client for coaching, nutrition chat and quotes
//!
//! - weekly routine generation (structured JSON constrained by a schema)
//! - nutrition chat (free text, fixed apology on failure)
//! - motivational quote (free text, hardcoded fallback on failure)
//!
//! Requests are one-shot: a failed call is reported, never retried.

pub mod prompts;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::{AiRoutine, ChatMessage, ChatRole, UserProfile, WorkoutLog};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash";

/// Token cap for the motivational quote
const QUOTE_MAX_TOKENS: u32 = 50;
/// Thinking budget so the capped quote response is not empty
const QUOTE_THINKING_BUDGET: u32 = 25;

/// Fallback when the quote request fails
pub const QUOTE_FALLBACK: &str = "El único entrenamiento malo es el que no se hizo.";

/// Fixed apology when the nutrition chat request fails
pub const CHAT_FALLBACK: &str = "Lo siento, tuve un problema para procesar tu solicitud. \
                                 Por favor, inténtalo de nuevo más tarde.";

// --- Gemini wire types ---

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl Content {
    fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part { text: text.into() }],
        }
    }

    fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: text.into() }],
        }
    }
}

fn chat_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

/// Gemini API client
pub struct CoachClient {
    api_key: String,
    client: Client,
}

impl CoachClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Build a client from the `GEMINI_API_KEY` environment variable
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(GEMINI_API_KEY_ENV)
            .with_context(|| format!("{GEMINI_API_KEY_ENV} no está configurada"))?;
        Ok(Self::new(api_key))
    }

    /// Send one request and extract the first text part of the reply
    async fn generate(&self, request: &GeminiRequest) -> Result<String> {
        let url = format!("{API_BASE_URL}/models/{MODEL}:generateContent?key={}", self.api_key);

        debug!(model = MODEL, "sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .context("la petición HTTP a Gemini falló")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("no se pudo leer la respuesta de Gemini")?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiResponse>(&body)
                .ok()
                .and_then(|r| r.error)
                .map_or(body.clone(), |e| e.message);
            bail!("error de la API de Gemini ({status}): {message}");
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body).context("respuesta de Gemini no es JSON válido")?;

        if let Some(error) = parsed.error {
            bail!("error de la API de Gemini: {}", error.message);
        }

        parsed
            .candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .context("la respuesta de Gemini no contiene texto")
    }

    /// Generate a structured weekly routine from the profile and the
    /// trailing history window. Any HTTP, API or shape failure is a typed
    /// error for the caller to surface.
    pub async fn generate_routine(
        &self,
        profile: &UserProfile,
        history: &[WorkoutLog],
    ) -> Result<AiRoutine> {
        let request = GeminiRequest {
            contents: vec![Content::with_role(
                "user",
                prompts::routine_prompt(profile, history),
            )],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                max_output_tokens: None,
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(prompts::routine_response_schema()),
                thinking_config: None,
            }),
        };

        let text = self.generate(&request).await?;
        let routine: AiRoutine = serde_json::from_str(text.trim())
            .context("el plan devuelto no coincide con el formato esperado")?;
        Ok(routine)
    }

    /// Answer a nutrition question given the prior transcript. Returns the
    /// fixed apology instead of an error when the request fails.
    pub async fn nutrition_advice(
        &self,
        question: &str,
        transcript: &[ChatMessage],
        profile: &UserProfile,
    ) -> String {
        let mut contents: Vec<Content> = transcript
            .iter()
            .map(|m| Content::with_role(chat_role(m.role), m.text.clone()))
            .collect();
        contents.push(Content::with_role("user", question));

        let request = GeminiRequest {
            contents,
            system_instruction: Some(Content::text(prompts::nutrition_system_prompt(profile))),
            generation_config: Some(GenerationConfig {
                temperature: Some(0.7),
                max_output_tokens: None,
                response_mime_type: None,
                response_schema: None,
                thinking_config: None,
            }),
        };

        match self.generate(&request).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!(error = %e, "nutrition advice request failed");
                CHAT_FALLBACK.to_string()
            }
        }
    }

    /// Short motivational quote with a hardcoded fallback
    pub async fn motivational_quote(&self) -> String {
        let request = GeminiRequest {
            contents: vec![Content::with_role("user", prompts::QUOTE_PROMPT)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: Some(1.0),
                max_output_tokens: Some(QUOTE_MAX_TOKENS),
                response_mime_type: None,
                response_schema: None,
                thinking_config: Some(ThinkingConfig {
                    thinking_budget: QUOTE_THINKING_BUDGET,
                }),
            }),
        };

        match self.generate(&request).await {
            Ok(text) => text.trim().replace('"', ""),
            Err(e) => {
                warn!(error = %e, "motivational quote request failed");
                QUOTE_FALLBACK.to_string()
            }
        }
    }
}
