//! Generative-text client for the Gemini `generateContent` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use press_config::GeminiConfig;
use press_core::collaborators::TextGenerator;
use press_core::errors::CollaboratorError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::ClientError;
use crate::http::check_response;

const SERVICE: &str = "gemini";

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for a single Gemini model.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client` fails to build.
    pub fn new(config: &GeminiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .user_agent("pressroom/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }

    /// Send one prompt and return the first candidate's text.
    ///
    /// With a `schema`, the request asks for JSON output constrained by it; the
    /// returned text is still unparsed.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, a non-success status, or a
    /// response without candidate text.
    pub async fn generate_content(
        &self,
        prompt: &str,
        schema: Option<&Value>,
    ) -> Result<String, ClientError> {
        tracing::debug!(model = %self.model, structured = schema.is_some(), "calling generateContent");
        let resp = self
            .http
            .post(self.endpoint())
            .json(&build_payload(prompt, schema))
            .send()
            .await?;
        let resp = check_response(resp, gemini_error_message).await?;
        let data: GenerateResponse = resp.json().await?;
        first_candidate_text(data)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.generate_content(prompt, None)
            .await
            .map_err(|e| e.into_collaborator(SERVICE))
    }

    async fn generate_structured(
        &self,
        prompt: &str,
        schema: &Value,
    ) -> Result<Value, CollaboratorError> {
        let text = self
            .generate_content(prompt, Some(schema))
            .await
            .map_err(|e| e.into_collaborator(SERVICE))?;
        parse_structured(&text).map_err(|e| e.into_collaborator(SERVICE))
    }
}

fn build_payload(prompt: &str, schema: Option<&Value>) -> Value {
    let mut payload = json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
    });
    if let Some(schema) = schema {
        payload["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }
    payload
}

fn first_candidate_text(data: GenerateResponse) -> Result<String, ClientError> {
    data.candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| ClientError::UnexpectedResponse("Unexpected response from Gemini API.".into()))
}

fn parse_structured(text: &str) -> Result<Value, ClientError> {
    serde_json::from_str(text).map_err(|e| ClientError::Parse(e.to_string()))
}

fn gemini_error_message(body: &str, _status: StatusCode) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| "Unknown error".to_string())
}
