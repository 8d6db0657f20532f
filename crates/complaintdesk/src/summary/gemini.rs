//! Summary generation through the Gemini `generateContent` API.

use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Instrument;

use super::prompt::build_prompt;
use super::{failure_text, SummaryGenerator, EMPTY_RESPONSE, KEY_NOT_CONFIGURED};
use crate::complaint::Complaint;
use crate::config::schema::SummaryConfig;
use crate::secrets::{resolve_secret_optional, SecretError};

/// Maximum length of an API error body carried into messages.
const MAX_ERROR_BODY_LENGTH: usize = 200;

/// Errors from a single generation request.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("the API responded with status {status}: {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if it has any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Pulls the human-readable message out of an API error body.
fn api_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        if !parsed.error.message.is_empty() {
            return parsed.error.message;
        }
    }
    let body = body.trim();
    if body.len() > MAX_ERROR_BODY_LENGTH {
        let cut = (0..=MAX_ERROR_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... (truncated)", &body[..cut])
    } else {
        body.to_string()
    }
}

/// Calls a Gemini model to summarize complaints.
pub struct GeminiSummarizer {
    client: Client,
    api_key: Option<SecretString>,
    model: String,
    endpoint: String,
}

impl GeminiSummarizer {
    pub fn new(api_key: Option<SecretString>, model: &str, endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    /// Creates a summarizer, resolving the API key from the configured
    /// sources. A key that is simply not configured is not an error.
    pub fn from_config(config: &SummaryConfig) -> Result<Self, SecretError> {
        let api_key = match resolve_secret_optional(
            config.api_key.as_deref(),
            config.api_key_file.as_deref(),
            config.api_key_env_var.as_deref(),
        ) {
            Ok(key) => key,
            Err(SecretError::EnvVarNotSet { name }) => {
                debug!("Summary API key variable {} is not set", name);
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self::new(api_key, &config.model, &config.endpoint))
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().is_empty())
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        )
    }

    async fn request(&self, api_key: &SecretString, prompt: &str) -> Result<Option<String>, SummaryError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SummaryError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.text())
    }
}

#[async_trait]
impl SummaryGenerator for GeminiSummarizer {
    async fn generate_summary(&self, complaint: &Complaint) -> String {
        let Some(api_key) = self.api_key.as_ref().filter(|k| !k.expose_secret().is_empty()) else {
            return KEY_NOT_CONFIGURED.to_string();
        };

        let prompt = build_prompt(complaint);
        let span = tracing::info_span!("summary.generate", complaint = %complaint.id);

        match self.request(api_key, &prompt).instrument(span).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_RESPONSE.to_string(),
            Err(e) => {
                error!("Summary generation for {} failed: {}", complaint.id, e);
                failure_text(&e.to_string())
            }
        }
    }
}
