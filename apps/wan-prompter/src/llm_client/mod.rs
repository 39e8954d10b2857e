/// LLM Client — the remote model call behind the prompter.
///
/// Every generation goes through `ModelClient`; `GeminiClient` is the production
/// implementation against the Gemini `generateContent` endpoint. One attempt per
/// call, no retries.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::Config;
use crate::models::request::AuthCredentials;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Remote model identifiers offered by the node.
pub const SUPPORTED_MODELS: [&str; 2] = [
    "gemini-2.5-pro-preview-05-06",
    "gemini-2.5-flash-preview-04-17",
];

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unsupported model '{0}'")]
    UnsupportedModel(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    pub data: String,
}

/// One element of a user turn: text or an embedded blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: &'a [ContentPart],
}

#[derive(Debug, Default, Deserialize)]
pub struct ModelReply {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    pub usage: Option<Usage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ReplyPart>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReplyPart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(rename = "promptTokenCount", default)]
    pub prompt_tokens: u32,
    #[serde(rename = "candidatesTokenCount", default)]
    pub output_tokens: u32,
}

impl ModelReply {
    /// Builds a single-candidate reply, mainly for stub clients.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![ReplyPart {
                        text: Some(text.into()),
                    }],
                }),
            }],
            usage: None,
        }
    }

    /// Non-empty text parts of the first candidate, newline-joined.
    /// Empty string when the reply carries no text at all.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .filter(|t| !t.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client seam
// ────────────────────────────────────────────────────────────────────────────

/// The remote model call. Resolves to a complete reply or fails; never streams.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_content(
        &self,
        remote_model: &str,
        parts: &[ContentPart],
        credentials: &AuthCredentials,
    ) -> Result<ModelReply, LlmError>;
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
                .build()?,
            api_base: config.gemini_api_base.trim_end_matches('/').to_string(),
            api_key: config.gemini_api_key.clone(),
        })
    }

    fn endpoint_for_model(&self, model: &str) -> Result<String, LlmError> {
        let model = model.trim();
        if !SUPPORTED_MODELS.contains(&model) {
            return Err(LlmError::UnsupportedModel(model.to_string()));
        }
        Ok(format!("{}/models/{model}:generateContent", self.api_base))
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate_content(
        &self,
        remote_model: &str,
        parts: &[ContentPart],
        credentials: &AuthCredentials,
    ) -> Result<ModelReply, LlmError> {
        let url = self.endpoint_for_model(remote_model)?;
        let body = GenerateContentRequest {
            contents: vec![Content { role: "user", parts }],
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = credentials.api_key.as_ref().or(self.api_key.as_ref()) {
            request = request.header("x-goog-api-key", key);
        }
        if let Some(token) = credentials.auth_token.as_ref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reply: ModelReply = serde_json::from_str(&response.text().await?)?;

        if let Some(usage) = &reply.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_tokens, usage.output_tokens
            );
        }

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        let config = Config {
            gemini_api_base: "https://example.test/v1beta/".to_string(),
            ..Config::default()
        };
        GeminiClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_for_supported_model() {
        assert_eq!(
            client().endpoint_for_model("gemini-2.5-flash-preview-04-17").unwrap(),
            "https://example.test/v1beta/models/gemini-2.5-flash-preview-04-17:generateContent"
        );
    }

    #[test]
    fn test_endpoint_rejects_unknown_model() {
        assert!(matches!(
            client().endpoint_for_model("gpt-4o"),
            Err(LlmError::UnsupportedModel(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let parts = vec![ContentPart::Text {
            text: "hello".to_string(),
        }];
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: &parts,
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn test_reply_text_joins_first_candidate_parts() {
        let reply: ModelReply = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "line one"}, {"text": ""}, {"text": "line two"}]}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ],
                "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
            }"#,
        )
        .unwrap();
        assert_eq!(reply.text(), "line one\nline two");
        assert_eq!(reply.usage.unwrap().output_tokens, 4);
    }

    #[test]
    fn test_reply_without_text_is_empty() {
        let reply: ModelReply = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(reply.text(), "");
        let reply: ModelReply =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(reply.text(), "");
        let reply: ModelReply = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.text(), "");
    }

    #[test]
    fn test_error_body_message_extraction() {
        let body = r#"{"error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}}"#;
        let parsed: GeminiError = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.error.message, "API key not valid");
    }
}
