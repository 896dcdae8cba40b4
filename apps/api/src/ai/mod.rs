/// Generative-AI client — the single point of entry for all Gemini calls.
///
/// No other module may call the text-generation API directly; the proxy
/// handlers go through this client so retries and response cleanup stay in
/// one place. The client may be constructed without an API key, in which
/// case callers are expected to serve their canned fallback content.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;
pub mod prompts;

const GEMINI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum GenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No API key configured")]
    MissingKey,

    #[error("Model returned empty content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Wraps the Gemini `generateContent` API with retry on 429/5xx and
/// markdown-fence cleanup for JSON outputs.
#[derive(Clone)]
pub struct GenAiClient {
    client: Client,
    api_key: Option<String>,
}

impl GenAiClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Whether a real key is configured. Callers serve canned fallbacks when not.
    pub fn has_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generates plain text for a prompt.
    /// Retries on 429 and 5xx with exponential backoff.
    pub async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        let api_key = self.api_key.as_deref().ok_or(GenAiError::MissingKey)?;

        let request_body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let mut last_error: Option<GenAiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "AI call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(GEMINI_API_URL)
                .query(&[("key", api_key)])
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(GenAiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("AI API returned {}: {}", status, body);
                last_error = Some(GenAiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<GeminiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(GenAiError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;
            let text = generated
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content.parts.into_iter().next())
                .and_then(|p| p.text);

            return match text {
                Some(text) => {
                    debug!("AI call succeeded: {} chars", text.len());
                    Ok(text)
                }
                None => Err(GenAiError::EmptyContent),
            };
        }

        Err(last_error.unwrap_or(GenAiError::EmptyContent))
    }

    /// Generates text and deserializes it as JSON, stripping any markdown
    /// code fences the model wraps around its output.
    pub async fn generate_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, GenAiError> {
        let text = self.generate(prompt).await?;
        let cleaned = strip_json_fences(&text);
        serde_json::from_str(cleaned).map_err(GenAiError::Parse)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n[{\"name\": \"Ada\"}]\n```";
        assert_eq!(strip_json_fences(input), "[{\"name\": \"Ada\"}]");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[tokio::test]
    async fn test_generate_without_key_is_missing_key() {
        let client = GenAiClient::new(None);
        assert!(!client.has_key());
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, GenAiError::MissingKey));
    }

    #[test]
    fn test_response_shape_deserializes() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "generated text"}]}}
            ]
        }"#;
        let resp: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            resp.candidates[0].content.parts[0].text.as_deref(),
            Some("generated text")
        );
    }
}
