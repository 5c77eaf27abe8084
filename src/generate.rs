//! Quote generation: prompt construction and the text-generation backend.
//!
//! The backend is reached through the [`QuoteGenerator`] trait so the editor
//! can run any implementation; [`GeminiGenerator`] talks to the Gemini REST
//! API when the `gemini` feature is enabled (default).

use crate::style::Language;
use crate::{Error, Result};
use futures::future::BoxFuture;

/// One generation call's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub language: Language,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, language: Language) -> Self {
        Self { topic: topic.into(), language }
    }

    /// Reject a blank topic before any remote call is made.
    pub fn validate(&self) -> Result<()> {
        if self.topic.trim().is_empty() {
            return Err(Error::ValidationError("Topic cannot be empty.".into()));
        }
        Ok(())
    }
}

fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::Urdu => "in Urdu script.",
        Language::RomanUrdu => "in Roman Urdu (Urdu written with the English alphabet).",
        Language::English => "in English.",
    }
}

/// The instruction sent to the backend for `request`.
pub fn build_prompt(request: &GenerationRequest) -> String {
    format!(
        "Generate a short, inspirational, and profound quote about \"{}\" {} \
         The quote should be suitable for a picture frame. Return only the quote text itself, \
         without any introductory phrases, explanations, or quotation marks.",
        request.topic,
        language_instruction(request.language)
    )
}

/// A text-generation backend: topic + language in, trimmed quote out.
///
/// Implementations must return `ValidationError` for a blank topic without
/// contacting the backend, and normalize every remote failure to
/// `ExternalServiceError`.
pub trait QuoteGenerator: Send + Sync {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, Result<String>>;
}

/// Stand-in backend for when none can be configured (e.g. no API key).
/// Every call fails with the normalized service error.
#[derive(Debug, Clone)]
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

impl QuoteGenerator for UnavailableGenerator {
    fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, Result<String>> {
        let reason = self.reason.clone();
        Box::pin(async move {
            request.validate()?;
            log::error!("Error generating quote: {}", reason);
            Err(Error::ExternalServiceError(reason))
        })
    }
}

#[cfg(feature = "gemini")]
pub use gemini::GeminiGenerator;

#[cfg(feature = "gemini")]
mod gemini {
    use super::{build_prompt, GenerationRequest, QuoteGenerator};
    use crate::{Config, Error, Result};
    use futures::future::{BoxFuture, FutureExt};
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Serialize)]
    struct GenerateContentRequest<'a> {
        contents: [Content<'a>; 1],
    }

    #[derive(Serialize)]
    struct Content<'a> {
        parts: [Part<'a>; 1],
    }

    #[derive(Serialize)]
    struct Part<'a> {
        text: &'a str,
    }

    #[derive(Deserialize)]
    struct GenerateContentResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<ResponsePart>,
    }

    #[derive(Deserialize)]
    struct ResponsePart {
        text: Option<String>,
    }

    impl GenerateContentResponse {
        /// Concatenated text parts of the first candidate.
        fn text(self) -> Option<String> {
            let parts = self.candidates.into_iter().next()?.content?.parts;
            let texts: Vec<String> = parts.into_iter().filter_map(|p| p.text).collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.concat())
            }
        }
    }

    /// Gemini `generateContent` client.
    #[derive(Clone)]
    pub struct GeminiGenerator {
        client: reqwest::Client,
        url: String,
        api_key: String,
    }

    impl GeminiGenerator {
        pub fn new(config: &Config) -> Result<Self> {
            let api_key = config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .ok_or_else(|| Error::ConfigError("API_KEY environment variable is not set.".into()))?;

            let client = reqwest::Client::builder()
                .timeout(Duration::from_millis(config.timeout_ms))
                .user_agent(config.user_agent.clone())
                .build()
                .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

            let url = format!(
                "{}/v1beta/models/{}:generateContent",
                config.endpoint.trim_end_matches('/'),
                config.model
            );

            Ok(Self { client, url, api_key })
        }

        async fn call(&self, prompt: String) -> std::result::Result<String, String> {
            let body = GenerateContentRequest {
                contents: [Content { parts: [Part { text: &prompt }] }],
            };
            let resp = self
                .client
                .post(&self.url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| format!("request to {} failed: {}", self.url, e))?;

            let status = resp.status();
            if !status.is_success() {
                let detail = resp.text().await.unwrap_or_default();
                return Err(format!("backend returned {}: {}", status, detail.trim()));
            }

            let parsed: GenerateContentResponse = resp
                .json()
                .await
                .map_err(|e| format!("malformed response body: {}", e))?;

            parsed
                .text()
                .ok_or_else(|| "response contained no text".to_string())
        }
    }

    impl QuoteGenerator for GeminiGenerator {
        fn generate(&self, request: GenerationRequest) -> BoxFuture<'static, Result<String>> {
            let this = self.clone();
            async move {
                request.validate()?;
                let prompt = build_prompt(&request);
                log::debug!("generating quote about {:?} ({})", request.topic, request.language);
                match this.call(prompt).await {
                    Ok(text) => Ok(text.trim().to_string()),
                    Err(cause) => {
                        log::error!("Error generating quote from Gemini API: {}", cause);
                        Err(Error::ExternalServiceError(cause))
                    }
                }
            }
            .boxed()
        }
    }
}
