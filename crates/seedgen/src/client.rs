//! Text-generation API client
//!
//! Thin wrapper around the generateContent REST endpoint with the retry
//! policy the seed pipeline needs: rate limits wait out a fixed cooldown,
//! everything else gets a short exponential backoff.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;
use venturedesk_common::config::GeneratorConfig;
use venturedesk_common::errors::{AppError, Result};

/// Fixed cooldown applied when the API reports a rate limit.
const RATE_LIMIT_COOLDOWN: Duration = Duration::from_secs(30);

pub struct GeneratorClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_retries: u32,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

enum RequestFailure {
    RateLimited(String),
    Other(AppError),
}

impl GeneratorClient {
    /// Create a new client from configuration
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Configuration {
                message: "generator.api_key is required".to_string(),
            })?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries.max(1),
        })
    }

    /// Generate text for `prompt`, retrying per the seed pipeline policy.
    ///
    /// Rate-limit responses wait the fixed cooldown and do not consume a
    /// regular attempt; other failures back off 1s, 2s, 4s before giving up.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let mut attempt = 0;

        loop {
            match self.request(prompt).await {
                Ok(text) => return Ok(text),
                Err(RequestFailure::RateLimited(message)) => {
                    warn!(%message, cooldown_secs = RATE_LIMIT_COOLDOWN.as_secs(), "Rate limit hit, cooling down");
                    tokio::time::sleep(RATE_LIMIT_COOLDOWN).await;
                }
                Err(RequestFailure::Other(err)) => {
                    attempt += 1;
                    if attempt >= self.max_retries {
                        return Err(err);
                    }
                    let delay = Duration::from_secs(1 << (attempt - 1));
                    warn!(
                        attempt,
                        delay_secs = delay.as_secs(),
                        error = %err,
                        "Generation request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn request(&self, prompt: &str) -> std::result::Result<String, RequestFailure> {
        let url = format!("{}/models/{}:generateContent", self.api_base, self.model);

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                RequestFailure::Other(AppError::Upstream {
                    message: format!("request failed: {e}"),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let lowered = body.to_lowercase();
            let rate_limited = status == reqwest::StatusCode::TOO_MANY_REQUESTS
                || lowered.contains("quota")
                || lowered.contains("rate limit")
                || lowered.contains("resource exhausted");

            if rate_limited {
                return Err(RequestFailure::RateLimited(format!("{status}: {body}")));
            }
            return Err(RequestFailure::Other(AppError::Upstream {
                message: format!("API error {status}: {body}"),
            }));
        }

        let parsed: GenerateResponse = response.json().await.map_err(|e| {
            RequestFailure::Other(AppError::Upstream {
                message: format!("failed to parse response: {e}"),
            })
        })?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(RequestFailure::Other(AppError::Upstream {
                message: "empty completion".to_string(),
            }));
        }

        Ok(text)
    }
}

/// Model output often arrives wrapped in a markdown code fence; strip it.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);

    match rest.rfind("```") {
        Some(end) => rest[..end].trim(),
        None => rest.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fences() {
        let raw = "```json\n{\"name\": \"NovaPay\"}\n```";
        assert_eq!(strip_code_fences(raw), "{\"name\": \"NovaPay\"}");
    }

    #[test]
    fn strips_bare_fences() {
        let raw = "```\n[1, 2]\n```";
        assert_eq!(strip_code_fences(raw), "[1, 2]");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_code_fences("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn tolerates_a_missing_closing_fence() {
        assert_eq!(strip_code_fences("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }
}
