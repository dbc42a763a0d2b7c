use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{google_api_error_message, SummarizeError},
    llm::summarizer::{SummaryResponse, Summarizer},
};

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://generativelanguage.googleapis.com".into(),
            model: Self::DEFAULT_MODEL.into(),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub async fn send_generate_request(
        &self,
        content: impl Into<String>,
    ) -> Result<GenerateContentResponse, SummarizeError> {
        let body = serde_json::json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": content.into() }]
                }
            ]
        });

        let resp = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(SummarizeError::Api {
                status,
                message: google_api_error_message(&message),
            });
        }

        Ok(resp.json::<GenerateContentResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
pub struct Part {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts concatenated
    pub fn into_text(self) -> Result<String, SummarizeError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(self
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .map(SummarizeError::Blocked)
                .unwrap_or(SummarizeError::EmptyResponse));
        };

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if !text.trim().is_empty() {
            return Ok(text);
        }

        match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT")) => {
                Err(SummarizeError::Blocked(reason.to_string()))
            }
            _ => Err(SummarizeError::EmptyResponse),
        }
    }
}

impl Summarizer for GeminiClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn summarize(&self, content: &str) -> Result<SummaryResponse, SummarizeError> {
        let summary = self
            .send_generate_request(content)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?
            .into_text()?;

        Ok(SummaryResponse { summary })
    }
}
