use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{google_api_error_message, TranslateError},
    translate::Translator,
    types::Translation,
};

/// Google Cloud Translation (v2, basic edition) authenticated by API key
pub struct GoogleTranslateClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_chunk_chars: usize,
}

impl GoogleTranslateClient {
    /// Recommended upper bound for a single request's `q`
    const MAX_CHUNK_CHARS: usize = 5_000;

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://translation.googleapis.com".into(),
            max_chunk_chars: Self::MAX_CHUNK_CHARS,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars.max(1);
        self
    }

    pub async fn send_translate_request(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<TranslateResponse, TranslateError> {
        let body = serde_json::json!({
            "q": text,
            "target": target_language,
            "format": "text"
        });

        let resp = self
            .client
            .post(format!("{}/language/translate/v2", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(TranslateError::Api {
                status,
                message: google_api_error_message(&message),
            });
        }

        Ok(resp.json::<TranslateResponse>().await?)
    }
}

#[derive(Debug, Deserialize)]
pub struct TranslateResponse {
    pub data: TranslateData,
}

#[derive(Debug, Deserialize)]
pub struct TranslateData {
    #[serde(default)]
    pub translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationItem {
    pub translated_text: String,
    pub detected_source_language: Option<String>,
}

/// Splits `text` on whitespace into ordered chunks of at most `max_chars`
/// characters. A single word longer than the limit becomes its own chunk.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        let needed = if current.is_empty() { word_chars } else { word_chars + 1 };

        if !current.is_empty() && current_chars + needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

impl Translator for GoogleTranslateClient {
    const SERVICE_NAME: &'static str = "google-translate-v2";

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Translation, TranslateError> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        tracing::debug!(chunks = chunks.len(), "Translating text");

        let mut translated = Vec::with_capacity(chunks.len());
        let mut detected_source_language = None;

        for chunk in &chunks {
            let item = self
                .send_translate_request(chunk, target_language)
                .await?
                .data
                .translations
                .into_iter()
                .next()
                .ok_or(TranslateError::MissingTranslation)?;

            if detected_source_language.is_none() {
                detected_source_language = item.detected_source_language;
            }
            translated.push(item.translated_text);
        }

        Ok(Translation {
            text: translated.join(" "),
            detected_source_language,
        })
    }
}
