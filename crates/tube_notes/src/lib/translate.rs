pub mod google;

use std::future::Future;

use crate::{error::TranslateError, types::Translation};

pub const ENGLISH: &str = "en";

/// External service translating text into a target language, source
/// language detected by the service
pub trait Translator {
    const SERVICE_NAME: &'static str;

    fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> impl Future<Output = Result<Translation, TranslateError>> + Send;
}

/// Translates `text` into English.
///
/// English input goes through the service like any other; whitespace-only
/// input is returned empty without a request.
#[tracing::instrument(skip_all, fields(service = T::SERVICE_NAME, chars = text.len()))]
pub async fn translate_to_english<T: Translator>(
    translator: &T,
    text: &str,
) -> Result<Translation, TranslateError> {
    if text.trim().is_empty() {
        return Ok(Translation {
            text: String::new(),
            detected_source_language: None,
        });
    }

    let translation = translator
        .translate(text, ENGLISH)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to translate text"))?;

    tracing::info!(
        source_language = ?translation.detected_source_language,
        "Translated text"
    );
    Ok(translation)
}
