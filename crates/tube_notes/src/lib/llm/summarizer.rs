use std::future::Future;

use crate::{
    error::SummarizeError,
    types::{SummaryPrompt, SummaryText},
};

pub trait Summarizer {
    /// Model identifier used for every request of this summarizer
    fn model_id(&self) -> &str;

    fn summarize(
        &self,
        content: &str,
    ) -> impl Future<Output = Result<SummaryResponse, SummarizeError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SummaryResponse {
    pub summary: SummaryText,
}

/// Submits `prompt` followed by `text` as one request. No retries; the
/// model may answer differently each time.
#[tracing::instrument(skip_all, fields(model = summarizer.model_id(), chars = text.len()))]
pub async fn summarize<S: Summarizer>(
    summarizer: &S,
    prompt: &SummaryPrompt,
    text: &str,
) -> Result<SummaryText, SummarizeError> {
    let response = summarizer
        .summarize(&prompt.apply(text))
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))?;

    tracing::info!(chars = response.summary.len(), "Generated summary");
    Ok(response.summary)
}
