pub mod transcript;

use std::future::Future;

use crate::{
    error::FetchError,
    types::{TranscriptSegment, TranscriptText, VideoReference},
};

/// External service returning the time-ordered caption segments of a video
pub trait TranscriptSource {
    const SERVICE_NAME: &'static str;

    fn fetch_segments(
        &self,
        video: &VideoReference,
    ) -> impl Future<Output = Result<Vec<TranscriptSegment>, FetchError>> + Send;
}

/// Retrieves the transcript of `video` as one string, segments joined by
/// single spaces in the order the service returned them.
#[tracing::instrument(skip(source), fields(service = T::SERVICE_NAME))]
pub async fn fetch_transcript<T: TranscriptSource>(
    source: &T,
    video: &VideoReference,
) -> Result<TranscriptText, FetchError> {
    let segments = source
        .fetch_segments(video)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to fetch transcript"))?;

    if segments.is_empty() {
        return Err(FetchError::NoTranscriptAvailable(video.to_string()));
    }

    tracing::info!(segments = segments.len(), "Fetched transcript");
    Ok(TranscriptText::from_segments(&segments))
}
