use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tube_notes::{types::TranscriptSegment, types::VideoReference, FetchError, TranscriptSource};

#[derive(Clone)]
pub struct MockTranscriptSource {
    pub segments: Vec<String>,
    pub per_video: HashMap<String, Vec<String>>,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<FetchError>,
}

impl MockTranscriptSource {
    pub fn new(segments: &[&str]) -> Self {
        Self {
            segments: segments.iter().map(|s| s.to_string()).collect(),
            per_video: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            fail_with: Some(err),
            ..Self::new(&[])
        }
    }

    pub fn with_video(mut self, video_id: &str, segments: &[&str]) -> Self {
        self.per_video.insert(
            video_id.to_string(),
            segments.iter().map(|s| s.to_string()).collect(),
        );
        self
    }
}

impl TranscriptSource for MockTranscriptSource {
    const SERVICE_NAME: &'static str = "mock-youtube";

    async fn fetch_segments(
        &self,
        video: &VideoReference,
    ) -> Result<Vec<TranscriptSegment>, FetchError> {
        self.calls.lock().unwrap().push(video.to_string());
        if let Some(ref err) = self.fail_with {
            return Err(err.clone());
        }
        let texts = self.per_video.get(video.as_str()).unwrap_or(&self.segments);
        Ok(texts.iter().map(TranscriptSegment::new).collect())
    }
}
