use std::{fmt, ops::Deref};

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// English rendering of a transcript
pub type TranslatedText = String;

/// Markdown notes produced by the summarizer
pub type SummaryText = String;

/// Platform identifier of a single video, e.g. `dQw4w9WgXcQ`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VideoReference(String);

impl VideoReference {
    const WATCH_BASE_URL: &str = "https://www.youtube.com/watch";
    const THUMBNAIL_BASE_URL: &str = "https://img.youtube.com/vi";

    /// Accepts only non-empty ids made of `[A-Za-z0-9_-]`
    pub fn new(id: impl Into<String>) -> Result<Self, ParseError> {
        let id = id.into();
        let well_formed = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !well_formed {
            return Err(ParseError::InvalidIdentifier(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("{}?v={}", Self::WATCH_BASE_URL, self.0)
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{}/{}/0.jpg", Self::THUMBNAIL_BASE_URL, self.0)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Deref for VideoReference {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// One timed caption line as returned by the transcript service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            start: 0.0,
            duration: 0.0,
        }
    }
}

/// The spoken text of a video as a single string
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TranscriptText(String);

impl TranscriptText {
    /// Joins segment texts with single spaces, keeping the given order
    pub fn from_segments(segments: &[TranscriptSegment]) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        Self(text)
    }
}

impl Deref for TranscriptText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<String> for TranscriptText {
    fn from(value: String) -> Self {
        TranscriptText(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub text: TranslatedText,
    pub detected_source_language: Option<String>,
}

/// Instruction placed in front of the translated transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt(String);

impl SummaryPrompt {
    const DEFAULT_PROMPT: &str = include_str!("./llm/prompts/summary_0.txt");

    pub fn new(prompt: impl Into<String>) -> Self {
        Self(prompt.into())
    }

    /// Prompt followed directly by `text`, as submitted to the model
    pub fn apply(&self, text: &str) -> String {
        format!("{}{}", self.0, text)
    }
}

impl Default for SummaryPrompt {
    fn default() -> Self {
        // trailing newline from the prompt file would end up between prompt and text
        Self(Self::DEFAULT_PROMPT.trim_end_matches('\n').to_string())
    }
}

impl Deref for SummaryPrompt {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notes {
    pub video_id: VideoReference,
    pub thumbnail_url: String,
    pub transcript: TranscriptText,
    pub translation: TranslatedText,
    pub source_language: Option<String>,
    pub summary: SummaryText,
}

/// `captionTracks[]` entry of the innertube player response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    pub kind: Option<String>,
    pub name: Option<TextRuns>,
}

impl CaptionTrack {
    /// Auto-generated (speech recognition) tracks carry `kind: "asr"`
    pub fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    pub fn language_name(&self) -> &str {
        self.name
            .as_ref()
            .and_then(TextRuns::text)
            .unwrap_or(&self.language_code)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRuns {
    pub simple_text: Option<String>,
    pub runs: Option<Vec<TextRun>>,
}

impl TextRuns {
    pub fn text(&self) -> Option<&str> {
        self.simple_text.as_deref().or_else(|| {
            self.runs
                .as_ref()
                .and_then(|runs| runs.first())
                .map(|run| run.text.as_str())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextRun {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_reference_accepts_platform_ids() {
        for id in ["dQw4w9WgXcQ", "abc123", "_NuH3D4SN-c"] {
            assert_eq!(VideoReference::new(id).unwrap().as_str(), id);
        }
    }

    #[test]
    fn test_video_reference_rejects_malformed_ids() {
        for id in ["", "abc 123", "abc/123", "abc?x", "ид"] {
            assert!(
                matches!(VideoReference::new(id), Err(ParseError::InvalidIdentifier(_))),
                "{id:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_video_urls() {
        let video = VideoReference::new("abc123").unwrap();
        assert_eq!(video.watch_url(), "https://www.youtube.com/watch?v=abc123");
        assert_eq!(video.thumbnail_url(), "https://img.youtube.com/vi/abc123/0.jpg");
    }

    #[test]
    fn test_transcript_joins_segments_in_order() {
        let segments = [TranscriptSegment::new("Hello"), TranscriptSegment::new("world")];
        assert_eq!(&*TranscriptText::from_segments(&segments), "Hello world");
    }

    #[test]
    fn test_transcript_from_no_segments_is_empty() {
        assert_eq!(&*TranscriptText::from_segments(&[]), "");
    }

    #[test]
    fn test_default_prompt_is_prepended() {
        let prompt = SummaryPrompt::default();
        assert!(prompt.starts_with("You are a YouTube video summarizer."));

        let request = prompt.apply("Hello everyone");
        assert!(request.ends_with("given here:  Hello everyone"));
    }

    #[test]
    fn test_caption_track_from_player_json() {
        let track: CaptionTrack = serde_json::from_value(serde_json::json!({
            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc123&lang=fr",
            "name": { "runs": [{ "text": "French (auto-generated)" }] },
            "languageCode": "fr",
            "kind": "asr",
            "isTranslatable": true
        }))
        .unwrap();

        assert!(track.is_generated());
        assert_eq!(track.language_name(), "French (auto-generated)");
    }

    #[test]
    fn test_caption_track_name_falls_back_to_language_code() {
        let track: CaptionTrack = serde_json::from_value(serde_json::json!({
            "baseUrl": "https://www.youtube.com/api/timedtext?v=abc123&lang=de",
            "languageCode": "de"
        }))
        .unwrap();

        assert!(!track.is_generated());
        assert_eq!(track.language_name(), "de");
    }
}
