//! # Yt Parser
//!
//! This module turns user input and raw YouTube payloads into typed values:
//! the video id of a watch link, the innertube API key embedded in a watch
//! page, the caption tracks of a player response and the segments of a
//! `json3` timed-text document.

use std::{ops::Deref, sync::LazyLock};

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{FetchError, ParseError},
    types::{CaptionTrack, TranscriptSegment, VideoReference},
};

static VIDEO_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[?&]v=([^&#]*)").unwrap());

static INNERTUBE_API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""INNERTUBE_API_KEY":\s*"([a-zA-Z0-9_-]+)""#).unwrap());

/// Extracts the video identifier carried by the `v` query parameter.
///
/// # Returns
/// * `Ok(VideoReference)` with the text between `v=` and the next `&`, `#`
///   or the end of the input.
/// * `Err(ParseError::InvalidFormat)` if the input has no `v` parameter.
/// * `Err(ParseError::InvalidIdentifier)` if the parameter value is empty or
///   contains characters a video id never has.
pub fn parse_video_reference(url: &str) -> Result<VideoReference, ParseError> {
    let id = VIDEO_PARAM_RE
        .captures(url.trim())
        .and_then(|cap| cap.get(1))
        .ok_or_else(|| ParseError::InvalidFormat(url.to_string()))?;

    VideoReference::new(id.as_str())
}

pub struct YtHtmlDocument(String);

impl Deref for YtHtmlDocument {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl YtHtmlDocument {
    pub fn new(doc: String) -> Self {
        YtHtmlDocument(doc)
    }

    /// Watch pages served to suspected bots carry a reCAPTCHA form instead of the player
    pub fn is_captcha(&self) -> bool {
        self.contains("class=\"g-recaptcha\"")
    }

    pub fn innertube_api_key(&self) -> Option<&str> {
        INNERTUBE_API_KEY_RE
            .captures(self)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str())
    }
}

impl From<String> for YtHtmlDocument {
    fn from(value: String) -> Self {
        YtHtmlDocument(value)
    }
}

/// Reads the caption tracks out of an innertube `player` response.
///
/// Playability is checked first, so an unavailable video is reported as such
/// even though it has no captions either.
#[tracing::instrument(skip(player))]
pub fn parse_caption_tracks(video_id: &str, player: &Value) -> Result<Vec<CaptionTrack>, FetchError> {
    assert_playability(video_id, player)?;

    let renderer = player["captions"]
        .get("playerCaptionsTracklistRenderer")
        .ok_or_else(|| FetchError::TranscriptsDisabled(video_id.to_string()))?;

    let tracks = match renderer.get("captionTracks") {
        Some(tracks) => serde_json::from_value::<Vec<CaptionTrack>>(tracks.clone()).map_err(|e| {
            FetchError::UnknownFetchFailure(format!("Unexpected captionTracks structure: {e}"))
        })?,
        None => Vec::new(),
    };

    if tracks.is_empty() {
        return Err(FetchError::NoTranscriptAvailable(video_id.to_string()));
    }

    Ok(tracks)
}

fn assert_playability(video_id: &str, player: &Value) -> Result<(), FetchError> {
    let Some(playability) = player.get("playabilityStatus") else {
        return Ok(());
    };

    let status = playability["status"].as_str().unwrap_or_default();
    let reason = playability["reason"].as_str().unwrap_or_default();

    match status {
        "OK" => Ok(()),
        "ERROR" => Err(FetchError::VideoUnavailable(video_id.to_string())),
        _ => Err(FetchError::UnknownFetchFailure(format!(
            "Video {video_id} is not playable ({status}): {reason}"
        ))),
    }
}

/// Picks the track to download.
///
/// For each preferred language in order a manually created track wins over
/// an auto-generated one. If nothing matches and `fallback` is set, the
/// first manual track is used, else the first generated one.
pub fn select_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred_languages: &[String],
    fallback: bool,
) -> Option<&'a CaptionTrack> {
    let find = |lang: &str, generated: bool| {
        tracks
            .iter()
            .find(|t| t.language_code == lang && t.is_generated() == generated)
    };

    preferred_languages
        .iter()
        .find_map(|lang| find(lang, false).or_else(|| find(lang, true)))
        .or_else(|| {
            if !fallback {
                return None;
            }
            tracks
                .iter()
                .find(|t| !t.is_generated())
                .or_else(|| tracks.first())
        })
}

#[derive(Debug, Deserialize)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Json3Event {
    #[serde(default)]
    t_start_ms: u64,
    #[serde(default)]
    d_duration_ms: u64,
    segs: Option<Vec<Json3Seg>>,
}

#[derive(Debug, Deserialize)]
struct Json3Seg {
    #[serde(default)]
    utf8: String,
}

/// Parses a `fmt=json3` timed-text document into segments, in document order.
///
/// Events without text (window definitions, line breaks) are dropped.
pub fn parse_json3_transcript(body: &str) -> Result<Vec<TranscriptSegment>, FetchError> {
    let document = serde_json::from_str::<Json3Document>(body)
        .map_err(|e| FetchError::UnknownFetchFailure(format!("Malformed transcript document: {e}")))?;

    let segments = document
        .events
        .into_iter()
        .filter_map(|event| {
            let text = event
                .segs?
                .iter()
                .map(|seg| seg.utf8.as_str())
                .collect::<String>()
                .replace('\n', " ");
            let text = text.trim();

            if text.is_empty() {
                return None;
            }

            Some(TranscriptSegment {
                text: text.to_string(),
                start: event.t_start_ms as f64 / 1000.0,
                duration: event.d_duration_ms as f64 / 1000.0,
            })
        })
        .collect();

    Ok(segments)
}
