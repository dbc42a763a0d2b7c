use std::fmt;

/// Pipeline stage a run was in when it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    ParsingLink,
    FetchingTranscript,
    Translating,
    Summarizing,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::ParsingLink => write!(f, "parsing link"),
            Stage::FetchingTranscript => write!(f, "fetching transcript"),
            Stage::Translating => write!(f, "translating transcript"),
            Stage::Summarizing => write!(f, "generating summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No `v=` query parameter found in {0:?}")]
    InvalidFormat(String),
    #[error("Malformed video identifier: {0:?}")]
    InvalidIdentifier(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("No transcript found for video {0}")]
    NoTranscriptAvailable(String),
    #[error("Transcripts are disabled for video {0}")]
    TranscriptsDisabled(String),
    #[error("Video {0} is unavailable")]
    VideoUnavailable(String),
    #[error("{0}")]
    UnknownFetchFailure(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(value: reqwest::Error) -> Self {
        FetchError::UnknownFetchFailure(value.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No translation in response")]
    MissingTranslation,
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Prompt was blocked: {0}")]
    Blocked(String),
    #[error("No content in response")]
    EmptyResponse,
}

#[derive(Debug, serde::Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Debug, serde::Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

/// Google APIs wrap failures as `{"error": {"message": ...}}`. Any other body
/// is kept as is, folded onto a single line.
pub(crate) fn google_api_error_message(body: &str) -> String {
    let message = serde_json::from_str::<GoogleErrorBody>(body)
        .map(|b| b.error.message)
        .unwrap_or_else(|_| body.to_string());

    message.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Failure of a single notes run, tagged by the stage that produced it
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Summarize(#[from] SummarizeError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Parse(_) => Stage::ParsingLink,
            PipelineError::Fetch(_) => Stage::FetchingTranscript,
            PipelineError::Translate(_) => Stage::Translating,
            PipelineError::Summarize(_) => Stage::Summarizing,
        }
    }

    /// Single line shown to the user in place of the notes
    pub fn user_message(&self) -> String {
        match self {
            PipelineError::Parse(_) => {
                "Invalid YouTube link. Please make sure it is formatted correctly.".into()
            }
            PipelineError::Fetch(FetchError::NoTranscriptAvailable(_)) => {
                "No transcripts found for the video.".into()
            }
            PipelineError::Fetch(FetchError::TranscriptsDisabled(_)) => {
                "Transcripts are disabled for this video.".into()
            }
            PipelineError::Fetch(FetchError::VideoUnavailable(_)) => {
                "The requested video is unavailable.".into()
            }
            PipelineError::Fetch(FetchError::UnknownFetchFailure(detail)) => {
                format!("Error fetching transcript: {detail}")
            }
            PipelineError::Translate(e) => format!("Error translating transcript: {e}"),
            PipelineError::Summarize(e) => format!("Error generating summary: {e}"),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::Parse(_) => 400,
            PipelineError::Fetch(
                FetchError::NoTranscriptAvailable(_)
                | FetchError::TranscriptsDisabled(_)
                | FetchError::VideoUnavailable(_),
            ) => 404,
            _ => 502,
        }
    }
}
