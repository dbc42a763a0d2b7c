pub mod builder;

use std::fmt;

use notes_cache::{CacheStore, Namespace};

use crate::{
    error::{PipelineError, Stage},
    llm::summarizer::{summarize, Summarizer},
    parser::parse_video_reference,
    translate::{translate_to_english, Translator},
    types::{Notes, SummaryPrompt, TranscriptText, Translation, VideoReference},
    yt::{fetch_transcript, TranscriptSource},
};

/// Where a single run currently is. Moves strictly forward through the
/// stages and ends in `Done` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ParsingLink,
    FetchingTranscript,
    Translating,
    Summarizing,
    Done,
    Failed(Stage),
}

impl RunState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Done | RunState::Failed(_))
    }
}

impl From<Stage> for RunState {
    fn from(stage: Stage) -> Self {
        match stage {
            Stage::ParsingLink => RunState::ParsingLink,
            Stage::FetchingTranscript => RunState::FetchingTranscript,
            Stage::Translating => RunState::Translating,
            Stage::Summarizing => RunState::Summarizing,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "Waiting for a link"),
            RunState::ParsingLink => write!(f, "Parsing link..."),
            RunState::FetchingTranscript => write!(f, "Fetching transcript..."),
            RunState::Translating => write!(f, "Translating transcript..."),
            RunState::Summarizing => write!(f, "Generating summary..."),
            RunState::Done => write!(f, "Notes ready"),
            RunState::Failed(stage) => write!(f, "Failed while {stage}"),
        }
    }
}

struct RunTracker<F: FnMut(RunState)> {
    state: RunState,
    observe: F,
}

impl<F: FnMut(RunState)> RunTracker<F> {
    fn new(observe: F) -> Self {
        Self {
            state: RunState::Idle,
            observe,
        }
    }

    fn enter(&mut self, next: RunState) {
        tracing::debug!(from = ?self.state, to = ?next, "Run state changed");
        self.state = next;
        (self.observe)(next);
    }

    /// Moves to `Failed` on error, tagged with the stage the error came from
    fn check<T, E: Into<PipelineError>>(&mut self, result: Result<T, E>) -> Result<T, PipelineError> {
        result.map_err(|e| {
            let e = e.into();
            self.enter(RunState::Failed(e.stage()));
            e
        })
    }
}

/// Turns a video link into notes: parse, fetch transcript, translate to
/// English, summarize. One stage at a time.
#[derive(Debug)]
pub struct NotesProcessor<T, L, S, C>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    transcript_source: T,
    translator: L,
    summarizer: S,
    cache: C,
    prompt: SummaryPrompt,
}

impl<T, L, S, C> NotesProcessor<T, L, S, C>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Transcript of `video`, from the cache when a previous run fetched it
    #[tracing::instrument(skip(self), fields(video_id = %video))]
    async fn transcript_for(
        &self,
        video: &VideoReference,
    ) -> Result<TranscriptText, PipelineError> {
        if let Some(text) = self.cache.get(Namespace::Transcript, video.as_str()) {
            tracing::info!("Transcript cache hit");
            return Ok(text.into());
        }

        let transcript = fetch_transcript(&self.transcript_source, video).await?;
        self.cache.insert(
            Namespace::Transcript,
            video.to_string(),
            transcript.to_string(),
        );
        Ok(transcript)
    }

    /// English translation of `text`, keyed on the exact input text
    #[tracing::instrument(skip_all, fields(chars = text.len()))]
    async fn translation_for(&self, text: &str) -> Result<Translation, PipelineError> {
        let cached = self
            .cache
            .get(Namespace::Translation, text)
            .and_then(|raw| serde_json::from_str::<Translation>(&raw).ok());
        if let Some(translation) = cached {
            tracing::info!("Translation cache hit");
            return Ok(translation);
        }

        let translation = translate_to_english(&self.translator, text).await?;
        match serde_json::to_string(&translation) {
            Ok(raw) => self
                .cache
                .insert(Namespace::Translation, text.to_string(), raw),
            Err(e) => tracing::warn!(error = %e, "Failed to encode translation for cache"),
        }
        Ok(translation)
    }

    pub async fn run(&self, url: &str) -> Result<Notes, PipelineError> {
        self.run_with(url, |_| {}).await
    }

    /// Runs the pipeline for `url`, reporting every state change to
    /// `observe`. The first failing stage ends the run.
    #[tracing::instrument(skip(self, observe))]
    pub async fn run_with<F>(&self, url: &str, observe: F) -> Result<Notes, PipelineError>
    where
        F: FnMut(RunState),
    {
        let mut run = RunTracker::new(observe);

        run.enter(RunState::ParsingLink);
        let video = run.check(parse_video_reference(url))?;

        run.enter(RunState::FetchingTranscript);
        let transcript = run.check(self.transcript_for(&video).await)?;

        run.enter(RunState::Translating);
        let translation = run.check(self.translation_for(&transcript).await)?;

        run.enter(RunState::Summarizing);
        let summary = run.check(summarize(&self.summarizer, &self.prompt, &translation.text).await)?;

        run.enter(RunState::Done);
        tracing::info!(video_id = %video, "Notes generated");

        Ok(Notes {
            thumbnail_url: video.thumbnail_url(),
            video_id: video,
            transcript,
            translation: translation.text,
            source_language: translation.detected_source_language,
            summary,
        })
    }
}
