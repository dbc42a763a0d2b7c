pub mod error;
mod llm;
pub mod parser;
mod processor;
pub mod render;
#[cfg(test)]
mod test_server;
pub mod tracing;
pub mod translate;
pub mod types;
pub mod web;
pub mod yt;

pub use error::{FetchError, ParseError, PipelineError, Stage, SummarizeError, TranslateError};
pub use llm::gemini;
pub use llm::summarizer::{summarize, Summarizer, SummaryResponse};
pub use notes_cache::{CacheStore, MemoryStore, Namespace};
pub use processor::{builder::NotesProcessorBuilder, NotesProcessor, RunState};
pub use translate::{translate_to_english, Translator};
pub use yt::{fetch_transcript, TranscriptSource};
