use notes_cache::{CacheStore, MemoryStore};

use crate::{
    processor::NotesProcessor, translate::Translator, types::SummaryPrompt,
    yt::TranscriptSource, Summarizer,
};

pub struct NotesProcessorBuilder<T = (), L = (), S = (), C = MemoryStore> {
    transcript_source: T,
    translator: L,
    summarizer: S,
    cache: C,
    prompt: SummaryPrompt,
}

impl NotesProcessorBuilder {
    pub fn new() -> Self {
        Self {
            transcript_source: (),
            translator: (),
            summarizer: (),
            cache: MemoryStore::new(),
            prompt: SummaryPrompt::default(),
        }
    }
}

impl Default for NotesProcessorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L, S, C> NotesProcessorBuilder<T, L, S, C> {
    pub fn transcript_source<T2: TranscriptSource + Send + Sync + 'static>(
        self,
        transcript_source: T2,
    ) -> NotesProcessorBuilder<T2, L, S, C> {
        NotesProcessorBuilder {
            transcript_source,
            translator: self.translator,
            summarizer: self.summarizer,
            cache: self.cache,
            prompt: self.prompt,
        }
    }

    pub fn translator<L2: Translator + Send + Sync + 'static>(
        self,
        translator: L2,
    ) -> NotesProcessorBuilder<T, L2, S, C> {
        NotesProcessorBuilder {
            transcript_source: self.transcript_source,
            translator,
            summarizer: self.summarizer,
            cache: self.cache,
            prompt: self.prompt,
        }
    }

    pub fn summarizer<S2: Summarizer + Send + Sync + 'static>(
        self,
        summarizer: S2,
    ) -> NotesProcessorBuilder<T, L, S2, C> {
        NotesProcessorBuilder {
            transcript_source: self.transcript_source,
            translator: self.translator,
            summarizer,
            cache: self.cache,
            prompt: self.prompt,
        }
    }

    /// Replaces the default in-memory cache
    pub fn cache<C2: CacheStore + Send + Sync + 'static>(
        self,
        cache: C2,
    ) -> NotesProcessorBuilder<T, L, S, C2> {
        NotesProcessorBuilder {
            transcript_source: self.transcript_source,
            translator: self.translator,
            summarizer: self.summarizer,
            cache,
            prompt: self.prompt,
        }
    }

    pub fn prompt(mut self, prompt: SummaryPrompt) -> Self {
        self.prompt = prompt;
        self
    }
}

impl<T, L, S, C> NotesProcessorBuilder<T, L, S, C>
where
    T: TranscriptSource + Send + Sync + 'static,
    L: Translator + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    C: CacheStore + Send + Sync + 'static,
{
    pub fn build(self) -> NotesProcessor<T, L, S, C> {
        NotesProcessor {
            transcript_source: self.transcript_source,
            translator: self.translator,
            summarizer: self.summarizer,
            cache: self.cache,
            prompt: self.prompt,
        }
    }
}
