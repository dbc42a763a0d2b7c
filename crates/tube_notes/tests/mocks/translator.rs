use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use tube_notes::{types::Translation, TranslateError, Translator};

/// Answers from a fixed table, echoing unknown text back unchanged
#[derive(Clone)]
pub struct MockTranslator {
    pub table: HashMap<String, String>,
    pub source_language: Option<String>,
    pub calls: Arc<Mutex<Vec<(String, String)>>>,
    pub fail_with: Option<String>,
}

impl MockTranslator {
    pub fn new(from: &str, to: &str) -> Self {
        Self::echo().with_entry(from, to)
    }

    pub fn echo() -> Self {
        Self {
            table: HashMap::new(),
            source_language: None,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Self::echo()
        }
    }

    pub fn with_entry(mut self, from: &str, to: &str) -> Self {
        self.table.insert(from.to_string(), to.to_string());
        self
    }

    pub fn detecting(mut self, language: &str) -> Self {
        self.source_language = Some(language.to_string());
        self
    }
}

impl Translator for MockTranslator {
    const SERVICE_NAME: &'static str = "mock-translate";

    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<Translation, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), target_language.to_string()));
        if let Some(ref msg) = self.fail_with {
            return Err(TranslateError::Api {
                status: 403,
                message: msg.clone(),
            });
        }
        Ok(Translation {
            text: self.table.get(text).cloned().unwrap_or_else(|| text.to_string()),
            detected_source_language: self.source_language.clone(),
        })
    }
}
