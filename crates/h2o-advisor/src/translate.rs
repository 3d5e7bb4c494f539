use std::collections::HashMap;

use tokio::sync::Mutex;

use h2o_core::labels::LabelSet;
use h2o_core::{AiSettings, MONTHS};

use crate::engine;

/// Languages offered by the UI. The first entry is the default and never
/// triggers an external call.
pub const LANGUAGES: [&str; 5] = ["English", "Spanish", "Mandarin", "Cantonese", "Vietnamese"];

pub const DEFAULT_LANGUAGE: &str = "English";

/// Delimiter used to join lines for a batch translation and to split the
/// model's response back apart. The positional re-assembly relies on the
/// model preserving the blank-line structure; a response with too few
/// parts falls back to English wholesale rather than misaligning labels.
const BLOCK_DELIMITER: &str = "\n\n";

/// Owns the process-lifetime month-name cache. One instance is built at
/// startup and shared through managed state; the cache only ever holds
/// the fixed language set, so it is never evicted.
pub struct Translator {
    month_cache: Mutex<HashMap<String, Vec<String>>>,
}

impl Translator {
    pub fn new() -> Self {
        Self {
            month_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Translate free text. The default language short-circuits and
    /// returns the input unchanged without any external call; an engine
    /// failure logs and falls back to the source text.
    pub async fn translate_text(
        &self,
        settings: &AiSettings,
        text: &str,
        language: &str,
    ) -> String {
        if language == DEFAULT_LANGUAGE {
            return text.to_string();
        }
        let system = format!("Translate the following text to {language}:");
        match engine::generate(settings, &system, text).await {
            Ok(translated) => translated.trim().to_string(),
            Err(e) => {
                eprintln!(
                    "[h2o-advisor] translation to {language} failed, using source text: {e}"
                );
                text.to_string()
            }
        }
    }

    /// Translate the whole label set in one call and re-assemble the
    /// response positionally. Any mismatch falls back to the English set.
    pub async fn labels(&self, settings: &AiSettings, language: &str) -> LabelSet {
        let english = LabelSet::default_english();
        if language == DEFAULT_LANGUAGE {
            return english;
        }
        let joined = english.to_lines().join(BLOCK_DELIMITER);
        let translated = self.translate_text(settings, &joined, language).await;
        let parts: Vec<&str> = translated.split(BLOCK_DELIMITER).collect();
        match LabelSet::from_lines(&parts) {
            Some(set) => set,
            None => {
                eprintln!(
                    "[h2o-advisor] label translation to {language} split into {} parts, using English",
                    parts.len()
                );
                english
            }
        }
    }

    /// Translated month names for the picker, cached per language for the
    /// process lifetime. Only successful translations are cached, so a
    /// transient failure is retried on the next submission.
    pub async fn month_names(&self, settings: &AiSettings, language: &str) -> Vec<String> {
        if language == DEFAULT_LANGUAGE {
            return MONTHS.iter().map(|m| m.to_string()).collect();
        }
        if let Some(cached) = self.month_cache.lock().await.get(language) {
            return cached.clone();
        }
        let joined = MONTHS.join(BLOCK_DELIMITER);
        let translated = self.translate_text(settings, &joined, language).await;
        match month_names_from(&translated) {
            Some(names) => {
                self.month_cache
                    .lock()
                    .await
                    .insert(language.to_string(), names.clone());
                names
            }
            None => {
                eprintln!(
                    "[h2o-advisor] month translation to {language} did not split cleanly, using English"
                );
                MONTHS.iter().map(|m| m.to_string()).collect()
            }
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Split a translated month block back into twelve names. Returns None on
/// a part-count mismatch.
fn month_names_from(translated: &str) -> Option<Vec<String>> {
    let parts: Vec<&str> = translated.split(BLOCK_DELIMITER).map(str::trim).collect();
    if parts.len() < MONTHS.len() {
        return None;
    }
    Some(
        parts
            .into_iter()
            .take(MONTHS.len())
            .map(str::to_string)
            .collect(),
    )
}
