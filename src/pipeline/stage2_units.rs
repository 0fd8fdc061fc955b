use serde_json::{Map, Value};

use crate::input::corpus::SentencePair;
use crate::input::translate::Translator;

#[derive(Debug, Clone)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Default)]
pub struct Stage2Output {
    pub documents: Vec<Map<String, Value>>,
    pub skipped: Vec<SkippedLine>,
}

/// Translates every source sentence with every service. A sentence that any
/// service fails to translate is left out of the batch.
pub fn run_stage2<T: Translator>(
    pairs: &[SentencePair],
    translators: &[T],
    source_lang: &str,
    target_lang: &str,
) -> Stage2Output {
    let mut out = Stage2Output::default();

    'pairs: for (idx, pair) in pairs.iter().enumerate() {
        let line = idx + 1;
        let mut doc = Map::new();
        doc.insert("lo".to_string(), Value::String(pair.source.clone()));
        doc.insert("tr".to_string(), Value::String(pair.reference.clone()));

        for translator in translators {
            match translator.translate(&pair.source, source_lang, target_lang) {
                Ok(text) => {
                    doc.insert(translator.service().name().to_string(), Value::String(text));
                }
                Err(err) => {
                    tracing::warn!(line, error = %err, "skipping sentence");
                    out.skipped.push(SkippedLine {
                        line,
                        reason: err.to_string(),
                    });
                    continue 'pairs;
                }
            }
        }
        out.documents.push(doc);
    }

    tracing::info!(
        units = out.documents.len(),
        skipped = out.skipped.len(),
        "data units ready"
    );
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_units.rs"]
mod tests;
