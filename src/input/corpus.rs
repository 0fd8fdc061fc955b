use std::path::Path;

use crate::input::{InputError, read_lines};

/// One entry of a gold file: the source sentence, its reference translation
/// and the translation shown as the correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldTriple {
    pub source: String,
    pub reference: String,
    pub correct: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    pub source: String,
    pub reference: String,
}

/// Gold files hold consecutive line triples. Blank lines after the last
/// triple are ignored; an incomplete trailing triple is an error.
pub fn read_gold_triples(path: &Path) -> Result<Vec<GoldTriple>, InputError> {
    let mut lines = read_lines(path)?;
    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    if lines.len() % 3 != 0 {
        return Err(InputError::Parse(format!(
            "gold file {} has {} lines; expected groups of 3 (source, reference, correct)",
            path.display(),
            lines.len()
        )));
    }

    let triples = lines
        .chunks(3)
        .map(|chunk| GoldTriple {
            source: chunk[0].clone(),
            reference: chunk[1].clone(),
            correct: chunk[2].clone(),
        })
        .collect::<Vec<_>>();
    tracing::debug!(path = %path.display(), triples = triples.len(), "read gold file");
    Ok(triples)
}

/// Line-aligned source and reference files; stops at the shorter one.
pub fn read_parallel(source: &Path, reference: &Path) -> Result<Vec<SentencePair>, InputError> {
    let sources = read_lines(source)?;
    let references = read_lines(reference)?;
    if sources.len() != references.len() {
        tracing::warn!(
            source_lines = sources.len(),
            reference_lines = references.len(),
            "source and reference files differ in length; extra lines are ignored"
        );
    }
    Ok(sources
        .into_iter()
        .zip(references)
        .map(|(source, reference)| SentencePair { source, reference })
        .collect())
}
