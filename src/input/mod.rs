use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod corpus;
pub mod judgments;
pub mod source;
pub mod translate;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("fetch failed for unit {unit_id}: {reason}")]
    Fetch { unit_id: String, reason: String },
    #[error("translation failed for service {service}: {reason}")]
    Translation { service: String, reason: String },
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InputError::MissingInput(path.display().to_string())
        } else {
            InputError::Io(e)
        }
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// All lines of a (possibly gzipped) text file, without line terminators.
pub fn read_lines(path: &Path) -> Result<Vec<String>, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        lines.push(line.trim_end_matches('\r').to_string());
    }
    Ok(lines)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
