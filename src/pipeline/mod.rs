use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value};

pub mod stage1_gold;
pub mod stage2_units;
pub mod stage3_aggregate;
pub mod stage4_report;

/// Writes one JSON object per line, the platform's unit upload format.
pub fn write_jsonl(path: &Path, documents: &[Map<String, Value>]) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    for doc in documents {
        serde_json::to_writer(&mut w, doc)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    tracing::info!(path = %path.display(), units = documents.len(), "wrote unit batch");
    Ok(())
}
