use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::input::judgments::{RawJudgment, UnitDocument};
use crate::input::{InputError, open_maybe_gz};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Finished,
    Running(String),
}

impl JobState {
    pub fn from_label(label: &str) -> JobState {
        if label == "finished" {
            JobState::Finished
        } else {
            JobState::Running(label.to_string())
        }
    }
}

/// Read side of the annotation platform.
pub trait JudgmentSource {
    fn job_id(&self) -> &str;
    fn job_state(&self) -> Result<JobState, InputError>;
    fn fetch_unit_ids(&self) -> Result<Vec<String>, InputError>;
    fn fetch_judgments(&self, unit_id: &str) -> Result<Vec<RawJudgment>, InputError>;
}

#[derive(Debug, Deserialize)]
struct JobDump {
    #[serde(default)]
    job_id: Option<Value>,
    #[serde(default)]
    state: Option<String>,
    units: Map<String, Value>,
}

/// A job exported to a JSON file (optionally gzipped). Unit bodies are only
/// decoded when fetched, so one malformed unit does not spoil the others.
#[derive(Debug, Clone)]
pub struct DumpSource {
    job_id: String,
    state: String,
    units: Map<String, Value>,
}

impl DumpSource {
    pub fn open(path: &Path) -> Result<DumpSource, InputError> {
        let mut text = String::new();
        open_maybe_gz(path)?.read_to_string(&mut text)?;
        let source = DumpSource::from_json(&text)?;
        tracing::info!(
            path = %path.display(),
            job_id = %source.job_id,
            units = source.units.len(),
            "loaded judgment dump"
        );
        Ok(source)
    }

    pub fn from_json(json: &str) -> Result<DumpSource, InputError> {
        let dump: JobDump = serde_json::from_str(json)?;
        Ok(DumpSource::from_parts(dump))
    }

    fn from_parts(dump: JobDump) -> DumpSource {
        let job_id = match dump.job_id {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        DumpSource {
            job_id,
            state: dump.state.unwrap_or_else(|| "finished".to_string()),
            units: dump.units,
        }
    }
}

impl JudgmentSource for DumpSource {
    fn job_id(&self) -> &str {
        &self.job_id
    }

    fn job_state(&self) -> Result<JobState, InputError> {
        Ok(JobState::from_label(&self.state))
    }

    fn fetch_unit_ids(&self) -> Result<Vec<String>, InputError> {
        Ok(self.units.keys().cloned().collect())
    }

    fn fetch_judgments(&self, unit_id: &str) -> Result<Vec<RawJudgment>, InputError> {
        let body = self.units.get(unit_id).ok_or_else(|| InputError::Fetch {
            unit_id: unit_id.to_string(),
            reason: "unit not present in job".to_string(),
        })?;
        let doc = UnitDocument::deserialize(body).map_err(|e| InputError::Fetch {
            unit_id: unit_id.to_string(),
            reason: e.to_string(),
        })?;
        Ok(doc.results.judgments)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/source.rs"]
mod tests;
