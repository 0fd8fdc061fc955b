use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::EvalError;
use crate::model::rating::{Dimension, Rating};
use crate::model::{JudgmentRecord, Service, ServiceRatings, Unit};

/// A judged unit as exported by the annotation platform.
#[derive(Debug, Clone, Deserialize)]
pub struct UnitDocument {
    pub results: UnitResults,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitResults {
    #[serde(default)]
    pub judgments: Vec<RawJudgment>,
}

/// One worker's answer form. `data` holds the `fluency_<service>` and
/// `adequacy_<service>` answers; `unit_data` echoes the texts shown.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJudgment {
    #[serde(default)]
    pub worker_id: Option<Value>,
    #[serde(default)]
    pub unit_data: Map<String, Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

#[derive(Debug, Clone)]
pub struct ParsedUnit {
    pub unit: Unit,
    /// Judgments left out of `unit`, with the reason.
    pub dropped: Vec<EvalError>,
}

/// Validates the raw judgments of one unit.
///
/// A judgment without a rating field for some service fails the whole unit.
/// A judgment whose rating or worker id cannot be read is dropped and
/// reported in `ParsedUnit::dropped`.
pub fn parse_unit(
    unit_id: &str,
    raws: &[RawJudgment],
    services: &[Service],
) -> Result<ParsedUnit, EvalError> {
    for (index, raw) in raws.iter().enumerate() {
        for service in services {
            for dimension in [Dimension::Fluency, Dimension::Adequacy] {
                let field = dimension.field_key(service);
                if !raw.data.contains_key(&field) {
                    return Err(EvalError::MissingRatingField { index, field });
                }
            }
        }
    }

    let mut judgments = Vec::with_capacity(raws.len());
    let mut dropped = Vec::new();
    for (index, raw) in raws.iter().enumerate() {
        match parse_judgment(index, raw, services) {
            Ok(record) => judgments.push(record),
            Err(err) => {
                tracing::warn!(unit_id, judgment = index, error = %err, "dropping judgment");
                dropped.push(err);
            }
        }
    }

    let unit_data = raws.first().map(|r| &r.unit_data);
    let text = |key: &str| unit_data.and_then(|d| d.get(key)).map(value_text);

    let mut translations = BTreeMap::new();
    for service in services {
        translations.insert(service.clone(), text(service.name()).unwrap_or_default());
    }

    Ok(ParsedUnit {
        unit: Unit {
            id: unit_id.to_string(),
            source: text("lo").unwrap_or_default(),
            reference: text("tr"),
            translations,
            judgments,
        },
        dropped,
    })
}

fn parse_judgment(
    index: usize,
    raw: &RawJudgment,
    services: &[Service],
) -> Result<JudgmentRecord, EvalError> {
    let worker_id = parse_worker_id(index, raw.worker_id.as_ref())?;

    let mut ratings = BTreeMap::new();
    for service in services {
        let read = |dimension: Dimension| -> Result<Rating, EvalError> {
            let field = dimension.field_key(service);
            match raw.data.get(&field) {
                Some(value) => Rating::from_json(&field, value),
                None => Err(EvalError::MissingRatingField { index, field }),
            }
        };
        ratings.insert(
            service.clone(),
            ServiceRatings {
                fluency: read(Dimension::Fluency)?,
                adequacy: read(Dimension::Adequacy)?,
            },
        );
    }

    Ok(JudgmentRecord { worker_id, ratings })
}

fn parse_worker_id(index: usize, value: Option<&Value>) -> Result<i64, EvalError> {
    let malformed = |reason: String| EvalError::MalformedJudgment { index, reason };
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| malformed(format!("worker_id {n} is not an integer"))),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed(format!("worker_id {s:?} is not an integer"))),
        Some(other) => Err(malformed(format!("worker_id {other} is not an integer"))),
        None => Err(malformed("missing worker_id".to_string())),
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/judgments.rs"]
mod tests;
