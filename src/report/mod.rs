use serde::Serialize;

pub mod csv;
pub mod html;
pub mod json;
pub mod text;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairKappa {
    pub rater_a: i64,
    pub rater_b: i64,
    pub recordings: u32,
    /// `None` when the pair's table is degenerate.
    pub fluency_kappa: Option<f64>,
    pub adequacy_kappa: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceSummary {
    pub service: String,
    pub fluency_kappa: Option<f64>,
    pub adequacy_kappa: Option<f64>,
    pub fluency_undefined_pairs: usize,
    pub adequacy_undefined_pairs: usize,
    pub fluency_score: Option<f64>,
    pub adequacy_score: Option<f64>,
    pub units_scored: usize,
    pub pairs: Vec<PairKappa>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedEntry {
    pub unit_id: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub job_id: String,
    pub units_processed: usize,
    pub units_skipped: usize,
    pub judgments_dropped: usize,
    pub skipped_units: Vec<SkippedEntry>,
    pub services: Vec<ServiceSummary>,
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_kappa(v: Option<f64>) -> String {
    match v {
        Some(k) => format_f64_6(k),
        None => "undefined".to_string(),
    }
}

pub fn format_score(v: Option<f64>) -> String {
    match v {
        Some(s) => format!("{:.3}", s),
        None => "n/a".to_string(),
    }
}

/// Arithmetic mean of the defined values; `None` when there are none.
pub fn mean_defined(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values.into_iter().flatten() {
        sum += v;
        n += 1;
    }
    (n > 0).then(|| sum / n as f64)
}

/// Landis & Koch reading of a Kappa value.
pub fn agreement_label(kappa: Option<f64>) -> &'static str {
    match kappa {
        None => "undefined",
        Some(k) if k < 0.0 => "poor",
        Some(k) if k <= 0.20 => "slight",
        Some(k) if k <= 0.40 => "fair",
        Some(k) if k <= 0.60 => "moderate",
        Some(k) if k <= 0.80 => "substantial",
        Some(_) => "almost perfect",
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
