use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::pipeline::stage3_aggregate::{AggregationResult, Stage3Output};
use crate::report::html::render_report_html;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{PairKappa, ServiceSummary, SkippedEntry, SummaryData, mean_defined};

pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_TEXT_FILE: &str = "report.txt";
pub const REPORT_HTML_FILE: &str = "report.html";

#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub summary: PathBuf,
    pub text: PathBuf,
    pub html: PathBuf,
}

pub fn build_summary(output: &Stage3Output) -> SummaryData {
    SummaryData {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        job_id: output.job_id.clone(),
        units_processed: output.units_processed,
        units_skipped: output.skipped.len(),
        judgments_dropped: output.judgments_dropped,
        skipped_units: output
            .skipped
            .iter()
            .map(|s| SkippedEntry {
                unit_id: s.unit_id.clone(),
                reason: s.reason.clone(),
            })
            .collect(),
        services: summarize_services(&output.result),
    }
}

/// Per-service Kappa averages over rater pairs with a defined Kappa, plus the
/// raw score averages.
pub fn summarize_services(result: &AggregationResult) -> Vec<ServiceSummary> {
    let mut out = Vec::with_capacity(result.services().len());
    for service in result.services() {
        let pairs = result
            .pairs(service)
            .map(|pairs| {
                pairs
                    .iter()
                    .map(|(key, m)| PairKappa {
                        rater_a: key.low(),
                        rater_b: key.high(),
                        recordings: m.fluency.total(),
                        fluency_kappa: m.fluency.kappa().ok(),
                        adequacy_kappa: m.adequacy.kappa().ok(),
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        let scores = result.scores(service);
        out.push(ServiceSummary {
            service: service.name().to_string(),
            fluency_kappa: mean_defined(pairs.iter().map(|p| p.fluency_kappa)),
            adequacy_kappa: mean_defined(pairs.iter().map(|p| p.adequacy_kappa)),
            fluency_undefined_pairs: pairs.iter().filter(|p| p.fluency_kappa.is_none()).count(),
            adequacy_undefined_pairs: pairs
                .iter()
                .filter(|p| p.adequacy_kappa.is_none())
                .count(),
            fluency_score: scores.and_then(|s| s.fluency_mean()),
            adequacy_score: scores.and_then(|s| s.adequacy_mean()),
            units_scored: scores.map(|s| s.units()).unwrap_or(0),
            pairs,
        });
    }
    out
}

pub fn write_reports(summary: &SummaryData, out_dir: &Path) -> std::io::Result<ReportPaths> {
    fs::create_dir_all(out_dir)?;

    let paths = ReportPaths {
        summary: out_dir.join(SUMMARY_FILE),
        text: out_dir.join(REPORT_TEXT_FILE),
        html: out_dir.join(REPORT_HTML_FILE),
    };

    let json = render_summary_json(summary)?;
    write_text(&paths.summary, &json)?;
    write_text(&paths.text, &render_report_text(summary))?;
    write_text(&paths.html, &render_report_html(summary))?;

    tracing::info!(
        summary = %paths.summary.display(),
        report = %paths.text.display(),
        html = %paths.html.display(),
        "reports written"
    );
    Ok(paths)
}

fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
