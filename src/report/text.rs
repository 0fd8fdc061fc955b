use std::collections::{BTreeMap, BTreeSet};

use crate::report::{
    PairKappa, ServiceSummary, SummaryData, agreement_label, format_kappa, format_score,
};

pub fn render_report_text(data: &SummaryData) -> String {
    let mut out = String::new();

    out.push_str("Crowdsourced Translation Evaluation Report\n");
    out.push_str("==========================================\n\n");

    out.push_str(&format!("Job: {}\n", display_job(&data.job_id)));
    out.push_str(&format!("Units aggregated: {}\n", data.units_processed));
    out.push_str(&format!("Units skipped: {}\n", data.units_skipped));
    out.push_str(&format!("Judgments dropped: {}\n\n", data.judgments_dropped));

    out.push_str("1. Inter-rater agreement (Cohen's Kappa, mean over rater pairs)\n");
    out.push_str(&format!(
        "{:<16}{:>12}{:>12}{:>8}  {}\n",
        "service", "fluency", "adequacy", "pairs", "agreement"
    ));
    for s in &data.services {
        out.push_str(&format!(
            "{:<16}{:>12}{:>12}{:>8}  {}/{}\n",
            s.service,
            format_kappa(s.fluency_kappa),
            format_kappa(s.adequacy_kappa),
            s.pairs.len(),
            agreement_label(s.fluency_kappa),
            agreement_label(s.adequacy_kappa)
        ));
        if s.fluency_undefined_pairs > 0 || s.adequacy_undefined_pairs > 0 {
            out.push_str(&format!(
                "  undefined pairs: fluency={}, adequacy={}\n",
                s.fluency_undefined_pairs, s.adequacy_undefined_pairs
            ));
        }
    }
    out.push_str(&format!("{}\n\n", agreement_statement(&data.services)));

    out.push_str("2. Average scores (0-5, mean of unit averages)\n");
    out.push_str(&format!(
        "{:<16}{:>10}{:>10}{:>8}\n",
        "service", "fluency", "adequacy", "units"
    ));
    for s in &data.services {
        out.push_str(&format!(
            "{:<16}{:>10}{:>10}{:>8}\n",
            s.service,
            format_score(s.fluency_score),
            format_score(s.adequacy_score),
            s.units_scored
        ));
    }
    out.push('\n');

    out.push_str("3. Kappa by rater pair\n");
    for s in &data.services {
        out.push_str(&format!("Service {}: fluency\n", s.service));
        out.push_str(&render_grid(&s.pairs, |p| p.fluency_kappa));
        out.push_str(&format!("Service {}: adequacy\n", s.service));
        out.push_str(&render_grid(&s.pairs, |p| p.adequacy_kappa));
    }

    if !data.skipped_units.is_empty() {
        out.push_str("\n4. Skipped units\n");
        for skipped in &data.skipped_units {
            out.push_str(&format!("{}: {}\n", skipped.unit_id, skipped.reason));
        }
    }

    out
}

/// Rows are the lower worker id of each pair, columns the higher one.
pub fn render_grid(pairs: &[PairKappa], value: impl Fn(&PairKappa) -> Option<f64>) -> String {
    if pairs.is_empty() {
        return "  (no rater pairs)\n".to_string();
    }

    let rows = pairs.iter().map(|p| p.rater_a).collect::<BTreeSet<_>>();
    let cols = pairs.iter().map(|p| p.rater_b).collect::<BTreeSet<_>>();
    let cells = pairs
        .iter()
        .map(|p| ((p.rater_a, p.rater_b), value(p)))
        .collect::<BTreeMap<_, _>>();

    let mut out = String::new();
    out.push_str(&format!("{:>12}", ""));
    for col in &cols {
        out.push_str(&format!("{:>12}", col));
    }
    out.push('\n');
    for row in &rows {
        out.push_str(&format!("{:>12}", row));
        for col in &cols {
            let cell = match cells.get(&(*row, *col)) {
                Some(v) => format_kappa(*v),
                None => "-".to_string(),
            };
            out.push_str(&format!("{:>12}", cell));
        }
        out.push('\n');
    }
    out
}

fn agreement_statement(services: &[ServiceSummary]) -> String {
    let best = services
        .iter()
        .filter_map(|s| s.fluency_kappa.map(|k| (s, k)))
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
    match best {
        Some((s, k)) if k > 0.40 => format!(
            "Raters agree most on fluency for {} ({}).",
            s.service,
            agreement_label(Some(k))
        ),
        Some(_) => "Fluency agreement is weak for every service; consider more gold units."
            .to_string(),
        None => "No rater pair produced a defined Kappa.".to_string(),
    }
}

fn display_job(job_id: &str) -> &str {
    if job_id.is_empty() { "(unknown)" } else { job_id }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
