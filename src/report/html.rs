use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use crate::report::{PairKappa, SummaryData, format_f64_6};

/// Chart page: Kappa averages, score averages and one rater grid per service
/// and dimension, drawn with the Google visualization loader.
pub fn render_report_html(data: &SummaryData) -> String {
    let mut script = String::new();
    let mut body = String::new();

    push_column_charts(
        &mut script,
        "kappa_average",
        data.services
            .iter()
            .map(|s| (s.service.as_str(), s.adequacy_kappa, s.fluency_kappa)),
    );
    body.push_str("<h2>Kappa averages by service</h2>\n");
    body.push_str("<div id='kappa_average_adequacy'></div>\n");
    body.push_str("<div id='kappa_average_fluency'></div>\n");

    push_column_charts(
        &mut script,
        "score_average",
        data.services
            .iter()
            .map(|s| (s.service.as_str(), s.adequacy_score, s.fluency_score)),
    );
    body.push_str("<h2>Adequacy/Fluency averages by service</h2>\n");
    body.push_str("<div id='score_average_adequacy'></div>\n");
    body.push_str("<div id='score_average_fluency'></div>\n");

    for s in &data.services {
        let id = escape_js(&s.service);
        let _ = writeln!(
            body,
            "<h2>Kappa results for service {}</h2>",
            escape_html(&s.service)
        );
        let _ = writeln!(body, "<h3>Fluency kappa</h3>\n<div id=\"kappa_fluency_{id}\"></div>");
        let _ = writeln!(body, "<h3>Adequacy kappa</h3>\n<div id=\"kappa_adequacy_{id}\"></div>");

        push_grid_table(&mut script, &format!("kappa_fluency_{id}"), &s.pairs, |p| {
            p.fluency_kappa
        });
        push_grid_table(&mut script, &format!("kappa_adequacy_{id}"), &s.pairs, |p| {
            p.adequacy_kappa
        });
    }

    let mut out = String::new();
    out.push_str("<html>\n<head>\n");
    out.push_str(
        "<script type=\"text/javascript\" src=\"https://www.google.com/jsapi\"></script>\n",
    );
    out.push_str("<script type=\"text/javascript\">\n");
    out.push_str("google.load(\"visualization\", \"1\", {packages:[\"corechart\", \"table\"]});\n");
    out.push_str("google.setOnLoadCallback(drawCharts);\n");
    out.push_str("function drawCharts() {\n");
    out.push_str(&script);
    out.push_str("}\n</script>\n</head>\n<body>\n");
    let _ = writeln!(
        out,
        "<h1>Translation evaluation, job {}</h1>",
        escape_html(&data.job_id)
    );
    let _ = writeln!(
        out,
        "<p>Units aggregated: {}. Units skipped: {}.</p>",
        data.units_processed, data.units_skipped
    );
    out.push_str(&body);
    out.push_str("</body>\n</html>\n");
    out
}

/// Two column charts (adequacy, fluency) under `<prefix>_adequacy` and
/// `<prefix>_fluency`. Services without a value are left out of the chart.
fn push_column_charts<'a>(
    script: &mut String,
    prefix: &str,
    rows: impl Iterator<Item = (&'a str, Option<f64>, Option<f64>)>,
) {
    let mut adequacy = Vec::new();
    let mut fluency = Vec::new();
    for (service, a, f) in rows {
        if let Some(a) = a {
            adequacy.push(format!("['{}', {}]", escape_js(service), format_f64_6(a)));
        }
        if let Some(f) = f {
            fluency.push(format!("['{}', {}]", escape_js(service), format_f64_6(f)));
        }
    }

    script.push_str("{\n");
    for (var, label, data) in [
        ("adequacy", "Adequacy", &adequacy),
        ("fluency", "Fluency", &fluency),
    ] {
        let _ = writeln!(script, "var {var} = new google.visualization.DataTable();");
        let _ = writeln!(script, "{var}.addColumn(\"string\", \"Service\");");
        let _ = writeln!(script, "{var}.addColumn(\"number\", \"{label}\");");
        let _ = writeln!(script, "{var}.addRows([\n{}]);", data.join(",\n"));
        let _ = writeln!(
            script,
            "new google.visualization.ColumnChart(document.getElementById('{prefix}_{var}')).draw({var}, {{title: 'Translation\\'s {label} by translation service', hAxis: {{title: '{label}', titleTextStyle: {{color: 'red'}}}}}});"
        );
    }
    script.push_str("}\n");
}

fn push_grid_table(
    script: &mut String,
    element_id: &str,
    pairs: &[PairKappa],
    value: impl Fn(&PairKappa) -> Option<f64>,
) {
    let rows = pairs.iter().map(|p| p.rater_a).collect::<BTreeSet<_>>();
    let cols = pairs.iter().map(|p| p.rater_b).collect::<BTreeSet<_>>();
    let cells = pairs
        .iter()
        .map(|p| ((p.rater_a, p.rater_b), value(p)))
        .collect::<BTreeMap<_, _>>();

    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut header = vec!["' '".to_string()];
    header.extend(cols.iter().map(|c| format!("'{c}'")));
    lines.push(format!("[{}]", header.join(", ")));
    for row in &rows {
        let mut line = vec![format!("'{row}'")];
        for col in &cols {
            line.push(match cells.get(&(*row, *col)) {
                Some(Some(k)) => format!("'{}'", format_f64_6(*k)),
                Some(None) => "'undefined'".to_string(),
                None => "false".to_string(),
            });
        }
        lines.push(format!("[{}]", line.join(", ")));
    }

    script.push_str("{\n");
    let _ = writeln!(
        script,
        "var data = google.visualization.arrayToDataTable([\n{}\n]);",
        lines.join(",\n")
    );
    let _ = writeln!(
        script,
        "new google.visualization.Table(document.getElementById('{element_id}')).draw(data, null);"
    );
    script.push_str("}\n");
}

fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '<' => out.push_str("\\x3c"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
