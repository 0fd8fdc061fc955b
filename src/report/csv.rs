use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::rating::Dimension;
use crate::model::{Service, Unit};

/// Keeps letters (plain and accented vowels), digits, spaces, periods and
/// underscores. Commas are dropped so that the comma-joined row keeps one
/// column per field.
pub fn sanitize_field(field: &str) -> String {
    field.chars().filter(|&c| is_allowed(c)).collect()
}

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            ' ' | '.' | '_' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú'
        )
}

/// Audit fields of one unit, before sanitizing: source text, each service's
/// translation, judgment count, then per judgment the worker id followed by
/// label/value pairs for every service's adequacy and fluency.
pub fn unit_fields(unit: &Unit, services: &[Service]) -> Vec<String> {
    let mut fields = Vec::with_capacity(2 + services.len() * (1 + 4 * unit.judgments.len()));
    fields.push(unit.source.clone());
    for service in services {
        fields.push(unit.translation(service).to_string());
    }
    fields.push(unit.judgments.len().to_string());

    for judgment in &unit.judgments {
        fields.push(judgment.worker_id.to_string());
        for service in services {
            for dimension in [Dimension::Adequacy, Dimension::Fluency] {
                fields.push(dimension.field_key(service));
                fields.push(
                    judgment
                        .rating(service)
                        .map(|r| r.get(dimension).to_string())
                        .unwrap_or_default(),
                );
            }
        }
    }
    fields
}

pub fn render_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| sanitize_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header-less audit table, one line per unit. Rows reach the sink as they
/// are written; `finish` flushes, and dropping the writer closes the sink.
pub struct CsvWriter<W: Write> {
    w: W,
    rows: usize,
}

impl CsvWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> std::io::Result<Self> {
        Ok(CsvWriter::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn new(w: W) -> Self {
        CsvWriter { w, rows: 0 }
    }

    pub fn write_unit(&mut self, unit: &Unit, services: &[Service]) -> std::io::Result<()> {
        let row = render_row(&unit_fields(unit, services));
        writeln!(self.w, "{}", row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        self.w.flush()?;
        Ok(self.w)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/csv.rs"]
mod tests;
