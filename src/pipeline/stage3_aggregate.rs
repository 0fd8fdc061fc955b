use std::collections::BTreeMap;
use std::io::Write;

use thiserror::Error;

use crate::error::EvalError;
use crate::input::InputError;
use crate::input::judgments::parse_unit;
use crate::input::source::{JobState, JudgmentSource};
use crate::model::rating::Dimension;
use crate::model::{PairMatrices, RaterPairKey, Service, Unit};
use crate::report::csv::CsvWriter;

/// Running sums of per-unit mean scores for one service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTotals {
    fluency_sum: f64,
    adequacy_sum: f64,
    units: usize,
}

impl ScoreTotals {
    fn add_unit(&mut self, fluency_mean: f64, adequacy_mean: f64) {
        self.fluency_sum += fluency_mean;
        self.adequacy_sum += adequacy_mean;
        self.units += 1;
    }

    pub fn units(&self) -> usize {
        self.units
    }

    pub fn fluency_mean(&self) -> Option<f64> {
        (self.units > 0).then(|| self.fluency_sum / self.units as f64)
    }

    pub fn adequacy_mean(&self) -> Option<f64> {
        (self.units > 0).then(|| self.adequacy_sum / self.units as f64)
    }
}

/// Rater-pair contingency tables and raw score sums for one run.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    services: Vec<Service>,
    pairs: BTreeMap<Service, BTreeMap<RaterPairKey, PairMatrices>>,
    scores: BTreeMap<Service, ScoreTotals>,
}

impl AggregationResult {
    pub fn new(services: &[Service]) -> AggregationResult {
        let mut pairs = BTreeMap::new();
        let mut scores = BTreeMap::new();
        for service in services {
            pairs.insert(service.clone(), BTreeMap::new());
            scores.insert(service.clone(), ScoreTotals::default());
        }
        AggregationResult {
            services: services.to_vec(),
            pairs,
            scores,
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn pairs(&self, service: &Service) -> Option<&BTreeMap<RaterPairKey, PairMatrices>> {
        self.pairs.get(service)
    }

    pub fn scores(&self, service: &Service) -> Option<&ScoreTotals> {
        self.scores.get(service)
    }

    /// Adds one unit. Every ordered pair of judgments from distinct workers
    /// is recorded, so each unordered pair lands twice, once per ordering.
    /// Returns the number of ordered pairs recorded.
    ///
    /// The unit is checked for missing ratings before anything is recorded.
    pub fn aggregate(&mut self, unit: &Unit) -> Result<usize, EvalError> {
        for (index, judgment) in unit.judgments.iter().enumerate() {
            for service in &self.services {
                if judgment.rating(service).is_none() {
                    return Err(EvalError::MissingRatingField {
                        index,
                        field: Dimension::Fluency.field_key(service),
                    });
                }
            }
        }

        self.add_scores(unit);

        if unit.judgments.len() < 2 {
            return Ok(0);
        }

        let mut recorded = 0usize;
        for (i, a) in unit.judgments.iter().enumerate() {
            for (j, b) in unit.judgments.iter().enumerate() {
                if i == j {
                    continue;
                }
                let Some(key) = RaterPairKey::new(a.worker_id, b.worker_id) else {
                    tracing::debug!(
                        unit_id = %unit.id,
                        worker_id = a.worker_id,
                        "worker judged the unit twice; pair ignored"
                    );
                    continue;
                };
                for service in &self.services {
                    let (Some(ra), Some(rb)) = (a.rating(service), b.rating(service)) else {
                        continue;
                    };
                    let matrices = self
                        .pairs
                        .entry(service.clone())
                        .or_default()
                        .entry(key)
                        .or_default();
                    matrices
                        .fluency
                        .record(ra.fluency.value(), rb.fluency.value())?;
                    matrices
                        .adequacy
                        .record(ra.adequacy.value(), rb.adequacy.value())?;
                }
                recorded += 1;
            }
        }
        Ok(recorded)
    }

    fn add_scores(&mut self, unit: &Unit) {
        if unit.judgments.is_empty() {
            return;
        }
        let n = unit.judgments.len() as f64;
        for service in &self.services {
            let mut fluency = 0.0;
            let mut adequacy = 0.0;
            for judgment in &unit.judgments {
                if let Some(r) = judgment.rating(service) {
                    fluency += r.fluency.value() as f64;
                    adequacy += r.adequacy.value() as f64;
                }
            }
            self.scores
                .entry(service.clone())
                .or_default()
                .add_unit(fluency / n, adequacy / n);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedUnit {
    pub unit_id: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Stage3Output {
    pub job_id: String,
    pub result: AggregationResult,
    pub units_processed: usize,
    pub judgments_dropped: usize,
    pub skipped: Vec<SkippedUnit>,
}

#[derive(Debug, Error)]
pub enum Stage3Error {
    #[error("cannot list units of job {job_id}: {source}")]
    UnitList { job_id: String, source: InputError },
    #[error("cannot write audit row for unit {unit_id}: {source}")]
    Sink {
        unit_id: String,
        source: std::io::Error,
    },
}

/// Fetches, validates and aggregates every unit of the job, writing one audit
/// row per aggregated unit. Units that cannot be fetched or lack a rating are
/// skipped and reported; a failing sink stops the run.
pub fn run_stage3<S, W>(
    source: &S,
    services: &[Service],
    csv: &mut CsvWriter<W>,
) -> Result<Stage3Output, Stage3Error>
where
    S: JudgmentSource + ?Sized,
    W: Write,
{
    let job_id = source.job_id().to_string();
    match source.job_state() {
        Ok(JobState::Finished) => {}
        Ok(JobState::Running(state)) => {
            tracing::warn!(job_id = %job_id, state = %state, "job has not finished; reporting judgments collected so far");
        }
        Err(err) => {
            tracing::warn!(job_id = %job_id, error = %err, "cannot read job state");
        }
    }

    let unit_ids = source
        .fetch_unit_ids()
        .map_err(|source| Stage3Error::UnitList {
            job_id: job_id.clone(),
            source,
        })?;

    let mut result = AggregationResult::new(services);
    let mut units_processed = 0usize;
    let mut judgments_dropped = 0usize;
    let mut skipped = Vec::new();

    for unit_id in unit_ids {
        let raws = match source.fetch_judgments(&unit_id) {
            Ok(raws) => raws,
            Err(err) => {
                tracing::warn!(unit_id = %unit_id, error = %err, "skipping unit: fetch failed");
                skipped.push(SkippedUnit {
                    unit_id,
                    reason: err.to_string(),
                });
                continue;
            }
        };

        let parsed = match parse_unit(&unit_id, &raws, services) {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::warn!(unit_id = %unit_id, error = %err, "skipping unit");
                skipped.push(SkippedUnit {
                    unit_id,
                    reason: err.to_string(),
                });
                continue;
            }
        };
        judgments_dropped += parsed.dropped.len();

        if let Err(err) = result.aggregate(&parsed.unit) {
            tracing::warn!(unit_id = %unit_id, error = %err, "skipping unit");
            skipped.push(SkippedUnit {
                unit_id,
                reason: err.to_string(),
            });
            continue;
        }

        csv.write_unit(&parsed.unit, services)
            .map_err(|source| Stage3Error::Sink {
                unit_id: unit_id.clone(),
                source,
            })?;
        units_processed += 1;
    }

    tracing::info!(
        job_id = %job_id,
        units = units_processed,
        skipped = skipped.len(),
        judgments_dropped,
        "aggregation finished"
    );

    Ok(Stage3Output {
        job_id,
        result,
        units_processed,
        judgments_dropped,
        skipped,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_aggregate.rs"]
mod tests;
