use rand::Rng;
use serde_json::{Map, Value};

use crate::error::EvalError;
use crate::input::corpus::GoldTriple;
use crate::model::Service;
use crate::model::gold::{GoldUnit, build_gold_unit};
use crate::shuffle::Shuffler;

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub units: Vec<GoldUnit>,
}

impl Stage1Output {
    pub fn documents(&self) -> Vec<Map<String, Value>> {
        self.units.iter().map(GoldUnit::to_document).collect()
    }
}

/// One gold unit per triple; the service showing the correct translation is
/// drawn uniformly from `rng`.
pub fn run_stage1<R: Rng + ?Sized>(
    triples: &[GoldTriple],
    services: &[Service],
    shuffler: &Shuffler,
    rng: &mut R,
) -> Result<Stage1Output, EvalError> {
    if services.is_empty() {
        return Err(EvalError::InvalidServiceIndex {
            index: 0,
            services: 0,
        });
    }

    let mut units = Vec::with_capacity(triples.len());
    for triple in triples {
        let true_index = rng.gen_range(0..services.len());
        let unit = build_gold_unit(
            services,
            &triple.source,
            &triple.reference,
            &triple.correct,
            true_index,
            shuffler,
            rng,
        )?;
        tracing::debug!(
            true_service = %unit.true_service(),
            source = %triple.source,
            "built gold unit"
        );
        units.push(unit);
    }

    tracing::info!(
        units = units.len(),
        degree = shuffler.degree(),
        "gold units ready"
    );
    Ok(Stage1Output { units })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_gold.rs"]
mod tests;
