use rand::Rng;
use serde_json::{Map, Value};

use crate::error::EvalError;
use crate::model::rating::{Dimension, GOLD_DISTRACTOR_RATING, GOLD_TRUE_RATING, Rating};
use crate::model::service::Service;
use crate::shuffle::Shuffler;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldCandidate {
    pub service: Service,
    pub text: String,
    pub gold_rating: Rating,
}

impl GoldCandidate {
    pub fn is_true(&self) -> bool {
        self.gold_rating == GOLD_TRUE_RATING
    }
}

/// Known-answer unit: exactly one service shows the correct translation,
/// every other service shows a shuffled distractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoldUnit {
    pub source: String,
    pub reference: String,
    pub true_index: usize,
    pub candidates: Vec<GoldCandidate>,
}

impl GoldUnit {
    pub fn true_service(&self) -> &Service {
        &self.candidates[self.true_index].service
    }

    /// Upload payload for the annotation platform, one object per unit.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();
        doc.insert("lo".to_string(), Value::String(self.source.clone()));
        doc.insert("tr".to_string(), Value::String(self.reference.clone()));
        for candidate in &self.candidates {
            let reason = if candidate.is_true() {
                "correct translation"
            } else {
                "shuffled distractor"
            };
            doc.insert(
                candidate.service.name().to_string(),
                Value::String(candidate.text.clone()),
            );
            for dimension in [Dimension::Fluency, Dimension::Adequacy] {
                let key = dimension.field_key(&candidate.service);
                doc.insert(
                    format!("{key}_gold"),
                    Value::String(candidate.gold_rating.to_string()),
                );
                doc.insert(
                    format!("{key}_gold_reason"),
                    Value::String(reason.to_string()),
                );
            }
        }
        doc.insert("_golden".to_string(), Value::String("TRUE".to_string()));
        doc
    }
}

/// Builds a gold unit for `services`. The service at `true_index` receives
/// `correct`; every other service receives an independent shuffle of it.
pub fn build_gold_unit<R: Rng + ?Sized>(
    services: &[Service],
    source: &str,
    reference: &str,
    correct: &str,
    true_index: usize,
    shuffler: &Shuffler,
    rng: &mut R,
) -> Result<GoldUnit, EvalError> {
    if true_index >= services.len() {
        return Err(EvalError::InvalidServiceIndex {
            index: true_index,
            services: services.len(),
        });
    }

    let mut candidates = Vec::with_capacity(services.len());
    for (idx, service) in services.iter().enumerate() {
        let candidate = if idx == true_index {
            GoldCandidate {
                service: service.clone(),
                text: correct.to_string(),
                gold_rating: GOLD_TRUE_RATING,
            }
        } else {
            GoldCandidate {
                service: service.clone(),
                text: shuffler.shuffle(correct, rng),
                gold_rating: GOLD_DISTRACTOR_RATING,
            }
        };
        candidates.push(candidate);
    }

    Ok(GoldUnit {
        source: source.to_string(),
        reference: reference.to_string(),
        true_index,
        candidates,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/gold.rs"]
mod tests;
