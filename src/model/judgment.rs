use std::collections::BTreeMap;

use crate::model::rating::{Dimension, Rating};
use crate::model::service::Service;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceRatings {
    pub fluency: Rating,
    pub adequacy: Rating,
}

impl ServiceRatings {
    pub fn get(&self, dimension: Dimension) -> Rating {
        match dimension {
            Dimension::Fluency => self.fluency,
            Dimension::Adequacy => self.adequacy,
        }
    }
}

/// One worker's scores for every service on one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgmentRecord {
    pub worker_id: i64,
    pub ratings: BTreeMap<Service, ServiceRatings>,
}

impl JudgmentRecord {
    pub fn rating(&self, service: &Service) -> Option<&ServiceRatings> {
        self.ratings.get(service)
    }
}

/// A judged evaluation item: the source sentence, each service's candidate
/// translation and the judgments that survived validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub id: String,
    pub source: String,
    pub reference: Option<String>,
    pub translations: BTreeMap<Service, String>,
    pub judgments: Vec<JudgmentRecord>,
}

impl Unit {
    pub fn translation(&self, service: &Service) -> &str {
        self.translations
            .get(service)
            .map(String::as_str)
            .unwrap_or("")
    }
}
