use serde_json::Value;

use crate::error::EvalError;
use crate::model::service::Service;

/// Number of categories on the judging scale (ratings 0..=5).
pub const RATING_CATEGORIES: usize = 6;

pub const GOLD_TRUE_RATING: Rating = Rating(5);
pub const GOLD_DISTRACTOR_RATING: Rating = Rating(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Option<Rating> {
        if (value as usize) < RATING_CATEGORIES {
            Some(Rating(value))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Reads a rating as the platform sends it: a JSON integer or a numeric
    /// string such as `"4"`.
    pub fn from_json(field: &str, value: &Value) -> Result<Rating, EvalError> {
        let invalid = || EvalError::InvalidRating {
            field: field.to_string(),
            value: value.to_string(),
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        let raw = parsed.ok_or_else(invalid)?;
        u8::try_from(raw)
            .ok()
            .and_then(Rating::new)
            .ok_or_else(invalid)
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Fluency,
    Adequacy,
}

impl Dimension {
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Fluency => "fluency",
            Dimension::Adequacy => "adequacy",
        }
    }

    /// Judgment field carrying this dimension for `service`, e.g. `fluency_bing`.
    pub fn field_key(self, service: &Service) -> String {
        format!("{}_{}", self.name(), service.name())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/rating.rs"]
mod tests;
