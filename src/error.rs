use thiserror::Error;

/// Failures of the evaluation core. Input and configuration problems have
/// their own enums in `input` and `config`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("shuffle degree must be an integer between 1 and 5, got {0}")]
    InvalidDegree(u8),
    #[error("rating {value} for {field} is outside 0..=5")]
    InvalidRating { field: String, value: String },
    #[error("judgment {index} has no {field} field")]
    MissingRatingField { index: usize, field: String },
    #[error("judgment {index} is malformed: {reason}")]
    MalformedJudgment { index: usize, reason: String },
    #[error("kappa is undefined for this matrix")]
    DivisionUndefined,
    #[error("true translation index {index} out of range for {services} services")]
    InvalidServiceIndex { index: usize, services: usize },
}
