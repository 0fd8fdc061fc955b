pub mod confusion;
pub mod gold;
pub mod judgment;
pub mod pair;
pub mod rating;
pub mod service;

pub use judgment::{JudgmentRecord, ServiceRatings, Unit};
pub use pair::{PairMatrices, RaterPairKey};
pub use service::Service;
