//! Value Objects - immutable business values

pub mod match_score;
pub mod risk_level;

pub use match_score::MatchScore;
pub use risk_level::RiskLevel;
