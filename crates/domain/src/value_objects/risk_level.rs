//! RiskLevel - triage priority attached to advice and problem posts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DomainError;

/// Assessed urgency of a cat health/behaviour concern.
///
/// Serialized exactly as `Low`, `Medium`, `High`. On input the title-case,
/// lowercase and uppercase spellings are accepted, both from JSON and
/// through [`FromStr`]; anything else is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    /// Whether the owner should be pointed at a vet rather than the feed
    pub fn needs_attention(&self) -> bool {
        *self == RiskLevel::High
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" | "low" | "LOW" => Ok(RiskLevel::Low),
            "Medium" | "medium" | "MEDIUM" => Ok(RiskLevel::Medium),
            "High" | "high" | "HIGH" => Ok(RiskLevel::High),
            other => Err(DomainError::InvalidRiskLevel(other.to_string())),
        }
    }
}

impl TryFrom<String> for RiskLevel {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        assert_eq!(serde_json::to_string(&RiskLevel::Medium).unwrap(), "\"Medium\"");
        let parsed: RiskLevel = serde_json::from_str("\"HIGH\"").unwrap();
        assert_eq!(parsed, RiskLevel::High);
    }

    #[test]
    fn test_unknown_level_rejected() {
        assert!(serde_json::from_str::<RiskLevel>("\"Severe\"").is_err());
        assert!("urgent".parse::<RiskLevel>().is_err());
        assert_eq!("low".parse::<RiskLevel>().unwrap(), RiskLevel::Low);
    }

    #[test]
    fn test_json_and_from_str_agree() {
        for raw in ["Low", "low", "LOW", "Medium", "MEDIUM", "high", "mEdIuM", "Hig", " High", ""] {
            let parsed = raw.parse::<RiskLevel>().ok();
            let decoded = serde_json::from_value::<RiskLevel>(serde_json::json!(raw)).ok();
            assert_eq!(parsed, decoded, "disagreement on {:?}", raw);
        }
        assert!("mEdIuM".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn test_only_high_needs_attention() {
        assert!(RiskLevel::High.needs_attention());
        assert!(!RiskLevel::Medium.needs_attention());
        assert!(!RiskLevel::Low.needs_attention());
    }
}
