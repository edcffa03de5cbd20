//! Bounded scores and the overall risk scale.
//!
//! Bounds are checked when a value is built, never clamped, so an
//! out-of-range score from the model rejects the whole record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Document complexity on a 1–10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ComplexityScore(u8);

impl ComplexityScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ComplexityScore {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<i64> for ComplexityScore {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(ValidationError::OutOfRange {
                field: "complexity_score".into(),
                value: value.to_string(),
                range: "1..=10",
            })
        }
    }
}

impl From<ComplexityScore> for i64 {
    fn from(score: ComplexityScore) -> Self {
        i64::from(score.0)
    }
}

/// Confidence in the analysis, 0.0–1.0 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ConfidenceScore(f64);

impl ConfidenceScore {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for ConfidenceScore {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // NaN fails the range check.
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ValidationError::OutOfRange {
                field: "confidence_score".into(),
                value: value.to_string(),
                range: "0.0..=1.0",
            })
        }
    }
}

impl From<ConfidenceScore> for f64 {
    fn from(score: ConfidenceScore) -> Self {
        score.0
    }
}

/// Overall risk rating of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

impl RiskLevel {
    pub const ALLOWED: &'static str = "CRITICAL, HIGH, MEDIUM, LOW";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CRITICAL" => Ok(Self::Critical),
            "HIGH" => Ok(Self::High),
            "MEDIUM" => Ok(Self::Medium),
            "LOW" => Ok(Self::Low),
            _ => Err(ValidationError::UnknownVariant {
                field: "overall_risk_level".into(),
                value: s.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complexity_bounds_are_inclusive() {
        assert_eq!(ComplexityScore::try_from(1_i64).unwrap().get(), 1);
        assert_eq!(ComplexityScore::try_from(10_i64).unwrap().get(), 10);
    }

    #[test]
    fn complexity_out_of_range_fails() {
        assert!(ComplexityScore::try_from(0_i64).is_err());
        let err = ComplexityScore::try_from(11_i64).unwrap_err();
        assert_eq!(err.field(), "complexity_score");
        assert!(err.to_string().contains("11"));
    }

    #[test]
    fn confidence_bounds_are_inclusive() {
        assert_eq!(ConfidenceScore::try_from(0.0).unwrap().get(), 0.0);
        assert_eq!(ConfidenceScore::try_from(1.0).unwrap().get(), 1.0);
    }

    #[test]
    fn confidence_out_of_range_fails() {
        assert!(ConfidenceScore::try_from(1.1).is_err());
        assert!(ConfidenceScore::try_from(-0.01).is_err());
        assert!(ConfidenceScore::try_from(f64::NAN).is_err());
    }

    #[test]
    fn scores_deserialize_through_validation() {
        assert!(serde_json::from_str::<ComplexityScore>("7").is_ok());
        assert!(serde_json::from_str::<ComplexityScore>("11").is_err());
        assert!(serde_json::from_str::<ConfidenceScore>("0.9").is_ok());
        assert!(serde_json::from_str::<ConfidenceScore>("1.5").is_err());
    }

    #[test]
    fn risk_level_parses_case_insensitively() {
        assert_eq!(" high ".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert_eq!("Critical".parse::<RiskLevel>().unwrap(), RiskLevel::Critical);
        assert!("MODERATE".parse::<RiskLevel>().is_err());
    }

    #[test]
    fn risk_level_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&RiskLevel::Low).unwrap(), "\"LOW\"");
        assert_eq!(RiskLevel::default(), RiskLevel::Medium);
    }
}
