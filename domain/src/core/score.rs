//! Bounded numeric value objects used across the diagnostic pipeline.
//!
//! All three types validate on construction and deserialize via
//! `try_from`, so an out-of-range value in an LLM reply fails at the
//! parse boundary instead of flowing downstream.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// A 0-10 diagnostic score (Value Object).
///
/// Used for cascade impact, specificity, and the validation gate scores.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct Score(u8);

impl Score {
    pub const MIN: Score = Score(0);
    pub const MAX: Score = Score(10);

    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > 10 {
            return Err(DomainError::ScoreOutOfRange(value as u64));
        }
        Ok(Score(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for Score {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > 10 {
            return Err(DomainError::ScoreOutOfRange(value));
        }
        Ok(Score(value as u8))
    }
}

impl From<Score> for u64 {
    fn from(score: Score) -> u64 {
        score.0 as u64
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/10", self.0)
    }
}

/// A 0-100 confidence percentage (Value Object).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(try_from = "u64", into = "u64")]
pub struct Confidence(u8);

impl Confidence {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value > 100 {
            return Err(DomainError::ConfidenceOutOfRange(value as u64));
        }
        Ok(Confidence(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u64> for Confidence {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(DomainError::ConfidenceOutOfRange(value));
        }
        Ok(Confidence(value as u8))
    }
}

impl From<Confidence> for u64 {
    fn from(confidence: Confidence) -> u64 {
        confidence.0 as u64
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// A non-negative monthly monetary value (Value Object).
///
/// NaN, infinities, and negative values are rejected on construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(try_from = "f64", into = "f64")]
pub struct MonetaryValue(f64);

impl MonetaryValue {
    pub const ZERO: MonetaryValue = MonetaryValue(0.0);

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::InvalidMonetaryValue(value));
        }
        Ok(MonetaryValue(value))
    }

    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for MonetaryValue {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        MonetaryValue::new(value)
    }
}

impl From<MonetaryValue> for f64 {
    fn from(value: MonetaryValue) -> f64 {
        value.0
    }
}

impl std::fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0}/month", self.0)
    }
}
