//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Score out of range: {0} (expected 0-10)")]
    ScoreOutOfRange(u64),

    #[error("Confidence out of range: {0} (expected 0-100)")]
    ConfidenceOutOfRange(u64),

    #[error("Monetary value must be finite and non-negative, got {0}")]
    InvalidMonetaryValue(f64),

    #[error("Unknown next action: {0}")]
    UnknownNextAction(String),

    #[error("Unknown pattern type: {0}")]
    UnknownPatternType(String),

    #[error("Session already completed")]
    AlreadyCompleted,
}

impl DomainError {
    /// Check whether this error is a contract violation at the LLM reply boundary
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            DomainError::ContractViolation(_)
                | DomainError::ScoreOutOfRange(_)
                | DomainError::ConfidenceOutOfRange(_)
                | DomainError::UnknownNextAction(_)
                | DomainError::UnknownPatternType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_out_of_range_display() {
        let error = DomainError::ScoreOutOfRange(14);
        assert_eq!(error.to_string(), "Score out of range: 14 (expected 0-10)");
    }

    #[test]
    fn test_is_contract_violation() {
        assert!(DomainError::UnknownNextAction("SKIP".into()).is_contract_violation());
        assert!(DomainError::ScoreOutOfRange(11).is_contract_violation());
        assert!(!DomainError::AlreadyCompleted.is_contract_violation());
        assert!(!DomainError::Precondition("x".into()).is_contract_violation());
    }
}
