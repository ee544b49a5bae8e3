//! Eigenquestion validation gates.
//!
//! A candidate workflow passes three named gates before it may be
//! accepted as the eigenquestion. Pass flags are derived here from the
//! returned scores; the model's own booleans are not trusted.

use crate::core::score::{Confidence, Score};
use serde::{Deserialize, Serialize};

/// Gate thresholds: standalone >= 8, cascade >= 7, root cause >= 8
pub const STANDALONE_VALUE_GATE: u8 = 8;
pub const CASCADE_EFFECT_GATE: u8 = 7;
pub const ROOT_CAUSE_GATE: u8 = 8;

/// Raw 0-10 scores per validation criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GateScores {
    pub standalone_value: Score,
    pub cascade_effect: Score,
    pub root_cause: Score,
}

impl GateScores {
    /// Apply the fixed pass thresholds to each criterion
    pub fn evaluate(&self) -> GatePass {
        GatePass {
            standalone_value: self.standalone_value.value() >= STANDALONE_VALUE_GATE,
            cascade_effect: self.cascade_effect.value() >= CASCADE_EFFECT_GATE,
            root_cause: self.root_cause.value() >= ROOT_CAUSE_GATE,
        }
    }
}

/// Per-gate pass/fail flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatePass {
    pub standalone_value: bool,
    pub cascade_effect: bool,
    pub root_cause: bool,
}

impl GatePass {
    pub fn all_passed(&self) -> bool {
        self.standalone_value && self.cascade_effect && self.root_cause
    }
}

/// Outcome of validating one candidate workflow (ephemeral).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRecord {
    pub is_eigenquestion: bool,
    pub confidence: Confidence,
    pub reasoning: String,
    pub scores: GateScores,
    pub failure_points: GatePass,
    /// Probing questions to go deeper; required non-empty when any gate fails
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
}

impl ValidationRecord {
    /// Recompute the verdict from the scores, overriding whatever the
    /// model claimed. Returns the normalized record.
    pub fn normalized(mut self) -> Self {
        self.failure_points = self.scores.evaluate();
        self.is_eigenquestion = self.failure_points.all_passed();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(standalone: u8, cascade: u8, root: u8) -> GateScores {
        GateScores {
            standalone_value: Score::new(standalone).unwrap(),
            cascade_effect: Score::new(cascade).unwrap(),
            root_cause: Score::new(root).unwrap(),
        }
    }

    #[test]
    fn test_all_gates_pass() {
        let pass = scores(8, 7, 8).evaluate();
        assert!(pass.standalone_value);
        assert!(pass.cascade_effect);
        assert!(pass.root_cause);
        assert!(pass.all_passed());
    }

    #[test]
    fn test_single_gate_failure_rejects() {
        assert!(!scores(7, 7, 8).evaluate().all_passed());
        assert!(!scores(8, 6, 8).evaluate().all_passed());
        assert!(!scores(8, 7, 7).evaluate().all_passed());
    }

    #[test]
    fn test_normalized_overrides_model_verdict() {
        let json = r#"{
            "isEigenquestion": true,
            "confidence": 90,
            "reasoning": "looks strong",
            "scores": {"standaloneValue": 9, "cascadeEffect": 5, "rootCause": 9},
            "failurePoints": {"standaloneValue": true, "cascadeEffect": true, "rootCause": true},
            "questions": ["When it fails, whose work stops first?"],
            "redFlags": []
        }"#;
        let record: ValidationRecord = serde_json::from_str(json).unwrap();
        let normalized = record.normalized();
        // cascade 5 < 7: the model's optimistic verdict is overruled
        assert!(!normalized.is_eigenquestion);
        assert!(!normalized.failure_points.cascade_effect);
        assert!(normalized.failure_points.standalone_value);
    }
}
