//! Structured scoring of one free-text answer.

use crate::core::score::Score;
use crate::diagnostic::action::NextAction;
use serde::{Deserialize, Serialize};

/// Output of one scoring pass over a user answer (ephemeral, not persisted).
///
/// Deserialized directly from the model's JSON reply; the bounded field
/// types make an out-of-range or ill-typed reply fail at the parse
/// boundary (a contract violation for the turn).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// How much this task's failure blocks other teams' work
    pub cascade_score: Score,
    /// How concrete (vs vague) the answer is
    pub specificity_score: Score,
    pub is_root_cause: bool,
    pub is_compensating_work: bool,
    /// The failure cascade path, traced by the model
    pub second_order_effects: String,
    /// What the user thinks the problem is vs what it actually is
    pub mental_model_mismatch: String,
    pub next_action: NextAction,
    /// Internal analysis - never shown to the end user
    pub reasoning: String,
}

impl ScoreRecord {
    /// The fixed zeroed record returned for the `"START"` sentinel.
    ///
    /// Guarantees the very first turn is deterministic and free of model
    /// latency and cost.
    pub fn opening() -> Self {
        Self {
            cascade_score: Score::MIN,
            specificity_score: Score::MIN,
            is_root_cause: false,
            is_compensating_work: false,
            second_order_effects: String::new(),
            mental_model_mismatch: String::new(),
            next_action: NextAction::MoveOn,
            reasoning: String::new(),
        }
    }

    /// High priority answers are cascade-heavy (score >= 8)
    pub fn is_high_priority(&self) -> bool {
        self.cascade_score.value() >= 8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opening_record_is_zeroed() {
        let record = ScoreRecord::opening();
        assert_eq!(record.cascade_score, Score::MIN);
        assert_eq!(record.specificity_score, Score::MIN);
        assert_eq!(record.next_action, NextAction::MoveOn);
        assert!(!record.is_root_cause);
        assert!(!record.is_high_priority());
    }

    #[test]
    fn test_deserialize_wire_format() {
        let json = r#"{
            "cascadeScore": 9,
            "specificityScore": 4,
            "isRootCause": true,
            "isCompensatingWork": false,
            "secondOrderEffects": "assembly line halts, then shipping slips",
            "mentalModelMismatch": "thinks it is a staffing issue",
            "nextAction": "FORCE_SPECIFICITY",
            "reasoning": "high cascade, vague answer"
        }"#;

        let record: ScoreRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.cascade_score.value(), 9);
        assert_eq!(record.next_action, NextAction::ForceSpecificity);
        assert!(record.is_high_priority());
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_score() {
        let json = r#"{
            "cascadeScore": 14,
            "specificityScore": 4,
            "isRootCause": true,
            "isCompensatingWork": false,
            "secondOrderEffects": "",
            "mentalModelMismatch": "",
            "nextAction": "MOVE_ON",
            "reasoning": ""
        }"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_unknown_action() {
        let json = r#"{
            "cascadeScore": 5,
            "specificityScore": 4,
            "isRootCause": true,
            "isCompensatingWork": false,
            "secondOrderEffects": "",
            "mentalModelMismatch": "",
            "nextAction": "THINK_HARDER",
            "reasoning": ""
        }"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_field() {
        // downstream control flow needs every field present
        let json = r#"{"cascadeScore": 5, "specificityScore": 4}"#;
        assert!(serde_json::from_str::<ScoreRecord>(json).is_err());
    }
}
