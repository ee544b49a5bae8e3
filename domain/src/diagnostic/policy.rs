//! Next-action policy table.
//!
//! The policy is advisory: it is rendered into the scoring prompt so the
//! model is instructed to follow it, and the model's returned `nextAction`
//! is authoritative at runtime. This function is the reference the test
//! harness checks conformance against.

use crate::core::score::Score;
use crate::diagnostic::action::NextAction;
use serde::{Deserialize, Serialize};

/// Thresholds driving the next-action decision (immutable config data).
///
/// Passed into the orchestrator at construction; per-tenant overrides go
/// through [`crate::prompt::PromptTemplate::scoring_user`], never through
/// module-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyThresholds {
    /// Cascade score at or above which an answer is high priority
    pub cascade_high: u8,
    /// Specificity below this forces concreteness on high-cascade answers
    pub specificity_floor: u8,
    /// Specificity below this forces concreteness regardless of cascade
    pub specificity_vague: u8,
    /// Cascade below this steers away from the current workflow
    pub cascade_low: u8,
    /// Workflow depth at which a high-cascade answer triggers validation
    pub validation_depth: usize,
}

impl Default for PolicyThresholds {
    fn default() -> Self {
        Self {
            cascade_high: 8,
            specificity_floor: 5,
            specificity_vague: 4,
            cascade_low: 5,
            validation_depth: 3,
        }
    }
}

impl PolicyThresholds {
    /// Derive the expected next action for a scored answer.
    ///
    /// The depth gate is checked before the cascade probe: a high-cascade
    /// answer at validation depth must finalize, not keep probing.
    /// The fall-through (mid cascade, adequate specificity) keeps
    /// exploring the current workflow.
    pub fn recommend(
        &self,
        cascade: Score,
        specificity: Score,
        workflow_depth: usize,
    ) -> NextAction {
        let cascade = cascade.value();
        let specificity = specificity.value();

        if cascade >= self.cascade_high {
            if specificity < self.specificity_floor {
                return NextAction::ForceSpecificity;
            }
            if workflow_depth >= self.validation_depth {
                return NextAction::ValidateEigenquestion;
            }
            return NextAction::CascadeProbe;
        }

        if cascade < self.cascade_low {
            return if workflow_depth == 0 {
                NextAction::MoveOn
            } else {
                NextAction::NewWorkflow
            };
        }

        if specificity < self.specificity_vague {
            return NextAction::ForceSpecificity;
        }

        NextAction::CascadeProbe
    }

    /// Whether a cascade score marks the answer as high priority
    pub fn is_high_priority(&self, cascade: Score) -> bool {
        cascade.value() >= self.cascade_high
    }
}
