//! Cross-workflow pattern detection records.

use crate::core::error::DomainError;
use crate::core::score::Confidence;
use serde::{Deserialize, Serialize};

/// The four shared-root-cause pattern shapes (plus the null case)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Same root cause breaks multiple workflows
    UpstreamFailure,
    /// Multiple teams hunting the same data from the same source
    InformationGap,
    /// The same coordination point fails repeatedly
    HandoffFailure,
    /// Workflows compensating for lack of proactive updates
    ReactiveTracking,
    None,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::UpstreamFailure => "upstream_failure",
            PatternType::InformationGap => "information_gap",
            PatternType::HandoffFailure => "handoff_failure",
            PatternType::ReactiveTracking => "reactive_tracking",
            PatternType::None => "none",
        }
    }
}

impl std::fmt::Display for PatternType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of a cross-workflow pattern analysis (ephemeral).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternRecord {
    pub pattern_detected: bool,
    #[serde(default = "PatternRecord::default_type")]
    pub pattern_type: PatternType,
    #[serde(default)]
    pub confidence: Confidence,
    #[serde(default)]
    pub description: String,
    /// The model's theory about the real eigenquestion
    #[serde(default)]
    pub hypothesis: String,
    /// 0-based indices into the analyzed workflow sequence
    #[serde(default)]
    pub affected_workflows: Vec<usize>,
    /// What triggers all these workflows, when shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_trigger: Option<String>,
    #[serde(default)]
    pub recommendation: String,
}

impl PatternRecord {
    fn default_type() -> PatternType {
        PatternType::None
    }

    /// The fixed no-pattern record for fewer than two workflows.
    pub fn none() -> Self {
        Self {
            pattern_detected: false,
            pattern_type: PatternType::None,
            confidence: Confidence::default(),
            description: String::new(),
            hypothesis: String::new(),
            affected_workflows: Vec::new(),
            common_trigger: None,
            recommendation: String::new(),
        }
    }

    /// Validate that every affected-workflow index is within `[0, workflow_count)`.
    pub fn validate_indices(&self, workflow_count: usize) -> Result<(), DomainError> {
        if let Some(bad) = self
            .affected_workflows
            .iter()
            .find(|&&i| i >= workflow_count)
        {
            return Err(DomainError::ContractViolation(format!(
                "affectedWorkflows index {bad} out of range for {workflow_count} workflows"
            )));
        }
        Ok(())
    }

    /// Whether this pattern should be surfaced to the user
    pub fn is_significant(&self, confidence_floor: u8) -> bool {
        self.pattern_detected && self.confidence.value() >= confidence_floor
    }
}
