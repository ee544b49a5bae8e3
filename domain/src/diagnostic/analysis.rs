//! Aggregation outputs: per-department analysis and the organization-wide report.

use crate::core::score::{Confidence, MonetaryValue};
use crate::diagnostic::workflow::Workflow;
use crate::session::entities::DiagnosticSession;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The traced failure cascade for the selected workflow
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CascadeAnalysis {
    pub trigger_workflow: String,
    pub first_order_effects: String,
    pub second_order_effects: String,
    pub third_order_effects: String,
    pub affected_teams: Vec<String>,
    pub executive_escalation: bool,
}

/// Per-department aggregation result: the eigenquestion and its evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentAnalysis {
    pub eigenquestion: String,
    pub reasoning: String,
    #[serde(default)]
    pub cascade_analysis: CascadeAnalysis,
    #[serde(default)]
    pub total_value: MonetaryValue,
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub mental_model_mismatch: String,
    /// Concrete, measurable two-week pilot metrics
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub confidence: Confidence,
}

impl DepartmentAnalysis {
    /// The fixed fallback persisted when the aggregation call fails.
    ///
    /// This is a valid terminal state for a session, not a retry trigger.
    pub fn fallback() -> Self {
        Self {
            eigenquestion: "Manual analysis needed".to_string(),
            reasoning: "API error occurred".to_string(),
            cascade_analysis: CascadeAnalysis::default(),
            total_value: MonetaryValue::ZERO,
            patterns: Vec::new(),
            mental_model_mismatch: String::new(),
            success_metrics: Vec::new(),
            confidence: Confidence::default(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.eigenquestion == "Manual analysis needed"
    }
}

/// Input slice the global aggregation sees for one completed department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummary {
    pub department: String,
    pub eigenquestion: String,
    pub reasoning: String,
    pub workflows: Vec<Workflow>,
    pub total_value: MonetaryValue,
}

impl DepartmentSummary {
    /// Build the summary from a completed session.
    ///
    /// Returns `None` for in-progress sessions: only finalized
    /// eigenquestions participate in the global synthesis.
    pub fn from_session(session: &DiagnosticSession) -> Option<Self> {
        let eigenquestion = session.eigenquestion()?.to_string();
        Some(Self {
            department: session.department().to_string(),
            eigenquestion,
            reasoning: session
                .eigenquestion_reasoning()
                .unwrap_or_default()
                .to_string(),
            workflows: session.workflows().to_vec(),
            total_value: session.total_value(),
        })
    }
}

/// One entry in the automation priority sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityEntry {
    pub department: String,
    pub workflow: String,
    pub value: MonetaryValue,
}

/// Organization-wide synthesis returned by the global aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalReport {
    pub global_eigenquestion: String,
    pub reasoning: String,
    #[serde(default)]
    pub cross_department_patterns: Vec<String>,
    #[serde(default)]
    pub priority_sequence: Vec<PriorityEntry>,
    #[serde(default)]
    pub total_organization_value: MonetaryValue,
}

impl GlobalReport {
    /// Fixed fallback when the global aggregation call fails.
    pub fn fallback() -> Self {
        Self {
            global_eigenquestion: "Manual analysis needed".to_string(),
            reasoning: "API error".to_string(),
            cross_department_patterns: Vec::new(),
            priority_sequence: Vec::new(),
            total_organization_value: MonetaryValue::ZERO,
        }
    }
}

/// A persisted global analysis row (Entity).
///
/// Regeneration appends new rows; prior rows are never mutated. The
/// "current" report for an organization is the most recent by
/// `generated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalAnalysis {
    pub organization_id: String,
    pub report: GlobalReport,
    pub generated_at: DateTime<Utc>,
}

impl GlobalAnalysis {
    pub fn new(organization_id: impl Into<String>, report: GlobalReport) -> Self {
        Self {
            organization_id: organization_id.into(),
            report,
            generated_at: Utc::now(),
        }
    }
}
