//! Next-action decision vocabulary for the adaptive questioning loop.

use crate::core::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The discrete action the scoring pass selects for the next turn (Value Object).
///
/// Wire names are SCREAMING_SNAKE; unknown values are rejected rather than
/// coerced, because the orchestrator branches on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NextAction {
    /// Go deeper on the failure cascade path of the current workflow
    CascadeProbe,
    /// Demand concrete numbers and examples before proceeding
    ForceSpecificity,
    /// Test whether the current workflow is the eigenquestion and finalize
    ValidateEigenquestion,
    /// Shallow dive; steer toward another coordination task
    MoveOn,
    /// Close the current workflow and open a fresh one
    NewWorkflow,
}

impl NextAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            NextAction::CascadeProbe => "CASCADE_PROBE",
            NextAction::ForceSpecificity => "FORCE_SPECIFICITY",
            NextAction::ValidateEigenquestion => "VALIDATE_EIGENQUESTION",
            NextAction::MoveOn => "MOVE_ON",
            NextAction::NewWorkflow => "NEW_WORKFLOW",
        }
    }

    /// Whether this action closes the current workflow this turn
    pub fn closes_workflow(&self) -> bool {
        matches!(
            self,
            NextAction::NewWorkflow | NextAction::ValidateEigenquestion
        )
    }
}

impl std::fmt::Display for NextAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NextAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "CASCADE_PROBE" => NextAction::CascadeProbe,
            "FORCE_SPECIFICITY" => NextAction::ForceSpecificity,
            "VALIDATE_EIGENQUESTION" => NextAction::ValidateEigenquestion,
            "MOVE_ON" => NextAction::MoveOn,
            "NEW_WORKFLOW" => NextAction::NewWorkflow,
            other => return Err(DomainError::UnknownNextAction(other.to_string())),
        })
    }
}

impl Serialize for NextAction {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NextAction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
