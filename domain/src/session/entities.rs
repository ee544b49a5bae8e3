//! Diagnostic session entities

use crate::core::error::DomainError;
use crate::core::score::MonetaryValue;
use crate::diagnostic::analysis::DepartmentAnalysis;
use crate::diagnostic::workflow::Workflow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session identifier (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who produced a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Bot,
    User,
}

/// A turn in the diagnostic conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub content: String,
}

impl Turn {
    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Bot,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            content: content.into(),
        }
    }
}

/// One diagnostic attempt by a department head (Aggregate Root).
///
/// Fields are private so the completion invariant (completed status,
/// 100% progress, and a present eigenquestion always travel together)
/// holds by construction:
/// the only way to complete a session is [`DiagnosticSession::complete`],
/// and a completed session is never reopened; a redo is a new session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticSession {
    id: SessionId,
    organization_id: String,
    user_id: String,
    department: String,
    status: SessionStatus,
    completion_percentage: u8,
    workflows: Vec<Workflow>,
    eigenquestion: Option<String>,
    eigenquestion_reasoning: Option<String>,
    total_value: MonetaryValue,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DiagnosticSession {
    /// Open a fresh in-progress session at 0%.
    pub fn new(
        organization_id: impl Into<String>,
        user_id: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: SessionId::generate(),
            organization_id: organization_id.into(),
            user_id: user_id.into(),
            department: department.into(),
            status: SessionStatus::InProgress,
            completion_percentage: 0,
            workflows: Vec::new(),
            eigenquestion: None,
            eigenquestion_reasoning: None,
            total_value: MonetaryValue::ZERO,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn organization_id(&self) -> &str {
        &self.organization_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn completion_percentage(&self) -> u8 {
        self.completion_percentage
    }

    pub fn workflows(&self) -> &[Workflow] {
        &self.workflows
    }

    pub fn eigenquestion(&self) -> Option<&str> {
        self.eigenquestion.as_deref()
    }

    pub fn eigenquestion_reasoning(&self) -> Option<&str> {
        self.eigenquestion_reasoning.as_deref()
    }

    pub fn total_value(&self) -> MonetaryValue {
        self.total_value
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Append a closed workflow. Rejected once the session is completed.
    pub fn push_workflow(&mut self, workflow: Workflow) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::AlreadyCompleted);
        }
        self.workflows.push(workflow);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// The single completion transition: persists the aggregation result
    /// and flips status, percentage, and eigenquestion atomically.
    ///
    /// A fallback analysis is a valid terminal state here.
    pub fn complete(&mut self, analysis: &DepartmentAnalysis) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::AlreadyCompleted);
        }
        self.eigenquestion = Some(analysis.eigenquestion.clone());
        self.eigenquestion_reasoning = Some(analysis.reasoning.clone());
        self.total_value = analysis.total_value;
        self.status = SessionStatus::Completed;
        self.completion_percentage = 100;
        self.updated_at = Utc::now();
        Ok(())
    }
}
