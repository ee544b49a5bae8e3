//! Domain layer for eigenscope
//!
//! This crate contains the core diagnostic entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Eigenquestion
//!
//! The single root-cause coordination question whose resolution would
//! eliminate the most downstream operational failures, as opposed to a
//! symptom-level inefficiency.
//!
//! ## Cascade / Specificity
//!
//! Every free-text answer is scored along two axes: how much the task's
//! failure blocks other teams (cascade), and how concrete the answer is
//! (specificity). A fixed policy table maps scores to the next discrete
//! questioning action.

pub mod core;
pub mod diagnostic;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use core::{
    error::DomainError,
    model::Model,
    score::{Confidence, MonetaryValue, Score},
};
pub use diagnostic::{
    action::NextAction,
    analysis::{
        CascadeAnalysis, DepartmentAnalysis, DepartmentSummary, GlobalAnalysis, GlobalReport,
        PriorityEntry,
    },
    pattern::{PatternRecord, PatternType},
    policy::PolicyThresholds,
    scoring::ScoreRecord,
    validation::{GatePass, GateScores, ValidationRecord},
    workflow::{Exchange, Workflow},
};
pub use prompt::PromptTemplate;
pub use session::{
    entities::{DiagnosticSession, SessionId, SessionStatus, Speaker, Turn},
    state::SessionState,
};
