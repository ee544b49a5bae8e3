//! Application layer for eigenscope
//!
//! This crate contains use cases, port definitions, and application
//! configuration. It depends only on the domain layer; adapters for the
//! ports live in the infrastructure layer.

pub mod clients;
pub mod config;
pub mod ports;
pub mod use_cases;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use clients::{
    ClientError,
    global_aggregator::GlobalAggregator,
    pattern_detector::PatternDetector,
    question_generator::{GeneratedQuestion, QuestionContext, QuestionGenerator},
    scoring::{START_SENTINEL, ScoringClient, ScoringInput, ScoringReply},
    validator::EigenquestionValidator,
    workflow_aggregator::WorkflowAggregator,
};
pub use config::{DiagnosticConfig, ModelParams, ModelRoles};
pub use ports::{
    analysis_store::AnalysisStore,
    llm_gateway::{CompletionRequest, GatewayError, LlmGateway},
    session_store::{SessionStore, StoreError},
    transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger},
};
pub use use_cases::global_report::{GenerateGlobalReportUseCase, GlobalReportError};
pub use use_cases::orchestrator::{
    CompletionSummary, DiagnosticOrchestrator, OrchestratorError, ScoreSummary, StartedDiagnostic,
    TurnOutput,
};
