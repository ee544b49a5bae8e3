//! Diagnostic session orchestrator
//!
//! Drives one conversation: score the answer, resolve the next action,
//! generate the follow-up question, surface cross-workflow patterns, and
//! finalize the session when the policy signals completion.
//!
//! Turns are processed to completion or not at all: every LLM call for a
//! turn happens before any state mutation, so a failed turn leaves the
//! transcript and workflow state untouched apart from a user-visible
//! error turn, and the user can resubmit the same answer.

use crate::clients::ClientError;
use crate::clients::pattern_detector::PatternDetector;
use crate::clients::question_generator::{QuestionContext, QuestionGenerator};
use crate::clients::scoring::{START_SENTINEL, ScoringClient, ScoringInput, ScoringReply};
use crate::clients::validator::EigenquestionValidator;
use crate::clients::workflow_aggregator::WorkflowAggregator;
use crate::config::DiagnosticConfig;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::session_store::{SessionStore, StoreError};
use crate::ports::transcript_logger::{NoTranscriptLogger, TranscriptEvent, TranscriptLogger};
use eigenscope_domain::{
    DiagnosticSession, DomainError, Exchange, MonetaryValue, NextAction, PatternRecord,
    ScoreRecord, SessionState, Workflow,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while driving a diagnostic session
#[derive(Error, Debug)]
pub enum OrchestratorError {
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

/// Score summary surfaced to the UI with each turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub cascade_score: u8,
    pub specificity_score: u8,
    pub next_action: NextAction,
    pub is_high_priority: bool,
}

impl ScoreSummary {
    fn from_record(record: &ScoreRecord, effective_action: NextAction) -> Self {
        Self {
            cascade_score: record.cascade_score.value(),
            specificity_score: record.specificity_score.value(),
            next_action: effective_action,
            is_high_priority: record.is_high_priority(),
        }
    }
}

/// Final result surfaced when a session completes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionSummary {
    pub eigenquestion: String,
    pub reasoning: String,
    pub total_value: MonetaryValue,
}

/// What one processed turn hands back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutput {
    pub question: String,
    pub explanation: String,
    pub score_summary: ScoreSummary,
    /// Informational only; never alters control flow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_notice: Option<PatternRecord>,
    /// Probing questions from a failed strict-validation pass
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub probing_questions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion: Option<CompletionSummary>,
}

/// A freshly started diagnostic conversation
#[derive(Debug)]
pub struct StartedDiagnostic {
    pub session: DiagnosticSession,
    pub state: SessionState,
    pub output: TurnOutput,
}

/// The conversation driver for diagnostic sessions.
pub struct DiagnosticOrchestrator<G: LlmGateway + 'static, S: SessionStore + 'static> {
    scoring: ScoringClient<G>,
    questions: QuestionGenerator<G>,
    patterns: PatternDetector<G>,
    validator: EigenquestionValidator<G>,
    aggregator: WorkflowAggregator<G>,
    store: Arc<S>,
    config: DiagnosticConfig,
    logger: Arc<dyn TranscriptLogger>,
}

impl<G: LlmGateway + 'static, S: SessionStore + 'static> DiagnosticOrchestrator<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>, config: DiagnosticConfig) -> Self {
        let models = &config.models;
        Self {
            scoring: ScoringClient::new(
                Arc::clone(&gateway),
                models.scoring.clone(),
                config.policy,
            ),
            questions: QuestionGenerator::new(Arc::clone(&gateway), models.question.clone()),
            patterns: PatternDetector::new(Arc::clone(&gateway), models.pattern.clone()),
            validator: EigenquestionValidator::new(
                Arc::clone(&gateway),
                models.validation.clone(),
            ),
            aggregator: WorkflowAggregator::new(Arc::clone(&gateway), models.aggregation.clone()),
            store,
            config,
            logger: Arc::new(NoTranscriptLogger),
        }
    }

    /// Attach a transcript logger (JSONL adapter in infrastructure)
    pub fn with_logger(mut self, logger: Arc<dyn TranscriptLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Open a new session and seed the fixed opening question.
    pub async fn start(
        &self,
        organization_id: &str,
        user_id: &str,
        department: &str,
        industry: &str,
    ) -> Result<StartedDiagnostic, OrchestratorError> {
        let mut session = DiagnosticSession::new(organization_id, user_id, department);
        self.store.create(&session).await?;
        info!(session_id = %session.id(), department, "diagnostic session created");

        let mut state = SessionState::new();
        let output = self
            .next_turn(&mut session, &mut state, industry, START_SENTINEL)
            .await?;

        Ok(StartedDiagnostic {
            session,
            state,
            output,
        })
    }

    /// Process one user answer and return the next turn.
    pub async fn next_turn(
        &self,
        session: &mut DiagnosticSession,
        state: &mut SessionState,
        industry: &str,
        answer: &str,
    ) -> Result<TurnOutput, OrchestratorError> {
        if session.is_completed() {
            return Err(OrchestratorError::Precondition(
                "session already completed; start a new diagnostic".to_string(),
            ));
        }

        match self.run_turn(session, state, industry, answer).await {
            Ok(output) => Ok(output),
            Err(error) => {
                // Single user-visible error turn; no partial state was
                // committed, so resubmitting the same answer is safe.
                state.push_error_turn(format!(
                    "Analysis failed: {error}. Please resubmit your answer."
                ));
                self.logger.log(TranscriptEvent::new(
                    "turn_failed",
                    serde_json::json!({
                        "sessionId": session.id().to_string(),
                        "error": error.to_string(),
                    }),
                ));
                Err(error)
            }
        }
    }

    async fn run_turn(
        &self,
        session: &mut DiagnosticSession,
        state: &mut SessionState,
        industry: &str,
        answer: &str,
    ) -> Result<TurnOutput, OrchestratorError> {
        // ---- Phase 1: external calls (no state mutation yet) ----

        let scoring_input = ScoringInput {
            response: answer,
            industry,
            department: session.department(),
            previous: state.current_transcript(),
            workflow_depth: state.depth(),
            workflow_count: state.workflow_count(),
        };

        let record = match self.scoring.score(&scoring_input).await? {
            ScoringReply::Opening {
                question,
                explanation,
                record,
            } => {
                // Deterministic seed turn: no scoring call was made.
                state.push_bot_turn(question);
                self.log_turn(session, &record, record.next_action);
                return Ok(TurnOutput {
                    question: question.to_string(),
                    explanation: explanation.to_string(),
                    score_summary: ScoreSummary::from_record(&record, record.next_action),
                    pattern_notice: None,
                    probing_questions: Vec::new(),
                    completion: None,
                });
            }
            ScoringReply::Scored(record) => record,
        };

        // The model's nextAction is authoritative; strict validation may
        // downgrade it before anything is committed.
        let mut effective_action = record.next_action;
        let mut probing_questions = Vec::new();

        if effective_action == NextAction::ValidateEigenquestion && self.config.strict_validation {
            let candidate = self.candidate_workflow(state, answer, &record);
            let validation = self.validator.validate(&candidate, industry).await?;
            if !validation.is_eigenquestion {
                info!(
                    session_id = %session.id(),
                    confidence = validation.confidence.value(),
                    "validation gates failed; probing deeper instead of finalizing"
                );
                probing_questions = validation.questions.clone();
                effective_action = NextAction::ForceSpecificity;
            }
        }

        let mut effective_record = record.clone();
        effective_record.next_action = effective_action;

        let generated = self
            .questions
            .generate(
                &effective_record,
                &QuestionContext {
                    industry,
                    workflow_depth: state.depth(),
                    workflow_count: state.workflow_count(),
                    user_response: answer,
                },
            )
            .await?;

        let pattern_notice = self
            .detect_pattern(state, industry, effective_action)
            .await;

        // ---- Phase 2: commit the turn ----

        state.record_answer(answer);
        state.push_bot_turn(generated.question.as_str());
        if let Some(pattern) = &pattern_notice {
            state.push_notice(format!(
                "Pattern across your workflows: {} ({})",
                pattern.description, pattern.pattern_type
            ));
        }
        self.log_turn(session, &record, effective_action);

        let completion = match effective_action {
            NextAction::NewWorkflow => {
                let workflow = state.close_workflow(record.cascade_score);
                session.push_workflow(workflow)?;
                self.store.update(session).await?;
                None
            }
            NextAction::ValidateEigenquestion => {
                let workflow = state.close_workflow(record.cascade_score);
                session.push_workflow(workflow)?;
                Some(self.finalize(session, state).await?)
            }
            // CASCADE_PROBE / FORCE_SPECIFICITY / MOVE_ON keep the
            // current workflow open and await the next answer.
            _ => None,
        };

        Ok(TurnOutput {
            question: generated.question,
            explanation: generated.explanation,
            score_summary: ScoreSummary::from_record(&record, effective_action),
            pattern_notice,
            probing_questions,
            completion,
        })
    }

    /// The workflow the user would finalize with this turn's answer included.
    fn candidate_workflow(
        &self,
        state: &SessionState,
        answer: &str,
        record: &ScoreRecord,
    ) -> Workflow {
        let mut transcript = state.current_transcript().to_vec();
        transcript.push(Exchange::new(
            state.last_question().unwrap_or_default(),
            answer,
        ));
        Workflow::close(transcript, record.cascade_score)
    }

    /// Informational side-channel: never alters the policy decision, and
    /// a detector failure never fails the turn.
    async fn detect_pattern(
        &self,
        state: &SessionState,
        industry: &str,
        action: NextAction,
    ) -> Option<PatternRecord> {
        if state.workflow_count() < 2 || action == NextAction::CascadeProbe {
            return None;
        }

        match self.patterns.detect(state.closed_workflows(), industry).await {
            Ok(record) if record.is_significant(self.config.pattern_confidence_floor) => {
                self.logger.log(TranscriptEvent::new(
                    "pattern_notice",
                    serde_json::json!({
                        "patternType": record.pattern_type.as_str(),
                        "confidence": record.confidence.value(),
                    }),
                ));
                Some(record)
            }
            Ok(_) => None,
            Err(error) => {
                warn!(%error, "pattern detection failed; continuing without notice");
                None
            }
        }
    }

    /// Close out the session: aggregate every workflow, persist the
    /// terminal state, and surface the discovery.
    async fn finalize(
        &self,
        session: &mut DiagnosticSession,
        state: &mut SessionState,
    ) -> Result<CompletionSummary, OrchestratorError> {
        let analysis = self
            .aggregator
            .aggregate(session.workflows(), session.department())
            .await?;

        session.complete(&analysis)?;
        self.store.update(session).await?;

        state.push_notice(format!(
            "EIGENQUESTION DISCOVERED:\n\"{}\"\n\nREASONING:\n{}\n\nThank you for completing the diagnostic. Your responses have been recorded.",
            analysis.eigenquestion, analysis.reasoning
        ));

        info!(
            session_id = %session.id(),
            fallback = analysis.is_fallback(),
            "diagnostic session completed"
        );
        self.logger.log(TranscriptEvent::new(
            "session_completed",
            serde_json::json!({
                "sessionId": session.id().to_string(),
                "eigenquestion": analysis.eigenquestion.clone(),
                "totalValue": analysis.total_value.amount(),
            }),
        ));

        Ok(CompletionSummary {
            eigenquestion: analysis.eigenquestion,
            reasoning: analysis.reasoning,
            total_value: analysis.total_value,
        })
    }

    fn log_turn(&self, session: &DiagnosticSession, record: &ScoreRecord, action: NextAction) {
        self.logger.log(TranscriptEvent::new(
            "turn_scored",
            serde_json::json!({
                "sessionId": session.id().to_string(),
                "cascadeScore": record.cascade_score.value(),
                "specificityScore": record.specificity_score.value(),
                "nextAction": action.as_str(),
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::{MemorySessionStore, StubGateway};
    use eigenscope_domain::{PromptTemplate, Score, SessionStatus};

    fn orchestrator(
        gateway: Arc<StubGateway>,
        store: Arc<MemorySessionStore>,
        config: DiagnosticConfig,
    ) -> DiagnosticOrchestrator<StubGateway, MemorySessionStore> {
        DiagnosticOrchestrator::new(gateway, store, config)
    }

    fn score_reply(cascade: u8, specificity: u8, action: &str) -> String {
        format!(
            r#"{{
                "cascadeScore": {cascade}, "specificityScore": {specificity},
                "isRootCause": true, "isCompensatingWork": false,
                "secondOrderEffects": "line stops", "mentalModelMismatch": "",
                "nextAction": "{action}", "reasoning": "test"
            }}"#
        )
    }

    fn question_reply(question: &str) -> String {
        format!(r#"{{"question": "{question}", "explanation": "because cascades"}}"#)
    }

    fn aggregation_reply() -> &'static str {
        r#"{
            "eigenquestion": "Why is supplier status never pushed proactively?",
            "reasoning": "Every workflow compensates for the same silence.",
            "totalValue": 60000,
            "patterns": [], "successMetrics": [], "confidence": 80,
            "mentalModelMismatch": ""
        }"#
    }

    async fn started(
        orchestrator: &DiagnosticOrchestrator<StubGateway, MemorySessionStore>,
    ) -> StartedDiagnostic {
        orchestrator
            .start("org-1", "user-1", "procurement", "automotive")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_start_seeds_fixed_opening_without_llm() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store.clone(), Default::default());

        let started = started(&orchestrator).await;

        assert_eq!(started.output.question, PromptTemplate::opening_question());
        assert_eq!(started.output.score_summary.cascade_score, 0);
        assert_eq!(started.output.score_summary.next_action, NextAction::MoveOn);
        assert_eq!(gateway.call_count(), 0);

        // Session persisted as in-progress at 0%
        let stored = store.get(started.session.id()).await.unwrap();
        assert_eq!(stored.status(), SessionStatus::InProgress);
        assert_eq!(stored.completion_percentage(), 0);
    }

    #[tokio::test]
    async fn test_probe_turn_records_exchange() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        gateway.push_reply(score_reply(9, 6, "CASCADE_PROBE"));
        gateway.push_reply(question_reply("When this fails, what breaks first?"));

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "We call 20 suppliers every morning",
            )
            .await
            .unwrap();

        assert_eq!(output.score_summary.next_action, NextAction::CascadeProbe);
        assert!(output.score_summary.is_high_priority);
        assert!(output.completion.is_none());
        assert_eq!(started.state.depth(), 1);
        assert_eq!(started.state.current_transcript().len(), 1);
        // opening question became the recorded exchange's question
        assert_eq!(
            started.state.current_transcript()[0].question,
            PromptTemplate::opening_question()
        );
    }

    #[tokio::test]
    async fn test_duplicate_question_appends_single_bot_turn() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;

        for _ in 0..2 {
            gateway.push_reply(score_reply(6, 6, "CASCADE_PROBE"));
            gateway.push_reply(question_reply("Exactly the same question?"));
        }

        orchestrator
            .next_turn(&mut started.session, &mut started.state, "automotive", "a1")
            .await
            .unwrap();
        let turns_after_first = started.state.turns().len();

        orchestrator
            .next_turn(&mut started.session, &mut started.state, "automotive", "a2")
            .await
            .unwrap();

        // second turn adds the user turn but suppresses the repeated bot turn
        assert_eq!(started.state.turns().len(), turns_after_first + 1);
    }

    #[tokio::test]
    async fn test_new_workflow_closes_and_resets() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store.clone(), Default::default());

        let mut started = started(&orchestrator).await;
        gateway.push_reply(score_reply(3, 6, "NEW_WORKFLOW"));
        gateway.push_reply(question_reply("What's your second-biggest bottleneck?"));

        orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "Mostly just slow reports",
            )
            .await
            .unwrap();

        assert_eq!(started.state.workflow_count(), 1);
        assert_eq!(started.state.depth(), 0);
        assert_eq!(started.session.workflows().len(), 1);
        assert_eq!(started.session.workflows()[0].cascade_score().value(), 3);

        let stored = store.get(started.session.id()).await.unwrap();
        assert_eq!(stored.workflows().len(), 1);
    }

    /// End-to-end: a deep high-cascade workflow finalizes the session with
    /// the aggregator seeing exactly one workflow transcript.
    #[tokio::test]
    async fn test_validate_completes_session() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store.clone(), Default::default());

        let mut started = started(&orchestrator).await;

        // Three probe rounds to reach depth 3
        for i in 0..3 {
            gateway.push_reply(score_reply(9, 7, "CASCADE_PROBE"));
            gateway.push_reply(question_reply(&format!("Probe {i}?")));
            orchestrator
                .next_turn(
                    &mut started.session,
                    &mut started.state,
                    "automotive",
                    &format!("answer {i}"),
                )
                .await
                .unwrap();
        }
        assert_eq!(started.state.depth(), 3);

        gateway.push_reply(score_reply(9, 7, "VALIDATE_EIGENQUESTION"));
        gateway.push_reply(question_reply("Would your team use only this?"));
        gateway.push_reply(aggregation_reply().to_string());

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "Yes, the line halts without it",
            )
            .await
            .unwrap();

        let completion = output.completion.expect("session should complete");
        assert_eq!(
            completion.eigenquestion,
            "Why is supplier status never pushed proactively?"
        );
        assert_eq!(started.session.status(), SessionStatus::Completed);
        assert_eq!(started.session.completion_percentage(), 100);
        assert_eq!(started.session.workflows().len(), 1);
        assert_eq!(started.session.workflows()[0].depth(), 4);

        let stored = store.get(started.session.id()).await.unwrap();
        assert!(stored.eigenquestion().is_some());
        assert_eq!(stored.completion_percentage(), 100);
    }

    #[tokio::test]
    async fn test_aggregation_failure_completes_with_fallback() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store.clone(), Default::default());

        let mut started = started(&orchestrator).await;
        gateway.push_reply(score_reply(9, 7, "VALIDATE_EIGENQUESTION"));
        gateway.push_reply(question_reply("Final check?"));
        gateway.push_error(GatewayError::Timeout);

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "It all stops",
            )
            .await
            .unwrap();

        let completion = output.completion.unwrap();
        assert_eq!(completion.eigenquestion, "Manual analysis needed");
        assert_eq!(completion.total_value, MonetaryValue::ZERO);
        // fallback is a valid terminal state
        assert_eq!(started.session.status(), SessionStatus::Completed);
        assert_eq!(started.session.completion_percentage(), 100);
    }

    #[tokio::test]
    async fn test_scoring_failure_leaves_state_untouched() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        gateway.push_error(GatewayError::ConnectionError("reset".to_string()));

        let err = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "my answer",
            )
            .await;

        assert!(err.is_err());
        // no exchange recorded, depth unchanged, question still pending
        assert_eq!(started.state.depth(), 0);
        assert_eq!(
            started.state.last_question(),
            Some(PromptTemplate::opening_question())
        );
        // one visible error turn was appended
        let last = started.state.turns().last().unwrap();
        assert!(last.content.contains("Analysis failed"));
        assert!(last.content.contains("resubmit"));
    }

    #[tokio::test]
    async fn test_completed_session_rejects_turns() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        gateway.push_reply(score_reply(9, 7, "VALIDATE_EIGENQUESTION"));
        gateway.push_reply(question_reply("Final?"));
        gateway.push_reply(aggregation_reply().to_string());
        orchestrator
            .next_turn(&mut started.session, &mut started.state, "automotive", "a")
            .await
            .unwrap();

        let calls_before = gateway.call_count();
        let err = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "one more",
            )
            .await;
        assert!(matches!(err, Err(OrchestratorError::Precondition(_))));
        // terminal: no further scoring calls
        assert_eq!(gateway.call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_pattern_notice_surfaced_after_two_workflows() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;

        // Close two shallow workflows
        for i in 0..2 {
            gateway.push_reply(score_reply(3, 6, "NEW_WORKFLOW"));
            gateway.push_reply(question_reply(&format!("Next workflow {i}?")));
            orchestrator
                .next_turn(
                    &mut started.session,
                    &mut started.state,
                    "automotive",
                    &format!("task {i}"),
                )
                .await
                .unwrap();
        }
        assert_eq!(started.state.workflow_count(), 2);

        // Third turn: action is not CASCADE_PROBE, so the detector runs
        gateway.push_reply(score_reply(6, 2, "FORCE_SPECIFICITY"));
        gateway.push_reply(question_reply("Numbers, please?"));
        gateway.push_reply(
            r#"{
                "patternDetected": true, "patternType": "reactive_tracking",
                "confidence": 85, "description": "Both chase supplier status",
                "hypothesis": "h", "affectedWorkflows": [0, 1],
                "recommendation": "r"
            }"#
            .to_string(),
        );

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "we just check a lot",
            )
            .await
            .unwrap();

        let notice = output.pattern_notice.expect("pattern should surface");
        assert_eq!(notice.confidence.value(), 85);
        // a notification turn landed in the transcript
        assert!(
            started
                .state
                .turns()
                .iter()
                .any(|t| t.content.contains("Pattern across your workflows"))
        );
    }

    #[tokio::test]
    async fn test_cascade_probe_skips_pattern_detection() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        for i in 0..2 {
            gateway.push_reply(score_reply(3, 6, "NEW_WORKFLOW"));
            gateway.push_reply(question_reply(&format!("Next {i}?")));
            orchestrator
                .next_turn(
                    &mut started.session,
                    &mut started.state,
                    "automotive",
                    &format!("t{i}"),
                )
                .await
                .unwrap();
        }

        let calls_before = gateway.call_count();
        gateway.push_reply(score_reply(9, 6, "CASCADE_PROBE"));
        gateway.push_reply(question_reply("Deeper?"));

        let output = orchestrator
            .next_turn(&mut started.session, &mut started.state, "automotive", "x")
            .await
            .unwrap();

        assert!(output.pattern_notice.is_none());
        // exactly scoring + question, no detector call
        assert_eq!(gateway.call_count(), calls_before + 2);
    }

    #[tokio::test]
    async fn test_low_confidence_pattern_not_surfaced() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        for i in 0..2 {
            gateway.push_reply(score_reply(3, 6, "NEW_WORKFLOW"));
            gateway.push_reply(question_reply(&format!("Next {i}?")));
            orchestrator
                .next_turn(
                    &mut started.session,
                    &mut started.state,
                    "automotive",
                    &format!("t{i}"),
                )
                .await
                .unwrap();
        }

        gateway.push_reply(score_reply(6, 2, "FORCE_SPECIFICITY"));
        gateway.push_reply(question_reply("Numbers?"));
        gateway.push_reply(
            r#"{
                "patternDetected": true, "patternType": "information_gap",
                "confidence": 55, "description": "weak signal",
                "hypothesis": "h", "affectedWorkflows": [0],
                "recommendation": "r"
            }"#
            .to_string(),
        );

        let output = orchestrator
            .next_turn(&mut started.session, &mut started.state, "automotive", "hm")
            .await
            .unwrap();
        assert!(output.pattern_notice.is_none());
    }

    #[tokio::test]
    async fn test_strict_validation_downgrades_failed_gates() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let config = DiagnosticConfig::default().with_strict_validation();
        let orchestrator = orchestrator(gateway.clone(), store, config);

        let mut started = started(&orchestrator).await;

        gateway.push_reply(score_reply(9, 7, "VALIDATE_EIGENQUESTION"));
        // validator: cascade gate fails, with probing questions
        gateway.push_reply(
            r#"{
                "isEigenquestion": true, "confidence": 60, "reasoning": "thin evidence",
                "scores": {"standaloneValue": 9, "cascadeEffect": 5, "rootCause": 9},
                "failurePoints": {"standaloneValue": true, "cascadeEffect": true, "rootCause": true},
                "questions": ["Whose work stops first?", "How fast does it escalate?"],
                "redFlags": ["No concrete incident cited"]
            }"#
            .to_string(),
        );
        gateway.push_reply(question_reply("Let's get concrete: which incident?"));

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "automotive",
                "it feels critical",
            )
            .await
            .unwrap();

        assert_eq!(
            output.score_summary.next_action,
            NextAction::ForceSpecificity
        );
        assert_eq!(output.probing_questions.len(), 2);
        assert!(output.completion.is_none());
        assert_eq!(started.session.status(), SessionStatus::InProgress);
        // the candidate workflow was NOT closed
        assert_eq!(started.state.workflow_count(), 0);
        assert_eq!(started.state.depth(), 1);
    }

    #[tokio::test]
    async fn test_restart_sentinel_is_idempotent() {
        let gateway = Arc::new(StubGateway::new());
        let store = Arc::new(MemorySessionStore::new());
        let orchestrator = orchestrator(gateway.clone(), store, Default::default());

        let mut started = started(&orchestrator).await;
        let turns = started.state.turns().len();

        let output = orchestrator
            .next_turn(
                &mut started.session,
                &mut started.state,
                "logistics",
                START_SENTINEL,
            )
            .await
            .unwrap();

        assert_eq!(output.question, PromptTemplate::opening_question());
        assert_eq!(gateway.call_count(), 0);
        // duplicate opening suppressed by the de-dup guard
        assert_eq!(started.state.turns().len(), turns);
    }

    /// Closing the aggregation scenario from the policy side: a depth-3
    /// workflow at cascade 9 / specificity 7 recommends validation.
    #[test]
    fn test_policy_agrees_with_validate_scenario() {
        let policy = eigenscope_domain::PolicyThresholds::default();
        let action = policy.recommend(
            Score::new(9).unwrap(),
            Score::new(7).unwrap(),
            3,
        );
        assert_eq!(action, NextAction::ValidateEigenquestion);
    }
}
