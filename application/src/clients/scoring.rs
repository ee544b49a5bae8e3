//! Scoring client: one free-text answer in, one structured record out.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{Exchange, PolicyThresholds, PromptTemplate, ScoreRecord};
use std::sync::Arc;
use tracing::debug;

/// Sentinel answer that seeds the conversation without a scoring call
pub const START_SENTINEL: &str = "START";

/// Context for one scoring call
#[derive(Debug, Clone)]
pub struct ScoringInput<'a> {
    pub response: &'a str,
    pub industry: &'a str,
    pub department: &'a str,
    /// Transcript of the current workflow so far
    pub previous: &'a [Exchange],
    pub workflow_depth: usize,
    /// Number of already-closed workflows
    pub workflow_count: usize,
}

/// Outcome of one scoring pass
#[derive(Debug, Clone, PartialEq)]
pub enum ScoringReply {
    /// The `"START"` path: fixed opening question, zeroed record, no LLM call
    Opening {
        question: &'static str,
        explanation: &'static str,
        record: ScoreRecord,
    },
    /// A scored answer
    Scored(ScoreRecord),
}

/// Wraps the scoring LLM call. Stateless given its inputs.
pub struct ScoringClient<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
    policy: PolicyThresholds,
}

impl<G: LlmGateway> ScoringClient<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams, policy: PolicyThresholds) -> Self {
        Self {
            gateway,
            params,
            policy,
        }
    }

    /// Score one answer. `"START"` bypasses the gateway entirely so the
    /// very first turn is deterministic and free of model latency.
    pub async fn score(&self, input: &ScoringInput<'_>) -> Result<ScoringReply, ClientError> {
        if input.response == START_SENTINEL {
            return Ok(ScoringReply::Opening {
                question: PromptTemplate::opening_question(),
                explanation: PromptTemplate::opening_explanation(),
                record: ScoreRecord::opening(),
            });
        }

        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::scoring_system(),
            PromptTemplate::scoring_user(
                input.response,
                input.industry,
                input.department,
                input.previous,
                input.workflow_depth,
                input.workflow_count,
                &self.policy,
            ),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let reply = self.gateway.complete(request).await?;
        let record: ScoreRecord = parse_reply(&reply)?;
        debug!(
            cascade = record.cascade_score.value(),
            specificity = record.specificity_score.value(),
            action = %record.next_action,
            "scored answer"
        );
        Ok(ScoringReply::Scored(record))
    }
}
