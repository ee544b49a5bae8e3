//! Pattern detector: cross-correlates closed workflows for a shared root cause.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{PatternRecord, PromptTemplate, Workflow};
use std::sync::Arc;
use tracing::debug;

/// Wraps the cross-workflow pattern detection LLM call.
pub struct PatternDetector<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
}

impl<G: LlmGateway> PatternDetector<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    /// Detect a shared pattern across the given workflows.
    ///
    /// Fewer than two workflows short-circuits to a no-pattern record
    /// without touching the gateway. Returned workflow indices are
    /// validated against the input length.
    pub async fn detect(
        &self,
        workflows: &[Workflow],
        industry: &str,
    ) -> Result<PatternRecord, ClientError> {
        if workflows.len() < 2 {
            debug!(count = workflows.len(), "skipping pattern detection");
            return Ok(PatternRecord::none());
        }

        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::pattern_system(industry),
            PromptTemplate::pattern_user(workflows, industry),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let reply = self.gateway.complete(request).await?;
        let record: PatternRecord = parse_reply(&reply)?;
        record.validate_indices(workflows.len())?;
        Ok(record)
    }
}
