//! Eigenquestion validator: re-scores one candidate workflow against the
//! three acceptance gates before it may finalize a session.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{PromptTemplate, ValidationRecord, Workflow};
use std::sync::Arc;
use tracing::debug;

/// Wraps the validation LLM call.
pub struct EigenquestionValidator<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
}

impl<G: LlmGateway> EigenquestionValidator<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    /// Validate one candidate workflow.
    ///
    /// The returned record is normalized: pass flags and the verdict are
    /// recomputed from the gate scores, and a failed validation must
    /// carry probing questions.
    pub async fn validate(
        &self,
        workflow: &Workflow,
        industry: &str,
    ) -> Result<ValidationRecord, ClientError> {
        if workflow.is_empty() {
            return Err(ClientError::Precondition(
                "cannot validate an empty workflow transcript".to_string(),
            ));
        }

        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::validation_system(),
            PromptTemplate::validation_user(workflow, industry),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let reply = self.gateway.complete(request).await?;
        let record: ValidationRecord = parse_reply(&reply)?;
        let record = record.normalized();

        if !record.is_eigenquestion && record.questions.is_empty() {
            return Err(ClientError::Contract(
                "failed validation must include probing questions".to_string(),
            ));
        }

        debug!(
            verdict = record.is_eigenquestion,
            confidence = record.confidence.value(),
            "validated candidate workflow"
        );
        Ok(record)
    }
}
