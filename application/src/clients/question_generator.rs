//! Question generator: turns a score record into the next question.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{PromptTemplate, ScoreRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The generated follow-up question and its user-facing rationale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    pub question: String,
    pub explanation: String,
}

/// Context for one generation call
#[derive(Debug, Clone)]
pub struct QuestionContext<'a> {
    pub industry: &'a str,
    pub workflow_depth: usize,
    pub workflow_count: usize,
    pub user_response: &'a str,
}

/// Wraps the question-generation LLM call.
///
/// The output is inherently non-deterministic prose; callers must not
/// assume exact text reproducibility across runs.
pub struct QuestionGenerator<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
}

impl<G: LlmGateway> QuestionGenerator<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    pub async fn generate(
        &self,
        record: &ScoreRecord,
        context: &QuestionContext<'_>,
    ) -> Result<GeneratedQuestion, ClientError> {
        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::question_system(context.industry),
            PromptTemplate::question_user(
                record,
                context.industry,
                context.workflow_depth,
                context.workflow_count,
                context.user_response,
            ),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let reply = self.gateway.complete(request).await?;
        let generated: GeneratedQuestion = parse_reply(&reply)?;

        if generated.question.trim().is_empty() {
            return Err(ClientError::Contract(
                "generated question is empty".to_string(),
            ));
        }
        Ok(generated)
    }
}
