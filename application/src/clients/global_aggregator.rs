//! Global aggregator: synthesizes all departments' eigenquestions into
//! one organization-wide report.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{DepartmentSummary, GlobalReport, PromptTemplate};
use std::sync::Arc;
use tracing::warn;

/// Wraps the organization-wide synthesis LLM call.
pub struct GlobalAggregator<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
}

impl<G: LlmGateway> GlobalAggregator<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    /// Generate the global report over every completed department.
    ///
    /// Zero completed sessions is a caller-side error surfaced before
    /// any call. Gateway/parse failures degrade to the fixed fallback.
    pub async fn generate(
        &self,
        analyses: &[DepartmentSummary],
        organization: &str,
    ) -> Result<GlobalReport, ClientError> {
        if analyses.is_empty() {
            return Err(ClientError::Precondition(
                "no completed diagnostics to synthesize".to_string(),
            ));
        }

        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::global_system(),
            PromptTemplate::global_user(analyses, organization),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let report = match self.gateway.complete(request).await {
            Ok(reply) => match parse_reply::<GlobalReport>(&reply) {
                Ok(report) => report,
                Err(e) => {
                    warn!(organization, error = %e, "global reply unusable, using fallback");
                    GlobalReport::fallback()
                }
            },
            Err(e) => {
                warn!(organization, error = %e, "global call failed, using fallback");
                GlobalReport::fallback()
            }
        };

        Ok(report)
    }
}
