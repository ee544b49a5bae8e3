//! Workflow aggregator: folds all of a department's workflows into one
//! eigenquestion with reasoning, cascade trace, and value estimate.

use crate::clients::{ClientError, parse_reply};
use crate::config::ModelParams;
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use eigenscope_domain::{DepartmentAnalysis, PromptTemplate, Workflow};
use std::sync::Arc;
use tracing::warn;

/// Wraps the per-department aggregation LLM call.
pub struct WorkflowAggregator<G: LlmGateway> {
    gateway: Arc<G>,
    params: ModelParams,
}

impl<G: LlmGateway> WorkflowAggregator<G> {
    pub fn new(gateway: Arc<G>, params: ModelParams) -> Self {
        Self { gateway, params }
    }

    /// Aggregate all workflows for a department.
    ///
    /// Any gateway or parse error degrades to the fixed fallback
    /// analysis, a valid terminal state the session is completed with,
    /// not a retry trigger. An empty workflow list is a caller bug and
    /// surfaces as a precondition error before any call is made.
    pub async fn aggregate(
        &self,
        workflows: &[Workflow],
        department: &str,
    ) -> Result<DepartmentAnalysis, ClientError> {
        if workflows.is_empty() {
            return Err(ClientError::Precondition(
                "cannot aggregate an empty workflow list".to_string(),
            ));
        }

        let request = CompletionRequest::new(
            self.params.model.clone(),
            PromptTemplate::aggregation_system(),
            PromptTemplate::aggregation_user(workflows, department),
        )
        .with_temperature(self.params.temperature)
        .with_max_tokens(self.params.max_tokens);

        let analysis = match self.gateway.complete(request).await {
            Ok(reply) => match parse_reply::<DepartmentAnalysis>(&reply) {
                Ok(analysis) => analysis,
                Err(e) => {
                    warn!(department, error = %e, "aggregation reply unusable, using fallback");
                    DepartmentAnalysis::fallback()
                }
            },
            Err(e) => {
                warn!(department, error = %e, "aggregation call failed, using fallback");
                DepartmentAnalysis::fallback()
            }
        };

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use crate::testing::StubGateway;
    use eigenscope_domain::{Exchange, Score};

    fn workflows() -> Vec<Workflow> {
        vec![Workflow::close(
            vec![Exchange::new("What breaks?", "Everything downstream")],
            Score::new(9).unwrap(),
        )]
    }

    #[tokio::test]
    async fn test_aggregates_department_analysis() {
        let gateway = Arc::new(StubGateway::new());
        gateway.push_reply(
            r#"{
                "eigenquestion": "Why is supplier status never pushed proactively?",
                "reasoning": "All workflows compensate for the same silence.",
                "cascadeAnalysis": {
                    "triggerWorkflow": "Morning supplier calls",
                    "firstOrderEffects": "Planning slips",
                    "secondOrderEffects": "Line changeover delayed",
                    "thirdOrderEffects": "Plant manager escalation",
                    "affectedTeams": ["assembly", "logistics"],
                    "executiveEscalation": true
                },
                "totalValue": 82000,
                "patterns": ["Reactive supplier tracking"],
                "mentalModelMismatch": "Thinks it is staffing",
                "successMetrics": ["Morning calls drop below 5"],
                "confidence": 82
            }"#,
        );
        let aggregator = WorkflowAggregator::new(gateway, ModelParams::aggregation());

        let analysis = aggregator
            .aggregate(&workflows(), "procurement")
            .await
            .unwrap();
        assert!(!analysis.is_fallback());
        assert_eq!(analysis.total_value.amount(), 82000.0);
        assert!(analysis.cascade_analysis.executive_escalation);
    }

    #[tokio::test]
    async fn test_gateway_error_degrades_to_fallback() {
        let gateway = Arc::new(StubGateway::new());
        gateway.push_error(GatewayError::Timeout);
        let aggregator = WorkflowAggregator::new(gateway, ModelParams::aggregation());

        let analysis = aggregator
            .aggregate(&workflows(), "procurement")
            .await
            .unwrap();
        assert_eq!(analysis, DepartmentAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_malformed_reply_degrades_to_fallback() {
        let gateway = Arc::new(StubGateway::new());
        gateway.push_reply("The eigenquestion is obviously the supplier thing.");
        let aggregator = WorkflowAggregator::new(gateway, ModelParams::aggregation());

        let analysis = aggregator
            .aggregate(&workflows(), "procurement")
            .await
            .unwrap();
        assert_eq!(analysis, DepartmentAnalysis::fallback());
    }

    #[tokio::test]
    async fn test_empty_workflows_is_precondition_error() {
        let gateway = Arc::new(StubGateway::new());
        let aggregator = WorkflowAggregator::new(gateway.clone(), ModelParams::aggregation());

        let err = aggregator.aggregate(&[], "procurement").await;
        assert!(matches!(err, Err(ClientError::Precondition(_))));
        assert_eq!(gateway.call_count(), 0);
    }
}
