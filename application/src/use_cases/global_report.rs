//! Generate Global Report use case
//!
//! Operator-triggered, once per organization: read every completed
//! session, synthesize the organization-wide eigenquestion, and append a
//! new analysis row. Prior rows are never touched; the "current" report
//! is simply the most recent.

use crate::clients::ClientError;
use crate::clients::global_aggregator::GlobalAggregator;
use crate::config::DiagnosticConfig;
use crate::ports::analysis_store::AnalysisStore;
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::session_store::{SessionStore, StoreError};
use eigenscope_domain::{DepartmentSummary, GlobalAnalysis};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while generating a global report
#[derive(Error, Debug)]
pub enum GlobalReportError {
    #[error("No completed diagnostics found for organization {0}")]
    NoCompletedSessions(String),

    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Use case for the organization-wide synthesis
pub struct GenerateGlobalReportUseCase<G, S, A>
where
    G: LlmGateway + 'static,
    S: SessionStore + 'static,
    A: AnalysisStore + 'static,
{
    aggregator: GlobalAggregator<G>,
    sessions: Arc<S>,
    analyses: Arc<A>,
}

impl<G, S, A> GenerateGlobalReportUseCase<G, S, A>
where
    G: LlmGateway + 'static,
    S: SessionStore + 'static,
    A: AnalysisStore + 'static,
{
    pub fn new(
        gateway: Arc<G>,
        sessions: Arc<S>,
        analyses: Arc<A>,
        config: &DiagnosticConfig,
    ) -> Self {
        Self {
            aggregator: GlobalAggregator::new(gateway, config.models.global_report.clone()),
            sessions,
            analyses,
        }
    }

    /// Generate and persist a new global analysis row for the organization.
    pub async fn execute(
        &self,
        organization_id: &str,
        organization_name: &str,
    ) -> Result<GlobalAnalysis, GlobalReportError> {
        let completed = self
            .sessions
            .completed_by_organization(organization_id)
            .await?;

        let summaries: Vec<DepartmentSummary> = completed
            .iter()
            .filter_map(DepartmentSummary::from_session)
            .collect();

        if summaries.is_empty() {
            return Err(GlobalReportError::NoCompletedSessions(
                organization_id.to_string(),
            ));
        }

        info!(
            organization_id,
            departments = summaries.len(),
            "generating global report"
        );

        let report = self
            .aggregator
            .generate(&summaries, organization_name)
            .await?;

        let analysis = GlobalAnalysis::new(organization_id, report);
        self.analyses.append(&analysis).await?;
        Ok(analysis)
    }

    /// The current report for an organization, if one was ever generated.
    pub async fn current(
        &self,
        organization_id: &str,
    ) -> Result<Option<GlobalAnalysis>, GlobalReportError> {
        Ok(self
            .analyses
            .latest_for_organization(organization_id)
            .await?)
    }
}
