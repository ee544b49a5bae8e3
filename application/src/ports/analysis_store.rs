//! Global analysis store port
//!
//! Global reports are append-only: regeneration adds a new row and the
//! "current" report is defined purely by recency of `generated_at`.

use crate::ports::session_store::StoreError;
use async_trait::async_trait;
use eigenscope_domain::GlobalAnalysis;

/// Repository for organization-wide analysis rows
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    /// Append a new analysis row; never mutates or deletes prior rows
    async fn append(&self, analysis: &GlobalAnalysis) -> Result<(), StoreError>;

    /// Most recent analysis for an organization, if any
    async fn latest_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Option<GlobalAnalysis>, StoreError>;
}
