//! Session store port
//!
//! The hosted database behind the product is an external collaborator;
//! the core only needs row-level create/read/update by session id plus
//! a read-by-organization for aggregation.

use async_trait::async_trait;
use eigenscope_domain::{DiagnosticSession, SessionId};
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Organization not found: {0}")]
    OrganizationNotFound(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Repository for diagnostic sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Persist a freshly created session
    async fn create(&self, session: &DiagnosticSession) -> Result<(), StoreError>;

    /// Read one session by id
    async fn get(&self, id: &SessionId) -> Result<DiagnosticSession, StoreError>;

    /// Update one session row by id
    async fn update(&self, session: &DiagnosticSession) -> Result<(), StoreError>;

    /// All completed sessions for an organization, for the global synthesis
    async fn completed_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<DiagnosticSession>, StoreError>;
}
