//! In-memory store adapters.
//!
//! Reference implementations of the store ports, used by the CLI and the
//! test suite. The production deployment points these ports at the
//! hosted database instead; sessions only ever need row-level
//! update-by-id, so a `RwLock<HashMap>` is a faithful stand-in.

use async_trait::async_trait;
use eigenscope_application::ports::analysis_store::AnalysisStore;
use eigenscope_application::ports::session_store::{SessionStore, StoreError};
use eigenscope_domain::{DiagnosticSession, GlobalAnalysis, SessionId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-memory session store keyed by session id.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, DiagnosticSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session: &DiagnosticSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<DiagnosticSession, StoreError> {
        self.sessions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))
    }

    async fn update(&self, session: &DiagnosticSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session.id()) {
            return Err(StoreError::SessionNotFound(session.id().to_string()));
        }
        sessions.insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn completed_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<DiagnosticSession>, StoreError> {
        let mut completed: Vec<DiagnosticSession> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.organization_id() == organization_id && s.is_completed())
            .cloned()
            .collect();
        completed.sort_by_key(|s| s.created_at());
        Ok(completed)
    }
}

/// Append-only in-memory analysis store.
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    rows: RwLock<Vec<GlobalAnalysis>>,
}

impl InMemoryAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }
}

#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn append(&self, analysis: &GlobalAnalysis) -> Result<(), StoreError> {
        self.rows.write().await.push(analysis.clone());
        Ok(())
    }

    async fn latest_for_organization(
        &self,
        organization_id: &str,
    ) -> Result<Option<GlobalAnalysis>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|a| a.organization_id == organization_id)
            .max_by_key(|a| a.generated_at)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eigenscope_domain::{DepartmentAnalysis, GlobalReport};

    fn session(org: &str) -> DiagnosticSession {
        DiagnosticSession::new(org, "user-1", "operations")
    }

    #[tokio::test]
    async fn test_create_get_roundtrip() {
        let store = InMemorySessionStore::new();
        let session = session("org-1");
        store.create(&session).await.unwrap();

        let fetched = store.get(session.id()).await.unwrap();
        assert_eq!(fetched.id(), session.id());
        assert_eq!(fetched.department(), "operations");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = store.get(&SessionId::from("nope")).await;
        assert!(matches!(err, Err(StoreError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = InMemorySessionStore::new();
        let err = store.update(&session("org-1")).await;
        assert!(matches!(err, Err(StoreError::SessionNotFound(_))));
    }

    #[tokio::test]
    async fn test_completed_by_organization_filters() {
        let store = InMemorySessionStore::new();

        let mut done = session("org-1");
        done.complete(&DepartmentAnalysis::fallback()).unwrap();
        store.create(&done).await.unwrap();

        store.create(&session("org-1")).await.unwrap(); // in progress
        let mut other_org = session("org-2");
        other_org.complete(&DepartmentAnalysis::fallback()).unwrap();
        store.create(&other_org).await.unwrap();

        let completed = store.completed_by_organization("org-1").await.unwrap();
        assert_eq!(completed.len(), 1);
        assert!(completed[0].is_completed());
    }

    #[tokio::test]
    async fn test_analysis_rows_append_only_latest_by_recency() {
        let store = InMemoryAnalysisStore::new();

        let first = GlobalAnalysis::new("org-1", GlobalReport::fallback());
        store.append(&first).await.unwrap();
        let second = GlobalAnalysis::new("org-1", GlobalReport::fallback());
        store.append(&second).await.unwrap();

        assert_eq!(store.row_count().await, 2);
        let latest = store
            .latest_for_organization("org-1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.generated_at, second.generated_at);

        assert!(
            store
                .latest_for_organization("org-9")
                .await
                .unwrap()
                .is_none()
        );
    }
}
