//! Shared test doubles for the application layer.
//!
//! Canned-reply gateway and in-memory stores; no live model is ever
//! called from the test suite.

use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::session_store::{SessionStore, StoreError};
use async_trait::async_trait;
use eigenscope_domain::{DiagnosticSession, SessionId};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Gateway stub that pops canned replies in order and counts calls.
#[derive(Default)]
pub(crate) struct StubGateway {
    replies: Mutex<VecDeque<Result<String, GatewayError>>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(Ok(reply.into()));
    }

    pub fn push_error(&self, error: GatewayError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmGateway for StubGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("no canned reply queued".to_string())))
    }
}

/// Minimal in-memory session store for orchestrator tests.
#[derive(Default)]
pub(crate) struct MemorySessionStore {
    sessions: Mutex<HashMap<SessionId, DiagnosticSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &DiagnosticSession) -> Result<(), StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session.id().clone(), session.clone());
        Ok(())
    }

    async fn get(&self, id: &SessionId) -> Result<DiagnosticSession, StoreError> {
        self.sessions
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::SessionNotFound(id.to_string()))
    }

    async fn update(&self, session: &DiagnosticSession) -> Result<(), StoreError> {
        let mut sessions = self.sessions.lock().unwrap();
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
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.organization_id() == organization_id && s.is_completed())
            .cloned()
            .collect())
    }
}
