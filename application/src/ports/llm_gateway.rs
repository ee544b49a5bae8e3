//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers. The
//! diagnostic pipeline drives the model through this single operation:
//! one synchronous request/response completion, no streaming.

use async_trait::async_trait;
use eigenscope_domain::Model;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// One completion request: system prompt, user prompt, sampling params.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
    pub system: String,
    pub user: String,
    /// Ask the provider for a guaranteed-JSON reply body
    pub json_response: bool,
}

impl CompletionRequest {
    pub fn new(model: Model, system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            model,
            temperature: 0.2,
            max_tokens: 4000,
            system: system.into(),
            user: user.into(),
            json_response: true,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer reaches the model.
/// Implementations (adapters) live in the infrastructure layer; tests
/// use a stub with canned replies, never a live model.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one completion request and return the raw reply text
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;
}
