//! LLM-wrapper clients: one thin, stateless client per pipeline stage.
//!
//! Each client owns its prompt assembly and reply validation; none of
//! them persist anything. Reply parsing is strict: a reply that fails
//! the schema is a contract violation, never silently defaulted.

pub mod global_aggregator;
pub mod pattern_detector;
pub mod question_generator;
pub mod scoring;
pub mod validator;
pub mod workflow_aggregator;

use crate::ports::llm_gateway::GatewayError;
use eigenscope_domain::DomainError;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors common to the LLM-wrapper clients
#[derive(Error, Debug)]
pub enum ClientError {
    /// The model's reply failed the JSON schema contract
    #[error("Contract violation: {0}")]
    Contract(String),

    /// The operation was invoked without its required inputs
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),
}

impl From<DomainError> for ClientError {
    fn from(error: DomainError) -> Self {
        ClientError::Contract(error.to_string())
    }
}

/// Extract the outermost JSON object from a model reply and deserialize
/// it into `T`.
///
/// Providers in JSON mode return a bare object, but models occasionally
/// wrap it in prose or a markdown fence; slicing from the first `{` to
/// the last `}` handles both. Anything else is a contract violation.
pub(crate) fn parse_reply<T: DeserializeOwned>(reply: &str) -> Result<T, ClientError> {
    let start = reply
        .find('{')
        .ok_or_else(|| ClientError::Contract("reply contains no JSON object".to_string()))?;
    let end = reply
        .rfind('}')
        .ok_or_else(|| ClientError::Contract("reply contains no JSON object".to_string()))?;
    if end < start {
        return Err(ClientError::Contract(
            "reply contains no JSON object".to_string(),
        ));
    }

    serde_json::from_str(&reply[start..=end])
        .map_err(|e| ClientError::Contract(format!("malformed JSON reply: {e}")))
}
