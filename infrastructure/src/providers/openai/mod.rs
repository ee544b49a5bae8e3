//! OpenAI-compatible provider adapter

mod gateway;
mod types;

pub use gateway::OpenAiGateway;
