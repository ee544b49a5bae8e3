//! Infrastructure layer for eigenscope
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use logging::JsonlTranscriptLogger;
pub use providers::OpenAiGateway;
pub use store::{InMemoryAnalysisStore, InMemorySessionStore};
