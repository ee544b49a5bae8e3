//! Store adapters

pub mod memory;

pub use memory::{InMemoryAnalysisStore, InMemorySessionStore};
