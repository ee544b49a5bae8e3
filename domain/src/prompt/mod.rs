//! Prompt templates for the diagnostic flow

pub mod templates;

pub use templates::PromptTemplate;
