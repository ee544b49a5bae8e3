//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// The diagnostic pipeline is model-agnostic; these are the identifiers
/// the default provider profiles refer to. Unknown identifiers are kept
/// as [`Model::Custom`] so a swapped-in provider keeps working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    /// Production analysis model - analytical consistency, JSON support
    Gpt4TurboPreview,
    /// Development/testing model - faster, cheaper
    Gpt35Turbo,
    /// Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4TurboPreview => "gpt-4-turbo-preview",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Custom(s) => s,
        }
    }
}

impl Default for Model {
    /// Returns the default analysis model
    fn default() -> Self {
        Model::Gpt4TurboPreview
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-4-turbo-preview" => Model::Gpt4TurboPreview,
            "gpt-3.5-turbo" => Model::Gpt35Turbo,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
