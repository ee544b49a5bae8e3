//! Application configuration
//!
//! [`DiagnosticConfig`] is immutable data passed into the orchestrator at
//! construction. Model names, temperatures, policy thresholds, and flow
//! flags all live here, so per-test and per-tenant overrides are plain
//! value construction rather than global state.

use eigenscope_domain::{Model, PolicyThresholds};
use serde::{Deserialize, Serialize};

/// Sampling parameters for one model role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParams {
    pub model: Model,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ModelParams {
    /// Production analysis profile - analytical consistency, JSON support
    pub fn analysis() -> Self {
        Self {
            model: Model::Gpt4TurboPreview,
            temperature: 0.2,
            max_tokens: 4000,
        }
    }

    /// Development/testing profile - faster, cheaper
    pub fn fast() -> Self {
        Self {
            model: Model::Gpt35Turbo,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }

    /// Aggregation profile - slightly warmer for synthesis prose
    pub fn aggregation() -> Self {
        Self {
            temperature: 0.3,
            ..Self::analysis()
        }
    }
}

/// Role-based model selection for the pipeline stages.
///
/// Each LLM-backed stage can run on its own model/temperature; defaults
/// put every stage on the production analysis profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelRoles {
    /// Scoring pass over each user answer
    pub scoring: ModelParams,
    /// Follow-up question generation
    pub question: ModelParams,
    /// Cross-workflow pattern detection
    pub pattern: ModelParams,
    /// Eigenquestion validation gates
    pub validation: ModelParams,
    /// Per-department aggregation
    pub aggregation: ModelParams,
    /// Organization-wide synthesis
    pub global_report: ModelParams,
}

impl Default for ModelRoles {
    fn default() -> Self {
        Self {
            scoring: ModelParams::analysis(),
            question: ModelParams::analysis(),
            pattern: ModelParams::analysis(),
            validation: ModelParams::analysis(),
            aggregation: ModelParams::aggregation(),
            global_report: ModelParams::aggregation(),
        }
    }
}

impl ModelRoles {
    /// All stages on the fast profile (development / smoke testing)
    pub fn fast() -> Self {
        let fast = ModelParams::fast();
        Self {
            scoring: fast.clone(),
            question: fast.clone(),
            pattern: fast.clone(),
            validation: fast.clone(),
            aggregation: fast.clone(),
            global_report: fast,
        }
    }
}

/// Immutable configuration for the diagnostic orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticConfig {
    pub models: ModelRoles,
    pub policy: PolicyThresholds,
    /// Minimum detector confidence before a pattern notice is surfaced
    pub pattern_confidence_floor: u8,
    /// Run the validation gates before finalizing; a failed gate
    /// downgrades the turn to a specificity probe
    pub strict_validation: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self {
            models: ModelRoles::default(),
            policy: PolicyThresholds::default(),
            pattern_confidence_floor: 70,
            strict_validation: false,
        }
    }
}

impl DiagnosticConfig {
    pub fn with_strict_validation(mut self) -> Self {
        self.strict_validation = true;
        self
    }

    pub fn with_policy(mut self, policy: PolicyThresholds) -> Self {
        self.policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profiles() {
        let config = DiagnosticConfig::default();
        assert_eq!(config.models.scoring.model, Model::Gpt4TurboPreview);
        assert_eq!(config.models.scoring.temperature, 0.2);
        assert_eq!(config.models.aggregation.temperature, 0.3);
        assert_eq!(config.pattern_confidence_floor, 70);
        assert!(!config.strict_validation);
    }

    #[test]
    fn test_fast_roles() {
        let roles = ModelRoles::fast();
        assert_eq!(roles.scoring.model, Model::Gpt35Turbo);
        assert_eq!(roles.scoring.max_tokens, 2000);
    }

    #[test]
    fn test_builder_overrides() {
        let config = DiagnosticConfig::default().with_strict_validation();
        assert!(config.strict_validation);
    }
}
