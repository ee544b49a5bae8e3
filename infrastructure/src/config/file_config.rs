//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into the application's
//! immutable [`DiagnosticConfig`].

use eigenscope_application::config::{DiagnosticConfig, ModelParams, ModelRoles};
use eigenscope_domain::{Model, PolicyThresholds};
use serde::{Deserialize, Serialize};

/// Per-stage model selection from TOML (`[models]` section)
///
/// # Example
///
/// ```toml
/// [models]
/// scoring = "gpt-4-turbo-preview"
/// question = "gpt-4-turbo-preview"
/// aggregation = "gpt-4-turbo-preview"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    pub scoring: Option<String>,
    pub question: Option<String>,
    pub pattern: Option<String>,
    pub validation: Option<String>,
    pub aggregation: Option<String>,
    pub global_report: Option<String>,
    /// Use the fast development profile for every unset stage
    pub fast: bool,
}

/// Policy threshold overrides from TOML (`[policy]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePolicyConfig {
    pub cascade_high: u8,
    pub specificity_floor: u8,
    pub specificity_vague: u8,
    pub cascade_low: u8,
    pub validation_depth: usize,
}

impl Default for FilePolicyConfig {
    fn default() -> Self {
        let defaults = PolicyThresholds::default();
        Self {
            cascade_high: defaults.cascade_high,
            specificity_floor: defaults.specificity_floor,
            specificity_vague: defaults.specificity_vague,
            cascade_low: defaults.cascade_low,
            validation_depth: defaults.validation_depth,
        }
    }
}

/// Flow settings from TOML (`[flow]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFlowConfig {
    /// Minimum detector confidence before a pattern notice is surfaced
    pub pattern_confidence_floor: u8,
    /// Run validation gates before finalizing a session
    pub strict_validation: bool,
}

impl Default for FileFlowConfig {
    fn default() -> Self {
        Self {
            pattern_confidence_floor: 70,
            strict_validation: false,
        }
    }
}

/// Provider settings from TOML (`[provider]` section)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderConfig {
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Override for OpenAI-compatible proxies
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for FileProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            base_url: None,
            timeout_secs: 45,
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub models: FileModelsConfig,
    pub policy: FilePolicyConfig,
    pub flow: FileFlowConfig,
    pub provider: FileProviderConfig,
}

impl FileConfig {
    /// Collect configuration problems worth telling the operator about.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (field, value) in [
            ("models.scoring", &self.models.scoring),
            ("models.question", &self.models.question),
            ("models.pattern", &self.models.pattern),
            ("models.validation", &self.models.validation),
            ("models.aggregation", &self.models.aggregation),
            ("models.global_report", &self.models.global_report),
        ] {
            if let Some(name) = value
                && name.trim().is_empty()
            {
                issues.push(format!("{field}: model name cannot be empty"));
            }
        }
        if self.flow.pattern_confidence_floor > 100 {
            issues.push(format!(
                "flow.pattern_confidence_floor: {} exceeds 100",
                self.flow.pattern_confidence_floor
            ));
        }
        issues
    }

    /// Convert into the application's immutable configuration.
    pub fn into_diagnostic_config(self) -> DiagnosticConfig {
        let base = if self.models.fast {
            ModelRoles::fast()
        } else {
            ModelRoles::default()
        };

        let override_model = |params: ModelParams, name: &Option<String>| -> ModelParams {
            match name {
                Some(name) if !name.trim().is_empty() => ModelParams {
                    // Model::from_str is infallible; unknown names become Custom(...)
                    model: name.parse::<Model>().unwrap(),
                    ..params
                },
                _ => params,
            }
        };

        let models = ModelRoles {
            scoring: override_model(base.scoring, &self.models.scoring),
            question: override_model(base.question, &self.models.question),
            pattern: override_model(base.pattern, &self.models.pattern),
            validation: override_model(base.validation, &self.models.validation),
            aggregation: override_model(base.aggregation, &self.models.aggregation),
            global_report: override_model(base.global_report, &self.models.global_report),
        };

        DiagnosticConfig {
            models,
            policy: PolicyThresholds {
                cascade_high: self.policy.cascade_high,
                specificity_floor: self.policy.specificity_floor,
                specificity_vague: self.policy.specificity_vague,
                cascade_low: self.policy.cascade_low,
                validation_depth: self.policy.validation_depth,
            },
            pattern_confidence_floor: self.flow.pattern_confidence_floor,
            strict_validation: self.flow.strict_validation,
        }
    }
}
