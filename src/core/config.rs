use serde::{Deserialize, Serialize};

/// What validation does with input keys the schema does not declare.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Report each unknown key as an error
    #[default]
    Reject,
    /// Accept the input, recording each unknown key as a warning
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    pub unknown_fields: UnknownFieldPolicy,
    /// Stop at the first error instead of collecting every issue
    pub fail_fast: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Reject,
            fail_fast: false,
        }
    }
}

impl ValidationConfig {
    /// Reject unknown fields and collect every error
    pub fn strict() -> Self {
        Self::default()
    }

    /// Accept unknown fields, recording a warning for each
    pub fn lenient() -> Self {
        Self {
            unknown_fields: UnknownFieldPolicy::Ignore,
            ..Default::default()
        }
    }

    /// Set the unknown field policy
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }

    /// Stop at the first error when `fail_fast` is set
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Parse a configuration from JSON; absent keys keep their defaults
    pub fn from_json_str(raw: &str) -> crate::Result<Self> {
        serde_json::from_str(raw).map_err(|e| crate::PetSchemaError::Config {
            message: format!("Invalid validation config: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rejects_unknown_fields() {
        let config = ValidationConfig::default();
        assert_eq!(config.unknown_fields, UnknownFieldPolicy::Reject);
        assert!(!config.fail_fast);
        assert_eq!(config, ValidationConfig::strict());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ValidationConfig::from_json_str(r#"{"fail_fast": true}"#).unwrap();
        assert!(config.fail_fast);
        assert_eq!(config.unknown_fields, UnknownFieldPolicy::Reject);

        let config = ValidationConfig::from_json_str(r#"{"unknown_fields": "ignore"}"#).unwrap();
        assert_eq!(config, ValidationConfig::lenient());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = ValidationConfig::from_json_str(r#"{"unknown_fields": "drop"}"#).unwrap_err();
        assert!(matches!(err, crate::PetSchemaError::Config { .. }));
    }
}
