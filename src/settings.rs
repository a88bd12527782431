//! Serializable comparator settings
//!
//! Settings carry the name-addressable part of a comparator configuration so
//! a fixture can keep it next to its test data. Ignored fields are not part of
//! settings: they are validated against the declaring type at registration.

use crate::classifier::Mode;
use crate::decimal::DecimalPolicy;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffSettings {
    /// Policy the settings were exported from, informational
    pub mode: Option<Mode>,
    pub decimal: DecimalPolicy,
    /// Fully-qualified names of descend-into types
    pub descend_into: Vec<String>,
    /// Fully-qualified names of value types, strict mode only
    pub value_types: Vec<String>,
}

impl DiffSettings {
    pub fn new() -> Self {
        Self {
            mode: None,
            decimal: DecimalPolicy::default(),
            descend_into: Vec::new(),
            value_types: Vec::new(),
        }
    }

    /// Parse settings from JSON, validating the decimal scale
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: DiffSettings =
            serde_json::from_str(json).map_err(|e| ConfigError::MalformedSettings {
                reason: format!("JSON deserialization failed: {}", e),
            })?;
        DecimalPolicy::check_scale(settings.decimal.max_scale)?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::MalformedSettings {
            reason: format!("JSON serialization failed: {}", e),
        })
    }
}

impl Default for DiffSettings {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = DiffSettings::from_json(r#"{ "descend_into": ["app::Order"] }"#).unwrap();

        assert_eq!(settings.descend_into, vec!["app::Order".to_string()]);
        assert!(settings.decimal.ignore_trailing_zeros);
        assert_eq!(settings.decimal.max_scale, None);
        assert!(settings.value_types.is_empty());
    }

    #[test]
    fn test_decimal_section() {
        let settings = DiffSettings::from_json(
            r#"{ "decimal": { "ignore_trailing_zeros": false, "max_scale": 2 } }"#,
        )
        .unwrap();

        assert!(!settings.decimal.ignore_trailing_zeros);
        assert_eq!(settings.decimal.max_scale, Some(2));
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            DiffSettings::from_json("{ not json"),
            Err(ConfigError::MalformedSettings { .. })
        ));
        assert!(matches!(
            DiffSettings::from_json(r#"{ "decimal": { "max_scale": 40 } }"#),
            Err(ConfigError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_round_trip() {
        let mut settings = DiffSettings::new();
        settings.mode = Some(Mode::Strict);
        settings.value_types.push("alloc::string::String".to_string());

        let parsed = DiffSettings::from_json(&settings.to_json().unwrap()).unwrap();
        assert_eq!(parsed, settings);
    }
}
