use model::pagination::{codec::DecodeMode, order::SortOrder};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to parse paginator settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Default key must not be empty")]
    EmptyDefaultKey,

    #[error("Default limit must be greater than zero")]
    ZeroDefaultLimit,

    #[error("Maximum limit must be greater than zero")]
    ZeroMaxLimit,
}

/// Defaults applied to requests that leave keys, limit or order unset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaginatorSettings {
    pub default_key: String,
    pub default_limit: usize,
    pub max_limit: Option<usize>,
    pub default_order: SortOrder,
    pub decode_mode: DecodeMode,
}

impl Default for PaginatorSettings {
    fn default() -> Self {
        PaginatorSettings {
            default_key: "ID".to_string(),
            default_limit: 10,
            max_limit: None,
            default_order: SortOrder::Desc,
            decode_mode: DecodeMode::Lenient,
        }
    }
}

impl PaginatorSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: PaginatorSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.default_key.trim().is_empty() {
            return Err(SettingsError::EmptyDefaultKey);
        }
        if self.default_limit == 0 {
            return Err(SettingsError::ZeroDefaultLimit);
        }
        if self.max_limit == Some(0) {
            return Err(SettingsError::ZeroMaxLimit);
        }
        Ok(())
    }

    /// Resolves a requested limit; zero means "use the default".
    pub fn effective_limit(&self, requested: usize) -> usize {
        let limit = if requested == 0 {
            self.default_limit
        } else {
            requested
        };

        match self.max_limit {
            Some(max) if limit > max => {
                warn!(requested = limit, max, "Page limit above maximum, clamping");
                max
            }
            _ => limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PaginatorSettings, SettingsError};
    use model::pagination::{codec::DecodeMode, order::SortOrder};
    use tracing_test::traced_test;

    #[test]
    fn test_defaults() {
        let settings = PaginatorSettings::default();
        assert_eq!(settings.default_key, "ID");
        assert_eq!(settings.default_limit, 10);
        assert_eq!(settings.default_order, SortOrder::Desc);
        assert_eq!(settings.decode_mode, DecodeMode::Lenient);
        assert_eq!(settings.max_limit, None);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = PaginatorSettings::from_json(
            r#"{"default_limit": 25, "default_order": "ASC", "decode_mode": "strict"}"#,
        )
        .unwrap();
        assert_eq!(settings.default_key, "ID");
        assert_eq!(settings.default_limit, 25);
        assert_eq!(settings.default_order, SortOrder::Asc);
        assert_eq!(settings.decode_mode, DecodeMode::Strict);
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            PaginatorSettings::from_json(r#"{"default_limit": 0}"#),
            Err(SettingsError::ZeroDefaultLimit)
        ));
        assert!(matches!(
            PaginatorSettings::from_json(r#"{"default_key": " "}"#),
            Err(SettingsError::EmptyDefaultKey)
        ));
        assert!(matches!(
            PaginatorSettings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_effective_limit_uses_default() {
        let settings = PaginatorSettings::default();
        assert_eq!(settings.effective_limit(0), 10);
        assert_eq!(settings.effective_limit(3), 3);
    }

    #[traced_test]
    #[test]
    fn test_effective_limit_clamps() {
        let settings = PaginatorSettings {
            max_limit: Some(50),
            ..Default::default()
        };
        assert_eq!(settings.effective_limit(500), 50);
        assert!(logs_contain("Page limit above maximum"));
    }
}
