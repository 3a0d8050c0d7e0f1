//! Tunable rules for the grid engine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use super::error::ConfigError;

/// Minimum cluster size to pop (match-3).
pub const DEFAULT_POP_THRESHOLD: usize = 3;

/// Rules applied when resolving a shot.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Resource)]
#[serde(default)]
pub struct GridRules {
    /// Smallest same-type cluster that pops.
    pub pop_threshold: usize,
}

impl Default for GridRules {
    fn default() -> Self {
        Self {
            pop_threshold: DEFAULT_POP_THRESHOLD,
        }
    }
}

impl GridRules {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rules: Self = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let rules = Self::from_json_str(&contents)?;
        info!("Loaded grid rules from {:?}", path);
        Ok(rules)
    }

    /// Load rules from `path`, falling back to the defaults when the file is
    /// missing or invalid.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No grid rules file at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::load_from_file(path) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("{}", e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pop_threshold == 0 {
            return Err(ConfigError::Invalid(
                "pop_threshold must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let rules = GridRules::from_json_str("{}").unwrap();
        assert_eq!(rules, GridRules::default());
        assert_eq!(rules.pop_threshold, 3);
    }

    #[test]
    fn test_threshold_override() {
        let rules = GridRules::from_json_str(r#"{ "pop_threshold": 4 }"#).unwrap();
        assert_eq!(rules.pop_threshold, 4);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let err = GridRules::from_json_str(r#"{ "pop_threshold": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = GridRules::from_json_str("{ pop_threshold: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_file_roundtrip_and_fallback() {
        let dir = std::env::temp_dir().join(format!("grid-rules-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let path = dir.join("rules.json");
        fs::write(&path, r#"{ "pop_threshold": 5 }"#).unwrap();
        assert_eq!(GridRules::load_from_file(&path).unwrap().pop_threshold, 5);

        fs::write(&path, "not json").unwrap();
        assert_eq!(GridRules::load_or_default(&path), GridRules::default());

        let missing = dir.join("missing.json");
        assert!(matches!(
            GridRules::load_from_file(&missing),
            Err(ConfigError::Io(_))
        ));
        assert_eq!(GridRules::load_or_default(&missing), GridRules::default());

        fs::remove_dir_all(&dir).unwrap();
    }
}
