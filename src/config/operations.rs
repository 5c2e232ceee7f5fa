//! Config loading and validation.

use super::model::Config;
use super::types::FacilityConfig;
use crate::error::{KioskError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            KioskError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml maps an empty document to unit, not to an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| KioskError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            KioskError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// - `channel` must be non-empty
    /// - command facility lines must be non-empty and parseable
    pub fn validate(&self) -> Result<()> {
        if self.channel.trim().is_empty() {
            return Err(KioskError::UserError(
                "config validation failed: channel must be non-empty".to_string(),
            ));
        }

        if let FacilityConfig::Command { acquire, release } = &self.facility {
            validate_command("facility.acquire", acquire)?;
            validate_command("facility.release", release)?;
        }

        Ok(())
    }
}

fn validate_command(field: &str, command: &str) -> Result<()> {
    let args = shell_words::split(command).map_err(|e| {
        KioskError::UserError(format!(
            "config validation failed: {} could not be parsed: {}\nFix: check for unmatched quotes or invalid escape sequences.",
            field, e
        ))
    })?;

    if args.is_empty() {
        return Err(KioskError::UserError(format!(
            "config validation failed: {} must be non-empty",
            field
        )));
    }

    Ok(())
}
