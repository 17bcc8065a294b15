//! Engine configuration
//!
//! Configuration is read from a TOML file. It supplies default input values
//! for fields a caller leaves out, and output preferences for reports.
//!
//! ```toml
//! [defaults]
//! total_sleep_hours = 7.5
//! continuity_mode = "waso_minutes"
//! waso_minutes = 20
//!
//! [output]
//! format = "json-pretty"
//! include_diagnostics = false
//! ```

use crate::adapter::InputRecord;
use crate::encoder::EncodeOptions;
use crate::error::ComputeError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "recovery.toml";

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Compact JSON, one report per line
    Json,
    /// Pretty-printed JSON
    #[default]
    JsonPretty,
    /// Human-readable summary
    Text,
}

/// Output preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub include_diagnostics: bool,
    pub include_suggestions: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_diagnostics: true,
            include_suggestions: true,
        }
    }
}

impl OutputConfig {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            include_diagnostics: self.include_diagnostics,
            include_suggestions: self.include_suggestions,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fallback values for omitted input fields
    pub defaults: InputRecord,
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, ComputeError> {
        toml::from_str(contents).map_err(|e| ComputeError::ConfigError(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ComputeError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ComputeError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Resolve configuration for a run
    ///
    /// An explicit path must load. Otherwise `recovery.toml` in `dir` is used if
    /// present and valid; a broken auto-discovered file is logged and skipped.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self, ComputeError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = default_path(dir);
        if !candidate.exists() {
            return Ok(Self::default());
        }

        match Self::load(&candidate) {
            Ok(config) => Ok(config),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring invalid config, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ComputeError> {
        toml::to_string_pretty(self).map_err(|e| ComputeError::EncodingError(e.to_string()))
    }
}

pub fn default_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContinuityMode;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = EngineConfig::from_toml_str(
            r#"
            [defaults]
            total_sleep_hours = 7.5
            continuity_mode = "waso_minutes"
            waso_minutes = 20.0
            earplugs = 1

            [output]
            format = "text"
            include_diagnostics = false
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.total_sleep_hours, Some(7.5));
        assert_eq!(
            config.defaults.continuity_mode,
            Some(ContinuityMode::WasoMinutes)
        );
        assert_eq!(config.defaults.earplugs, Some(1));
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.output.include_diagnostics);
        assert!(config.output.include_suggestions);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = EngineConfig::from_toml_str("[weights]\nqty = 0.5\n").unwrap_err();
        assert!(matches!(err, ComputeError::ConfigError(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = EngineConfig::default();
        config.defaults.screen_hours = Some(0.5);
        config.output.format = OutputFormat::Json;

        let text = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = EngineConfig::load(&temp_dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ComputeError::ConfigError(_)));
    }

    #[test]
    fn test_discover() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        assert_eq!(
            EngineConfig::discover(None, dir).unwrap(),
            EngineConfig::default()
        );

        fs::write(default_path(dir), "[output]\nformat = \"json\"\n").unwrap();
        let found = EngineConfig::discover(None, dir).unwrap();
        assert_eq!(found.output.format, OutputFormat::Json);

        // Broken auto-discovered file falls back to defaults
        fs::write(default_path(dir), "[output\n").unwrap();
        assert_eq!(
            EngineConfig::discover(None, dir).unwrap(),
            EngineConfig::default()
        );

        // A broken explicit file is an error
        let explicit = dir.join("explicit.toml");
        fs::write(&explicit, "not = [valid").unwrap();
        assert!(EngineConfig::discover(Some(&explicit), dir).is_err());
    }
}
