//! Config loading and validation.

use super::model::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{DslExecError, Result};
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(DslExecError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DslExecError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load the config for a run.
    ///
    /// An explicit path must exist. Without one, `dsl-exec.yaml` in `base_dir`
    /// is used if present, otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>, base_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(base_dir.join(path));
        }

        let default_path = base_dir.join(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            Self::load(default_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| DslExecError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// - `timeout_seconds`, when set, must be positive
    pub fn validate(&self) -> Result<()> {
        if self.timeout_seconds == Some(0) {
            return Err(DslExecError::UserError(
                "config validation failed: timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
