// src/config/loader.rs
//! Layered configuration loader
//!
//! Defaults are overlaid by each existing config file in discovery order, then
//! by `GAIT_` environment variables, and the merged result is validated
//! before it is deserialized.

use crate::config::{constants::paths, schema_validator::SchemaValidator, AnalysisConfig};
use crate::error::{ErrorContext, GaitError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Configuration loader
pub struct ConfigLoader {
    config_paths: Vec<PathBuf>,
    schema_validator: SchemaValidator,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
    #[error("Configuration parse error: {0}")]
    ParseError(String),
    #[error("Configuration validation errors: {}", join_errors(.0))]
    ValidationError(Vec<crate::config::schema_validator::ValidationError>),
    #[error("IO error: {0}")]
    IoError(String),
}

fn join_errors(errors: &[crate::config::schema_validator::ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("\n  {}", e))
        .collect::<String>()
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

impl From<ConfigError> for GaitError {
    fn from(err: ConfigError) -> Self {
        GaitError::Configuration {
            component: "config_loader".to_string(),
            reason: err.to_string(),
            context: ErrorContext::new("config", "load"),
        }
    }
}

impl ConfigLoader {
    /// Create new configuration loader using the standard search paths
    pub fn new() -> Self {
        Self {
            config_paths: Self::discover_config_paths(),
            schema_validator: SchemaValidator::new(),
        }
    }

    /// Create loader with custom paths
    pub fn with_paths(paths: Vec<PathBuf>) -> Self {
        Self {
            config_paths: paths,
            schema_validator: SchemaValidator::new(),
        }
    }

    /// Load the analysis configuration with validation
    pub fn load(&self) -> Result<AnalysisConfig, ConfigError> {
        let config = self.load_and_merge_configs()?;
        info!(
            gps_sample_count = config.segmentation.gps_sample_count,
            label_set = ?config.emg.label_set,
            "Loaded analysis configuration"
        );
        Ok(config)
    }

    /// Validate a configuration file without loading it
    pub fn validate_config_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let toml_value: toml::Value = toml::from_str(&content)?;

        self.schema_validator
            .validate_config(&toml_value)
            .map_err(ConfigError::ValidationError)?;

        self.schema_validator
            .validate_dependencies(&toml_value)
            .map_err(ConfigError::ValidationError)?;

        Ok(())
    }

    /// Export a configuration to file
    pub fn export_config<P: AsRef<Path>>(&self, config: &AnalysisConfig, path: P) -> Result<(), ConfigError> {
        let toml_content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Paths searched, lowest precedence first
    pub fn config_paths(&self) -> &[PathBuf] {
        &self.config_paths
    }

    fn load_and_merge_configs(&self) -> Result<AnalysisConfig, ConfigError> {
        let mut merged_config = toml::Value::Table(toml::value::Table::new());

        let default_config = toml::Value::try_from(AnalysisConfig::default())
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;
        self.merge_toml_values(&mut merged_config, default_config);

        for config_path in &self.config_paths {
            if config_path.exists() {
                match self.load_config_file(config_path) {
                    Ok(file_config) => {
                        debug!(path = %config_path.display(), "Merging configuration file");
                        self.merge_toml_values(&mut merged_config, file_config);
                    }
                    Err(ConfigError::FileNotFound(_)) => continue,
                    Err(e) => return Err(e),
                }
            }
        }

        self.apply_environment_overrides(&mut merged_config);

        self.schema_validator
            .validate_config(&merged_config)
            .map_err(ConfigError::ValidationError)?;

        self.schema_validator
            .validate_dependencies(&merged_config)
            .map_err(ConfigError::ValidationError)?;

        let config: AnalysisConfig = merged_config.try_into().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize config: {:?}", e))
        })?;

        Ok(config)
    }

    fn load_config_file<P: AsRef<Path>>(&self, path: P) -> Result<toml::Value, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config: toml::Value = toml::from_str(&content)?;

        Ok(config)
    }

    fn merge_toml_values(&self, base: &mut toml::Value, overlay: toml::Value) {
        match (base, overlay) {
            (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
                for (key, value) in overlay_table {
                    if let Some(base_value) = base_table.get_mut(&key) {
                        self.merge_toml_values(base_value, value);
                    } else {
                        base_table.insert(key, value);
                    }
                }
            }
            (base_value, overlay_value) => {
                *base_value = overlay_value;
            }
        }
    }

    fn apply_environment_overrides(&self, config: &mut toml::Value) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = Self::env_key_to_path(&key) {
                debug!(variable = %key, path = %config_key, "Applying environment override");
                let parsed_value = self.parse_env_value(&value);
                self.set_nested_value(config, &config_key, parsed_value);
            }
        }
    }

    /// `GAIT_SEGMENTATION__GPS_SAMPLE_COUNT` -> `segmentation.gps_sample_count`
    fn env_key_to_path(key: &str) -> Option<String> {
        let rest = key.strip_prefix(paths::ENV_PREFIX)?;
        if !rest.contains(paths::ENV_SECTION_SEPARATOR) {
            return None;
        }
        Some(
            rest.split(paths::ENV_SECTION_SEPARATOR)
                .map(|part| part.to_lowercase())
                .collect::<Vec<_>>()
                .join("."),
        )
    }

    fn parse_env_value(&self, value: &str) -> toml::Value {
        if let Ok(int_val) = value.parse::<i64>() {
            toml::Value::Integer(int_val)
        } else if let Ok(float_val) = value.parse::<f64>() {
            toml::Value::Float(float_val)
        } else if let Ok(bool_val) = value.parse::<bool>() {
            toml::Value::Boolean(bool_val)
        } else {
            toml::Value::String(value.to_string())
        }
    }

    fn set_nested_value(&self, config: &mut toml::Value, path: &str, value: toml::Value) {
        let parts: Vec<&str> = path.split('.').collect();
        let mut current = config;

        for (i, part) in parts.iter().enumerate() {
            let toml::Value::Table(table) = current else {
                return;
            };
            if i == parts.len() - 1 {
                table.insert(part.to_string(), value);
                return;
            }
            current = table
                .entry(part.to_string())
                .or_insert_with(|| toml::Value::Table(toml::value::Table::new()));
        }
    }

    fn discover_config_paths() -> Vec<PathBuf> {
        let mut search_paths = vec![PathBuf::from(paths::SYSTEM_CONFIG_PATH)];

        if let Some(home_dir) = dirs::home_dir() {
            search_paths.push(home_dir.join(paths::USER_CONFIG_DIR).join("config.toml"));
        }

        search_paths.push(PathBuf::from(paths::DEFAULT_CONFIG_FILE));
        search_paths.push(PathBuf::from(paths::LOCAL_CONFIG_FILE));

        search_paths
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

// Cross-platform directory discovery
mod dirs {
    use std::path::PathBuf;

    pub fn home_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var_os("USERPROFILE").map(PathBuf::from)
        }
        #[cfg(not(target_os = "windows"))]
        {
            std::env::var_os("HOME").map(PathBuf::from)
        }
    }
}
