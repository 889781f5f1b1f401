// src/config/schema_validator.rs
//! Configuration schema validation

use std::collections::HashMap;

use crate::config::constants::*;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub value: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation error for '{}': {} (value: {})", self.field, self.message, self.value)
    }
}

impl std::error::Error for ValidationError {}

/// Schema validator for configuration
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    constraints: HashMap<String, FieldConstraint>,
}

/// Field validation constraints
#[derive(Debug, Clone)]
pub enum FieldConstraint {
    IntRange { min: i64, max: i64 },
    OneOf(Vec<String>),
    MaxLength(usize),
}

impl SchemaValidator {
    /// Create new schema validator with default constraints
    pub fn new() -> Self {
        let mut constraints = HashMap::new();

        constraints.insert("segmentation.gps_sample_count".to_string(),
                           FieldConstraint::IntRange {
                               min: kinematics::MIN_GPS_SAMPLE_COUNT as i64,
                               max: kinematics::MAX_GPS_SAMPLE_COUNT as i64,
                           });

        constraints.insert("emg.max_canonical_channels".to_string(),
                           FieldConstraint::IntRange {
                               min: 1,
                               max: emg::MAX_CHANNELS_USED as i64,
                           });

        constraints.insert("emg.channels_used".to_string(),
                           FieldConstraint::MaxLength(emg::MAX_CHANNELS_USED));

        constraints.insert("emg.label_set".to_string(),
                           FieldConstraint::OneOf(vec![
                               "numbered".to_string(),
                               "superset".to_string(),
                               "short_muscle".to_string(),
                               "long_muscle".to_string(),
                               "delsys_im".to_string(),
                               "device_voltage".to_string(),
                               "analog_emg".to_string(),
                               "unknown".to_string(),
                           ]));

        constraints.insert("synergy.target".to_string(),
                           FieldConstraint::IntRange {
                               min: synergy::MIN_TARGET as i64,
                               max: synergy::MAX_TARGET as i64,
                           });

        constraints.insert("synergy.mode".to_string(),
                           FieldConstraint::OneOf(vec![
                               "frequency".to_string(),
                               "count".to_string(),
                           ]));

        constraints.insert("synergy.cycle".to_string(),
                           FieldConstraint::OneOf(vec![
                               "left".to_string(),
                               "right".to_string(),
                               "full".to_string(),
                           ]));

        Self { constraints }
    }

    /// Validate configuration value against schema
    pub fn validate_field(&self, field_path: &str, value: &toml::Value) -> Result<(), ValidationError> {
        if let Some(constraint) = self.constraints.get(field_path) {
            self.check_constraint(field_path, value, constraint)
        } else {
            Ok(()) // Unknown fields are allowed for extensibility
        }
    }

    /// Validate entire configuration
    pub fn validate_config(&self, config: &toml::Value) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        self.validate_recursive("", config, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Check cross-field dependencies
    pub fn validate_dependencies(&self, config: &toml::Value) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        // Synergy rows must be drawn from the EMG channels kept in the output
        if let (Some(used), Some(rows)) = (
            self.get_nested_value(config, "emg.channels_used").and_then(|v| v.as_array()),
            self.get_nested_value(config, "synergy.channels").and_then(|v| v.as_array()),
        ) {
            for row in rows {
                if !used.contains(row) {
                    errors.push(ValidationError {
                        field: "synergy.channels".to_string(),
                        message: "Synergy channel must be listed in emg.channels_used".to_string(),
                        value: row.to_string(),
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_recursive(&self, prefix: &str, value: &toml::Value, errors: &mut Vec<ValidationError>) {
        if let toml::Value::Table(table) = value {
            for (key, child) in table {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                if let Err(e) = self.validate_field(&path, child) {
                    errors.push(e);
                }
                self.validate_recursive(&path, child, errors);
            }
        }
    }

    fn check_constraint(&self, field: &str, value: &toml::Value, constraint: &FieldConstraint) -> Result<(), ValidationError> {
        match constraint {
            FieldConstraint::IntRange { min, max } => {
                let int_val = value.as_integer().ok_or_else(|| ValidationError {
                    field: field.to_string(),
                    message: "Expected integer".to_string(),
                    value: value.to_string(),
                })?;
                if int_val < *min || int_val > *max {
                    return Err(ValidationError {
                        field: field.to_string(),
                        message: format!("Value must be between {} and {}", min, max),
                        value: int_val.to_string(),
                    });
                }
            }
            FieldConstraint::OneOf(options) => {
                let str_val = value.as_str().ok_or_else(|| ValidationError {
                    field: field.to_string(),
                    message: "Expected string".to_string(),
                    value: value.to_string(),
                })?;
                if !options.iter().any(|o| o == str_val) {
                    return Err(ValidationError {
                        field: field.to_string(),
                        message: format!("Value must be one of: {}", options.join(", ")),
                        value: str_val.to_string(),
                    });
                }
            }
            FieldConstraint::MaxLength(max_len) => {
                let len = value.as_array().map(|a| a.len()).unwrap_or(0);
                if len > *max_len {
                    return Err(ValidationError {
                        field: field.to_string(),
                        message: format!("At most {} entries allowed", max_len),
                        value: len.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn get_nested_value<'a>(&self, config: &'a toml::Value, path: &str) -> Option<&'a toml::Value> {
        let mut current = config;
        for part in path.split('.') {
            current = current.as_table()?.get(part)?;
        }
        Some(current)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}
