//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Logger paths are well formed
//! - Field keys do not collide with the record's own keys
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>

use std::collections::BTreeMap;

use serde_json::Value;
use thiserror::Error;

use crate::config::schema::{LogConfig, Output};

/// Keys every record writes itself.
pub const RESERVED_KEYS: [&str; 2] = ["level", "message"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logger path {0:?} has an empty segment")]
    EmptyPathSegment(String),

    #[error("empty field key in {scope}")]
    EmptyFieldKey { scope: String },

    #[error("field key {key:?} in {scope} is reserved")]
    ReservedFieldKey { scope: String, key: String },

    #[error("output file path is empty")]
    EmptyOutputPath,

    #[error("name_key {0:?} is empty or reserved")]
    InvalidNameKey(String),
}

pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Output::File(path) = &config.output {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyOutputPath);
        }
    }

    if let Some(key) = &config.name_key {
        if key.is_empty() || RESERVED_KEYS.contains(&key.as_str()) {
            errors.push(ValidationError::InvalidNameKey(key.clone()));
        }
    }

    check_fields("root", &config.fields, &mut errors);

    for (path, logger) in &config.loggers {
        if path.split('.').any(str::is_empty) {
            errors.push(ValidationError::EmptyPathSegment(path.clone()));
        }
        check_fields(path, &logger.fields, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_fields(scope: &str, fields: &BTreeMap<String, Value>, errors: &mut Vec<ValidationError>) {
    for key in fields.keys() {
        if key.is_empty() {
            errors.push(ValidationError::EmptyFieldKey {
                scope: scope.to_string(),
            });
        } else if RESERVED_KEYS.contains(&key.as_str()) {
            errors.push(ValidationError::ReservedFieldKey {
                scope: scope.to_string(),
                key: key.clone(),
            });
        }
    }
}
