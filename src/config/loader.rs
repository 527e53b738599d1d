//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::LogConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading and application.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(
        "Validation failed: {}",
        .0.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    )]
    Validation(Vec<ValidationError>),

    #[error("Failed to open log output {}: {source}", .path.display())]
    Output { path: PathBuf, source: io::Error },
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LogConfig, ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Level;
    use std::io::Write;

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "level = \"error\"").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.level, Level::Error);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/logtree.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("level = \"loud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_lists_all() {
        let err = parse_config(
            r#"
            [fields]
            level = "x"
            message = "y"
            "#,
        )
        .unwrap_err();

        match &err {
            ConfigError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().starts_with("Validation failed: "));
    }
}
