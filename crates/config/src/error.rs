//! Errors raised while locating, reading or writing config.toml

use std::path::PathBuf;
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform reports no per-user config directory (no home directory)
    #[error("No per-user config directory is available on this system")]
    NoConfigDir,

    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but holds nothing but whitespace
    #[error("{path} is empty")]
    Empty { path: PathBuf },

    #[error("{path} is not a valid config file: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Cannot encode config as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// Save was refused because some values would not load back cleanly
    #[error("Refusing to save config: {}", join_problems(.0))]
    Invalid(Vec<ValidationError>),

    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// One rejected config value, named by its `section.key` path
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {problem}")]
pub struct ValidationError {
    pub field: String,
    pub problem: String,
}

impl ValidationError {
    pub fn new(section: &str, key: &str, problem: impl Into<String>) -> Self {
        Self {
            field: format!("{}.{}", section, key),
            problem: problem.into(),
        }
    }
}

fn join_problems(problems: &[ValidationError]) -> String {
    problems
        .iter()
        .map(ValidationError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
