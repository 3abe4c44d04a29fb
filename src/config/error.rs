use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling the configuration or the logging setup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration file {0} does not exist")]
    MissingFile(PathBuf),
    #[error(transparent)]
    Extract(#[from] Box<figment::Error>),
    #[error("invalid druid_uri '{uri}': {reason}")]
    InvalidDruidUri { uri: String, reason: String },
    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError::Extract(Box::new(e))
    }
}
