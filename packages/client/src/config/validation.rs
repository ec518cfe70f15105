//! Configuration validation

use std::time::Duration;

use super::ChainConfig;
use crate::error::{self, Error};

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),
}

impl From<ConfigurationError> for Error {
    fn from(err: ConfigurationError) -> Self {
        error::invalid_argument(err)
    }
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any setting is unusable.
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for ChainConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_timeout(self.timeout, "timeout")?;
        if self.read_buffer_size < 2 {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "read buffer must hold at least 2 bytes, got {}",
                self.read_buffer_size
            )));
        }
        Ok(())
    }
}

fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
    if timeout.is_zero() {
        return Err(ConfigurationError::InvalidTimeout(format!(
            "{name} cannot be zero"
        )));
    }
    Ok(())
}
