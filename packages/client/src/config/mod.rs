//! Chain configuration
//!
//! Per-call settings for a chain walk: the per-operation timeout, the size of
//! the reply buffer read at each hop, and TCP socket options for the
//! connection to the first proxy.

use std::time::Duration;

pub mod validation;

pub use validation::{ConfigResult, ConfigurationError, Validator};

/// Default timeout applied to every dial, write and read.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Default size of the buffer each hop reply is read into.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Settings for a single chain walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
    /// Budget for each individual network operation, not for the whole chain
    pub timeout: Duration,
    pub read_buffer_size: usize,
    pub nodelay: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            nodelay: true,
        }
    }
}

impl ChainConfig {
    /// Set the per-operation timeout
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use chainsock_client::config::ChainConfig;
    ///
    /// let config = ChainConfig::default().with_timeout(Duration::from_secs(3));
    /// assert_eq!(config.timeout, Duration::from_secs(3));
    /// ```
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the per-operation timeout in milliseconds
    #[must_use]
    pub fn with_timeout_millis(self, millis: u64) -> Self {
        self.with_timeout(Duration::from_millis(millis))
    }

    /// Set the size of the buffer each hop reply is read into
    #[must_use]
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size;
        self
    }

    /// Enable or disable `TCP_NODELAY` on the connection to the first proxy
    #[must_use]
    pub fn with_nodelay(mut self, nodelay: bool) -> Self {
        self.nodelay = nodelay;
        self
    }
}
