use std::error::Error as StdError;
use std::fmt;

/// A Result alias where the Err case is `chainsock_client::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents errors that can occur while establishing a proxy chain.
pub struct Error {
    pub(crate) inner: Box<Inner>,
}

pub(crate) struct Inner {
    pub(crate) kind: Kind,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Failure categories of a chain setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Empty proxy list, malformed specifier or invalid configuration
    InvalidArgument,
    /// A bounded dial, write or read exceeded its timeout
    Timeout,
    /// The peer closed the stream mid-handshake
    ConnectionClosed,
    /// Malformed or unexpected bytes, or a request that cannot be encoded
    Protocol,
    /// Protocol tag other than socks5, socks4 or http
    UnsupportedProtocol,
    /// SOCKS5 method or credential rejection
    Authentication,
    /// A hop's reply did not validate for its protocol
    Handshake,
    /// Transport I/O failure: connect refused, reset mid-handshake
    Connect,
    /// Top-level wrapper around any of the above
    ChainSetup,
}

impl Error {
    pub(crate) fn new(kind: Kind) -> Error {
        Error {
            inner: Box::new(Inner { kind, source: None }),
        }
    }

    #[must_use = "Error builder methods return a new Error and should be used"]
    pub(crate) fn with<E: Into<Box<dyn StdError + Send + Sync>>>(mut self, source: E) -> Error {
        self.inner.source = Some(source.into());
        self
    }

    /// Returns the failure category of this error.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.inner.kind
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut f = f.debug_struct("chainsock::Error");

        f.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            f.field("source", source);
        }

        f.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.inner.kind {
            Kind::InvalidArgument => "invalid argument",
            Kind::Timeout => "operation timed out",
            Kind::ConnectionClosed => "connection closed by proxy",
            Kind::Protocol => "protocol error",
            Kind::UnsupportedProtocol => "unsupported proxy protocol",
            Kind::Authentication => "proxy authentication failed",
            Kind::Handshake => "proxy handshake failed",
            Kind::Connect => "transport error",
            Kind::ChainSetup => "proxy chain setup failed",
        };

        match self.inner.source {
            Some(ref source) => write!(f, "{prefix}: {source}"),
            None => f.write_str(prefix),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|err| &**err as &(dyn StdError + 'static))
    }
}
