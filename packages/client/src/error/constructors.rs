use super::helpers::{AuthRejected, ConnectionClosed, NoAcceptableMethod, TimedOut};
use super::types::{Error, Kind};

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Creates an `Error` for an invalid argument.
pub fn invalid_argument<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::InvalidArgument).with(e.into())
}

/// Creates an `Error` for an operation that exceeded its timeout.
pub fn timeout(operation: impl Into<String>, limit: std::time::Duration) -> Error {
    Error::new(Kind::Timeout).with(TimedOut {
        operation: operation.into(),
        millis: limit.as_millis(),
    })
}

/// Creates an `Error` for a proxy that closed the stream mid-handshake.
pub fn connection_closed(proxy: impl Into<String>, destination: impl Into<String>) -> Error {
    Error::new(Kind::ConnectionClosed).with(ConnectionClosed {
        proxy: proxy.into(),
        destination: destination.into(),
    })
}

/// Creates an `Error` for malformed or unexpected protocol bytes.
pub fn protocol<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Protocol).with(e.into())
}

/// Creates an `Error` for an unknown protocol tag.
pub fn unsupported_protocol(tag: &str) -> Error {
    Error::new(Kind::UnsupportedProtocol).with(format!(
        "'{tag}' (expected one of socks5, socks4, http)"
    ))
}

/// Creates an `Error` for a SOCKS5 sub-negotiation rejection.
pub fn authentication_rejected(status: u8) -> Error {
    Error::new(Kind::Authentication).with(AuthRejected { status })
}

/// Creates an `Error` for a SOCKS5 proxy that refused every offered method.
pub fn no_acceptable_method() -> Error {
    Error::new(Kind::Authentication).with(NoAcceptableMethod)
}

/// Creates an `Error` for a reply that failed validation.
pub fn handshake<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Handshake).with(e.into())
}

/// Creates an `Error` for a transport-level I/O failure.
pub fn connect<E: Into<BoxError>>(e: E) -> Error {
    Error::new(Kind::Connect).with(e.into())
}

/// Wraps a hop-level failure into the top-level chain error.
pub fn chain_setup(cause: Error) -> Error {
    Error::new(Kind::ChainSetup).with(cause)
}
