/// A marker type to indicate that a bounded operation timed out.
#[derive(Debug, thiserror::Error)]
#[error("{operation} timed out after {millis}ms")]
pub struct TimedOut {
    pub operation: String,
    pub millis: u128,
}

/// A marker type to indicate that a proxy closed the stream mid-handshake.
#[derive(Debug, thiserror::Error)]
#[error("proxy {proxy} closed the connection while tunneling to {destination}")]
pub struct ConnectionClosed {
    pub proxy: String,
    pub destination: String,
}

/// A SOCKS5 username/password sub-negotiation rejection.
#[derive(Debug, thiserror::Error)]
#[error("username/password rejected by proxy (status 0x{status:02x})")]
pub struct AuthRejected {
    pub status: u8,
}

/// A marker type for a SOCKS5 proxy that accepted none of the offered methods.
#[derive(Debug, thiserror::Error)]
#[error("no acceptable authentication method")]
pub struct NoAcceptableMethod;
