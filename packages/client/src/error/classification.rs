use std::error::Error as StdError;
use std::io;

use super::helpers::{AuthRejected, TimedOut};
use super::types::{Error, Kind};

impl Error {
    /// Returns true if the error came from invalid input.
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        self.effective_kind() == Kind::InvalidArgument
    }

    /// Returns true if the error is related to a timeout.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        if self.effective_kind() == Kind::Timeout {
            return true;
        }

        let mut source = self.source();

        while let Some(err) = source {
            if err.is::<TimedOut>() {
                return true;
            }
            if let Some(io) = err.downcast_ref::<io::Error>()
                && io.kind() == io::ErrorKind::TimedOut {
                    return true;
                }
            source = err.source();
        }

        false
    }

    /// Returns true if a proxy closed the stream mid-handshake.
    #[must_use]
    pub fn is_connection_closed(&self) -> bool {
        self.effective_kind() == Kind::ConnectionClosed
    }

    /// Returns true if the error is a protocol violation.
    #[must_use]
    pub fn is_protocol(&self) -> bool {
        matches!(
            self.effective_kind(),
            Kind::Protocol | Kind::UnsupportedProtocol
        )
    }

    /// Returns true if SOCKS5 authentication was rejected.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        self.effective_kind() == Kind::Authentication
    }

    /// Returns true if a hop's reply failed validation.
    #[must_use]
    pub fn is_handshake(&self) -> bool {
        self.effective_kind() == Kind::Handshake
    }

    /// Returns true if the transport failed underneath the handshake.
    #[must_use]
    pub fn is_connect(&self) -> bool {
        self.effective_kind() == Kind::Connect
    }

    /// Returns true if this is the top-level chain setup wrapper.
    #[must_use]
    pub fn is_chain_setup(&self) -> bool {
        self.inner.kind == Kind::ChainSetup
    }

    /// Kind of the failure wrapped by a `ChainSetup` error.
    #[must_use]
    pub fn cause_kind(&self) -> Option<Kind> {
        if self.inner.kind != Kind::ChainSetup {
            return None;
        }
        self.source()
            .and_then(|err| err.downcast_ref::<Error>())
            .map(Error::kind)
    }

    /// Status byte of a rejected SOCKS5 username/password sub-negotiation.
    #[must_use]
    pub fn auth_status(&self) -> Option<u8> {
        let mut source = self.source();

        while let Some(err) = source {
            if let Some(rejected) = err.downcast_ref::<AuthRejected>() {
                return Some(rejected.status);
            }
            source = err.source();
        }

        None
    }

    fn effective_kind(&self) -> Kind {
        self.cause_kind().unwrap_or(self.inner.kind)
    }
}
