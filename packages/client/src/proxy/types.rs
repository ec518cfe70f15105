//! Proxy chain data model
//!
//! Hops, targets and the credentials carried by the first hop.

use std::fmt;
use std::str::FromStr;

use crate::error::{self, Error};

/// Handshake protocol spoken by a proxy hop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProxyProtocol {
    Socks5,
    Socks4,
    Http,
}

impl ProxyProtocol {
    /// Lower-case protocol tag as it appears in a specifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProxyProtocol::Socks5 => "socks5",
            ProxyProtocol::Socks4 => "socks4",
            ProxyProtocol::Http => "http",
        }
    }
}

impl FromStr for ProxyProtocol {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "socks5" => Ok(ProxyProtocol::Socks5),
            "socks4" => Ok(ProxyProtocol::Socks4),
            "http" => Ok(ProxyProtocol::Http),
            _ => Err(error::unsupported_protocol(tag)),
        }
    }
}

impl fmt::Display for ProxyProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed username/password pair handed to packet construction.
///
/// The password defaults to the empty string when the hop carries none.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for Credentials<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// One proxy server in a chain.
#[derive(Clone, PartialEq, Eq)]
pub struct ProxyHop {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl ProxyHop {
    /// Create a hop without credentials.
    pub fn new(protocol: ProxyProtocol, host: impl Into<String>, port: u16) -> Self {
        Self {
            protocol,
            host: host.into(),
            port,
            username: None,
            password: None,
        }
    }

    /// Attach a username and password.
    #[must_use]
    pub fn with_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Credentials of this hop, present only when a username is set.
    #[must_use]
    pub fn credentials(&self) -> Option<Credentials<'_>> {
        self.username.as_deref().map(|username| Credentials {
            username,
            password: self.password.as_deref().unwrap_or(""),
        })
    }

    /// `host:port` of this hop.
    #[must_use]
    pub fn authority(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromStr for ProxyHop {
    type Err = Error;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        super::into_proxy::parse_proxy_spec(spec)
    }
}

impl fmt::Display for ProxyHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.protocol, self.host, self.port)
    }
}

impl fmt::Debug for ProxyHop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyHop")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Final destination of a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl From<(&str, u16)> for Target {
    fn from((host, port): (&str, u16)) -> Self {
        Target::new(host, port)
    }
}

impl From<(String, u16)> for Target {
    fn from((host, port): (String, u16)) -> Self {
        Target::new(host, port)
    }
}
