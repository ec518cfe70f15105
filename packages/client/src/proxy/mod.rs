//! Proxy hop model and specifier parsing
//!
//! Supports SOCKS5 (with optional username/password), SOCKS4 and HTTP CONNECT
//! proxies described by `protocol://[username[:password]@]host[:port]`.

pub mod into_proxy;
pub mod types;
pub mod url_handling;

pub use into_proxy::{DEFAULT_PROXY_PORT, IntoProxy, parse_proxy_spec};
pub use types::{Credentials, ProxyHop, ProxyProtocol, Target};
pub use url_handling::encode_basic_auth;
