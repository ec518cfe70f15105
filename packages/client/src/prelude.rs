//! Chainsock prelude
//!
//! The types most callers need to open a tunnel.

pub use crate::config::ChainConfig;
pub use crate::connect::{ChainDriver, Dialer, TcpDialer};
pub use crate::error::{Error, Kind, Result};
pub use crate::proxy::{IntoProxy, ProxyHop, ProxyProtocol, Target};
