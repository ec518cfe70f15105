//! Proxy chain establishment
//!
//! Packet construction, reply validation, SOCKS5 authentication and the
//! sequential hop driver that hands back a live tunnel.

pub mod chain;
pub mod consts;
pub mod dialer;
pub(crate) mod io;
pub mod packet;
pub mod response;
pub mod socks5_auth;

pub use chain::{ChainDriver, NextHop, plan};
pub use dialer::{Dialer, TcpDialer};
pub use packet::build_connect;
pub use response::is_success;
pub use socks5_auth::AuthMethod;
