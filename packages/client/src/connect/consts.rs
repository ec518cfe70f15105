//! Wire constants for SOCKS4, SOCKS5 and the RFC 1929 sub-negotiation

pub const SOCKS5_VERSION: u8 = 0x05;
pub const SOCKS4_VERSION: u8 = 0x04;

pub const CMD_CONNECT: u8 = 0x01;
pub const RSV: u8 = 0x00;

pub const ATYP_IPV4: u8 = 0x01;
pub const ATYP_DOMAIN: u8 = 0x03;

pub const METHOD_NO_AUTH: u8 = 0x00;
pub const METHOD_USER_PASS: u8 = 0x02;
pub const METHOD_NO_ACCEPTABLE: u8 = 0xff;

pub const USER_PASS_VERSION: u8 = 0x01;
pub const USER_PASS_SUCCESS: u8 = 0x00;

pub const SOCKS5_REPLY_SUCCEEDED: u8 = 0x00;
pub const SOCKS4_REPLY_VERSION: u8 = 0x00;
pub const SOCKS4_REQUEST_GRANTED: u8 = 0x5a;

pub const SOCKS4_USERID_TERMINATOR: u8 = 0x00;

/// Substring of a lower-cased HTTP status line that marks an open tunnel.
pub const HTTP_TUNNEL_ESTABLISHED: &str = "200 connection established";
