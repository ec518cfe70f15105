//! CONNECT request construction
//!
//! Pure serialization of the request that asks a proxy to open a tunnel to
//! `host:port`. No I/O happens here.

use std::net::Ipv4Addr;

use bytes::{BufMut, Bytes, BytesMut};

use super::consts::{
    ATYP_DOMAIN, ATYP_IPV4, CMD_CONNECT, RSV, SOCKS4_USERID_TERMINATOR, SOCKS4_VERSION,
    SOCKS5_VERSION,
};
use crate::error::{self, Result};
use crate::proxy::{Credentials, ProxyProtocol, encode_basic_auth};

/// Build the CONNECT request for `protocol` toward `host:port`.
///
/// `auth` is honoured by SOCKS4 (as USERID) and HTTP (as
/// `Proxy-Authorization`); SOCKS5 requests never carry credentials.
pub fn build_connect(
    protocol: ProxyProtocol,
    host: &str,
    port: u16,
    auth: Option<Credentials<'_>>,
) -> Result<Bytes> {
    match protocol {
        ProxyProtocol::Socks5 => socks5_connect(host, port),
        ProxyProtocol::Socks4 => socks4_connect(host, port, auth),
        ProxyProtocol::Http => Ok(http_connect(host, port, auth)),
    }
}

/// `05 01 00 ATYP ADDR PORT`
pub fn socks5_connect(host: &str, port: u16) -> Result<Bytes> {
    let mut request = BytesMut::with_capacity(7 + host.len());
    request.put_slice(&[SOCKS5_VERSION, CMD_CONNECT, RSV]);

    if let Ok(ipv4) = host.parse::<Ipv4Addr>() {
        request.put_u8(ATYP_IPV4);
        request.put_slice(&ipv4.octets());
    } else {
        let Ok(len) = u8::try_from(host.len()) else {
            return Err(error::protocol(format!(
                "SOCKS5 domain name is {} bytes, the limit is 255",
                host.len()
            )));
        };
        request.put_u8(ATYP_DOMAIN);
        request.put_u8(len);
        request.put_slice(host.as_bytes());
    }

    request.put_u16(port);
    Ok(request.freeze())
}

/// `04 01 PORT IPV4 USERID 00`
pub fn socks4_connect(host: &str, port: u16, auth: Option<Credentials<'_>>) -> Result<Bytes> {
    let ipv4: Ipv4Addr = host.parse().map_err(|_| {
        error::protocol(format!(
            "SOCKS4 requires an IPv4 address, got '{host}'"
        ))
    })?;
    let userid = auth.map_or("", |creds| creds.username);

    let mut request = BytesMut::with_capacity(9 + userid.len());
    request.put_slice(&[SOCKS4_VERSION, CMD_CONNECT]);
    request.put_u16(port);
    request.put_slice(&ipv4.octets());
    request.put_slice(userid.as_bytes());
    request.put_u8(SOCKS4_USERID_TERMINATOR);
    Ok(request.freeze())
}

/// `CONNECT host:port HTTP/1.1` with optional Basic proxy authorization.
pub fn http_connect(host: &str, port: u16, auth: Option<Credentials<'_>>) -> Bytes {
    let mut request = format!("CONNECT {host}:{port} HTTP/1.1\r\nHost: {host}:{port}\r\n");

    if let Some(creds) = auth {
        request.push_str("Proxy-Authorization: ");
        request.push_str(&encode_basic_auth(creds.username, creds.password));
        request.push_str("\r\n");
    }

    request.push_str("Proxy-Connection: keep-alive\r\nConnection: keep-alive\r\n\r\n");
    Bytes::from(request)
}
