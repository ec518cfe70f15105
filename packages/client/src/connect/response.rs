//! Hop reply classification
//!
//! Inspects the raw bytes a proxy sent back after a CONNECT request. Never
//! fails: anything unrecognised is a failed handshake.

use super::consts::{
    HTTP_TUNNEL_ESTABLISHED, SOCKS4_REPLY_VERSION, SOCKS4_REQUEST_GRANTED, SOCKS5_REPLY_SUCCEEDED,
    SOCKS5_VERSION,
};
use crate::proxy::ProxyProtocol;

/// Whether `reply` reports an established tunnel for `protocol`.
#[must_use]
pub fn is_success(protocol: ProxyProtocol, reply: &[u8]) -> bool {
    match protocol {
        ProxyProtocol::Socks5 => {
            matches!(reply, [SOCKS5_VERSION, SOCKS5_REPLY_SUCCEEDED, ..])
        }
        ProxyProtocol::Socks4 => {
            matches!(reply, [SOCKS4_REPLY_VERSION, SOCKS4_REQUEST_GRANTED, ..])
        }
        ProxyProtocol::Http => status_line(reply)
            .is_some_and(|line| line.to_lowercase().contains(HTTP_TUNNEL_ESTABLISHED)),
    }
}

/// First line of an HTTP reply, without its CRLF. `None` if it is not UTF-8.
pub(crate) fn status_line(reply: &[u8]) -> Option<&str> {
    let end = reply
        .windows(2)
        .position(|pair| pair == b"\r\n")
        .unwrap_or(reply.len());
    std::str::from_utf8(&reply[..end]).ok()
}

/// Short printable summary of a rejected reply for error messages.
pub(crate) fn describe(protocol: ProxyProtocol, reply: &[u8]) -> String {
    match protocol {
        ProxyProtocol::Http => match status_line(reply) {
            Some(line) => format!("status line '{}'", line.trim()),
            None => "a reply that is not valid UTF-8".to_string(),
        },
        ProxyProtocol::Socks5 | ProxyProtocol::Socks4 => {
            let head: Vec<String> = reply.iter().take(2).map(|b| format!("{b:02x}")).collect();
            if head.is_empty() {
                "an empty reply".to_string()
            } else {
                format!("reply bytes [{}]", head.join(" "))
            }
        }
    }
}
