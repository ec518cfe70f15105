//! SOCKS5 method negotiation and username/password sub-negotiation (RFC 1929)
//!
//! Runs once against the first proxy of a chain, before any CONNECT request.

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncWrite};

use super::consts::{
    METHOD_NO_ACCEPTABLE, METHOD_NO_AUTH, METHOD_USER_PASS, SOCKS5_VERSION, USER_PASS_SUCCESS,
    USER_PASS_VERSION,
};
use super::io;
use crate::error::{self, Result};
use crate::proxy::{Credentials, ProxyHop};

/// Method the proxy selected during negotiation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    NoAuth,
    UsernamePassword,
}

/// `05 NMETHODS METHODS...`; username/password is offered only for a non-empty username.
#[must_use]
pub fn method_offer(auth: Option<Credentials<'_>>) -> Bytes {
    let offers_user_pass = auth.is_some_and(|creds| !creds.username.is_empty());
    if offers_user_pass {
        Bytes::from_static(&[SOCKS5_VERSION, 2, METHOD_NO_AUTH, METHOD_USER_PASS])
    } else {
        Bytes::from_static(&[SOCKS5_VERSION, 1, METHOD_NO_AUTH])
    }
}

/// `01 ULEN USER PLEN PASS`
pub fn user_pass_request(creds: Credentials<'_>) -> Result<Bytes> {
    let ulen = field_len(creds.username, "username")?;
    let plen = field_len(creds.password, "password")?;

    let mut request = BytesMut::with_capacity(3 + creds.username.len() + creds.password.len());
    request.put_u8(USER_PASS_VERSION);
    request.put_u8(ulen);
    request.put_slice(creds.username.as_bytes());
    request.put_u8(plen);
    request.put_slice(creds.password.as_bytes());
    Ok(request.freeze())
}

fn field_len(field: &str, name: &str) -> Result<u8> {
    u8::try_from(field.len()).map_err(|_| {
        error::protocol(format!(
            "SOCKS5 {name} is {} bytes, the limit is 255",
            field.len()
        ))
    })
}

/// Negotiate an authentication method with `proxy` over `stream`.
///
/// A proxy that picks no-auth although credentials were offered is accepted.
pub async fn negotiate<S>(stream: &mut S, proxy: &ProxyHop, timeout: Duration) -> Result<AuthMethod>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let creds = proxy.credentials();

    io::write_all(stream, &method_offer(creds), timeout, "SOCKS5 method offer").await?;
    let [version, method] = io::read_exact::<_, 2>(stream, timeout, "SOCKS5 method selection").await?;

    if version != SOCKS5_VERSION {
        return Err(error::protocol(format!(
            "SOCKS5 method selection carried version 0x{version:02x}"
        )));
    }

    tracing::debug!(
        target: "chainsock::connect",
        proxy = %proxy,
        method = format_args!("0x{method:02x}"),
        "SOCKS5 method selected"
    );

    match method {
        METHOD_NO_AUTH => Ok(AuthMethod::NoAuth),
        METHOD_USER_PASS => match creds.filter(|c| !c.username.is_empty()) {
            Some(creds) => {
                sub_negotiate(stream, creds, timeout).await?;
                Ok(AuthMethod::UsernamePassword)
            }
            None => Err(error::protocol(
                "proxy selected username/password authentication, which was not offered",
            )),
        },
        METHOD_NO_ACCEPTABLE => Err(error::no_acceptable_method()),
        other => Err(error::protocol(format!(
            "unsupported method 0x{other:02x} selected by proxy"
        ))),
    }
}

async fn sub_negotiate<S>(stream: &mut S, creds: Credentials<'_>, timeout: Duration) -> Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = user_pass_request(creds)?;
    io::write_all(stream, &request, timeout, "SOCKS5 username/password request").await?;
    let [version, status] =
        io::read_exact::<_, 2>(stream, timeout, "SOCKS5 username/password reply").await?;

    if version == USER_PASS_VERSION && status == USER_PASS_SUCCESS {
        Ok(())
    } else {
        Err(error::authentication_rejected(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Kind;
    use crate::proxy::ProxyProtocol;
    use tokio_test::io::Builder;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn proxy(username: Option<&str>, password: Option<&str>) -> ProxyHop {
        let mut hop = ProxyHop::new(ProxyProtocol::Socks5, "proxyA", 1080);
        hop.username = username.map(str::to_string);
        hop.password = password.map(str::to_string);
        hop
    }

    #[test]
    fn offer_includes_user_pass_only_with_username() {
        let creds = Credentials {
            username: "user",
            password: "",
        };
        assert_eq!(&method_offer(Some(creds))[..], &[0x05, 0x02, 0x00, 0x02]);
        assert_eq!(&method_offer(None)[..], &[0x05, 0x01, 0x00]);

        let empty = Credentials {
            username: "",
            password: "pass",
        };
        assert_eq!(&method_offer(Some(empty))[..], &[0x05, 0x01, 0x00]);
    }

    #[test]
    fn user_pass_request_layout() {
        let creds = Credentials {
            username: "user",
            password: "pass",
        };
        assert_eq!(
            &user_pass_request(creds).unwrap()[..],
            &[0x01, 4, b'u', b's', b'e', b'r', 4, b'p', b'a', b's', b's']
        );
    }

    #[test]
    fn oversized_username_is_a_protocol_error() {
        let long = "u".repeat(256);
        let creds = Credentials {
            username: &long,
            password: "",
        };
        assert_eq!(user_pass_request(creds).unwrap_err().kind(), Kind::Protocol);
    }

    #[tokio::test]
    async fn no_auth_selected() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x05, 0x00])
            .build();
        let method = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap();
        assert_eq!(method, AuthMethod::NoAuth);
    }

    #[tokio::test]
    async fn username_offered_but_proxy_skips_auth() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x02, 0x00, 0x02])
            .read(&[0x05, 0x00])
            .build();
        let method = negotiate(&mut stream, &proxy(Some("user"), Some("pass")), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(method, AuthMethod::NoAuth);
    }

    #[tokio::test]
    async fn user_pass_accepted() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x02, 0x00, 0x02])
            .read(&[0x05, 0x02])
            .write(&[0x01, 4, b'u', b's', b'e', b'r', 0])
            .read(&[0x01, 0x00])
            .build();
        let method = negotiate(&mut stream, &proxy(Some("user"), None), TIMEOUT)
            .await
            .unwrap();
        assert_eq!(method, AuthMethod::UsernamePassword);
    }

    #[tokio::test]
    async fn user_pass_rejected_carries_status() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x02, 0x00, 0x02])
            .read(&[0x05, 0x02])
            .write(&[0x01, 4, b'u', b's', b'e', b'r', 4, b'p', b'a', b's', b's'])
            .read(&[0x01, 0x01])
            .build();
        let err = negotiate(&mut stream, &proxy(Some("user"), Some("pass")), TIMEOUT)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), Kind::Authentication);
        assert_eq!(err.auth_status(), Some(0x01));
    }

    #[tokio::test]
    async fn no_acceptable_method() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x05, 0xff])
            .build();
        let err = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Authentication);
        assert!(err.to_string().contains("no acceptable"));
    }

    #[tokio::test]
    async fn unknown_method_is_a_protocol_error() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x05, 0x01])
            .build();
        let err = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Protocol);
    }

    #[tokio::test]
    async fn user_pass_selected_without_offer_is_a_protocol_error() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x05, 0x02])
            .build();
        let err = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Protocol);
    }

    #[tokio::test]
    async fn wrong_version_is_a_protocol_error() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x04, 0x00])
            .build();
        let err = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Protocol);
    }

    #[tokio::test]
    async fn short_method_reply_is_a_protocol_error() {
        let mut stream = Builder::new()
            .write(&[0x05, 0x01, 0x00])
            .read(&[0x05])
            .build();
        let err = negotiate(&mut stream, &proxy(None, None), TIMEOUT).await.unwrap_err();
        assert_eq!(err.kind(), Kind::Protocol);
    }
}
