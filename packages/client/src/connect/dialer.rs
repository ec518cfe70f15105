//! Transport connect primitive
//!
//! The chain driver opens exactly one connection per call through a
//! [`Dialer`]. Name resolution is left to the dialer.

use std::future::Future;
use std::io;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;

/// Opens the transport connection to the first proxy of a chain.
pub trait Dialer: Send + Sync {
    type Stream: AsyncRead + AsyncWrite + Unpin + Send + 'static;

    fn dial(&self, host: &str, port: u16) -> impl Future<Output = io::Result<Self::Stream>> + Send;
}

/// Plain TCP dialer backed by the system resolver.
#[derive(Debug, Clone, Copy)]
pub struct TcpDialer {
    pub nodelay: bool,
}

impl Default for TcpDialer {
    fn default() -> Self {
        Self { nodelay: true }
    }
}

impl Dialer for TcpDialer {
    type Stream = TcpStream;

    fn dial(&self, host: &str, port: u16) -> impl Future<Output = io::Result<TcpStream>> + Send {
        let nodelay = self.nodelay;
        async move {
            let stream = TcpStream::connect((host, port)).await?;
            if nodelay && let Err(e) = stream.set_nodelay(true) {
                tracing::debug!(target: "chainsock::connect", error = %e, "failed to set TCP_NODELAY");
            }
            Ok(stream)
        }
    }
}
