//! Timeout-bounded reads and writes
//!
//! Every helper applies the full timeout to its own operation.

use std::io;
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time;

use crate::error::{self, Result};

/// Write the whole buffer within `limit`.
pub(crate) async fn write_all<S>(stream: &mut S, buf: &[u8], limit: Duration, what: &str) -> Result<()>
where
    S: AsyncWrite + Unpin,
{
    match time::timeout(limit, stream.write_all(buf)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(error::connect(io_context(e, what))),
        Err(_) => Err(error::timeout(what, limit)),
    }
}

/// Read exactly `N` bytes within `limit`; a short read is a protocol error.
pub(crate) async fn read_exact<S, const N: usize>(stream: &mut S, limit: Duration, what: &str) -> Result<[u8; N]>
where
    S: AsyncRead + Unpin,
{
    let mut buf = [0u8; N];
    match time::timeout(limit, stream.read_exact(&mut buf)).await {
        Ok(Ok(_)) => Ok(buf),
        Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Err(error::protocol(format!(
            "{what}: proxy sent fewer than {N} bytes"
        ))),
        Ok(Err(e)) => Err(error::connect(io_context(e, what))),
        Err(_) => Err(error::timeout(what, limit)),
    }
}

/// Read whatever the peer sends next, up to `capacity` bytes, within `limit`.
///
/// Returns an empty buffer when the peer has closed the stream.
pub(crate) async fn read_some<S>(stream: &mut S, capacity: usize, limit: Duration, what: &str) -> Result<Vec<u8>>
where
    S: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; capacity];
    match time::timeout(limit, stream.read(&mut buf)).await {
        Ok(Ok(n)) => {
            buf.truncate(n);
            Ok(buf)
        }
        Ok(Err(e)) => Err(error::connect(io_context(e, what))),
        Err(_) => Err(error::timeout(what, limit)),
    }
}

/// Best-effort shutdown; failures are logged and swallowed.
pub(crate) async fn close_quietly<S>(stream: &mut S, limit: Duration)
where
    S: AsyncWrite + Unpin,
{
    match time::timeout(limit, stream.shutdown()).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::trace!(target: "chainsock::connect", error = %e, "ignoring close failure");
        }
        Err(_) => {
            tracing::trace!(target: "chainsock::connect", "close timed out");
        }
    }
}

fn io_context(e: io::Error, what: &str) -> io::Error {
    io::Error::new(e.kind(), format!("{what}: {e}"))
}
