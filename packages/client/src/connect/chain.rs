//! Sequential walk of a proxy chain
//!
//! One transport connection is opened to the first proxy. Each following
//! proxy, and finally the target, is reached by sending a CONNECT request
//! through the tunnel built so far, in the protocol of the proxy currently at
//! the far end of that tunnel.

use tokio::time;

use super::dialer::{Dialer, TcpDialer};
use super::{io, packet, response, socks5_auth};
use crate::config::{ChainConfig, Validator};
use crate::error::{self, Error, Result};
use crate::proxy::{ProxyHop, ProxyProtocol, Target};

/// One entry of the chain's work-list: where the next CONNECT goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextHop<'a> {
    /// Proxy that receives the CONNECT request for this entry
    pub via: &'a ProxyHop,
    pub host: &'a str,
    pub port: u16,
    /// Protocol of the proxy being reached; `None` for the final target
    pub protocol: Option<ProxyProtocol>,
}

impl NextHop<'_> {
    fn destination(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Ordered work-list for `hops`: every proxy after the first, then `target`.
#[must_use]
pub fn plan<'a>(hops: &'a [ProxyHop], target: &'a Target) -> Vec<NextHop<'a>> {
    let onward = hops.iter().skip(1).map(|hop| (hop.host.as_str(), hop.port, Some(hop.protocol)));
    let last = std::iter::once((target.host.as_str(), target.port, None));

    hops.iter()
        .zip(onward.chain(last))
        .map(|(via, (host, port, protocol))| NextHop {
            via,
            host,
            port,
            protocol,
        })
        .collect()
}

/// Establishes tunnels through proxy chains.
#[derive(Debug, Clone, Default)]
pub struct ChainDriver<D = TcpDialer> {
    dialer: D,
    config: ChainConfig,
}

impl ChainDriver<TcpDialer> {
    /// Driver over plain TCP using `config`.
    #[must_use]
    pub fn new(config: ChainConfig) -> Self {
        let dialer = TcpDialer {
            nodelay: config.nodelay,
        };
        Self { dialer, config }
    }
}

impl<D: Dialer> ChainDriver<D> {
    /// Driver over a custom transport.
    pub fn with_dialer(dialer: D, config: ChainConfig) -> Self {
        Self { dialer, config }
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    pub fn dialer(&self) -> &D {
        &self.dialer
    }

    /// Tunnel to `target` through `hops`, in order.
    ///
    /// On success the returned stream is a transparent byte pipe to the
    /// target. On failure the connection, if one was opened, has been closed
    /// and the cause is wrapped in a `ChainSetup` error.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` without any I/O when `hops` is empty, a host is empty
    /// or the configuration is unusable; `ChainSetup` for everything else.
    pub async fn connect(&self, hops: &[ProxyHop], target: &Target) -> Result<D::Stream> {
        self.config.validate()?;
        let first = check_chain(hops, target)?;
        let limit = self.config.timeout;

        tracing::debug!(
            target: "chainsock::connect",
            proxy = %first,
            hops = hops.len(),
            destination = %target,
            "opening proxy chain"
        );

        let dialed = time::timeout(limit, self.dialer.dial(&first.host, first.port)).await;
        let mut stream = match dialed {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                let cause = error::connect(std::io::Error::new(
                    e.kind(),
                    format!("{}: {e}", first.authority()),
                ));
                return Err(fail(cause));
            }
            Err(_) => {
                let cause = error::timeout(format!("connect to {}", first.authority()), limit);
                return Err(fail(cause));
            }
        };

        match self.walk(&mut stream, hops, target).await {
            Ok(()) => {
                tracing::info!(
                    target: "chainsock::connect",
                    proxy = %first,
                    hops = hops.len(),
                    destination = %target,
                    "proxy chain established"
                );
                Ok(stream)
            }
            Err(cause) => {
                io::close_quietly(&mut stream, limit).await;
                drop(stream);
                Err(fail(cause))
            }
        }
    }

    async fn walk(&self, stream: &mut D::Stream, hops: &[ProxyHop], target: &Target) -> Result<()> {
        let first = &hops[0];
        let limit = self.config.timeout;

        if first.protocol == ProxyProtocol::Socks5 {
            socks5_auth::negotiate(stream, first, limit).await?;
        }

        let mut current = first.protocol;

        for step in plan(hops, target) {
            let destination = step.destination();
            tracing::debug!(
                target: "chainsock::connect",
                proxy = %step.via,
                protocol = %current,
                destination = %destination,
                "sending CONNECT"
            );

            // Only the first proxy's credentials are ever used.
            let auth = match current {
                ProxyProtocol::Http | ProxyProtocol::Socks4 => first.credentials(),
                ProxyProtocol::Socks5 => None,
            };
            let request = packet::build_connect(current, step.host, step.port, auth)?;

            let what = format!("CONNECT to {destination} via {}", step.via.authority());
            io::write_all(stream, &request, limit, &what).await?;

            let reply = io::read_some(stream, self.config.read_buffer_size, limit, &what).await?;
            if reply.is_empty() {
                return Err(error::connection_closed(step.via.authority(), destination));
            }

            if !response::is_success(current, &reply) {
                return Err(error::handshake(format!(
                    "{current} proxy {} refused tunnel to {destination} with {}",
                    step.via.authority(),
                    response::describe(current, &reply)
                )));
            }

            if let Some(next) = step.protocol {
                current = next;
            }
        }

        Ok(())
    }
}

fn check_chain<'a>(hops: &'a [ProxyHop], target: &Target) -> Result<&'a ProxyHop> {
    let Some(first) = hops.first() else {
        return Err(error::invalid_argument("proxy chain must contain at least one proxy"));
    };
    if let Some(hop) = hops.iter().find(|hop| hop.host.is_empty()) {
        return Err(error::invalid_argument(format!("{} proxy has an empty host", hop.protocol)));
    }
    if target.host.is_empty() {
        return Err(error::invalid_argument("target host is empty"));
    }
    Ok(first)
}

fn fail(cause: Error) -> Error {
    tracing::warn!(target: "chainsock::connect", error = %cause, "proxy chain setup failed");
    error::chain_setup(cause)
}
