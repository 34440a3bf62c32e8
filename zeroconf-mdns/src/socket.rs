//! Socket utilities for discovery.
//!
//! This module provides [`BroadcastSocket`], a builder for UDP sockets that
//! may send to the limited broadcast address.
//!
//! # Example
//!
//! ```rust,no_run
//! use zeroconf_mdns::BroadcastSocket;
//! use std::time::Duration;
//!
//! let socket = BroadcastSocket::new()
//!     .with_read_timeout(Duration::from_millis(100))
//!     .into_std()?;
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::DEFAULT_BIND_ADDR;

/// A builder for UDP sockets with `SO_BROADCAST` enabled.
///
/// The resulting socket is:
///
/// - Bound to the configured address (default `0.0.0.0:0`)
/// - Allowed to send to broadcast addresses
/// - In blocking mode, so reads wait up to the read timeout
#[derive(Debug, Clone)]
pub struct BroadcastSocket {
    bind_addr: SocketAddr,
    read_timeout: Option<Duration>,
}

impl Default for BroadcastSocket {
    fn default() -> Self {
        Self::new()
    }
}

impl BroadcastSocket {
    /// Creates a builder that binds to any interface on an ephemeral port.
    ///
    /// ```rust
    /// use zeroconf_mdns::BroadcastSocket;
    ///
    /// let builder = BroadcastSocket::new();
    /// ```
    pub fn new() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR,
            read_timeout: None,
        }
    }

    /// Sets the local address to bind to.
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Sets the initial read timeout. Without one, reads block until a
    /// datagram arrives.
    pub fn with_read_timeout(mut self, read_timeout: Duration) -> Self {
        self.read_timeout = Some(read_timeout);
        self
    }

    /// Converts this builder into a configured `std::net::UdpSocket`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Socket creation fails
    /// - Setting socket options fails
    /// - Binding to the address fails
    pub fn into_std(self) -> io::Result<UdpSocket> {
        let domain = match self.bind_addr {
            SocketAddr::V4(_) => Domain::IPV4,
            SocketAddr::V6(_) => Domain::IPV6,
        };
        let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;

        socket.set_broadcast(true)?;

        socket.set_nonblocking(false)?;
        if let Some(read_timeout) = self.read_timeout {
            socket.set_read_timeout(Some(read_timeout))?;
        }

        socket.bind(&self.bind_addr.into())?;

        Ok(socket.into())
    }
}
