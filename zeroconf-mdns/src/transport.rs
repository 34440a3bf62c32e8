//! Blocking UDP transport for a discovery scan.
//!
//! [`Transport`] owns one broadcast-capable socket for the lifetime of a
//! scan. It sends the query datagram and then collects every datagram that
//! arrives within the scan window, tagged with its sender. The socket is
//! closed when the transport is dropped.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::time::{Duration, Instant};

use bytes::BytesMut;
use shared::error::{Error, Result};
use shared::{TaggedBytesMut, TransportContext, TransportMessage, TransportProtocol};

use crate::cancel::CancelToken;
use crate::config::DiscoveryConfig;
use crate::message::MAX_MESSAGE_LEN;
use crate::socket::BroadcastSocket;

/// A broadcast UDP socket plus the limits it listens with.
#[derive(Debug)]
pub struct Transport {
    socket: UdpSocket,
    local_addr: SocketAddr,
    max_datagram_len: usize,
    wait_slice: Duration,
}

impl Transport {
    /// Opens a socket bound to `config.bind_addr` with broadcast enabled.
    ///
    /// Any failure is returned as [`Error::ErrSocketSetup`].
    pub fn open(config: &DiscoveryConfig) -> Result<Self> {
        let wait_slice = config.effective_wait_slice();
        let socket = BroadcastSocket::new()
            .with_bind_addr(config.bind_addr)
            .with_read_timeout(wait_slice)
            .into_std()
            .map_err(Error::socket_setup)?;
        let local_addr = socket.local_addr().map_err(Error::socket_setup)?;
        log::debug!("Opened discovery socket on {local_addr}");

        Ok(Self {
            socket,
            local_addr,
            max_datagram_len: config.max_datagram_len.min(MAX_MESSAGE_LEN),
            wait_slice,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Sends `msg` to its peer address.
    ///
    /// A short write is logged and otherwise ignored; only an OS error
    /// fails, as [`Error::ErrSend`].
    pub fn send(&self, msg: &TaggedBytesMut) -> Result<()> {
        let peer_addr = msg.transport.peer_addr;
        let n = self
            .socket
            .send_to(&msg.message, peer_addr)
            .map_err(Error::send)?;
        if n < msg.message.len() {
            log::warn!(
                "Short send to {peer_addr}: {n} of {} bytes",
                msg.message.len()
            );
        } else {
            log::trace!("Sent {n} bytes to {peer_addr}");
        }
        Ok(())
    }

    /// Collects datagrams until `duration` has elapsed or `cancel` is set.
    ///
    /// Each wait is bounded by the smaller of the remaining budget and the
    /// configured wait slice, and the budget is recomputed from the clock
    /// after every wake. Cancellation ends the listen early with what was
    /// collected so far. A failure to arm the wait is returned as
    /// [`Error::ErrWait`], a failed read as [`Error::ErrReceive`].
    pub fn listen(&self, duration: Duration, cancel: &CancelToken) -> Result<Vec<TaggedBytesMut>> {
        let start = Instant::now();
        let mut buf = vec![0u8; self.max_datagram_len];
        let mut datagrams = vec![];

        loop {
            if cancel.is_cancelled() {
                log::debug!(
                    "Listen cancelled after {:?} with {} datagram(s)",
                    start.elapsed(),
                    datagrams.len()
                );
                break;
            }

            let elapsed = start.elapsed();
            if elapsed >= duration {
                break;
            }
            let wait = (duration - elapsed).min(self.wait_slice);
            self.socket
                .set_read_timeout(Some(wait))
                .map_err(Error::wait)?;

            match self.socket.recv_from(&mut buf) {
                Ok((n, peer_addr)) => {
                    log::trace!("Received {n} bytes from {peer_addr}");
                    datagrams.push(TransportMessage {
                        now: Instant::now(),
                        transport: TransportContext {
                            local_addr: self.local_addr,
                            peer_addr,
                            transport_protocol: TransportProtocol::UDP,
                        },
                        message: BytesMut::from(&buf[..n]),
                    });
                }
                Err(err) if is_spurious_wake(&err) => continue,
                Err(err) => return Err(Error::receive(err)),
            }
        }

        Ok(datagrams)
    }
}

// A read timeout surfaces as WouldBlock on Unix and TimedOut on Windows.
fn is_spurious_wake(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut | io::ErrorKind::Interrupted
    )
}
