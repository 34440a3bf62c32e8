//! Sans-I/O discovery scan.
//!
//! [`Discovery`] holds the protocol side of one scan: the query to send, the
//! scan deadline and the decoding of every datagram that comes back. It does
//! no I/O itself. The caller:
//!
//! 1. Sends the datagrams returned by `poll_write()`
//! 2. Feeds received datagrams to `handle_read()`
//! 3. Calls `handle_timeout()` once `poll_timeout()` has passed
//! 4. Drains `poll_event()`
//!
//! # Example
//!
//! ```rust
//! use zeroconf_mdns::{Discovery, DiscoveryConfig, DiscoveryEvent, MDNS_DEST_ADDR};
//! use sansio::Protocol;
//! use std::time::Instant;
//!
//! let mut scan = Discovery::new(DiscoveryConfig::default(), "_http._tcp.local").unwrap();
//! let now = Instant::now();
//! scan.start(now).unwrap();
//!
//! let query = scan.poll_write().unwrap();
//! assert_eq!(query.transport.peer_addr, MDNS_DEST_ADDR);
//!
//! let deadline = scan.poll_timeout().unwrap();
//! scan.handle_timeout(deadline).unwrap();
//! assert!(matches!(scan.poll_event(), Some(DiscoveryEvent::ScanFinished)));
//! ```

#[cfg(test)]
mod discovery_test;

use std::collections::VecDeque;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Instant;

use bytes::BytesMut;
use shared::error::{Error, Result};
use shared::{TaggedBytesMut, TransportContext, TransportMessage, TransportProtocol};

use crate::config::DiscoveryConfig;
use crate::message::builder::build_query;
use crate::message::response::{ServiceResponse, decode_response};

/// Destination address of discovery queries: the limited broadcast address.
pub const MDNS_BROADCAST_IPV4: Ipv4Addr = Ipv4Addr::BROADCAST;

/// Standard mDNS port.
pub const MDNS_PORT: u16 = 5353;

/// Default destination of discovery queries (`255.255.255.255:5353`).
pub const MDNS_DEST_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(MDNS_BROADCAST_IPV4), MDNS_PORT);

/// Events emitted by [`Discovery`].
#[derive(Debug)]
pub enum DiscoveryEvent {
    /// A datagram decoded into a response.
    ResponseReceived(ServiceResponse),

    /// A datagram failed to decode and was dropped.
    ResponseDropped {
        /// Sender of the dropped datagram.
        peer_addr: SocketAddr,
        /// Why it was dropped.
        error: Error,
    },

    /// The scan deadline passed. Later datagrams are ignored.
    ScanFinished,
}

/// One discovery scan, without I/O.
pub struct Discovery {
    config: DiscoveryConfig,

    service_name: String,

    query: Vec<u8>,

    deadline: Option<Instant>,

    write_outs: VecDeque<TaggedBytesMut>,

    event_outs: VecDeque<DiscoveryEvent>,

    started: bool,

    finished: bool,

    closed: bool,
}

impl Discovery {
    /// Creates a scan for `service_name`.
    ///
    /// The query is built here, so a name that cannot be sent is rejected
    /// before the caller opens any socket.
    pub fn new(config: DiscoveryConfig, service_name: &str) -> Result<Self> {
        let query = build_query(service_name)?;

        Ok(Self {
            config,
            service_name: service_name.to_owned(),
            query,
            deadline: None,
            write_outs: VecDeque::new(),
            event_outs: VecDeque::new(),
            started: false,
            finished: false,
            closed: false,
        })
    }

    /// Queues the query datagram and arms the scan deadline.
    ///
    /// Starting an already started scan does nothing.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.closed {
            return Err(Error::ErrConnectionClosed);
        }
        if self.started {
            return Ok(());
        }
        self.started = true;

        log::trace!(
            "Queuing discovery query for {} to {}",
            self.service_name,
            self.config.dest_addr
        );
        self.write_outs.push_back(TransportMessage {
            now,
            transport: TransportContext {
                local_addr: self.config.bind_addr,
                peer_addr: self.config.dest_addr,
                transport_protocol: TransportProtocol::UDP,
            },
            message: BytesMut::from(&self.query[..]),
        });
        self.deadline = Some(now + self.config.scan_duration);
        Ok(())
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Reports whether the scan deadline has been handled.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    fn process_datagram(&mut self, msg: &TaggedBytesMut) {
        match decode_response(msg) {
            Ok(response) => {
                log::debug!("Received {response}");
                self.event_outs
                    .push_back(DiscoveryEvent::ResponseReceived(response));
            }
            Err(error) => {
                log::debug!(
                    "Dropping datagram of {} bytes from {}: {error}",
                    msg.message.len(),
                    msg.transport.peer_addr
                );
                self.event_outs.push_back(DiscoveryEvent::ResponseDropped {
                    peer_addr: msg.transport.peer_addr,
                    error,
                });
            }
        }
    }
}

impl sansio::Protocol<TaggedBytesMut, (), ()> for Discovery {
    type Rout = ();
    type Wout = TaggedBytesMut;
    type Eout = DiscoveryEvent;
    type Error = Error;
    type Time = Instant;

    fn handle_read(&mut self, msg: TaggedBytesMut) -> Result<()> {
        if self.closed {
            return Err(Error::ErrConnectionClosed);
        }
        if self.finished {
            log::trace!(
                "Ignoring datagram from {} after the scan finished",
                msg.transport.peer_addr
            );
            return Ok(());
        }
        self.process_datagram(&msg);
        Ok(())
    }

    fn poll_read(&mut self) -> Option<Self::Rout> {
        None
    }

    fn handle_write(&mut self, _msg: ()) -> Result<()> {
        Ok(())
    }

    fn poll_write(&mut self) -> Option<Self::Wout> {
        self.write_outs.pop_front()
    }

    fn handle_event(&mut self, _evt: ()) -> Result<()> {
        Ok(())
    }

    fn poll_event(&mut self) -> Option<Self::Eout> {
        self.event_outs.pop_front()
    }

    fn handle_timeout(&mut self, now: Self::Time) -> Result<()> {
        if self.closed {
            return Err(Error::ErrConnectionClosed);
        }

        if let Some(deadline) = self.deadline
            && deadline <= now
        {
            log::debug!(
                "Scan for {} finished after {:?}",
                self.service_name,
                self.config.scan_duration
            );
            self.finished = true;
            self.deadline = None;
            self.event_outs.push_back(DiscoveryEvent::ScanFinished);
        }
        Ok(())
    }

    fn poll_timeout(&mut self) -> Option<Self::Time> {
        self.deadline
    }

    fn close(&mut self) -> Result<()> {
        self.closed = true;
        self.write_outs.clear();
        self.event_outs.clear();
        self.deadline = None;
        Ok(())
    }
}
