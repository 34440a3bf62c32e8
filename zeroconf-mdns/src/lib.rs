//! # zeroconf-mdns
//!
//! Service discovery over UDP: send one DNS-style PTR query for a service
//! name such as `_http._tcp.local`, listen for a bounded scan window and
//! decode every response that comes back.
//!
//! ## Layers
//!
//! - **Wire format**: [`encode_name`], [`build_query`] and
//!   [`decode_response`] turn names into query datagrams and response
//!   datagrams into [`ServiceResponse`] values. Names inside responses use
//!   single byte back references (`0xC0 <index>`).
//! - **Sans-I/O scan**: [`Discovery`] implements [`sansio::Protocol`]. It
//!   produces the query datagram, decodes datagrams handed to it and emits
//!   [`DiscoveryEvent`]s, without touching a socket.
//! - **Blocking I/O**: [`Transport`] owns a broadcast UDP socket built by
//!   [`BroadcastSocket`], and [`Resolver`] drives a scan over it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use zeroconf_mdns::{DiscoveryConfig, Resolver};
//!
//! let resolver = Resolver::new(
//!     DiscoveryConfig::default().with_scan_duration(Duration::from_secs(2)),
//! );
//! for response in resolver.resolve("_http._tcp.local")? {
//!     println!("{response}");
//!     for record in &response.records {
//!         println!("  {record}");
//!     }
//! }
//! # Ok::<(), zeroconf_mdns::Error>(())
//! ```
//!
//! ## Event Loop Pattern
//!
//! Callers with their own I/O drive [`Discovery`] directly:
//!
//! ```text
//! scan.start(now);
//! while let Some(packet) = scan.poll_write() {
//!     socket.send_to(&packet.message, packet.transport.peer_addr);
//! }
//! loop {
//!     select! {
//!         packet = socket.recv_from() => scan.handle_read(packet),
//!         _ = sleep_until(scan.poll_timeout()) => scan.handle_timeout(now),
//!     }
//!     while let Some(event) = scan.poll_event() {
//!         match event {
//!             DiscoveryEvent::ResponseReceived(response) => { /* use it */ }
//!             DiscoveryEvent::ResponseDropped { .. } => { /* malformed */ }
//!             DiscoveryEvent::ScanFinished => return,
//!         }
//!     }
//! }
//! ```
//!
//! ## Protocol Details
//!
//! - **Destination**: 255.255.255.255:5353 by default
//! - **Query**: id 0, flags 0, one question, PTR/IN
//! - **Accepted responses**: flags exactly 0x8400 (response, authoritative)
//! - **Datagram size**: 512 bytes

#![warn(rust_2018_idioms)]

pub(crate) mod cancel;
pub(crate) mod config;
pub(crate) mod message;
pub(crate) mod proto;
pub(crate) mod resolver;
pub(crate) mod socket;
pub(crate) mod transport;

pub use cancel::CancelToken;
pub use config::DiscoveryConfig;
pub use message::builder::build_query;
pub use message::name::{Name, encode_name};
pub use message::response::{AnswerRecord, ServiceResponse, decode_response};
pub use message::{DNSCLASS_INET, DnsClass, DnsType};
pub use proto::{Discovery, DiscoveryEvent, MDNS_BROADCAST_IPV4, MDNS_DEST_ADDR, MDNS_PORT};
pub use resolver::{DiagnosticSink, LogSink, Resolver, Severity, resolve};
pub use shared::error::{Error, Result};
pub use socket::BroadcastSocket;
pub use transport::Transport;
