use bytes::BytesMut;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Instant;

/// Type of transport protocol a datagram travelled over
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransportProtocol {
    /// UDP
    #[default]
    UDP,
}

/// Addressing of one datagram: where it was received (or sent from) and the remote end.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TransportContext {
    /// Local socket address
    pub local_addr: SocketAddr,
    /// Remote socket address; for received datagrams, the sender
    pub peer_addr: SocketAddr,
    /// Type of transport protocol
    pub transport_protocol: TransportProtocol,
}

impl Default for TransportContext {
    fn default() -> Self {
        let unspecified = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);
        Self {
            local_addr: unspecified,
            peer_addr: unspecified,
            transport_protocol: TransportProtocol::UDP,
        }
    }
}

/// A message body tagged with its [TransportContext] and the time it was sent or received
#[derive(Debug, Clone)]
pub struct TransportMessage<T> {
    /// Received/Sent time
    pub now: Instant,
    /// Addressing of the message
    pub transport: TransportContext,
    /// Message body
    pub message: T,
}

/// A raw datagram tagged with its [TransportContext]
pub type TaggedBytesMut = TransportMessage<BytesMut>;
