//! Configuration for a discovery scan.
//!
//! [`DiscoveryConfig`] carries everything a scan needs besides the service
//! name: how long to listen, where the query goes and how the socket is set
//! up.
//!
//! # Examples
//!
//! A short scan on the default broadcast destination:
//!
//! ```rust
//! use zeroconf_mdns::DiscoveryConfig;
//! use std::time::Duration;
//!
//! let config = DiscoveryConfig::default()
//!     .with_scan_duration(Duration::from_secs(1));
//! ```
//!
//! Sending the query to a single responder instead of broadcasting it:
//!
//! ```rust
//! use zeroconf_mdns::DiscoveryConfig;
//! use std::net::{IpAddr, Ipv4Addr, SocketAddr};
//!
//! let config = DiscoveryConfig::default()
//!     .with_dest_addr(SocketAddr::new(
//!         IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)),
//!         5353,
//!     ));
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use crate::message::MAX_MESSAGE_LEN;
use crate::proto::MDNS_DEST_ADDR;

/// Default time to listen for responses after the query is sent (3 seconds).
pub(crate) const DEFAULT_SCAN_DURATION: Duration = Duration::from_secs(3);

/// Default upper bound of a single wait (100 milliseconds).
///
/// The listen loop never blocks longer than this between two checks of the
/// cancellation token.
pub(crate) const DEFAULT_WAIT_SLICE: Duration = Duration::from_millis(100);

/// Default local address: any interface, ephemeral port.
pub(crate) const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0);

/// Configuration of a discovery scan.
///
/// Use the builder methods to override the defaults:
///
/// ```rust
/// use zeroconf_mdns::DiscoveryConfig;
/// use std::time::Duration;
///
/// let config = DiscoveryConfig::new()
///     .with_scan_duration(Duration::from_millis(1500))
///     .with_wait_slice(Duration::from_millis(50));
/// assert_eq!(config.max_datagram_len, 512);
/// ```
///
/// # Fields
///
/// - `scan_duration`: how long to collect responses (default: 3 seconds)
/// - `dest_addr`: where the query is sent (default: `255.255.255.255:5353`)
/// - `bind_addr`: local address of the socket (default: `0.0.0.0:0`)
/// - `max_datagram_len`: receive buffer size (default and maximum: 512 bytes)
/// - `wait_slice`: longest single wait (default: 100 milliseconds)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// How long to listen for responses once the query is out.
    ///
    /// A zero duration sends the query and returns without waiting.
    pub scan_duration: Duration,

    /// Destination of the query datagram.
    ///
    /// Default: the limited broadcast address on port 5353.
    pub dest_addr: SocketAddr,

    /// Local address the socket binds to.
    pub bind_addr: SocketAddr,

    /// Size of the receive buffer, at most 512 bytes. Longer datagrams are
    /// truncated by the operating system and then fail to decode.
    pub max_datagram_len: usize,

    /// Longest single wait for readability.
    ///
    /// A zero value falls back to the default.
    pub wait_slice: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            scan_duration: DEFAULT_SCAN_DURATION,
            dest_addr: MDNS_DEST_ADDR,
            bind_addr: DEFAULT_BIND_ADDR,
            max_datagram_len: MAX_MESSAGE_LEN,
            wait_slice: DEFAULT_WAIT_SLICE,
        }
    }
}

impl DiscoveryConfig {
    /// Create a new configuration with default values.
    ///
    /// Equivalent to [`DiscoveryConfig::default()`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how long to listen for responses.
    ///
    /// ```rust
    /// use zeroconf_mdns::DiscoveryConfig;
    /// use std::time::Duration;
    ///
    /// let config = DiscoveryConfig::default()
    ///     .with_scan_duration(Duration::from_secs(10));
    /// assert_eq!(config.scan_duration, Duration::from_secs(10));
    /// ```
    pub fn with_scan_duration(mut self, scan_duration: Duration) -> Self {
        self.scan_duration = scan_duration;
        self
    }

    /// Set the destination of the query datagram.
    pub fn with_dest_addr(mut self, dest_addr: SocketAddr) -> Self {
        self.dest_addr = dest_addr;
        self
    }

    /// Set the local address to bind to.
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Set the receive buffer size, capped at the 512 byte message limit.
    /// Bytes of a longer datagram past the buffer are discarded by the
    /// receive call.
    pub fn with_max_datagram_len(mut self, max_datagram_len: usize) -> Self {
        self.max_datagram_len = max_datagram_len.min(MAX_MESSAGE_LEN);
        self
    }

    /// Set the longest single wait between cancellation checks.
    pub fn with_wait_slice(mut self, wait_slice: Duration) -> Self {
        self.wait_slice = wait_slice;
        self
    }

    // effective_wait_slice is wait_slice with zero mapped to the default.
    pub(crate) fn effective_wait_slice(&self) -> Duration {
        if self.wait_slice == Duration::ZERO {
            DEFAULT_WAIT_SLICE
        } else {
            self.wait_slice
        }
    }
}
