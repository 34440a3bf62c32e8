//! Blocking resolve: one query out, every decodable response back.
//!
//! [`Resolver`] drives a [`Discovery`] scan over a [`Transport`]: it builds
//! the query, opens the socket, sends, listens for the scan duration and
//! decodes what came back. Malformed datagrams are dropped and reported to
//! the [`DiagnosticSink`]; socket errors end the call and are reported too.
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! let responses = zeroconf_mdns::resolve("_http._tcp.local", Duration::from_secs(3))?;
//! for response in &responses {
//!     println!("{response}");
//! }
//! # Ok::<(), zeroconf_mdns::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use sansio::Protocol;
use shared::error::{Error, Result};

use crate::cancel::CancelToken;
use crate::config::DiscoveryConfig;
use crate::message::response::ServiceResponse;
use crate::proto::{Discovery, DiscoveryEvent};
use crate::transport::Transport;

/// Severity of a diagnostic.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    /// A datagram was dropped, the scan goes on.
    Warning,
    /// A socket error ended the scan.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Receives diagnostics raised while resolving.
///
/// Emitting never changes control flow: a warning does not stop the scan and
/// an error is returned to the caller regardless of what the sink does.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, severity: Severity, message: &str);
}

/// The default sink, forwarding to the `log` facade.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn emit(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning => log::warn!("{message}"),
            Severity::Error => log::error!("{message}"),
        }
    }
}

/// Resolves service names with a fixed configuration.
#[derive(Clone)]
pub struct Resolver {
    config: DiscoveryConfig,
    sink: Arc<dyn DiagnosticSink>,
    cancel: CancelToken,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self {
            config,
            sink: Arc::new(LogSink),
            cancel: CancelToken::new(),
        }
    }

    /// Replaces the default [`LogSink`].
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Uses `cancel` to stop scans early. Keep a clone to trigger it.
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Queries for `service_name` and returns the responses that decoded.
    ///
    /// Blocks for up to the configured scan duration. Fails before any
    /// socket is opened when the name cannot be sent or the cancel token is
    /// already set. Socket setup, send, wait and receive failures end the
    /// call with the matching error. An empty list means nobody answered in
    /// time, or only with malformed datagrams.
    pub fn resolve(&self, service_name: &str) -> Result<Vec<ServiceResponse>> {
        if self.cancel.is_cancelled() {
            return Err(Error::ErrCancelled);
        }

        let mut discovery = Discovery::new(self.config.clone(), service_name)?;

        let transport = Transport::open(&self.config).inspect_err(|err| self.report(err))?;
        discovery.start(Instant::now())?;
        while let Some(query) = discovery.poll_write() {
            transport.send(&query).inspect_err(|err| self.report(err))?;
        }
        let datagrams = transport
            .listen(self.config.scan_duration, &self.cancel)
            .inspect_err(|err| self.report(err))?;
        drop(transport);

        for datagram in datagrams {
            discovery.handle_read(datagram)?;
        }
        if let Some(deadline) = discovery.poll_timeout() {
            discovery.handle_timeout(deadline)?;
        }

        let mut responses = vec![];
        while let Some(event) = discovery.poll_event() {
            match event {
                DiscoveryEvent::ResponseReceived(response) => responses.push(response),
                DiscoveryEvent::ResponseDropped { peer_addr, error } => self.sink.emit(
                    Severity::Warning,
                    &format!("dropped malformed response from {peer_addr}: {error}"),
                ),
                DiscoveryEvent::ScanFinished => {
                    log::debug!(
                        "Scan for {service_name} finished with {} response(s)",
                        responses.len()
                    );
                }
            }
        }
        discovery.close()?;

        Ok(responses)
    }

    fn report(&self, err: &Error) {
        self.sink.emit(Severity::Error, &err.to_string());
    }
}

/// Resolves `service_name` with the default configuration and the given
/// scan duration.
pub fn resolve(service_name: &str, scan_duration: Duration) -> Result<Vec<ServiceResponse>> {
    Resolver::new(DiscoveryConfig::default().with_scan_duration(scan_duration))
        .resolve(service_name)
}
