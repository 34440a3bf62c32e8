//! Service Browse Example
//!
//! Broadcasts one PTR query for a service name and prints every response
//! received within the scan window. Ctrl-C ends the scan early and still
//! prints what arrived.
//!
//! # Usage
//!
//! ```
//! cargo run --package zeroconf-mdns --example browse -- --service _http._tcp.local
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use zeroconf_mdns::{CancelToken, DiscoveryConfig, DnsType, Resolver};

#[derive(Parser, Debug)]
#[command(name = "Service Browse")]
#[command(version = "0.1.0")]
#[command(about = "Browse for a DNS-SD service type over UDP broadcast")]
struct Args {
    /// Service name to query for
    #[arg(long, default_value = "_http._tcp.local")]
    service: String,

    /// Scan duration in seconds
    #[arg(long, default_value = "3")]
    timeout: u64,

    /// Destination of the query
    #[arg(long, default_value = "255.255.255.255:5353")]
    dest: String,

    /// Local bind address
    #[arg(long, default_value = "0.0.0.0:0")]
    bind: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let dest: SocketAddr = args.dest.parse()?;
    let bind: SocketAddr = args.bind.parse()?;

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    ctrlc::set_handler(move || {
        log::info!("Interrupted, finishing scan");
        on_interrupt.cancel();
    })?;

    let config = DiscoveryConfig::default()
        .with_scan_duration(Duration::from_secs(args.timeout))
        .with_dest_addr(dest)
        .with_bind_addr(bind);
    let resolver = Resolver::new(config).with_cancel_token(cancel);

    log::info!(
        "Browsing for '{}' via {} for {}s",
        args.service,
        dest,
        args.timeout
    );
    let responses = resolver.resolve(&args.service)?;

    if responses.is_empty() {
        log::info!("No responses");
    }
    for response in &responses {
        println!("{response}");
        for record in &response.records {
            println!("    {record}");
        }
        let hosts = response.records_of(DnsType::Srv).count();
        if hosts > 0 {
            println!("    {hosts} SRV record(s)");
        }
    }

    Ok(())
}
