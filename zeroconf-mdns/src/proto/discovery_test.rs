use super::*;
use sansio::Protocol;
use std::time::Duration;

// _http._tcp.local PTR answer carrying one A record named through the
// question.
#[rustfmt::skip]
const RESPONSE: [u8; 46] = [
    0x00, 0x00, 0x84, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x05, b'_', b'h', b't', b't', b'p',
    0x04, b'_', b't', b'c', b'p',
    0x05, b'l', b'o', b'c', b'a', b'l',
    0x00,
    0x00, 0x0c, 0x00, 0x01,
    0xc0, 0x0c,
    0x00, 0x01, 0x80, 0x01, 0x00, 0x00, 0x00, 0x78, 0x00, 0x00,
];

fn peer() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::new(192, 168, 1, 20)), MDNS_PORT)
}

fn datagram(now: Instant, data: &[u8]) -> TaggedBytesMut {
    TaggedBytesMut {
        now,
        transport: TransportContext {
            local_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 40000),
            peer_addr: peer(),
            transport_protocol: TransportProtocol::UDP,
        },
        message: BytesMut::from(data),
    }
}

fn started(scan_duration: Duration) -> (Discovery, Instant) {
    let config = DiscoveryConfig::default().with_scan_duration(scan_duration);
    let mut scan = Discovery::new(config, "_http._tcp.local").unwrap();
    let now = Instant::now();
    scan.start(now).unwrap();
    (scan, now)
}

#[test]
fn test_discovery_queues_query() {
    let (mut scan, now) = started(Duration::from_secs(3));

    let packet = scan.poll_write().unwrap();
    assert_eq!(packet.transport.peer_addr, MDNS_DEST_ADDR);
    assert_eq!(packet.now, now);
    assert_eq!(&packet.message[..], &build_query("_http._tcp.local").unwrap()[..]);
    assert!(scan.poll_write().is_none());

    // A second start is a no-op.
    scan.start(now).unwrap();
    assert!(scan.poll_write().is_none());
}

#[test]
fn test_discovery_custom_destination() {
    let dest: SocketAddr = "127.0.0.1:15353".parse().unwrap();
    let config = DiscoveryConfig::default().with_dest_addr(dest);
    let mut scan = Discovery::new(config, "_ipp._tcp.local").unwrap();
    scan.start(Instant::now()).unwrap();

    assert_eq!(scan.poll_write().unwrap().transport.peer_addr, dest);
    assert_eq!(scan.service_name(), "_ipp._tcp.local");
    assert_eq!(scan.config().dest_addr, dest);
}

#[test]
fn test_discovery_rejects_unsendable_name() {
    let result = Discovery::new(DiscoveryConfig::default(), &"a".repeat(256));
    assert!(matches!(result, Err(Error::ErrLabelTooLong(256))));
}

#[test]
fn test_discovery_nothing_before_start() {
    let mut scan = Discovery::new(DiscoveryConfig::default(), "_http._tcp.local").unwrap();
    assert!(scan.poll_write().is_none());
    assert!(scan.poll_timeout().is_none());

    scan.handle_timeout(Instant::now() + Duration::from_secs(60))
        .unwrap();
    assert!(scan.poll_event().is_none());
    assert!(!scan.is_finished());
}

#[test]
fn test_discovery_response_received() {
    let (mut scan, now) = started(Duration::from_secs(3));
    scan.handle_read(datagram(now, &RESPONSE)).unwrap();

    match scan.poll_event() {
        Some(DiscoveryEvent::ResponseReceived(response)) => {
            assert_eq!(response.peer_addr, peer());
            assert_eq!(response.query_name, "_http._tcp.local");
            assert_eq!(response.query_type, 12);
            assert_eq!(response.records.len(), 1);
            assert_eq!(response.records[0].record_type, 1);
            assert_eq!(response.records[0].name, "_http");
        }
        other => panic!("expected a response, got {other:?}"),
    }
    assert!(scan.poll_event().is_none());
}

#[test]
fn test_discovery_response_dropped() {
    let (mut scan, now) = started(Duration::from_secs(3));

    let mut bad_flags = RESPONSE;
    bad_flags[2] = 0x85;
    scan.handle_read(datagram(now, &bad_flags)).unwrap();
    scan.handle_read(datagram(now, &RESPONSE[..RESPONSE.len() - 1]))
        .unwrap();
    scan.handle_read(datagram(now, &RESPONSE)).unwrap();

    match scan.poll_event() {
        Some(DiscoveryEvent::ResponseDropped { peer_addr, error }) => {
            assert_eq!(peer_addr, peer());
            assert_eq!(error, Error::ErrUnexpectedFlags(0x8500));
        }
        other => panic!("expected a drop, got {other:?}"),
    }
    match scan.poll_event() {
        Some(DiscoveryEvent::ResponseDropped { error, .. }) => assert!(error.is_malformed()),
        other => panic!("expected a drop, got {other:?}"),
    }
    assert!(matches!(
        scan.poll_event(),
        Some(DiscoveryEvent::ResponseReceived(_))
    ));
}

#[test]
fn test_discovery_scan_finished() {
    let (mut scan, now) = started(Duration::from_secs(3));
    assert_eq!(scan.poll_timeout(), Some(now + Duration::from_secs(3)));

    // Not yet due.
    scan.handle_timeout(now + Duration::from_secs(1)).unwrap();
    assert!(scan.poll_event().is_none());
    assert!(!scan.is_finished());

    scan.handle_timeout(now + Duration::from_secs(3)).unwrap();
    assert!(matches!(scan.poll_event(), Some(DiscoveryEvent::ScanFinished)));
    assert!(scan.is_finished());
    assert!(scan.poll_timeout().is_none());

    // Datagrams after the deadline are ignored.
    scan.handle_read(datagram(now, &RESPONSE)).unwrap();
    assert!(scan.poll_event().is_none());

    // The deadline fires once.
    scan.handle_timeout(now + Duration::from_secs(10)).unwrap();
    assert!(scan.poll_event().is_none());
}

#[test]
fn test_discovery_zero_scan_duration() {
    let (mut scan, now) = started(Duration::ZERO);
    assert_eq!(scan.poll_timeout(), Some(now));
    scan.handle_timeout(now).unwrap();
    assert!(matches!(scan.poll_event(), Some(DiscoveryEvent::ScanFinished)));
}

#[test]
fn test_discovery_close() {
    let (mut scan, now) = started(Duration::from_secs(3));
    scan.handle_read(datagram(now, &RESPONSE)).unwrap();

    assert!(scan.close().is_ok());
    assert!(scan.poll_write().is_none());
    assert!(scan.poll_event().is_none());
    assert!(scan.poll_timeout().is_none());

    assert_eq!(
        scan.handle_read(datagram(now, &RESPONSE)),
        Err(Error::ErrConnectionClosed)
    );
    assert_eq!(scan.handle_timeout(now), Err(Error::ErrConnectionClosed));
    assert_eq!(scan.start(now), Err(Error::ErrConnectionClosed));

    // Closing twice is fine.
    assert!(scan.close().is_ok());
}
