use super::name::*;
use super::*;

#[test]
fn test_encode_empty() {
    for s in ["", ".", ".."] {
        assert_eq!(encode_name(s).unwrap(), vec![0x00], "{s:?}");
    }
}

#[test]
fn test_encode_one_part() {
    for s in ["foo", ".foo", "foo.", ".foo."] {
        assert_eq!(
            encode_name(s).unwrap(),
            vec![0x03, b'f', b'o', b'o', 0x00],
            "{s:?}"
        );
    }
}

#[test]
fn test_encode_multiple_parts() {
    for s in ["foo.bar", "foo..bar", ".foo.bar", "foo.bar.", ".foo.bar.", "..foo...bar.."] {
        assert_eq!(
            encode_name(s).unwrap(),
            vec![0x03, b'f', b'o', b'o', 0x03, b'b', b'a', b'r', 0x00],
            "{s:?}"
        );
    }
}

#[test]
fn test_encode_max_label_len() {
    let result = encode_name(&"a".repeat(255)).unwrap();
    assert_eq!(result.len(), 257);
    assert_eq!(result[0], 255);
    assert_eq!(result[256], 0);

    assert_eq!(
        encode_name(&"a".repeat(256)),
        Err(Error::ErrLabelTooLong(256))
    );
    assert_eq!(
        encode_name(&format!("foo.{}.local", "b".repeat(300))),
        Err(Error::ErrLabelTooLong(300))
    );
}

#[test]
fn test_encode_max_query_len() {
    // 12 byte header + name + 4 byte footer must fit in 512 bytes, leaving
    // 496 bytes for the encoded name.
    let fits = format!("{}.{}", "a".repeat(255), "b".repeat(238));
    assert_eq!(encode_name(&fits).unwrap().len(), 496);

    let too_long = format!("{}.{}", "a".repeat(255), "b".repeat(239));
    assert_eq!(encode_name(&too_long), Err(Error::ErrQueryTooLong(513)));
}

#[test]
fn test_name_new_collapses_separators() {
    assert_eq!(Name::new(".foo..bar.").unwrap().data, "foo.bar");
    assert_eq!(Name::new("..").unwrap().data, "");
    assert_eq!(Name::new("_http._tcp.local.").unwrap().packed_len(), 18);
    assert_eq!(Name::default().packed_len(), 1);
}

#[test]
fn test_round_trip() {
    let names = [
        "foo".to_owned(),
        "foo.bar".to_owned(),
        "_http._tcp.local".to_owned(),
        "apple macbook._http._tcp.local".to_owned(),
        "a".repeat(255),
        format!("{}.{}", "x".repeat(200), "y".repeat(200)),
    ];
    for name in names {
        let encoded = encode_name(&name).unwrap();
        let (decoded, end) = Name::unpack(&encoded, 0).unwrap();
        assert_eq!(decoded.data, name);
        assert_eq!(end, encoded.len());
    }

    for (dotted, canonical) in [("foo.", "foo"), (".foo", "foo"), (".foo.", "foo"), ("a..b", "a.b")] {
        let encoded = encode_name(dotted).unwrap();
        let (decoded, _) = Name::unpack(&encoded, 0).unwrap();
        assert_eq!(decoded.data, canonical);
    }
}

#[test]
fn test_unpack_at_offset() {
    let msg = [0xff, 0xff, 0x03, b'f', b'o', b'o', 0x00, 0xaa];
    let (name, end) = Name::unpack(&msg, 2).unwrap();
    assert_eq!(name.data, "foo");
    assert_eq!(end, 7);
}

#[test]
fn test_unpack_truncated() {
    let encoded = encode_name("foo.bar").unwrap();
    for n in 0..encoded.len() {
        assert!(
            matches!(
                Name::unpack(&encoded[..n], 0),
                Err(Error::ErrUnexpectedEnd { .. })
            ),
            "prefix of {n} bytes"
        );
    }

    // Length byte pointing past the end.
    let msg = [0x05, b'a', b'b', 0x00];
    assert_eq!(
        Name::unpack(&msg, 0),
        Err(Error::ErrUnexpectedEnd {
            offset: 1,
            wanted: 5
        })
    );
}

#[test]
fn test_resolve_pointer() {
    //  0     1     2     3     4     5     6     7     8     9     10    11
    //  len   f     o     o     len   b     a     r     0     tok   idx
    let msg = [
        0x03, b'f', b'o', b'o', 0x03, b'b', b'a', b'r', 0x00, 0xc0, 0x00, 0xc0, 0x04,
    ];
    // Only the label at the index, not the rest of the name.
    assert_eq!(Name::resolve_pointer(&msg, 9).unwrap().data, "foo");
    assert_eq!(Name::resolve_pointer(&msg, 11).unwrap().data, "bar");

    // A zero length byte at the index is the empty name.
    let msg = [0x00, 0xc0, 0x00];
    assert_eq!(Name::resolve_pointer(&msg, 1).unwrap().data, "");
}

#[test]
fn test_resolve_pointer_single_label() {
    //  0     1..5                6     7     8     9
    //  len   "apple"             tok   idx   tok   idx
    let msg = [
        0x05, b'a', b'p', b'p', b'l', b'e', 0xc0, 0x00, 0xc0, 0x00,
    ];
    assert_eq!(Name::resolve_pointer(&msg, 8).unwrap().data, "apple");

    // "apple macbook" followed by a pointer to _http: the pointer after the
    // label is never read.
    let mut msg = vec![0x05, b'_', b'h', b't', b't', b'p', 0x00];
    msg.push(13);
    msg.extend_from_slice(b"apple macbook");
    msg.extend_from_slice(&[0xc0, 0x00, 0xc0, 0x07]);
    assert_eq!(
        Name::resolve_pointer(&msg, msg.len() - 2).unwrap().data,
        "apple macbook"
    );

    // A pointer that targets another pointer is rejected.
    let msg = [0xc0, 0x00, 0xc0, 0x00];
    assert!(matches!(
        Name::resolve_pointer(&msg, 2),
        Err(Error::ErrBadCompressionPointer { index: 0, len: 4 })
    ));
}

#[test]
fn test_resolve_pointer_bad_token() {
    let msg = [0x03, b'f', b'o', b'o', 0x00, 0x00, 0x00];
    assert_eq!(
        Name::resolve_pointer(&msg, 5),
        Err(Error::ErrBadCompressionToken {
            offset: 5,
            found: 0x00
        })
    );
}

#[test]
fn test_resolve_pointer_out_of_range() {
    // Index beyond the datagram.
    let msg = [0x00, 0xc0, 0x10];
    assert_eq!(
        Name::resolve_pointer(&msg, 1),
        Err(Error::ErrBadCompressionPointer { index: 16, len: 3 })
    );

    // Index in range, but the label length found there runs past the end.
    let msg = [0x00, 0x20, b'a', 0xc0, 0x01];
    assert_eq!(
        Name::resolve_pointer(&msg, 3),
        Err(Error::ErrBadCompressionPointer { index: 1, len: 5 })
    );

    // Label exactly reaching the end of the datagram is accepted.
    let msg = [0xc0, 0x02, 0x02, b'a', b'b'];
    assert_eq!(Name::resolve_pointer(&msg, 0).unwrap().data, "ab");

    // Token without its index byte.
    let msg = [0x00, 0xc0];
    assert!(matches!(
        Name::resolve_pointer(&msg, 1),
        Err(Error::ErrUnexpectedEnd { .. })
    ));
}
