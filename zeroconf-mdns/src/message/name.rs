use std::fmt;

use super::packer::*;
use super::*;

// MAX_LABEL_LEN is the longest component a single length byte can describe.
pub(crate) const MAX_LABEL_LEN: usize = 255;

/// A dotted domain name such as `_http._tcp.local`.
///
/// Empty components are dropped when a `Name` is built, so `"foo."`,
/// `".foo"`, `".foo."` and `"foo"` all produce the same name and the same
/// wire encoding. The root name is the empty string.
#[derive(Default, PartialEq, Eq, Debug, Clone, Hash)]
pub struct Name {
    pub data: String,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.data)
    }
}

impl Name {
    /// Creates a name from its dotted form.
    ///
    /// Fails with [`Error::ErrLabelTooLong`] when a component does not fit
    /// in a length byte.
    pub fn new(name: &str) -> Result<Self> {
        let labels: Vec<&str> = name.split('.').filter(|l| !l.is_empty()).collect();
        if let Some(label) = labels.iter().find(|l| l.len() > MAX_LABEL_LEN) {
            return Err(Error::ErrLabelTooLong(label.len()));
        }
        Ok(Name {
            data: labels.join("."),
        })
    }

    /// Returns the components of the name, left to right.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.data.split('.').filter(|l| !l.is_empty())
    }

    /// Length of the wire encoding, terminator included.
    pub fn packed_len(&self) -> usize {
        self.labels().map(|l| 1 + l.len()).sum::<usize>() + 1
    }

    // checked_query_len returns the length of a query carrying this name, or
    // ErrQueryTooLong when it would not fit in one message.
    pub(crate) fn checked_query_len(&self) -> Result<usize> {
        let query_len = HEADER_LEN + self.packed_len() + QUESTION_FOOTER_LEN;
        if query_len > MAX_MESSAGE_LEN {
            return Err(Error::ErrQueryTooLong(query_len));
        }
        Ok(query_len)
    }

    // pack appends the wire format of the name to msg: one length prefixed
    // component after the other, closed by a zero length byte.
    pub(crate) fn pack(&self, mut msg: Vec<u8>) -> Result<Vec<u8>> {
        for label in self.labels() {
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::ErrLabelTooLong(label.len()));
            }
            msg.push(label.len() as u8);
            msg.extend_from_slice(label.as_bytes());
        }
        msg.push(0);
        Ok(msg)
    }

    // unpack decodes the label sequence starting at off and returns the name
    // together with the offset just past its zero terminator. Every non-zero
    // byte in length position is taken as a length.
    pub(crate) fn unpack(msg: &[u8], mut off: usize) -> Result<(Name, usize)> {
        let mut labels: Vec<String> = Vec::new();
        loop {
            let (len, next) = unpack_uint8(msg, off)?;
            if len == 0 {
                off = next;
                break;
            }
            let (label, next) = unpack_bytes(msg, next, len as usize)?;
            labels.push(String::from_utf8_lossy(label).into_owned());
            off = next;
        }
        Ok((
            Name {
                data: labels.join("."),
            },
            off,
        ))
    }

    // resolve_pointer decodes the name referenced by the compression pointer
    // at off. The pointer is the COMPRESSION_TOKEN followed by a one byte
    // index into msg.
    //
    // Only the single label found at the index is taken. Whatever follows
    // it, further labels or another pointer, is not read.
    pub(crate) fn resolve_pointer(msg: &[u8], off: usize) -> Result<Name> {
        let (token, off) = unpack_uint8(msg, off)?;
        if token != COMPRESSION_TOKEN {
            return Err(Error::ErrBadCompressionToken {
                offset: off - 1,
                found: token,
            });
        }
        let (index, _) = unpack_uint8(msg, off)?;
        let index = index as usize;

        let bad_pointer = Error::ErrBadCompressionPointer {
            index,
            len: msg.len(),
        };
        let Some(&label_len) = msg.get(index) else {
            return Err(bad_pointer);
        };
        if label_len >= COMPRESSION_TOKEN || index + 1 + label_len as usize > msg.len() {
            return Err(bad_pointer);
        }

        let (label, _) = unpack_bytes(msg, index + 1, label_len as usize)?;
        Ok(Name {
            data: String::from_utf8_lossy(label).into_owned(),
        })
    }
}

/// Encodes a dotted service name into the label form used by queries.
///
/// Names that cannot be sent are rejected here, before any socket is opened:
/// a component longer than 255 bytes, or a name that would push the query
/// past the 512 byte message limit.
///
/// ```rust
/// use zeroconf_mdns::encode_name;
///
/// assert_eq!(encode_name("foo.bar.").unwrap(), b"\x03foo\x03bar\x00");
/// assert!(encode_name(&"a".repeat(256)).is_err());
/// ```
pub fn encode_name(name: &str) -> Result<Vec<u8>> {
    let name = Name::new(name)?;
    name.checked_query_len()?;
    name.pack(Vec::with_capacity(name.packed_len()))
}
