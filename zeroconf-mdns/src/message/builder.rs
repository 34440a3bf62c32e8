use super::name::Name;
use super::packer::pack_uint16;
use super::question::Question;
use super::*;

// QueryHeader is the fixed header of every discovery query: id 0, no flags,
// one question and nothing else.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
struct QueryHeader {
    id: u16,
    bits: u16,
    questions: u16,
    answers: u16,
    authorities: u16,
    additionals: u16,
}

impl QueryHeader {
    fn single_question() -> Self {
        QueryHeader {
            questions: 1,
            ..Default::default()
        }
    }

    fn pack(&self, mut msg: Vec<u8>) -> Vec<u8> {
        msg = pack_uint16(msg, self.id);
        msg = pack_uint16(msg, self.bits);
        msg = pack_uint16(msg, self.questions);
        msg = pack_uint16(msg, self.answers);
        msg = pack_uint16(msg, self.authorities);
        pack_uint16(msg, self.additionals)
    }
}

/// Builds the discovery query datagram for `service_name`.
///
/// The datagram is the 12 byte header, the encoded name and a PTR/IN
/// question footer. Names that would make the datagram longer than 512
/// bytes, or that carry a component over 255 bytes, are rejected.
///
/// ```rust
/// use zeroconf_mdns::build_query;
///
/// let query = build_query("_http._tcp.local").unwrap();
/// assert_eq!(query.len(), 12 + 18 + 4);
/// assert_eq!(&query[query.len() - 4..], &[0x00, 0x0c, 0x00, 0x01]);
/// ```
pub fn build_query(service_name: &str) -> Result<Vec<u8>> {
    let question = Question {
        name: Name::new(service_name)?,
        typ: DnsType::Ptr,
        class: DNSCLASS_INET,
    };

    let query_len = question.name.checked_query_len()?;

    let msg = QueryHeader::single_question().pack(Vec::with_capacity(query_len));
    let msg = question.pack(msg)?;
    log::trace!("built {} byte query for {}", msg.len(), question);
    Ok(msg)
}
