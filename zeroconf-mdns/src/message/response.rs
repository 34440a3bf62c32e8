use std::fmt;
use std::net::SocketAddr;

use shared::TaggedBytesMut;

use super::parser::Parser;
use super::*;

/// One resource record found in a response.
///
/// The record's data is not copied out of the datagram; `byte_offset` and
/// `byte_length` locate the record header and data in the payload so a
/// caller that kept the datagram can read it with [`AnswerRecord::rdata`].
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    /// Raw record type, e.g. 12 for PTR.
    pub record_type: u16,
    /// Position of the record header (the TYPE field) in the payload.
    pub byte_offset: usize,
    /// Header length (10) plus the declared data length.
    pub byte_length: usize,
    /// Owner name: the single label found at the record's compression
    /// pointer index.
    pub name: String,
}

impl fmt::Display for AnswerRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} @{}+{}",
            self.name,
            self.typ(),
            self.byte_offset,
            self.byte_length
        )
    }
}

impl AnswerRecord {
    pub fn typ(&self) -> DnsType {
        DnsType::from(self.record_type)
    }

    /// Returns the record data within `payload`, the datagram this record
    /// was decoded from.
    pub fn rdata<'a>(&self, payload: &'a [u8]) -> Option<&'a [u8]> {
        payload.get(self.byte_offset + RECORD_HEADER_LEN..self.byte_offset + self.byte_length)
    }
}

/// A successfully decoded response datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    /// Sender of the datagram.
    pub peer_addr: SocketAddr,
    /// Type echoed in the question section.
    pub query_type: u16,
    /// Name echoed in the question section.
    pub query_name: String,
    /// Answer records in wire order.
    pub records: Vec<AnswerRecord>,
}

impl fmt::Display for ServiceResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} answered {} {} with {} record(s)",
            self.peer_addr,
            self.query_name,
            DnsType::from(self.query_type),
            self.records.len()
        )
    }
}

impl ServiceResponse {
    /// Decodes `msg`, a datagram received from `peer_addr`.
    ///
    /// The whole datagram is rejected when the flags are not those of a
    /// standard response, when a record does not start with a compression
    /// pointer, when a pointer leads outside the datagram or when any field
    /// runs past its end. There are no partial results.
    pub fn unpack(peer_addr: SocketAddr, msg: &[u8]) -> Result<Self> {
        let mut p = Parser::new(msg);
        p.start()?;
        let (query_name, query_type) = p.question()?;

        let mut records = vec![];
        while let Some(record) = p.answer()? {
            records.push(record);
        }
        log::trace!(
            "decoded {} record(s) from {} of {} bytes",
            records.len(),
            peer_addr,
            p.offset()
        );

        Ok(ServiceResponse {
            peer_addr,
            query_type,
            query_name: query_name.data,
            records,
        })
    }

    /// Iterates over the records of the given type.
    pub fn records_of(&self, typ: DnsType) -> impl Iterator<Item = &AnswerRecord> {
        self.records.iter().filter(move |r| r.typ() == typ)
    }
}

/// Decodes a datagram collected by the transport.
pub fn decode_response(raw: &TaggedBytesMut) -> Result<ServiceResponse> {
    ServiceResponse::unpack(raw.transport.peer_addr, &raw.message)
}
