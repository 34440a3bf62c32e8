#[cfg(test)]
mod name_test;

pub(crate) mod builder;
pub(crate) mod name;
mod packer;
pub(crate) mod parser;
pub(crate) mod question;
pub(crate) mod response;

use std::fmt;

use packer::*;

use shared::error::*;

// Message formats

/// A DNS record or question type.
///
/// Only the types commonly seen in service discovery answers are named;
/// anything else maps to [`DnsType::Unsupported`]. Decoded records keep the
/// raw 16-bit value, so nothing is lost by the mapping.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DnsType {
    A = 1,
    Cname = 5,
    Ptr = 12,
    Hinfo = 13,
    Txt = 16,
    Aaaa = 28,
    Srv = 33,
    Nsec = 47,
    All = 255,

    #[default]
    Unsupported = 0,
}

impl From<u16> for DnsType {
    fn from(v: u16) -> Self {
        match v {
            1 => DnsType::A,
            5 => DnsType::Cname,
            12 => DnsType::Ptr,
            13 => DnsType::Hinfo,
            16 => DnsType::Txt,
            28 => DnsType::Aaaa,
            33 => DnsType::Srv,
            47 => DnsType::Nsec,
            255 => DnsType::All,
            _ => DnsType::Unsupported,
        }
    }
}

impl fmt::Display for DnsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            DnsType::A => "A",
            DnsType::Cname => "CNAME",
            DnsType::Ptr => "PTR",
            DnsType::Hinfo => "HINFO",
            DnsType::Txt => "TXT",
            DnsType::Aaaa => "AAAA",
            DnsType::Srv => "SRV",
            DnsType::Nsec => "NSEC",
            DnsType::All => "ALL",
            DnsType::Unsupported => "Unsupported",
        };
        write!(f, "{s}")
    }
}

impl DnsType {
    // pack appends the wire format of the type to msg.
    pub(crate) fn pack(&self, msg: Vec<u8>) -> Vec<u8> {
        pack_uint16(msg, *self as u16)
    }
}

/// DNS class of a question or resource record.
///
/// Only [`DNSCLASS_INET`] is ever sent. mDNS responders set the top bit of
/// the class as the cache-flush flag, which is why answers are not checked
/// against it.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
pub struct DnsClass(pub u16);

/// Internet class (IN).
pub const DNSCLASS_INET: DnsClass = DnsClass(1);

impl fmt::Display for DnsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DNSCLASS_INET => write!(f, "IN"),
            DnsClass(other) => write!(f, "{other}"),
        }
    }
}

impl DnsClass {
    pub(crate) fn pack(&self, msg: Vec<u8>) -> Vec<u8> {
        pack_uint16(msg, self.0)
    }
}

// Internal constants.

// MAX_MESSAGE_LEN is the upper bound of a query or response datagram.
pub(crate) const MAX_MESSAGE_LEN: usize = 512;

// UINT16LEN is the length (in bytes) of a uint16.
const UINT16LEN: usize = 2;

// UINT32LEN is the length (in bytes) of a uint32.
const UINT32LEN: usize = 4;

// HEADER_LEN is the length (in bytes) of a DNS header.
//
// A header is comprised of 6 uint16s and no padding.
pub(crate) const HEADER_LEN: usize = 6 * UINT16LEN;

// QUESTION_FOOTER_LEN covers the type and class that follow the question name.
pub(crate) const QUESTION_FOOTER_LEN: usize = 2 * UINT16LEN;

// RECORD_HEADER_LEN covers type, class, ttl and data length of a resource
// record, i.e. everything between its name and its data.
pub(crate) const RECORD_HEADER_LEN: usize = 3 * UINT16LEN + UINT32LEN;

// COMPRESSION_TOKEN marks a two byte back reference to a name stored earlier
// in the message.
pub(crate) const COMPRESSION_TOKEN: u8 = 0xC0;

// RESPONSE_FLAGS is the only accepted flags field: QR and AA set, opcode 0,
// rcode 0.
pub(crate) const RESPONSE_FLAGS: u16 = HEADER_BIT_QR | HEADER_BIT_AA;

const HEADER_BIT_QR: u16 = 1 << 15; // query/response (response=1)
const HEADER_BIT_AA: u16 = 1 << 10; // authoritative
