use super::name::Name;
use super::packer::*;
use super::response::AnswerRecord;
use super::*;

// A Parser walks a response datagram from front to back.
//
// Layout of the datagrams it accepts:
//
//   header (12b)
//   label1 ... labelN 0x00
//   QTYPE (2b)
//   QCLASS (2b)
//   0xC0 name-index (1b) TYPE CLASS TTL RDLENGTH RDATA
//   ...
//
// The section counts in the header are skipped, not trusted: record
// boundaries come from walking the records themselves.
pub(crate) struct Parser<'a> {
    msg: &'a [u8],
    off: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(msg: &'a [u8]) -> Self {
        Parser { msg, off: 0 }
    }

    // start parses the header, leaving the parser at the question.
    pub(crate) fn start(&mut self) -> Result<()> {
        let off = skip_uint16(self.msg, 0)?; // ID
        let (flags, off) = unpack_uint16(self.msg, off)?;
        if flags != RESPONSE_FLAGS {
            return Err(Error::ErrUnexpectedFlags(flags));
        }
        // QDCOUNT, ANCOUNT, NSCOUNT, ARCOUNT
        self.off = skip_bytes(self.msg, off, HEADER_LEN - off)?;
        Ok(())
    }

    // question parses the echoed question and returns its name and type.
    pub(crate) fn question(&mut self) -> Result<(Name, u16)> {
        let (name, off) = Name::unpack(self.msg, self.off)?;
        let (typ, off) = unpack_uint16(self.msg, off)?;
        self.off = skip_uint16(self.msg, off)?; // QCLASS
        Ok((name, typ))
    }

    // answer parses the next resource record. It returns None when the
    // datagram ends exactly where the previous record ended.
    pub(crate) fn answer(&mut self) -> Result<Option<AnswerRecord>> {
        if self.off >= self.msg.len() {
            return Ok(None);
        }

        let name = Name::resolve_pointer(self.msg, self.off)?;
        let byte_offset = skip_uint16(self.msg, self.off)?;

        let (record_type, off) = unpack_uint16(self.msg, byte_offset)?;
        let off = skip_uint16(self.msg, off)?; // CLASS
        let off = skip_uint32(self.msg, off)?; // TTL
        let (length, off) = unpack_uint16(self.msg, off)?;
        self.off = skip_bytes(self.msg, off, length as usize)?;

        Ok(Some(AnswerRecord {
            record_type,
            byte_offset,
            byte_length: RECORD_HEADER_LEN + length as usize,
            name: name.data,
        }))
    }

    pub(crate) fn offset(&self) -> usize {
        self.off
    }
}
