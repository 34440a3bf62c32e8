use std::fmt;

use super::name::*;
use super::*;

// A question is the single entry of a query's question section.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub(crate) struct Question {
    pub(crate) name: Name,
    pub(crate) typ: DnsType,
    pub(crate) class: DnsClass,
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.class, self.typ)
    }
}

impl Question {
    // pack appends the wire format of the question to msg.
    pub(crate) fn pack(&self, mut msg: Vec<u8>) -> Result<Vec<u8>> {
        msg = self.name.pack(msg)?;
        msg = self.typ.pack(msg);
        Ok(self.class.pack(msg))
    }
}
