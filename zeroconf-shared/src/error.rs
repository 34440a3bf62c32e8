use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, PartialEq)]
#[non_exhaustive]
pub enum Error {
    // Query encoding errors, raised before any socket is opened.
    #[error("label of {0} bytes exceeds the 255 byte limit")]
    ErrLabelTooLong(usize),
    #[error("query of {0} bytes exceeds the 512 byte message limit")]
    ErrQueryTooLong(usize),

    // Datagram decoding errors. These never escape the decoder as call failures.
    #[error("unexpected end of datagram at offset {offset}, needed {wanted} bytes")]
    ErrUnexpectedEnd { offset: usize, wanted: usize },
    #[error("unexpected flags value {0:#06x} in response")]
    ErrUnexpectedFlags(u16),
    #[error("expected compression token at offset {offset}, found {found:#04x}")]
    ErrBadCompressionToken { offset: usize, found: u8 },
    #[error("compression pointer {index} is out of range for a {len} byte datagram")]
    ErrBadCompressionPointer { index: usize, len: usize },

    // Socket errors, fatal to the resolve call.
    #[error("socket setup failed: {0}")]
    ErrSocketSetup(#[source] IoError),
    #[error("failed to send the query: {0}")]
    ErrSend(#[source] IoError),
    #[error("failed to wait on socket: {0}")]
    ErrWait(#[source] IoError),
    #[error("failed to receive: {0}")]
    ErrReceive(#[source] IoError),

    #[error("connection closed")]
    ErrConnectionClosed,
    #[error("scan cancelled")]
    ErrCancelled,
}

impl Error {
    /// Reports whether the error describes a malformed datagram.
    ///
    /// Malformed datagrams are dropped one at a time; every other kind ends
    /// the resolve call.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::ErrUnexpectedEnd { .. }
                | Error::ErrUnexpectedFlags(_)
                | Error::ErrBadCompressionToken { .. }
                | Error::ErrBadCompressionPointer { .. }
        )
    }

    pub fn socket_setup(e: io::Error) -> Self {
        Error::ErrSocketSetup(IoError(e))
    }

    pub fn send(e: io::Error) -> Self {
        Error::ErrSend(IoError(e))
    }

    pub fn wait(e: io::Error) -> Self {
        Error::ErrWait(IoError(e))
    }

    pub fn receive(e: io::Error) -> Self {
        Error::ErrReceive(IoError(e))
    }
}

#[derive(Debug, Error)]
#[error("io error: {0}")]
pub struct IoError(#[from] pub io::Error);

// io::Error has no PartialEq, compare by kind.
impl PartialEq for IoError {
    fn eq(&self, other: &Self) -> bool {
        self.0.kind() == other.0.kind()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_is_malformed() {
        assert!(Error::ErrUnexpectedFlags(0x8500).is_malformed());
        assert!(Error::ErrUnexpectedEnd { offset: 3, wanted: 2 }.is_malformed());
        assert!(
            Error::ErrBadCompressionToken {
                offset: 17,
                found: 0
            }
            .is_malformed()
        );
        assert!(Error::ErrBadCompressionPointer { index: 40, len: 17 }.is_malformed());

        assert!(!Error::ErrLabelTooLong(256).is_malformed());
        assert!(!Error::ErrCancelled.is_malformed());
        assert!(!Error::send(io::Error::from(io::ErrorKind::PermissionDenied)).is_malformed());
    }

    #[test]
    fn test_io_error_eq_by_kind() {
        let a = Error::wait(io::Error::new(io::ErrorKind::Interrupted, "first"));
        let b = Error::wait(io::Error::new(io::ErrorKind::Interrupted, "second"));
        let c = Error::receive(io::Error::new(io::ErrorKind::Interrupted, "first"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Error::ErrUnexpectedFlags(0x8400).to_string(),
            "unexpected flags value 0x8400 in response"
        );
        assert_eq!(
            Error::ErrBadCompressionToken {
                offset: 17,
                found: 0
            }
            .to_string(),
            "expected compression token at offset 17, found 0x00"
        );
    }
}
