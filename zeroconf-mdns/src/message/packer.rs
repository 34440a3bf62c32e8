use super::*;

// Every unpack helper checks the remaining length before touching the
// buffer, so a short datagram surfaces as ErrUnexpectedEnd and never as a
// panic.

// pack_uint16 appends the wire format of field to msg.
pub(crate) fn pack_uint16(mut msg: Vec<u8>, field: u16) -> Vec<u8> {
    msg.extend_from_slice(&field.to_be_bytes());
    msg
}

fn ensure_len(msg: &[u8], off: usize, wanted: usize) -> Result<()> {
    if msg.len().saturating_sub(off) < wanted {
        return Err(Error::ErrUnexpectedEnd {
            offset: off,
            wanted,
        });
    }
    Ok(())
}

// peek_uint8 returns the byte at off without consuming it.
pub(crate) fn peek_uint8(msg: &[u8], off: usize) -> Result<u8> {
    ensure_len(msg, off, 1)?;
    Ok(msg[off])
}

pub(crate) fn unpack_uint8(msg: &[u8], off: usize) -> Result<(u8, usize)> {
    let b = peek_uint8(msg, off)?;
    Ok((b, off + 1))
}

pub(crate) fn unpack_uint16(msg: &[u8], off: usize) -> Result<(u16, usize)> {
    ensure_len(msg, off, UINT16LEN)?;
    Ok((u16::from_be_bytes([msg[off], msg[off + 1]]), off + UINT16LEN))
}

// unpack_bytes returns the n bytes starting at off.
pub(crate) fn unpack_bytes(msg: &[u8], off: usize, n: usize) -> Result<(&[u8], usize)> {
    ensure_len(msg, off, n)?;
    Ok((&msg[off..off + n], off + n))
}

pub(crate) fn skip_bytes(msg: &[u8], off: usize, n: usize) -> Result<usize> {
    ensure_len(msg, off, n)?;
    Ok(off + n)
}

pub(crate) fn skip_uint16(msg: &[u8], off: usize) -> Result<usize> {
    skip_bytes(msg, off, UINT16LEN)
}

pub(crate) fn skip_uint32(msg: &[u8], off: usize) -> Result<usize> {
    skip_bytes(msg, off, UINT32LEN)
}
