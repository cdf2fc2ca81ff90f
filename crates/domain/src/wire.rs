//! DNS wire format (RFC 1035 §4).
//!
//! Decoding works on an immutable byte buffer and offsets into it; every
//! sub-codec reports how many bytes it consumed so the message parser can
//! advance its cursor. Encoding produces fresh buffers and never emits
//! compression pointers.

pub mod header;
pub mod message;
pub mod name;
pub mod question;
pub mod rdata;
pub mod record;

pub use header::{Header, Opcode, QueryResponse, ResponseCode, HEADER_LEN};
pub use message::Message;
pub use name::{decode_name, encode_name, MAX_JUMPS};
pub use question::Question;
pub use rdata::RData;
pub use record::Record;

use crate::DomainError;

fn ensure_len(buf: &[u8], offset: usize, needed: usize) -> Result<(), DomainError> {
    match offset.checked_add(needed) {
        Some(end) if end <= buf.len() => Ok(()),
        _ => Err(DomainError::Truncated {
            offset,
            needed,
            available: buf.len().saturating_sub(offset),
        }),
    }
}

pub(crate) fn read_u16(buf: &[u8], offset: usize) -> Result<u16, DomainError> {
    ensure_len(buf, offset, 2)?;
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

pub(crate) fn read_u32(buf: &[u8], offset: usize) -> Result<u32, DomainError> {
    ensure_len(buf, offset, 4)?;
    Ok(u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

pub(crate) fn read_slice(buf: &[u8], offset: usize, len: usize) -> Result<&[u8], DomainError> {
    ensure_len(buf, offset, len)?;
    Ok(&buf[offset..offset + len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_big_endian() {
        assert_eq!(read_u16(&[0x01, 0x2c], 0).unwrap(), 300);
    }

    #[test]
    fn test_read_u32_past_end_is_truncated() {
        let err = read_u32(&[0, 0, 0], 0).unwrap_err();
        assert_eq!(
            err,
            DomainError::Truncated {
                offset: 0,
                needed: 4,
                available: 3
            }
        );
    }

    #[test]
    fn test_read_slice_offset_beyond_buffer() {
        assert!(read_slice(&[1, 2], 5, 1).is_err());
        assert!(read_slice(&[1, 2], usize::MAX, 2).is_err());
    }
}
