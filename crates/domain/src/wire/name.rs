//! Domain name encoding (RFC 1035 §3.1, §4.1.4).
//!
//! A length octet whose top two bits are `11` is a compression pointer: the
//! low 6 bits and the next octet form a 14-bit offset into the same message.
//! A label length always has its top two bits clear, so it is at most 63.

use crate::DomainError;

pub const MAX_LABEL_LEN: usize = 63;

/// Upper bound on pointers followed while decoding one name.
pub const MAX_JUMPS: usize = 127;

const POINTER_MASK: u8 = 0b1100_0000;

/// Decodes the name starting at `start`, returning it with the number of bytes
/// it occupies at `start`.
///
/// The consumed length is exact for a name that is a single pointer (2) or
/// only literal labels. A name that starts with literal labels and then jumps
/// reports the distance from `start` to the end of the jump target instead,
/// which is wrong; callers decoding a name inside RDATA must advance by
/// RDLENGTH rather than by this value.
pub fn decode_name(buf: &[u8], start: usize) -> Result<(String, usize), DomainError> {
    let mut labels: Vec<String> = Vec::new();
    let mut offset = start;
    let mut jumps = 0usize;

    loop {
        let len = *buf.get(offset).ok_or_else(|| {
            DomainError::NameTruncated(format!("length octet at {} is past end", offset))
        })?;

        if len == 0 {
            offset += 1;
            break;
        }

        match len & POINTER_MASK {
            POINTER_MASK => {
                let low = *buf.get(offset + 1).ok_or_else(|| {
                    DomainError::NameTruncated(format!("pointer at {} is cut short", offset))
                })?;
                jumps += 1;
                if jumps > MAX_JUMPS {
                    return Err(DomainError::ExcessiveJumps {
                        jumps,
                        max: MAX_JUMPS,
                    });
                }
                let target = (((len & !POINTER_MASK) as usize) << 8) | low as usize;
                if target >= buf.len() {
                    return Err(DomainError::MalformedName(format!(
                        "pointer at {} targets {} beyond message of {} bytes",
                        offset,
                        target,
                        buf.len()
                    )));
                }
                offset = target;
            }
            0 => {
                let label_start = offset + 1;
                let label_end = label_start + len as usize;
                let label = buf.get(label_start..label_end).ok_or_else(|| {
                    DomainError::NameTruncated(format!(
                        "label of {} bytes at {} runs past end",
                        len, offset
                    ))
                })?;
                labels.push(label.iter().map(|&b| b as char).collect());
                offset = label_end;
            }
            _ => {
                return Err(DomainError::MalformedName(format!(
                    "reserved label type {:#04x} at {}",
                    len, offset
                )));
            }
        }
    }

    let consumed = if buf[start] & POINTER_MASK == POINTER_MASK {
        2
    } else {
        offset.saturating_sub(start)
    };

    Ok((labels.join("."), consumed))
}

/// Encodes `name` as uncompressed length-prefixed labels ending in a zero byte.
/// Empty pieces (a trailing dot, or the root name) are skipped.
pub fn encode_name(name: &str) -> Result<Vec<u8>, DomainError> {
    let mut out = Vec::with_capacity(name.len() + 2);

    for piece in name.split('.').filter(|p| !p.is_empty()) {
        let bytes = piece
            .chars()
            .map(|c| u8::try_from(u32::from(c)).ok())
            .collect::<Option<Vec<u8>>>()
            .ok_or_else(|| {
                DomainError::InvalidDomainName(format!(
                    "label '{}' holds a multi-byte character",
                    piece
                ))
            })?;

        if bytes.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' is {} bytes, limit is {}",
                piece,
                bytes.len(),
                MAX_LABEL_LEN
            )));
        }

        out.push(bytes.len() as u8);
        out.extend_from_slice(&bytes);
    }

    out.push(0);
    Ok(out)
}
