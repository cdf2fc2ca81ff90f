use super::name::{decode_name, encode_name};
use super::read_u16;
use crate::{DomainError, QueryClass, QueryType};
use std::fmt;

/// One question-section entry (RFC 1035 §4.1.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: String,
    pub qtype: QueryType,
    pub qclass: QueryClass,
    byte_len: usize,
}

impl Question {
    pub fn new(qname: impl Into<String>, qtype: QueryType, qclass: QueryClass) -> Self {
        let qname = qname.into();
        // Uncompressed: one length byte per label plus the terminator.
        let byte_len = qname
            .split('.')
            .filter(|p| !p.is_empty())
            .map(|p| p.len() + 1)
            .sum::<usize>()
            + 1
            + 4;
        Self {
            qname,
            qtype,
            qclass,
            byte_len,
        }
    }

    pub fn decode(buf: &[u8], offset: usize) -> Result<Self, DomainError> {
        let (qname, name_len) = decode_name(buf, offset)?;
        let fixed = offset + name_len;

        let qtype_code = read_u16(buf, fixed)?;
        let qtype = QueryType::from_u16(qtype_code)
            .ok_or_else(|| DomainError::UnknownQType(qtype_code.to_string()))?;

        let qclass_code = read_u16(buf, fixed + 2)?;
        let qclass = QueryClass::from_u16(qclass_code)
            .ok_or_else(|| DomainError::UnknownQClass(qclass_code.to_string()))?;

        Ok(Self {
            qname,
            qtype,
            qclass,
            byte_len: name_len + 4,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = encode_name(&self.qname)?;
        out.extend_from_slice(&self.qtype.to_u16().to_be_bytes());
        out.extend_from_slice(&self.qclass.to_u16().to_be_bytes());
        Ok(out)
    }

    /// Bytes this entry occupies in the message it was decoded from.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QNAME {}, qtype {}, qclass {}",
            self.qname, self.qtype, self.qclass
        )
    }
}
