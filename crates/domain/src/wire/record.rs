// Resource record layout, RFC 1035 §4.1.3.

use super::name::{decode_name, encode_name};
use super::rdata::RData;
use super::{read_slice, read_u16, read_u32};
use crate::{DomainError, RecordClass, RecordType};
use std::fmt;

/// TYPE, CLASS, TTL and RDLENGTH.
pub const FIXED_LEN: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub record_type: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    pub rdlength: u16,
    pub rdata: RData,
    name_len: usize,
}

impl Record {
    pub fn new(
        name: impl Into<String>,
        class: RecordClass,
        ttl: u32,
        rdata: RData,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        let name_len = encode_name(&name)?.len();
        let rdlength = u16::try_from(rdata.encode()?.len()).map_err(|_| {
            DomainError::InvalidRdata {
                record_type: rdata.record_type().as_str(),
                reason: "RDATA exceeds 65535 bytes".to_string(),
            }
        })?;
        Ok(Self {
            name,
            record_type: rdata.record_type(),
            class,
            ttl,
            rdlength,
            rdata,
            name_len,
        })
    }

    pub fn decode(buf: &[u8], offset: usize) -> Result<Self, DomainError> {
        let (name, name_len) = decode_name(buf, offset)?;
        let fixed = offset + name_len;

        let type_code = read_u16(buf, fixed)?;
        let record_type = RecordType::from_u16(type_code)
            .ok_or_else(|| DomainError::UnsupportedRecordType(type_code.to_string()))?;

        let class_code = read_u16(buf, fixed + 2)?;
        let class = RecordClass::from_u16(class_code)
            .ok_or_else(|| DomainError::UnknownClass(class_code.to_string()))?;

        let ttl = read_u32(buf, fixed + 4)?;
        let rdlength = read_u16(buf, fixed + 8)?;

        let rdata_offset = fixed + FIXED_LEN;
        read_slice(buf, rdata_offset, rdlength as usize)?;
        let rdata = RData::decode(record_type, buf, rdata_offset, rdlength)?;

        Ok(Self {
            name,
            record_type,
            class,
            ttl,
            rdlength,
            rdata,
            name_len,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        let mut out = encode_name(&self.name)?;
        out.extend_from_slice(&self.record_type.to_u16().to_be_bytes());
        out.extend_from_slice(&self.class.to_u16().to_be_bytes());
        out.extend_from_slice(&self.ttl.to_be_bytes());
        let rdata = self.rdata.encode()?;
        out.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        out.extend_from_slice(&rdata);
        Ok(out)
    }

    /// Bytes this record occupies: owner name, the fixed fields, then RDLENGTH
    /// bytes of RDATA. This, not any inner codec's count, is how far a section
    /// parser advances.
    pub fn byte_len(&self) -> usize {
        self.name_len + FIXED_LEN + self.rdlength as usize
    }

    pub fn is_type(&self, record_type: RecordType) -> bool {
        self.record_type == record_type
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.ttl, self.class, self.record_type, self.rdata
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_a_record() {
        let mut buf = encode_name("example.com").unwrap();
        buf.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0x0e, 0x10, 0, 4, 192, 0, 2, 235]);
        let record = Record::decode(&buf, 0).unwrap();
        assert_eq!(record.name, "example.com");
        assert_eq!(record.ttl, 3600);
        assert_eq!(record.rdata.formatted(), "192.0.2.235");
        assert_eq!(record.byte_len(), buf.len());
    }

    #[test]
    fn test_cname_with_compressed_target_advances_by_rdlength() {
        // "com" at 0; record at 5 whose CNAME target is "cdn" + pointer to 0.
        let mut buf = vec![3, b'c', b'o', b'm', 0];
        let record_at = buf.len();
        buf.extend_from_slice(&[0xc0, 0x00]);
        buf.extend_from_slice(&[0, 5, 0, 1, 0, 0, 0, 60, 0, 6]);
        buf.extend_from_slice(&[3, b'c', b'd', b'n', 0xc0, 0x00]);
        let record = Record::decode(&buf, record_at).unwrap();
        assert_eq!(
            record.rdata,
            RData::CNAME {
                domain: "cdn.com".to_string()
            }
        );
        assert_eq!(record_at + record.byte_len(), buf.len());
    }

    #[test]
    fn test_unknown_class_fails() {
        let mut buf = vec![0];
        buf.extend_from_slice(&[0, 1, 0, 9, 0, 0, 0, 0, 0, 4, 1, 2, 3, 4]);
        assert!(matches!(
            Record::decode(&buf, 0),
            Err(DomainError::UnknownClass(_))
        ));
    }

    #[test]
    fn test_unlisted_type_code_fails() {
        // OPT pseudo-record (type 41).
        let buf = [0, 0, 41, 0x10, 0, 0, 0, 0, 0, 0, 0];
        assert!(matches!(
            Record::decode(&buf, 0),
            Err(DomainError::UnsupportedRecordType(_))
        ));
    }

    #[test]
    fn test_rdata_past_end_is_truncated() {
        let mut buf = vec![0];
        buf.extend_from_slice(&[0, 1, 0, 1, 0, 0, 0, 0, 0, 4, 1, 2]);
        assert!(matches!(
            Record::decode(&buf, 0),
            Err(DomainError::Truncated { .. })
        ));
    }

    #[test]
    fn test_new_computes_rdlength() {
        let record = Record::new(
            "ns1.example.com",
            RecordClass::IN,
            300,
            RData::NS {
                host: "a.iana-servers.net".to_string(),
            },
        )
        .unwrap();
        assert_eq!(record.record_type, RecordType::NS);
        assert_eq!(record.rdlength as usize, "a.iana-servers.net".len() + 2);
        assert_eq!(record.byte_len(), record.encode().unwrap().len());
    }
}
