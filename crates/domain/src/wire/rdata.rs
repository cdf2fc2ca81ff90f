//! RDATA decoding, dispatched on the record TYPE.
//!
//! Only A, NS, CNAME and AAAA are understood. Any other type is rejected so a
//! caller never sees an empty payload standing in for data it cannot read.

use super::name::{decode_name, encode_name};
use super::{read_slice, read_u32};
use crate::{DomainError, RecordType};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A { address: u32 },
    NS { host: String },
    CNAME { domain: String },
    AAAA { address: u128 },
}

type Decoder = fn(&[u8], usize, u16) -> Result<RData, DomainError>;

fn decoder_for(record_type: RecordType) -> Option<Decoder> {
    match record_type {
        RecordType::A => Some(decode_a),
        RecordType::NS => Some(decode_ns),
        RecordType::CNAME => Some(decode_cname),
        RecordType::AAAA => Some(decode_aaaa),
        _ => None,
    }
}

fn decode_a(buf: &[u8], offset: usize, rdlength: u16) -> Result<RData, DomainError> {
    if rdlength != 4 {
        return Err(DomainError::InvalidRdata {
            record_type: "A",
            reason: format!("RDLENGTH is {}, expected 4", rdlength),
        });
    }
    Ok(RData::A {
        address: read_u32(buf, offset)?,
    })
}

// Names inside RDATA may be compressed; the consumed length decode_name
// reports is not trusted here, the record advances by RDLENGTH.
fn decode_ns(buf: &[u8], offset: usize, _rdlength: u16) -> Result<RData, DomainError> {
    let (host, _) = decode_name(buf, offset)?;
    Ok(RData::NS { host })
}

fn decode_cname(buf: &[u8], offset: usize, _rdlength: u16) -> Result<RData, DomainError> {
    let (domain, _) = decode_name(buf, offset)?;
    Ok(RData::CNAME { domain })
}

fn decode_aaaa(buf: &[u8], offset: usize, rdlength: u16) -> Result<RData, DomainError> {
    if rdlength != 16 {
        return Err(DomainError::InvalidRdata {
            record_type: "AAAA",
            reason: format!("RDLENGTH is {}, expected 16", rdlength),
        });
    }
    let words = read_slice(buf, offset, 16)?;
    let mut octets = [0u8; 16];
    octets.copy_from_slice(words);
    Ok(RData::AAAA {
        address: u128::from_be_bytes(octets),
    })
}

impl RData {
    /// Decodes the RDATA of a `record_type` record found at `offset`.
    pub fn decode(
        record_type: RecordType,
        buf: &[u8],
        offset: usize,
        rdlength: u16,
    ) -> Result<Self, DomainError> {
        let decode = decoder_for(record_type)
            .ok_or_else(|| DomainError::UnsupportedRecordType(record_type.to_string()))?;
        decode(buf, offset, rdlength)
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            RData::A { .. } => RecordType::A,
            RData::NS { .. } => RecordType::NS,
            RData::CNAME { .. } => RecordType::CNAME,
            RData::AAAA { .. } => RecordType::AAAA,
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>, DomainError> {
        match self {
            RData::A { address } => Ok(address.to_be_bytes().to_vec()),
            RData::NS { host } => encode_name(host),
            RData::CNAME { domain } => encode_name(domain),
            RData::AAAA { address } => Ok(address.to_be_bytes().to_vec()),
        }
    }

    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        match self {
            RData::A { address } => Some(Ipv4Addr::from(*address)),
            _ => None,
        }
    }

    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        match self {
            RData::AAAA { address } => Some(Ipv6Addr::from(*address)),
            _ => None,
        }
    }

    /// Dotted-quad for A, eight uncompressed lowercase hextets for AAAA, the
    /// target name otherwise.
    pub fn formatted(&self) -> String {
        match self {
            RData::A { address } => Ipv4Addr::from(*address).to_string(),
            RData::NS { host } => host.clone(),
            RData::CNAME { domain } => domain.clone(),
            RData::AAAA { address } => format_hextets(*address),
        }
    }
}

fn format_hextets(address: u128) -> String {
    Ipv6Addr::from(address)
        .segments()
        .iter()
        .map(|s| format!("{:x}", s))
        .collect::<Vec<_>>()
        .join(":")
}

impl fmt::Display for RData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted())
    }
}
