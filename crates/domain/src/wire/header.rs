use crate::DomainError;
use std::fmt;
use std::str::FromStr;

pub const HEADER_LEN: usize = 12;

const QR_MASK: u8 = 0b1000_0000;
const OPCODE_MASK: u8 = 0b0111_1000;
const AA_MASK: u8 = 0b0000_0100;
const TC_MASK: u8 = 0b0000_0010;
const RD_MASK: u8 = 0b0000_0001;

const RA_MASK: u8 = 0b1000_0000;
// 3 bits in RFC 1035, narrowed to 1 by RFC 2535 §6 to make room for AD and CD.
const Z_MASK: u8 = 0b0100_0000;
const AD_MASK: u8 = 0b0010_0000;
const CD_MASK: u8 = 0b0001_0000;
const RCODE_MASK: u8 = 0b0000_1111;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryResponse {
    #[default]
    Query,
    Response,
}

impl QueryResponse {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryResponse::Query => "QUERY",
            QueryResponse::Response => "RESPONSE",
        }
    }
}

impl fmt::Display for QueryResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryResponse {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUERY" => Ok(QueryResponse::Query),
            "RESPONSE" => Ok(QueryResponse::Response),
            _ => Err(DomainError::MalformedHeader(format!("unknown QR '{}'", s))),
        }
    }
}

/// OPCODE values 0-2; 3-15 are reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Opcode {
    #[default]
    Query,
    IQuery,
    Status,
}

impl Opcode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Opcode::Query => "QUERY",
            Opcode::IQuery => "IQUERY",
            Opcode::Status => "STATUS",
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            Opcode::Query => 0,
            Opcode::IQuery => 1,
            Opcode::Status => 2,
        }
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        match code {
            0 => Some(Opcode::Query),
            1 => Some(Opcode::IQuery),
            2 => Some(Opcode::Status),
            _ => None,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Opcode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "QUERY" => Ok(Opcode::Query),
            "IQUERY" => Ok(Opcode::IQuery),
            "STATUS" => Ok(Opcode::Status),
            _ => Err(DomainError::MalformedHeader(format!(
                "unknown opcode '{}'",
                s
            ))),
        }
    }
}

/// RCODE values 0-5; 6-15 are reserved and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResponseCode {
    #[default]
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
}

impl ResponseCode {
    pub const ALL: [ResponseCode; 6] = [
        ResponseCode::NoError,
        ResponseCode::FormatError,
        ResponseCode::ServerFailure,
        ResponseCode::NameError,
        ResponseCode::NotImplemented,
        ResponseCode::Refused,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCode::NoError => "No error",
            ResponseCode::FormatError => "Format error",
            ResponseCode::ServerFailure => "Server failure",
            ResponseCode::NameError => "Name error",
            ResponseCode::NotImplemented => "Not implemented",
            ResponseCode::Refused => "Refused",
        }
    }

    pub fn to_u8(&self) -> u8 {
        match self {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
        }
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        ResponseCode::ALL.into_iter().find(|rc| rc.to_u8() == code)
    }
}

impl fmt::Display for ResponseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResponseCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResponseCode::ALL
            .into_iter()
            .find(|rc| rc.as_str() == s)
            .ok_or_else(|| DomainError::MalformedHeader(format!("unknown rcode '{}'", s)))
    }
}

/// The fixed 12-byte message header (RFC 1035 §4.1.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    pub id: u16,
    pub qr: QueryResponse,
    pub opcode: Opcode,
    pub aa: bool,
    pub tc: bool,
    pub rd: bool,
    pub ra: bool,
    /// Reserved. Senders set it to zero; a set bit is decoded and re-encoded
    /// as-is rather than rejected.
    pub z: bool,
    pub ad: bool,
    pub cd: bool,
    pub rcode: ResponseCode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Header {
    /// Decodes exactly [`HEADER_LEN`] bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, DomainError> {
        if bytes.len() != HEADER_LEN {
            return Err(DomainError::MalformedHeader(format!(
                "expected {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }

        let flags_hi = bytes[2];
        let flags_lo = bytes[3];

        let opcode_code = (flags_hi & OPCODE_MASK) >> 3;
        let opcode = Opcode::from_u8(opcode_code).ok_or_else(|| {
            DomainError::MalformedHeader(format!("reserved opcode {}", opcode_code))
        })?;

        let rcode_code = flags_lo & RCODE_MASK;
        let rcode = ResponseCode::from_u8(rcode_code).ok_or_else(|| {
            DomainError::MalformedHeader(format!("reserved rcode {}", rcode_code))
        })?;

        let qr = if flags_hi & QR_MASK != 0 {
            QueryResponse::Response
        } else {
            QueryResponse::Query
        };

        Ok(Header {
            id: u16::from_be_bytes([bytes[0], bytes[1]]),
            qr,
            opcode,
            aa: flags_hi & AA_MASK != 0,
            tc: flags_hi & TC_MASK != 0,
            rd: flags_hi & RD_MASK != 0,
            ra: flags_lo & RA_MASK != 0,
            z: flags_lo & Z_MASK != 0,
            ad: flags_lo & AD_MASK != 0,
            cd: flags_lo & CD_MASK != 0,
            rcode,
            qdcount: u16::from_be_bytes([bytes[4], bytes[5]]),
            ancount: u16::from_be_bytes([bytes[6], bytes[7]]),
            nscount: u16::from_be_bytes([bytes[8], bytes[9]]),
            arcount: u16::from_be_bytes([bytes[10], bytes[11]]),
        })
    }

    pub fn encode(&self) -> [u8; HEADER_LEN] {
        let mut flags_hi = (self.opcode.to_u8() << 3) & OPCODE_MASK;
        if self.qr == QueryResponse::Response {
            flags_hi |= QR_MASK;
        }
        if self.aa {
            flags_hi |= AA_MASK;
        }
        if self.tc {
            flags_hi |= TC_MASK;
        }
        if self.rd {
            flags_hi |= RD_MASK;
        }

        let mut flags_lo = self.rcode.to_u8() & RCODE_MASK;
        if self.ra {
            flags_lo |= RA_MASK;
        }
        if self.z {
            flags_lo |= Z_MASK;
        }
        if self.ad {
            flags_lo |= AD_MASK;
        }
        if self.cd {
            flags_lo |= CD_MASK;
        }

        let mut buf = [0u8; HEADER_LEN];
        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2] = flags_hi;
        buf[3] = flags_lo;
        buf[4..6].copy_from_slice(&self.qdcount.to_be_bytes());
        buf[6..8].copy_from_slice(&self.ancount.to_be_bytes());
        buf[8..10].copy_from_slice(&self.nscount.to_be_bytes());
        buf[10..12].copy_from_slice(&self.arcount.to_be_bytes());
        buf
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "id {} ({:x}), qr {}, opcode \"{}\"",
            self.id, self.id, self.qr, self.opcode
        )?;
        writeln!(
            f,
            "aa {}, tc {}, rd {}, ra {}, z {}, ad {}, cd {}, rcode \"{}\"",
            self.aa as u8,
            self.tc as u8,
            self.rd as u8,
            self.ra as u8,
            self.z as u8,
            self.ad as u8,
            self.cd as u8,
            self.rcode
        )?;
        write!(
            f,
            "qdcount {}, ancount {}, nscount {}, arcount {}",
            self.qdcount, self.ancount, self.nscount, self.arcount
        )
    }
}
