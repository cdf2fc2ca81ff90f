use crate::DomainError;
use std::fmt;
use std::str::FromStr;

/// Resource record CLASS values (RFC 1035 §3.2.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    /// The Internet
    IN,
    /// CSNET (obsolete)
    CS,
    /// CHAOS
    CH,
    /// Hesiod
    HS,
}

impl RecordClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CS => "CS",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            RecordClass::IN => 1,
            RecordClass::CS => 2,
            RecordClass::CH => 3,
            RecordClass::HS => 4,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1 => Some(RecordClass::IN),
            2 => Some(RecordClass::CS),
            3 => Some(RecordClass::CH),
            4 => Some(RecordClass::HS),
            _ => None,
        }
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IN" => Ok(RecordClass::IN),
            "CS" => Ok(RecordClass::CS),
            "CH" => Ok(RecordClass::CH),
            "HS" => Ok(RecordClass::HS),
            _ => Err(DomainError::UnknownClass(s.to_string())),
        }
    }
}

/// QCLASS values: every CLASS plus `*` (255).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryClass {
    Class(RecordClass),
    Any,
}

impl QueryClass {
    pub const IN: QueryClass = QueryClass::Class(RecordClass::IN);

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryClass::Class(class) => class.as_str(),
            QueryClass::Any => "*",
        }
    }

    pub fn to_u16(&self) -> u16 {
        match self {
            QueryClass::Class(class) => class.to_u16(),
            QueryClass::Any => 255,
        }
    }

    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            255 => Some(QueryClass::Any),
            _ => RecordClass::from_u16(code).map(QueryClass::Class),
        }
    }
}

impl From<RecordClass> for QueryClass {
    fn from(class: RecordClass) -> Self {
        QueryClass::Class(class)
    }
}

impl fmt::Display for QueryClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QueryClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "*" || s.eq_ignore_ascii_case("ANY") {
            return Ok(QueryClass::Any);
        }
        s.parse::<RecordClass>()
            .map(QueryClass::Class)
            .map_err(|_| DomainError::UnknownQClass(s.to_string()))
    }
}
