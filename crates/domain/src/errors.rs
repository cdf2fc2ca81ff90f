use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Malformed name: {0}")]
    MalformedName(String),

    #[error("Name runs past end of message: {0}")]
    NameTruncated(String),

    #[error("Too many compression jumps: {jumps} > {max}")]
    ExcessiveJumps { jumps: usize, max: usize },

    #[error("Unknown QTYPE: {0}")]
    UnknownQType(String),

    #[error("Unknown QCLASS: {0}")]
    UnknownQClass(String),

    #[error("Unknown class: {0}")]
    UnknownClass(String),

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid RDATA for {record_type}: {reason}")]
    InvalidRdata {
        record_type: &'static str,
        reason: String,
    },

    #[error("Truncated message: need {needed} bytes at offset {offset}, have {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("{section} section holds {decoded} entries, header declares {expected}")]
    SectionCountMismatch {
        section: &'static str,
        expected: u16,
        decoded: u16,
    },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Network error talking to {server}: {reason}")]
    NetworkError { server: String, reason: String },

    #[error("Resolution failed: {0}")]
    ResolutionFailed(String),

    #[error("Delegation depth limit of {0} exceeded")]
    DelegationLimitExceeded(usize),
}

impl DomainError {
    /// Jump-count and past-end failures are kinds of malformed name.
    pub fn is_malformed_name(&self) -> bool {
        matches!(
            self,
            DomainError::MalformedName(_)
                | DomainError::NameTruncated(_)
                | DomainError::ExcessiveJumps { .. }
        )
    }

    /// The buffer ended before a field or name did.
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            DomainError::Truncated { .. } | DomainError::NameTruncated(_)
        )
    }

    /// Failures a caller may reasonably retry, as opposed to a definitive
    /// answer or a broken message.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DomainError::TransportTimeout { .. } | DomainError::NetworkError { .. }
        )
    }
}
