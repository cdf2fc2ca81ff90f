//! Rootwalk Domain Layer
pub mod config;
pub mod dns_query;
pub mod dns_record;
pub mod errors;
pub mod wire;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_query::DnsQuery;
pub use dns_record::{QueryClass, QueryType, RecordClass, RecordType};
pub use errors::DomainError;
pub use wire::{Header, Message, Opcode, Question, QueryResponse, RData, Record, ResponseCode};
