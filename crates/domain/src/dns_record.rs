mod class;
mod record_type;

pub use class::{QueryClass, RecordClass};
pub use record_type::{QueryType, RecordType};
