pub mod builders;
pub mod dns_server_mock;
pub mod scripted_transport;

pub use builders::*;
pub use dns_server_mock::MockDnsServer;
pub use scripted_transport::{Scripted, ScriptedTransport, SentQuery};
