pub mod resolver;
pub mod server;
pub mod transport;

pub use resolver::IterativeResolver;
pub use server::DnsServerHandler;
pub use transport::{udp::UdpTransport, DnsTransport, TransportResponse};
