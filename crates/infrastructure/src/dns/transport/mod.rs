pub mod udp;

use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub from: SocketAddr,
}

/// Sends one message to one nameserver and waits for one reply.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Fails with `TransportTimeout` when no reply arrives within `timeout`,
    /// `NetworkError` on any socket failure.
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}
