//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Replies are capped at 512 bytes by
//! the protocol; the receive buffer is larger so an oversized reply still
//! decodes instead of being cut mid-record.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP. Each exchange uses a fresh ephemeral socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct UdpTransport;

impl UdpTransport {
    pub fn new() -> Self {
        Self
    }

    fn bind_addr(server: SocketAddr) -> SocketAddr {
        if server.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

fn network_error(server: SocketAddr, reason: impl ToString) -> DomainError {
    DomainError::NetworkError {
        server: server.to_string(),
        reason: reason.to_string(),
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let deadline = Instant::now() + timeout;
        let timed_out = || DomainError::TransportTimeout {
            server: server.to_string(),
        };

        let socket = UdpSocket::bind(Self::bind_addr(server))
            .await
            .map_err(|e| network_error(server, format!("failed to bind UDP socket: {}", e)))?;

        let bytes_sent = tokio::time::timeout_at(deadline, socket.send_to(message_bytes, server))
            .await
            .map_err(|_| timed_out())?
            .map_err(|e| network_error(server, e))?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        // Datagrams from anyone but the queried server are not replies.
        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| timed_out())?
                    .map_err(|e| network_error(server, e))?;

            if from_addr != server {
                warn!(
                    expected = %server,
                    received_from = %from_addr,
                    "UDP response from unexpected source"
                );
                continue;
            }

            recv_buf.truncate(bytes_received);

            debug!(
                server = %server,
                bytes_received = bytes_received,
                "UDP response received"
            );

            return Ok(TransportResponse {
                bytes: recv_buf,
                from: from_addr,
            });
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_follows_server_family() {
        let v4: SocketAddr = "198.41.0.4:53".parse().unwrap();
        let v6: SocketAddr = "[2001:503:ba3e::2:30]:53".parse().unwrap();
        assert!(UdpTransport::bind_addr(v4).is_ipv4());
        assert!(UdpTransport::bind_addr(v6).is_ipv6());
        assert_eq!(UdpTransport::bind_addr(v4).port(), 0);
    }

    #[tokio::test]
    async fn test_exchange_with_local_echo_server() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (len, peer) = server.recv_from(&mut buf).await.unwrap();
            server.send_to(&buf[..len], peer).await.unwrap();
        });

        let response = UdpTransport::new()
            .send(&[0xab, 0xcd, 1, 2, 3], server_addr, Duration::from_secs(2))
            .await
            .unwrap();

        assert_eq!(response.bytes, vec![0xab, 0xcd, 1, 2, 3]);
        assert_eq!(response.from, server_addr);
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let server_addr = server.local_addr().unwrap();

        let err = UdpTransport::new()
            .send(&[0, 1], server_addr, Duration::from_millis(50))
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::TransportTimeout { .. }));
        drop(server);
    }
}
