use rootwalk_application::use_cases::HandleDnsQueryUseCase;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Raw datagram in, raw datagram out.
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    /// Bytes to send back to `from`, or `None` to stay silent.
    pub async fn handle_raw_udp(&self, data: &[u8], from: SocketAddr) -> Option<Vec<u8>> {
        let start = Instant::now();
        debug!(client = %from, len = data.len(), "DNS datagram received");

        let response = self.use_case.execute(data, from.ip()).await;

        debug!(
            client = %from,
            replied = response.is_some(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "DNS datagram handled"
        );
        response
    }
}
