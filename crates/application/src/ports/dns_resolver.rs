use async_trait::async_trait;
use rootwalk_domain::{DnsQuery, DomainError, Message};
use std::net::SocketAddr;
use std::sync::Arc;

/// Outcome of one top-level resolution.
#[derive(Debug, Clone)]
pub struct DnsResolution {
    /// Last reply received, answered or not.
    pub message: Arc<Message>,
    /// Nameservers queried by the top-level walk, in order. Nested lookups for
    /// unglued nameservers are not listed.
    pub nameservers_queried: Vec<SocketAddr>,
    /// False when the walk ran out of delegations and `message` carries no
    /// answers.
    pub answered: bool,
}

impl DnsResolution {
    pub fn new(message: Message, nameservers_queried: Vec<SocketAddr>) -> Self {
        let answered = !message.answers().is_empty();
        Self {
            message: Arc::new(message),
            nameservers_queried,
            answered,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.message.bytes()[..]
    }

    pub fn last_nameserver(&self) -> Option<SocketAddr> {
        self.nameservers_queried.last().copied()
    }
}

#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError>;
}
