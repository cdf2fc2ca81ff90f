//! Iterative resolution from the root.
//!
//! Each step sends one non-recursive query and follows the reply: an answer
//! ends the walk, a glued delegation moves to the glue address, an unglued
//! delegation first resolves the nameserver's own address from the root, and
//! a reply with neither is returned as-is.

use crate::dns::transport::DnsTransport;
use async_trait::async_trait;
use futures::future::BoxFuture;
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::config::ResolverConfig;
use rootwalk_domain::{ConfigError, DnsQuery, DomainError, Message, QueryType, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Port used for nameservers learned from delegations.
pub const DNS_PORT: u16 = 53;

/// Mutable state of one top-level resolution, nested lookups included.
struct Walk {
    id: u16,
    steps: usize,
}

pub struct IterativeResolver {
    transport: Arc<dyn DnsTransport>,
    root_hints: Vec<SocketAddr>,
    query_timeout: Duration,
    retries: u32,
    max_delegation_depth: usize,
}

impl IterativeResolver {
    pub fn new(transport: Arc<dyn DnsTransport>, root_hints: Vec<SocketAddr>) -> Self {
        let defaults = ResolverConfig::default();
        Self {
            transport,
            root_hints,
            query_timeout: defaults.query_timeout(),
            retries: defaults.retries,
            max_delegation_depth: defaults.max_delegation_depth,
        }
    }

    pub fn from_config(
        transport: Arc<dyn DnsTransport>,
        config: &ResolverConfig,
    ) -> Result<Self, ConfigError> {
        let root_hints = config.root_hint_addrs()?;
        info!(
            root_hints = ?root_hints,
            timeout_ms = config.query_timeout_ms,
            retries = config.retries,
            max_delegation_depth = config.max_delegation_depth,
            protocol = transport.protocol_name(),
            "Iterative resolver created"
        );

        Ok(Self::new(transport, root_hints)
            .with_timeout(config.query_timeout())
            .with_retries(config.retries)
            .with_max_delegation_depth(config.max_delegation_depth))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_max_delegation_depth(mut self, depth: usize) -> Self {
        self.max_delegation_depth = depth;
        self
    }

    /// Resolves `name` using `id` on every query sent, nested lookups included.
    pub async fn resolve_with_id(
        &self,
        name: &str,
        query_type: QueryType,
        id: u16,
    ) -> Result<DnsResolution, DomainError> {
        let start = Instant::now();
        let mut walk = Walk { id, steps: 0 };
        let mut queried = Vec::new();

        let message = self
            .walk(name.to_string(), query_type, &mut walk, &mut queried)
            .await?;

        let resolution = DnsResolution::new(message, queried);
        debug!(
            domain = %name,
            record_type = %query_type,
            answered = resolution.answered,
            steps = walk.steps,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Iterative resolution finished"
        );
        Ok(resolution)
    }

    fn walk<'a>(
        &'a self,
        name: String,
        query_type: QueryType,
        walk: &'a mut Walk,
        queried: &'a mut Vec<SocketAddr>,
    ) -> BoxFuture<'a, Result<Message, DomainError>> {
        Box::pin(async move {
            let (mut server, mut reply) = self.query_root(&name, query_type, walk).await?;

            loop {
                queried.push(server);

                if !reply.answers().is_empty() {
                    debug!(
                        domain = %name,
                        server = %server,
                        answers = reply.answers().len(),
                        "Answer received"
                    );
                    return Ok(reply);
                }

                let next = if let Some(glue) = reply.resolved_nameserver(&name) {
                    debug!(
                        domain = %name,
                        server = %server,
                        next = %glue,
                        depth = walk.steps,
                        "Following glued delegation"
                    );
                    IpAddr::V4(glue)
                } else {
                    match reply.unresolved_nameserver(&name) {
                        Ok(host) => {
                            let host = host.to_string();
                            debug!(
                                domain = %name,
                                server = %server,
                                nameserver = %host,
                                depth = walk.steps,
                                "Delegation without glue, resolving nameserver"
                            );
                            IpAddr::V4(self.resolve_nameserver(host, walk).await?)
                        }
                        Err(_) => {
                            debug!(
                                domain = %name,
                                server = %server,
                                "No answer and no delegation"
                            );
                            return Ok(reply);
                        }
                    }
                };

                server = SocketAddr::new(next, DNS_PORT);
                reply = self.query(server, &name, query_type, walk).await?;
            }
        })
    }

    /// Address of an unglued nameserver, looked up from the root. Any failure
    /// other than running out of budget becomes `ResolutionFailed`.
    async fn resolve_nameserver(
        &self,
        host: String,
        walk: &mut Walk,
    ) -> Result<Ipv4Addr, DomainError> {
        let mut nested_queried = Vec::new();
        let nested = match self
            .walk(host.clone(), RecordType::A.into(), walk, &mut nested_queried)
            .await
        {
            Ok(message) => message,
            Err(e @ DomainError::DelegationLimitExceeded(_)) => return Err(e),
            Err(e) => {
                return Err(DomainError::ResolutionFailed(format!(
                    "nameserver {} did not resolve: {}",
                    host, e
                )))
            }
        };

        nested
            .random_a_record()
            .and_then(|record| record.rdata.ipv4())
            .ok_or_else(|| {
                DomainError::ResolutionFailed(format!("nameserver {} has no address", host))
            })
    }

    /// First step of a walk. A root hint that times out or is unreachable
    /// hands over to the next one.
    async fn query_root(
        &self,
        name: &str,
        query_type: QueryType,
        walk: &mut Walk,
    ) -> Result<(SocketAddr, Message), DomainError> {
        let mut last_error = None;

        for &root in &self.root_hints {
            match self.query(root, name, query_type, walk).await {
                Ok(reply) => return Ok((root, reply)),
                Err(e) if e.is_transient() => {
                    warn!(server = %root, error = %e, "Root server unavailable");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error
            .unwrap_or_else(|| DomainError::ResolutionFailed("no root hints".to_string())))
    }

    async fn query(
        &self,
        server: SocketAddr,
        name: &str,
        query_type: QueryType,
        walk: &mut Walk,
    ) -> Result<Message, DomainError> {
        walk.steps += 1;
        if walk.steps > self.max_delegation_depth {
            warn!(
                domain = %name,
                limit = self.max_delegation_depth,
                "Delegation depth limit reached"
            );
            return Err(DomainError::DelegationLimitExceeded(self.max_delegation_depth));
        }

        let request = Message::query(walk.id, name, query_type, false)?;
        let bytes = self.exchange(request.bytes(), server).await?;
        let reply = Message::from_bytes(bytes)?;

        if reply.id() != walk.id {
            warn!(
                server = %server,
                expected = walk.id,
                received = reply.id(),
                "Reply id does not match query"
            );
        }

        Ok(reply)
    }

    async fn exchange(&self, bytes: &[u8], server: SocketAddr) -> Result<Vec<u8>, DomainError> {
        let mut attempt = 0;
        loop {
            match self.transport.send(bytes, server, self.query_timeout).await {
                Ok(response) => return Ok(response.bytes),
                Err(DomainError::TransportTimeout { .. }) if attempt < self.retries => {
                    attempt += 1;
                    debug!(server = %server, attempt = attempt, "Query timed out, retrying");
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[async_trait]
impl DnsResolver for IterativeResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        let id = query.id.unwrap_or_else(|| fastrand::u16(..));
        self.resolve_with_id(&query.domain, query.query_type, id).await
    }
}
