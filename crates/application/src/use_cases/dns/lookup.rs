use crate::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::{DnsQuery, DomainError, QueryType};
use std::sync::Arc;
use tracing::info;

/// One-shot resolution of a name, for callers that want the decoded reply
/// rather than raw bytes.
pub struct LookupUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl LookupUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    pub async fn execute(
        &self,
        name: &str,
        query_type: QueryType,
    ) -> Result<DnsResolution, DomainError> {
        let name = name.trim_end_matches('.');
        if name.is_empty() {
            return Err(DomainError::InvalidDomainName("empty name".to_string()));
        }

        let resolution = self.resolver.resolve(&DnsQuery::new(name, query_type)).await?;

        info!(
            domain = %name,
            record_type = %query_type,
            answers = resolution.message.answers().len(),
            answered = resolution.answered,
            "Lookup complete"
        );

        Ok(resolution)
    }
}
