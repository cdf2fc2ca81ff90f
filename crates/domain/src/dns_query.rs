use super::QueryType;
use std::sync::Arc;

/// A name and type to resolve, plus the message id to use on the wire.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub domain: Arc<str>,
    pub query_type: QueryType,
    pub id: Option<u16>,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, query_type: impl Into<QueryType>) -> Self {
        Self {
            domain: domain.into(),
            query_type: query_type.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = Some(id);
        self
    }
}
