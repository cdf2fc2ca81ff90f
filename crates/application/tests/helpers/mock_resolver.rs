#![allow(dead_code)]

use async_trait::async_trait;
use rootwalk_application::ports::{DnsResolution, DnsResolver};
use rootwalk_domain::{
    DnsQuery, DomainError, Header, Message, QueryClass, QueryResponse, Question, RData, Record,
    RecordClass,
};
use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tokio::sync::RwLock;

pub const ROOT: &str = "198.41.0.4:53";

pub fn a_record(name: &str, address: Ipv4Addr) -> Record {
    Record::new(
        name,
        RecordClass::IN,
        300,
        RData::A {
            address: u32::from(address),
        },
    )
    .unwrap()
}

/// Resolver that answers from a per-name table and records every query it
/// was asked.
pub struct MockDnsResolver {
    answers: Arc<RwLock<HashMap<String, Vec<Record>>>>,
    errors: Arc<RwLock<HashMap<String, DomainError>>>,
    queries: Arc<std::sync::Mutex<Vec<DnsQuery>>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(RwLock::new(HashMap::new())),
            errors: Arc::new(RwLock::new(HashMap::new())),
            queries: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub async fn set_answers(&self, domain: &str, records: Vec<Record>) {
        self.answers
            .write()
            .await
            .insert(domain.to_string(), records);
    }

    pub async fn set_error(&self, domain: &str, error: DomainError) {
        self.errors.write().await.insert(domain.to_string(), error);
    }

    pub fn queries(&self) -> Vec<DnsQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(&self, query: &DnsQuery) -> Result<DnsResolution, DomainError> {
        self.queries.lock().unwrap().push(query.clone());

        if let Some(err) = self.errors.read().await.get(query.domain.as_ref()).cloned() {
            return Err(err);
        }

        let answers = self
            .answers
            .read()
            .await
            .get(query.domain.as_ref())
            .cloned()
            .unwrap_or_default();

        let header = Header {
            id: query.id.unwrap_or(0),
            qr: QueryResponse::Response,
            aa: true,
            qdcount: 1,
            ancount: answers.len() as u16,
            ..Header::default()
        };
        let question = Question::new(query.domain.as_ref(), query.query_type, QueryClass::IN);
        let message = Message::new(header, vec![question], answers, vec![], vec![])?;
        let root: SocketAddr = ROOT.parse().unwrap();

        Ok(DnsResolution::new(message, vec![root]))
    }
}
