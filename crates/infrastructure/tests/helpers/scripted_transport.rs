#![allow(dead_code)]
use async_trait::async_trait;
use rootwalk_domain::{DomainError, Message};
use rootwalk_infrastructure::dns::transport::{DnsTransport, TransportResponse};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::time::Duration;

pub enum Scripted {
    /// Sent back with its id rewritten to the query's.
    Reply(Message),
    /// Sent back byte for byte.
    Raw(Vec<u8>),
    Timeout,
}

#[derive(Debug, Clone)]
pub struct SentQuery {
    pub server: SocketAddr,
    pub message: Message,
    pub timeout: Duration,
}

/// In-memory transport that plays back a fixed list of outcomes, one per
/// query, and records where each query went.
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    sent: Mutex<Vec<SentQuery>>,
}

impl ScriptedTransport {
    pub fn new(script: Vec<Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn replies(messages: Vec<Message>) -> Self {
        Self::new(messages.into_iter().map(Scripted::Reply).collect())
    }

    pub fn sent(&self) -> Vec<SentQuery> {
        self.sent.lock().unwrap().clone()
    }

    pub fn servers(&self) -> Vec<SocketAddr> {
        self.sent().into_iter().map(|q| q.server).collect()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsTransport for ScriptedTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        server: SocketAddr,
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let message = Message::from_bytes(message_bytes.to_vec()).unwrap();
        self.sent.lock().unwrap().push(SentQuery {
            server,
            message,
            timeout,
        });

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Reply(reply)) => {
                let mut bytes = reply.bytes().to_vec();
                bytes[..2].copy_from_slice(&message_bytes[..2]);
                Ok(TransportResponse {
                    bytes,
                    from: server,
                })
            }
            Some(Scripted::Raw(bytes)) => Ok(TransportResponse {
                bytes,
                from: server,
            }),
            Some(Scripted::Timeout) => Err(DomainError::TransportTimeout {
                server: server.to_string(),
            }),
            None => Err(DomainError::NetworkError {
                server: server.to_string(),
                reason: "script exhausted".to_string(),
            }),
        }
    }

    fn protocol_name(&self) -> &'static str {
        "SCRIPTED"
    }
}
