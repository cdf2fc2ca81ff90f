use crate::ports::DnsResolver;
use rootwalk_domain::wire::HEADER_LEN;
use rootwalk_domain::{DnsQuery, DomainError, Header, Message, ResponseCode};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Answers a client's datagram by resolving its first question from the root.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Returns the bytes to send back, or `None` when the datagram is dropped
    /// because not even its header is readable.
    pub async fn execute(&self, datagram: &[u8], client_ip: IpAddr) -> Option<Vec<u8>> {
        let request = match Message::from_bytes(datagram.to_vec()) {
            Ok(request) => request,
            Err(e) => return Self::reject_undecodable(datagram, client_ip, &e),
        };

        let Some(question) = request.questions().first() else {
            debug!(client = %client_ip, id = request.id(), "Request carries no question");
            return Self::reply_error(Message::error_response(
                &request,
                ResponseCode::FormatError,
            ));
        };

        let query =
            DnsQuery::new(question.qname.as_str(), question.qtype).with_id(request.id());
        let start = Instant::now();

        match self.resolver.resolve(&query).await {
            Ok(resolution) => {
                info!(
                    domain = %query.domain,
                    record_type = %query.query_type,
                    client = %client_ip,
                    answered = resolution.answered,
                    hops = resolution.nameservers_queried.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Query resolved"
                );
                Some(resolution.bytes().to_vec())
            }
            Err(e) => {
                warn!(
                    domain = %query.domain,
                    record_type = %query.query_type,
                    client = %client_ip,
                    error = %e,
                    "Resolution failed, answering SERVFAIL"
                );
                Self::reply_error(Message::error_response(
                    &request,
                    ResponseCode::ServerFailure,
                ))
            }
        }
    }

    fn reject_undecodable(
        datagram: &[u8],
        client_ip: IpAddr,
        error: &DomainError,
    ) -> Option<Vec<u8>> {
        let header = datagram
            .get(..HEADER_LEN)
            .and_then(|bytes| Header::decode(bytes).ok());

        match header {
            Some(header) => {
                debug!(
                    client = %client_ip,
                    id = header.id,
                    error = %error,
                    "Undecodable request, answering FORMERR"
                );
                Self::reply_error(Message::header_error_response(
                    &header,
                    ResponseCode::FormatError,
                ))
            }
            None => {
                debug!(
                    client = %client_ip,
                    len = datagram.len(),
                    error = %error,
                    "Dropping unreadable datagram"
                );
                None
            }
        }
    }

    fn reply_error(response: Result<Message, DomainError>) -> Option<Vec<u8>> {
        match response {
            Ok(message) => Some(message.bytes().to_vec()),
            Err(e) => {
                warn!(error = %e, "Failed to encode error response");
                None
            }
        }
    }
}
