#![allow(dead_code)]
use rootwalk_domain::{Header, Message, QueryResponse, RData, Record, RecordClass};
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// Loopback UDP nameserver that answers every question with one A record.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(address: Ipv4Addr) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let Some(response) = Self::build_mock_response(&buf[..len], address) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    fn build_mock_response(query: &[u8], address: Ipv4Addr) -> Option<Vec<u8>> {
        let query = Message::from_bytes(query.to_vec()).ok()?;
        let question = query.questions().first()?.clone();
        let record = Record::new(
            question.qname.as_str(),
            RecordClass::IN,
            60,
            RData::A {
                address: u32::from(address),
            },
        )
        .ok()?;

        let header = Header {
            id: query.id(),
            qr: QueryResponse::Response,
            aa: true,
            qdcount: 1,
            ancount: 1,
            ..Header::default()
        };
        let reply = Message::new(header, vec![question], vec![record], vec![], vec![]).ok()?;
        Some(reply.bytes().to_vec())
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
