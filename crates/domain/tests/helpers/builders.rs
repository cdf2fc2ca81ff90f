#![allow(dead_code)]
use rootwalk_domain::{
    Header, Message, QueryClass, QueryResponse, Question, RData, Record, RecordClass, RecordType,
};
use std::net::Ipv4Addr;

pub fn a_record(name: &str, address: &str) -> Record {
    let address: Ipv4Addr = address.parse().expect("Invalid IPv4 address");
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

pub fn ns_record(zone: &str, host: &str) -> Record {
    Record::new(
        zone,
        RecordClass::IN,
        172_800,
        RData::NS {
            host: host.to_string(),
        },
    )
    .unwrap()
}

pub fn cname_record(name: &str, target: &str) -> Record {
    Record::new(
        name,
        RecordClass::IN,
        60,
        RData::CNAME {
            domain: target.to_string(),
        },
    )
    .unwrap()
}

/// Builds a response message through the encode path.
pub struct ResponseBuilder {
    id: u16,
    question: Question,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl ResponseBuilder {
    pub fn new(qname: &str) -> Self {
        Self {
            id: 1,
            question: Question::new(qname, RecordType::A.into(), QueryClass::IN),
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn answer(mut self, record: Record) -> Self {
        self.answers.push(record);
        self
    }

    pub fn authority(mut self, record: Record) -> Self {
        self.authorities.push(record);
        self
    }

    pub fn additional(mut self, record: Record) -> Self {
        self.additionals.push(record);
        self
    }

    pub fn build(self) -> Message {
        let header = Header {
            id: self.id,
            qr: QueryResponse::Response,
            qdcount: 1,
            ancount: self.answers.len() as u16,
            nscount: self.authorities.len() as u16,
            arcount: self.additionals.len() as u16,
            ..Header::default()
        };
        Message::new(
            header,
            vec![self.question],
            self.answers,
            self.authorities,
            self.additionals,
        )
        .unwrap()
    }
}

/// Hand-assembled wire bytes, for layouts the encoder never produces
/// (compression pointers, bad lengths, unknown types).
pub struct WireBuilder {
    buf: Vec<u8>,
}

impl WireBuilder {
    pub fn with_header(id: u16, qdcount: u16, ancount: u16, nscount: u16, arcount: u16) -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(&id.to_be_bytes());
        buf.extend_from_slice(&[0x81, 0x80]);
        for count in [qdcount, ancount, nscount, arcount] {
            buf.extend_from_slice(&count.to_be_bytes());
        }
        Self { buf }
    }

    pub fn empty() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    pub fn labels(mut self, name: &str) -> Self {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self.buf.push(0);
        self
    }

    /// Literal labels with no terminator, to be followed by a pointer.
    pub fn label_prefix(mut self, name: &str) -> Self {
        for label in name.split('.').filter(|l| !l.is_empty()) {
            self.buf.push(label.len() as u8);
            self.buf.extend_from_slice(label.as_bytes());
        }
        self
    }

    pub fn pointer(mut self, target: u16) -> Self {
        self.buf.push(0xC0 | (target >> 8) as u8);
        self.buf.push(target as u8);
        self
    }

    pub fn u16(mut self, value: u16) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn u32(mut self, value: u32) -> Self {
        self.buf.extend_from_slice(&value.to_be_bytes());
        self
    }

    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// TYPE, CLASS IN, TTL and RDLENGTH for a record whose owner name was
    /// just written.
    pub fn record_fixed(self, type_code: u16, ttl: u32, rdlength: u16) -> Self {
        self.u16(type_code).u16(1).u32(ttl).u16(rdlength)
    }

    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}
