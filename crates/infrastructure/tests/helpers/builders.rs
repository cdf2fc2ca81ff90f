#![allow(dead_code)]
use rootwalk_domain::{
    Header, Message, QueryClass, QueryResponse, QueryType, Question, RData, Record, RecordClass,
    RecordType,
};
use std::net::{Ipv4Addr, SocketAddr};

pub const ROOT: &str = "198.41.0.4:53";
pub const ROOT_B: &str = "170.247.170.2:53";

pub fn root() -> SocketAddr {
    ROOT.parse().unwrap()
}

pub fn ns_addr(ip: &str) -> SocketAddr {
    SocketAddr::new(ip.parse().unwrap(), 53)
}

pub fn a_record(name: &str, address: &str) -> Record {
    let address: Ipv4Addr = address.parse().unwrap();
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

/// Builds upstream replies the way a nameserver would send them.
pub struct ReplyBuilder {
    qname: String,
    qtype: QueryType,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl ReplyBuilder {
    pub fn new(qname: &str) -> Self {
        Self {
            qname: qname.to_string(),
            qtype: RecordType::A.into(),
            answers: vec![],
            authorities: vec![],
            additionals: vec![],
        }
    }

    pub fn qtype(mut self, qtype: QueryType) -> Self {
        self.qtype = qtype;
        self
    }

    pub fn answer(mut self, name: &str, address: &str) -> Self {
        self.answers.push(a_record(name, address));
        self
    }

    pub fn delegate(mut self, zone: &str, host: &str) -> Self {
        self.authorities.push(ns_record(zone, host));
        self
    }

    pub fn glue(mut self, host: &str, address: &str) -> Self {
        self.additionals.push(a_record(host, address));
        self
    }

    pub fn build(self) -> Message {
        let header = Header {
            id: 0,
            qr: QueryResponse::Response,
            qdcount: 1,
            ancount: self.answers.len() as u16,
            nscount: self.authorities.len() as u16,
            arcount: self.additionals.len() as u16,
            ..Header::default()
        };
        let question = Question::new(self.qname, self.qtype, QueryClass::IN);
        Message::new(
            header,
            vec![question],
            self.answers,
            self.authorities,
            self.additionals,
        )
        .unwrap()
    }
}

/// Referral from `zone`'s parent to `host`, with glue when `glue` is given.
pub fn referral(qname: &str, zone: &str, host: &str, glue: Option<&str>) -> Message {
    let builder = ReplyBuilder::new(qname).delegate(zone, host);
    match glue {
        Some(address) => builder.glue(host, address).build(),
        None => builder.build(),
    }
}

pub fn answer(qname: &str, address: &str) -> Message {
    ReplyBuilder::new(qname).answer(qname, address).build()
}

/// A reply with nothing in it: no answer, no delegation.
pub fn dead_end(qname: &str) -> Message {
    ReplyBuilder::new(qname).build()
}
