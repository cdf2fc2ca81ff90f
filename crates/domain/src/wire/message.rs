use super::header::{Header, QueryResponse, ResponseCode, HEADER_LEN};
use super::question::Question;
use super::rdata::RData;
use super::record::Record;
use crate::{DomainError, QueryClass, QueryType, RecordType};
use bytes::Bytes;
use std::fmt;
use std::net::Ipv4Addr;

/// A complete DNS message together with the wire bytes it was decoded from
/// or encoded to. Sections are decoded eagerly and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    bytes: Bytes,
    header: Header,
    questions: Vec<Question>,
    answers: Vec<Record>,
    authorities: Vec<Record>,
    additionals: Vec<Record>,
}

impl Message {
    /// Decodes a full message. Either every section declared by the header
    /// decodes, or the whole call fails.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Result<Self, DomainError> {
        let bytes = bytes.into();
        if bytes.len() < HEADER_LEN {
            return Err(DomainError::MalformedHeader(format!(
                "message is {} bytes, shorter than the header",
                bytes.len()
            )));
        }

        let header = Header::decode(&bytes[..HEADER_LEN])?;
        let mut offset = HEADER_LEN;

        let questions = decode_section(
            &bytes,
            &mut offset,
            "question",
            header.qdcount,
            Question::decode,
            Question::byte_len,
        )?;
        let answers = decode_section(
            &bytes,
            &mut offset,
            "answer",
            header.ancount,
            Record::decode,
            Record::byte_len,
        )?;
        let authorities = decode_section(
            &bytes,
            &mut offset,
            "authority",
            header.nscount,
            Record::decode,
            Record::byte_len,
        )?;
        let additionals = decode_section(
            &bytes,
            &mut offset,
            "additional",
            header.arcount,
            Record::decode,
            Record::byte_len,
        )?;

        Ok(Self {
            bytes,
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// Assembles a message by concatenating the header and each entry's
    /// encoding. Header counts are taken as given and must agree with the
    /// section lengths.
    pub fn new(
        header: Header,
        questions: Vec<Question>,
        answers: Vec<Record>,
        authorities: Vec<Record>,
        additionals: Vec<Record>,
    ) -> Result<Self, DomainError> {
        check_count("question", header.qdcount, questions.len())?;
        check_count("answer", header.ancount, answers.len())?;
        check_count("authority", header.nscount, authorities.len())?;
        check_count("additional", header.arcount, additionals.len())?;

        let mut buf = Vec::with_capacity(512);
        buf.extend_from_slice(&header.encode());
        for question in &questions {
            buf.extend_from_slice(&question.encode()?);
        }
        for record in answers.iter().chain(&authorities).chain(&additionals) {
            buf.extend_from_slice(&record.encode()?);
        }

        Ok(Self {
            bytes: Bytes::from(buf),
            header,
            questions,
            answers,
            authorities,
            additionals,
        })
    }

    /// A single IN-class question with no records.
    pub fn query(
        id: u16,
        qname: &str,
        qtype: QueryType,
        recursion_desired: bool,
    ) -> Result<Self, DomainError> {
        let header = Header {
            id,
            rd: recursion_desired,
            qdcount: 1,
            ..Header::default()
        };
        let question = Question::new(qname, qtype, QueryClass::IN);
        Self::new(header, vec![question], vec![], vec![], vec![])
    }

    /// An empty response to `request` carrying `rcode`, echoing its id,
    /// opcode, RD bit and questions.
    pub fn error_response(request: &Message, rcode: ResponseCode) -> Result<Self, DomainError> {
        Self::error_reply(&request.header, request.questions.clone(), rcode)
    }

    /// Like [`Message::error_response`] for a request whose body did not
    /// decode. No questions are echoed.
    pub fn header_error_response(
        request: &Header,
        rcode: ResponseCode,
    ) -> Result<Self, DomainError> {
        Self::error_reply(request, vec![], rcode)
    }

    fn error_reply(
        request: &Header,
        questions: Vec<Question>,
        rcode: ResponseCode,
    ) -> Result<Self, DomainError> {
        let header = Header {
            id: request.id,
            qr: QueryResponse::Response,
            opcode: request.opcode,
            rd: request.rd,
            ra: true,
            rcode,
            qdcount: questions.len() as u16,
            ..Header::default()
        };
        Self::new(header, questions, vec![], vec![], vec![])
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn id(&self) -> u16 {
        self.header.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Record] {
        &self.answers
    }

    pub fn authorities(&self) -> &[Record] {
        &self.authorities
    }

    pub fn additionals(&self) -> &[Record] {
        &self.additionals
    }

    /// Any A record from the answer section; which one is unspecified.
    pub fn random_a_record(&self) -> Option<&Record> {
        let candidates: Vec<&Record> = self
            .answers
            .iter()
            .filter(|r| r.is_type(RecordType::A))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[fastrand::usize(..candidates.len())])
    }

    /// Authority NS records whose owner is `qname` or one of its ancestors,
    /// each paired with the nameserver host it names.
    pub fn delegations(&self, qname: &str) -> Vec<(&Record, &str)> {
        self.authorities
            .iter()
            .filter_map(|record| match &record.rdata {
                RData::NS { host } if is_subdomain_of(qname, &record.name) => {
                    Some((record, host.as_str()))
                }
                _ => None,
            })
            .collect()
    }

    /// Address from an additional-section A record owned by `host`.
    pub fn glue_address(&self, host: &str) -> Option<Ipv4Addr> {
        self.additionals
            .iter()
            .filter(|r| same_name(&r.name, host))
            .find_map(|r| r.rdata.ipv4())
    }

    /// First delegation for `qname` whose nameserver has glue.
    pub fn resolved_nameserver(&self, qname: &str) -> Option<Ipv4Addr> {
        self.delegations(qname)
            .into_iter()
            .find_map(|(_, host)| self.glue_address(host))
    }

    /// First delegated nameserver host for `qname`, glued or not.
    pub fn unresolved_nameserver(&self, qname: &str) -> Result<&str, DomainError> {
        self.delegations(qname)
            .first()
            .map(|(_, host)| *host)
            .ok_or_else(|| {
                DomainError::ResolutionFailed(format!("no delegation for {}", qname))
            })
    }
}

fn decode_section<T>(
    buf: &[u8],
    offset: &mut usize,
    section: &'static str,
    expected: u16,
    decode: fn(&[u8], usize) -> Result<T, DomainError>,
    byte_len: fn(&T) -> usize,
) -> Result<Vec<T>, DomainError> {
    let mut entries = Vec::with_capacity(expected as usize);

    for decoded in 0..expected {
        let mismatch = || DomainError::SectionCountMismatch {
            section,
            expected,
            decoded,
        };
        if *offset >= buf.len() {
            return Err(mismatch());
        }
        let entry = decode(buf, *offset).map_err(|e| {
            if e.is_truncation() {
                mismatch()
            } else {
                e
            }
        })?;
        *offset += byte_len(&entry);
        entries.push(entry);
    }

    Ok(entries)
}

fn check_count(section: &'static str, expected: u16, actual: usize) -> Result<(), DomainError> {
    if usize::from(expected) == actual {
        Ok(())
    } else {
        Err(DomainError::SectionCountMismatch {
            section,
            expected,
            decoded: u16::try_from(actual).unwrap_or(u16::MAX),
        })
    }
}

fn trim_root(name: &str) -> &str {
    name.trim_end_matches('.')
}

fn same_name(a: &str, b: &str) -> bool {
    trim_root(a).eq_ignore_ascii_case(trim_root(b))
}

/// True when `zone` equals `name` or is one of its ancestors. The root zone
/// is an ancestor of every name.
pub fn is_subdomain_of(name: &str, zone: &str) -> bool {
    let name = trim_root(name).to_ascii_lowercase();
    let zone = trim_root(zone).to_ascii_lowercase();

    if zone.is_empty() || name == zone {
        return true;
    }

    name.ends_with(&format!(".{}", zone))
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header)?;

        writeln!(f, ";; QUESTION SECTION:")?;
        for question in &self.questions {
            writeln!(f, "  {}", question)?;
        }

        for (title, records) in [
            ("ANSWER", &self.answers),
            ("AUTHORITY", &self.authorities),
            ("ADDITIONAL", &self.additionals),
        ] {
            writeln!(f, ";; {} SECTION:", title)?;
            if records.is_empty() {
                writeln!(f, "  (none)")?;
            }
            for record in records {
                writeln!(f, "  {}", record)?;
            }
        }
        Ok(())
    }
}
