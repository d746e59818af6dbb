use std::fmt;
use std::time::Duration;

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DNSRecordType {
    A,
    AAAA,
    CNAME,
    MX,
    TXT,
    SRV,
    CAA,
    SPF,
    Other(String),
}

impl DNSRecordType {
    pub fn as_str(&self) -> &str {
        match self {
            DNSRecordType::A => "A",
            DNSRecordType::AAAA => "AAAA",
            DNSRecordType::CNAME => "CNAME",
            DNSRecordType::MX => "MX",
            DNSRecordType::TXT => "TXT",
            DNSRecordType::SRV => "SRV",
            DNSRecordType::CAA => "CAA",
            DNSRecordType::SPF => "SPF",
            DNSRecordType::Other(other) => other,
        }
    }
}

impl From<&str> for DNSRecordType {
    fn from(value: &str) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "A" => DNSRecordType::A,
            "AAAA" => DNSRecordType::AAAA,
            "CNAME" => DNSRecordType::CNAME,
            "MX" => DNSRecordType::MX,
            "TXT" => DNSRecordType::TXT,
            "SRV" => DNSRecordType::SRV,
            "CAA" => DNSRecordType::CAA,
            "SPF" => DNSRecordType::SPF,
            _ => DNSRecordType::Other(value.to_string()),
        }
    }
}

impl fmt::Display for DNSRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider-agnostic record exchanged with callers of [`DNSProvider`].
///
/// An empty `id` marks a record the provider has not assigned an identity to yet.
///
/// [`DNSProvider`]: crate::core::provider::DNSProvider
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DNSRecord {
    pub id: String,
    pub record_type: DNSRecordType,
    pub name: String,
    pub value: String,
    pub ttl: Duration,
}

impl DNSRecord {
    pub fn new(
        record_type: DNSRecordType,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        DNSRecord {
            id: String::new(),
            record_type,
            name: name.into(),
            value: value.into(),
            ttl: Duration::ZERO,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}
