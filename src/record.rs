use std::{fmt::Display, str::FromStr};

use crate::ParseError;

/// Possible CLASS values for a zone file Resource Record
/// Each value is described according to its own RFC
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordClass {
    /// The Internet, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    IN,
    /// The CSNET class (Obsolete - used only for examples in some obsolete RFCs), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    CS,
    /// The CHAOS class, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    CH,
    /// Hesiod [Dyer 87], [RFC 1035](https://tools.ietf.org/html/rfc1035)
    HS,
    /// Any class, written `*` in master files, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    Any,
}

impl RecordClass {
    fn as_str(&self) -> &'static str {
        match self {
            RecordClass::IN => "IN",
            RecordClass::CS => "CS",
            RecordClass::CH => "CH",
            RecordClass::HS => "HS",
            RecordClass::Any => "*",
        }
    }
}

impl FromStr for RecordClass {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use self::RecordClass::*;

        match s {
            "IN" => Ok(IN),
            "CS" => Ok(CS),
            "CH" => Ok(CH),
            "HS" => Ok(HS),
            "*" => Ok(Any),
            _ => Err(ParseError::UnknownClass(s.to_string())),
        }
    }
}

impl Display for RecordClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Possible TYPE values for a zone file Resource Record
/// Each value is described according to its own RFC
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// Host address, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    A,
    /// Authoritative name server, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    NS,
    /// Mail destination (Obsolete - use MX), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MD,
    /// Mail forwarder (Obsolete - use MX), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MF,
    /// Canonical name for an alias, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    CNAME,
    /// Marks the start of a zone of authority, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    SOA,
    /// Mailbox domain name (EXPERIMENTAL), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MB,
    /// Mail group member (EXPERIMENTAL), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MG,
    /// Mail rename domain name (EXPERIMENTAL), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MR,
    /// Null RR (EXPERIMENTAL), [RFC 1035](https://tools.ietf.org/html/rfc1035)
    NULL,
    /// Well known service description, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    WKS,
    /// Domain name pointer, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    PTR,
    /// Host information, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    HINFO,
    /// Mailbox or mail list information, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MINFO,
    /// Mail exchange, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    MX,
    /// Text strings, [RFC 1035](https://tools.ietf.org/html/rfc1035)
    TXT,
}

impl RecordType {
    fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::NS => "NS",
            RecordType::MD => "MD",
            RecordType::MF => "MF",
            RecordType::CNAME => "CNAME",
            RecordType::SOA => "SOA",
            RecordType::MB => "MB",
            RecordType::MG => "MG",
            RecordType::MR => "MR",
            RecordType::NULL => "NULL",
            RecordType::WKS => "WKS",
            RecordType::PTR => "PTR",
            RecordType::HINFO => "HINFO",
            RecordType::MINFO => "MINFO",
            RecordType::MX => "MX",
            RecordType::TXT => "TXT",
        }
    }
}

impl FromStr for RecordType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use self::RecordType::*;

        match s {
            "A" => Ok(A),
            "NS" => Ok(NS),
            "MD" => Ok(MD),
            "MF" => Ok(MF),
            "CNAME" => Ok(CNAME),
            "SOA" => Ok(SOA),
            "MB" => Ok(MB),
            "MG" => Ok(MG),
            "MR" => Ok(MR),
            "NULL" => Ok(NULL),
            "WKS" => Ok(WKS),
            "PTR" => Ok(PTR),
            "HINFO" => Ok(HINFO),
            "MINFO" => Ok(MINFO),
            "MX" => Ok(MX),
            "TXT" => Ok(TXT),
            _ => Err(ParseError::UnknownType(s.to_string())),
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TTL value used when the source record did not specify one.
/// Rendering a record with this value omits the TTL field entirely
pub const TTL_NOT_SPECIFIED: i64 = -1;

/// A single parsed zone file Resource Record entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Absolute (fully-qualified, trailing dot) domain name.
    /// Relative names are resolved against the origin before the record is built
    pub name: String,
    /// Time to live in seconds, or [`TTL_NOT_SPECIFIED`] when absent from the source
    pub ttl: i64,
    /// Record CLASS
    pub class: RecordClass,
    /// Record TYPE
    pub rtype: RecordType,
    /// Raw rdata tokens, interpretation is left to the caller.
    /// SOA groups keep their literal `(` and `)` tokens; TXT holds one token
    /// with the whole quoted string verbatim, quotes and escapes included
    pub rdata: Vec<String>,
    /// Verbatim trailing comment including the leading `;`, or empty
    pub comment: String,
}

impl Record {
    /// Creates a new Record without a trailing comment
    pub fn new(
        name: String,
        ttl: i64,
        class: RecordClass,
        rtype: RecordType,
        rdata: Vec<String>,
    ) -> Self {
        Self {
            name,
            ttl,
            class,
            rtype,
            rdata,
            comment: String::new(),
        }
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.name)?;

        if self.ttl != TTL_NOT_SPECIFIED {
            write!(f, "{} ", self.ttl)?;
        }

        write!(f, "{} {}", self.class, self.rtype)?;

        for field in &self.rdata {
            write!(f, " {}", field)?;
        }

        if !self.comment.is_empty() {
            write!(f, " {}", self.comment)?;
        }

        Ok(())
    }
}
