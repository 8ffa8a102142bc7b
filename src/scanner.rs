use std::iter::Peekable;
use std::str::CharIndices;

use crate::record::TTL_NOT_SPECIFIED;
use crate::{ParseError, Record, RecordClass, RecordType};

/// Streaming reader that turns zone file text into a sequence of [`Record`]s
///
/// The scanner borrows its input and keeps the current origin and read
/// position between calls. One call to [`Scanner::next_record`] consumes any
/// number of blank lines, comment-only lines and control entries before
/// producing a single record, a parse error, or `None` once the input is
/// exhausted.
///
/// ```rust
/// use simple_zone::Scanner;
///
/// let mut scanner = Scanner::new("$ORIGIN adomain.com.\nwww 300 IN A 192.168.0.1");
/// let record = scanner.next_record().unwrap().unwrap();
/// assert_eq!("www.adomain.com.", record.name);
/// assert!(scanner.next_record().is_none());
/// ```
#[derive(Debug)]
pub struct Scanner<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
    origin: Option<String>,
}

/// Parse every record in `content`, resolving relative names against
/// `origin` when one is provided
pub fn parse(content: &str, origin: Option<&str>) -> crate::Result<Vec<Record>> {
    let mut scanner = Scanner::new(content);
    if let Some(origin) = origin {
        scanner.set_origin(origin)?;
    }

    scanner.collect()
}

impl<'a> Scanner<'a> {
    /// Creates a new Scanner over `source`
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            origin: None,
        }
    }

    /// Replaces the current origin, used to qualify relative domain names.
    /// Fails with [`ParseError::RelativeOrigin`] unless `name` is absolute
    pub fn set_origin(&mut self, name: &str) -> crate::Result<()> {
        if !name.ends_with('.') {
            return Err(ParseError::RelativeOrigin(name.to_string()));
        }

        self.origin = Some(name.to_string());
        Ok(())
    }

    /// Returns the current origin, if one was set explicitly or by an
    /// `$ORIGIN` control entry
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Produces the next record in the input.
    ///
    /// Returns `None` when the input is exhausted with no partial record
    /// pending; control entries, comment-only lines and blank lines are
    /// consumed silently and never yield a record on their own
    pub fn next_record(&mut self) -> Option<crate::Result<Record>> {
        loop {
            while self.chars.next_if(|&(_, c)| sp(c) || eol(c)).is_some() {}

            match self.peek_char() {
                None => return None,
                Some(';') => self.skip_to_eol(),
                Some('$') => {
                    if let Err(e) = self.control_entry() {
                        return Some(Err(e));
                    }
                }
                Some(_) => return Some(self.record()),
            }
        }
    }

    fn peek_char(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    fn skip_spaces(&mut self) {
        while self.chars.next_if(|&(_, c)| sp(c)).is_some() {}
    }

    /// Consumes up to, but not including, the next end of line
    fn skip_to_eol(&mut self) {
        while self.chars.next_if(|&(_, c)| !eol(c)).is_some() {}
    }

    /// Consumes one token starting at the current position. `(`, `)` and `"`
    /// are tokens of their own; anything else runs until the next delimiter
    fn take_token(&mut self) -> &'a str {
        let start = match self.chars.peek() {
            Some(&(start, c)) if c == '(' || c == ')' || c == '"' => {
                self.chars.next();
                return &self.source[start..start + c.len_utf8()];
            }
            Some(&(start, _)) => start,
            None => return "",
        };

        while self.chars.next_if(|el| !token_delim(el.1)).is_some() {}

        match self.chars.peek() {
            Some(&(end, _)) => &self.source[start..end],
            None => &self.source[start..],
        }
    }

    /// Captures `;` and everything up to the end of the line, verbatim
    fn take_comment(&mut self) -> String {
        let start = match self.chars.peek() {
            Some(&(start, _)) => start,
            None => return String::new(),
        };

        while self.chars.next_if(|&(_, c)| !eol(c)).is_some() {}

        match self.chars.peek() {
            Some(&(end, _)) => self.source[start..end].to_string(),
            None => self.source[start..].to_string(),
        }
    }

    /// Consumes a `$` control entry line. Only `$ORIGIN` is recognized; a
    /// well-formed entry updates the origin and produces no record
    fn control_entry(&mut self) -> crate::Result<()> {
        let keyword = self.take_token();
        if keyword != "$ORIGIN" {
            return Err(ParseError::UnknownDirective(keyword.to_string()));
        }

        self.skip_spaces();
        match self.peek_char() {
            None | Some(';') => return Err(ParseError::MissingOriginArgument),
            Some(c) if eol(c) => return Err(ParseError::MissingOriginArgument),
            Some(_) => {}
        }

        let origin = self.take_token();

        // the argument count is checked before absoluteness, so that a line
        // with several domains always reports MalformedDirective
        self.skip_spaces();
        match self.peek_char() {
            Some(';') => self.skip_to_eol(),
            Some(c) if !eol(c) => return Err(ParseError::MalformedDirective),
            _ => {}
        }

        if !origin.ends_with('.') {
            return Err(ParseError::RelativeOrigin(origin.to_string()));
        }

        self.origin = Some(origin.to_string());
        Ok(())
    }

    /// Qualifies a domain name token against the current origin
    fn resolve_domain(&self, name: &str) -> crate::Result<String> {
        if name == "@" {
            return self.origin.clone().ok_or(ParseError::NoOrigin);
        }

        if name.ends_with('.') {
            return Ok(name.to_string());
        }

        match &self.origin {
            Some(origin) => Ok(format!("{}.{}", name, origin)),
            None => Err(ParseError::NoOrigin),
        }
    }

    /// Consumes the next field token on the current line. Reaching the end
    /// of the line, the end of input or a comment means a required field is
    /// absent
    fn field_token(&mut self) -> crate::Result<&'a str> {
        self.skip_spaces();
        match self.peek_char() {
            None | Some(';') => Err(ParseError::UnexpectedEnd),
            Some(c) if eol(c) => Err(ParseError::UnexpectedEnd),
            Some(_) => Ok(self.take_token()),
        }
    }

    /// Scans one full record starting at the domain name token
    fn record(&mut self) -> crate::Result<Record> {
        let name = self.take_token();
        let name = self.resolve_domain(name)?;

        let mut token = self.field_token()?;
        let ttl = match token.parse::<i64>() {
            Ok(ttl) => {
                token = self.field_token()?;
                ttl
            }
            Err(_) => TTL_NOT_SPECIFIED,
        };

        let class: RecordClass = token.parse()?;
        let rtype: RecordType = self.field_token()?.parse()?;

        let mut record = Record::new(name, ttl, class, rtype, Vec::new());
        match rtype {
            RecordType::SOA => self.grouped_rdata(&mut record)?,
            RecordType::TXT => self.quoted_rdata(&mut record)?,
            _ => self.plain_rdata(&mut record)?,
        }

        Ok(record)
    }

    /// Whitespace-separated rdata tokens until end of line or comment
    fn plain_rdata(&mut self, record: &mut Record) -> crate::Result<()> {
        loop {
            self.skip_spaces();
            match self.peek_char() {
                None => break,
                Some(c) if eol(c) => break,
                Some(';') => {
                    record.comment = self.take_comment();
                    break;
                }
                Some(_) => record.rdata.push(self.take_token().to_string()),
            }
        }

        if record.rdata.is_empty() {
            return Err(ParseError::UnexpectedEnd);
        }

        Ok(())
    }

    /// SOA rdata. `(` and `)` are kept as literal tokens and toggle a
    /// continuation mode in which a newline is ordinary whitespace and a
    /// comment only runs to the end of its own physical line
    fn grouped_rdata(&mut self, record: &mut Record) -> crate::Result<()> {
        let mut grouped = false;

        loop {
            self.skip_spaces();
            match self.peek_char() {
                None => {
                    if grouped {
                        return Err(ParseError::UnterminatedGroup);
                    }
                    break;
                }
                Some(c) if eol(c) => {
                    if grouped {
                        self.chars.next();
                    } else {
                        break;
                    }
                }
                Some(';') => {
                    if grouped {
                        self.skip_to_eol();
                    } else {
                        record.comment = self.take_comment();
                        break;
                    }
                }
                Some('(') => {
                    grouped = true;
                    record.rdata.push(self.take_token().to_string());
                }
                Some(')') => {
                    grouped = false;
                    record.rdata.push(self.take_token().to_string());
                }
                Some(_) => record.rdata.push(self.take_token().to_string()),
            }
        }

        if record.rdata.is_empty() {
            return Err(ParseError::UnexpectedEnd);
        }

        Ok(())
    }

    /// TXT rdata: a single quoted string captured verbatim, surrounding
    /// quotes and backslash escapes included. The opening quote may abut the
    /// type keyword with no whitespace in between
    fn quoted_rdata(&mut self, record: &mut Record) -> crate::Result<()> {
        self.skip_spaces();
        let start = match self.chars.peek() {
            Some(&(start, '"')) => start,
            // anything else means the required quoted string is absent
            _ => return Err(ParseError::UnexpectedEnd),
        };
        self.chars.next();

        let mut escaped = false;
        let end = loop {
            match self.chars.next() {
                None => return Err(ParseError::UnterminatedString),
                Some((i, c)) => {
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break i;
                    }
                }
            }
        };

        record.rdata.push(self.source[start..=end].to_string());

        self.skip_spaces();
        if let Some(';') = self.peek_char() {
            record.comment = self.take_comment();
        }

        Ok(())
    }
}

impl Iterator for Scanner<'_> {
    type Item = crate::Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

fn sp(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn eol(c: char) -> bool {
    c == '\r' || c == '\n'
}

fn token_delim(c: char) -> bool {
    sp(c) || eol(c) || c == ';' || c == '(' || c == ')' || c == '"'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_origin_requires_absolute_name() {
        let mut scanner = Scanner::new("");
        assert_eq!(
            Err(ParseError::RelativeOrigin("adomain.com".to_string())),
            scanner.set_origin("adomain.com")
        );
        assert_eq!(None, scanner.origin());

        scanner.set_origin("adomain.com.").unwrap();
        assert_eq!(Some("adomain.com."), scanner.origin());
    }

    #[test]
    fn origin_control_entry_sets_origin() {
        let mut scanner = Scanner::new("$ORIGIN adomain.com.\n@ 300 IN A 192.168.1.1");

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!(Some("adomain.com."), scanner.origin());
        assert_eq!("adomain.com.", record.name);
    }

    #[test]
    fn origin_control_entry_can_have_comment() {
        let mut scanner =
            Scanner::new("$ORIGIN adomain.com. ; should be ignored\n@ 300 IN A 192.168.1.1");

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!("adomain.com.", record.name);
    }

    #[test]
    fn origin_only_input_is_end_of_stream() {
        // a trailing $ORIGIN is not an error on its own, the scanner just
        // runs out of records
        let mut scanner = Scanner::new("$ORIGIN adomain.com.");
        assert!(scanner.next_record().is_none());
        assert_eq!(Some("adomain.com."), scanner.origin());
    }

    #[test]
    fn origin_control_entry_missing_argument() {
        for source in ["$ORIGIN", "$ORIGIN\nwww 300 IN A 192.168.1.1", "$ORIGIN ;ignored\nwww 300 IN A 192.168.1.1"] {
            let mut scanner = Scanner::new(source);
            assert_eq!(
                Some(Err(ParseError::MissingOriginArgument)),
                scanner.next_record(),
                "input: {:?}",
                source
            );
        }
    }

    #[test]
    fn origin_control_entry_multiple_arguments() {
        let mut scanner = Scanner::new("$ORIGIN adomain.com andanother.com.");
        assert_eq!(
            Some(Err(ParseError::MalformedDirective)),
            scanner.next_record()
        );
    }

    #[test]
    fn origin_control_entry_relative_argument() {
        let mut scanner = Scanner::new("$ORIGIN adomain.com\nwww 300 IN A 192.168.1.1");
        assert_eq!(
            Some(Err(ParseError::RelativeOrigin("adomain.com".to_string()))),
            scanner.next_record()
        );
    }

    #[test]
    fn unknown_control_entry() {
        let mut scanner = Scanner::new("$UNKNOWN");
        assert_eq!(
            Some(Err(ParseError::UnknownDirective("$UNKNOWN".to_string()))),
            scanner.next_record()
        );
    }

    #[test]
    fn relative_names_resolve_against_origin() {
        let mut scanner = Scanner::new("www 300 IN A 192.168.1.1");
        scanner.set_origin("adomain.com.").unwrap();

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!("www.adomain.com.", record.name);
    }

    #[test]
    fn at_sign_resolves_to_origin() {
        let mut scanner = Scanner::new("@ 300 IN A 192.168.1.1");
        scanner.set_origin("adomain.com.").unwrap();

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!("adomain.com.", record.name);
    }

    #[test]
    fn absolute_names_ignore_origin() {
        let mut scanner = Scanner::new("www.example.com. 300 IN A 192.168.1.1");
        scanner.set_origin("adomain.com.").unwrap();

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!("www.example.com.", record.name);
    }

    #[test]
    fn relative_names_without_origin_fail() {
        for source in ["@ 300 IN A 192.168.1.1", "www 300 IN A 192.168.1.1"] {
            let mut scanner = Scanner::new(source);
            assert_eq!(
                Some(Err(ParseError::NoOrigin)),
                scanner.next_record(),
                "input: {:?}",
                source
            );
        }
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let mut scanner = Scanner::new(
            "\n   \n; a full line comment\n\nadomain.com. 300 IN A 192.168.0.1\n",
        );

        let record = scanner.next_record().unwrap().unwrap();
        assert_eq!("adomain.com.", record.name);
        assert!(scanner.next_record().is_none());
    }

    #[test]
    fn scanner_is_an_iterator() {
        let scanner = Scanner::new(
            "adomain.com. 300 IN A 192.168.0.1\nadomain.com. 300 IN A 192.168.0.2\n",
        );

        let records: crate::Result<Vec<_>> = scanner.collect();
        let records = records.unwrap();

        assert_eq!(2, records.len());
        assert_eq!(vec!["192.168.0.1".to_string()], records[0].rdata);
        assert_eq!(vec!["192.168.0.2".to_string()], records[1].rdata);
    }

    #[test]
    fn parse_collects_all_records() -> crate::Result<()> {
        let records = parse(
            "$ORIGIN adomain.com.\n@ 300 IN NS ns.ahostdomain.com.\nwww 300 IN A 192.168.0.1\n",
            None,
        )?;

        assert_eq!(2, records.len());
        assert_eq!("adomain.com.", records[0].name);
        assert_eq!("www.adomain.com.", records[1].name);

        Ok(())
    }

    #[test]
    fn parse_applies_initial_origin() -> crate::Result<()> {
        let records = parse("www 300 IN A 192.168.0.1", Some("adomain.com."))?;

        assert_eq!("www.adomain.com.", records[0].name);
        Ok(())
    }
}
