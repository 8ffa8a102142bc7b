use std::{error::Error, fmt::Display};

/// Error types for SimpleZone
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// Token did not match any known CLASS mnemonic
    UnknownClass(String),
    /// Token did not match any known TYPE mnemonic
    UnknownType(String),
    /// Line or input ended before all required record fields were present
    UnexpectedEnd,
    /// A quoted string was never closed before the end of input
    UnterminatedString,
    /// A parenthesized group was never closed before the end of input
    UnterminatedGroup,
    /// `@` or a relative domain name was used while no origin is set
    NoOrigin,
    /// The provided origin is not an absolute domain name
    RelativeOrigin(String),
    /// An `$ORIGIN` control entry has no domain argument
    MissingOriginArgument,
    /// An `$ORIGIN` control entry has more than one argument
    MalformedDirective,
    /// A control entry other than `$ORIGIN` was encountered
    UnknownDirective(String),
}

impl Error for ParseError {}

impl Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::UnknownClass(class) => {
                write!(f, "Provided class is invalid: {}", class)
            }
            ParseError::UnknownType(rtype) => {
                write!(f, "Provided type is invalid: {}", rtype)
            }
            ParseError::UnexpectedEnd => {
                write!(f, "Record ended before all required fields were present")
            }
            ParseError::UnterminatedString => {
                write!(f, "Quoted string is missing its closing quote")
            }
            ParseError::UnterminatedGroup => {
                write!(f, "Parenthesized group is missing its closing parenthesis")
            }
            ParseError::NoOrigin => {
                write!(f, "Relative domain name used but no origin is set")
            }
            ParseError::RelativeOrigin(origin) => {
                write!(f, "Provided origin is not absolute: {}", origin)
            }
            ParseError::MissingOriginArgument => {
                write!(f, "$ORIGIN control entry has no domain argument")
            }
            ParseError::MalformedDirective => {
                write!(f, "$ORIGIN control entry has more than one argument")
            }
            ParseError::UnknownDirective(directive) => {
                write!(f, "Provided control entry is not supported: {}", directive)
            }
        }
    }
}
