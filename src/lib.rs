#![warn(missing_docs)]

//! Pure Rust implementation to parse DNS master (zone) files
//!
//! You can scan a zone one record at a time by using the [`Scanner`] struct
//!
//! ```rust
//! use simple_zone::Scanner;
//!
//! let mut scanner = Scanner::new("adomain.com. 300 IN A 192.168.0.1");
//! let record = scanner.next_record().unwrap().unwrap();
//! assert_eq!("adomain.com.", record.name);
//! ```

mod parse_error;
mod record;
mod scanner;

pub use parse_error::ParseError;
pub use record::{Record, RecordClass, RecordType, TTL_NOT_SPECIFIED};
pub use scanner::{parse, Scanner};

/// Alias type for Result<T, ParseError>;
pub type Result<T> = std::result::Result<T, ParseError>;
