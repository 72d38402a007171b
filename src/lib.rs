#![deny(missing_debug_implementations)]

//! Hand-written parser for single lines of the IMAP4rev1 protocol.
//!
//! Given one line (without the trailing CRLF) and, optionally, the
//! pre-captured payloads of any literals the line references, [`parse`]
//! produces a [`Response`]: the tag, the command, and the attributes as a
//! tree of atoms, strings, literals, sequence sets, lists, section
//! specifications and partial ranges.
//!
//! The grammar follows [RFC 3501](https://datatracker.ietf.org/doc/html/rfc3501)
//! extended by well-known response-code conventions, and deliberately
//! tolerates documented server quirks: leading NUL bytes, bare availability
//! notices, extra whitespace around groups, and stray bytes in status text.
//!
//! # Example
//!
//! ```rust
//! use imap_line::{parse, Attribute, ParseOptions};
//!
//! let response = parse(b"A1 OK LOGIN completed", ParseOptions::default())?;
//!
//! assert_eq!(response.tag, "A1");
//! assert_eq!(response.command, "OK");
//! assert_eq!(
//!     response.attributes,
//!     vec![Attribute::Text {
//!         value: "LOGIN completed".into()
//!     }]
//! );
//! # Ok::<(), imap_line::ParseError>(())
//! ```

mod error;
mod line;
mod response;
mod tokens;

pub mod syntax;
pub mod utils;

pub use error::{ParseError, ParseErrorKind};
pub use line::{parse, ParseOptions};
pub use response::{Attribute, LiteralValue, Response};
