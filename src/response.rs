//! Parsed representation of a single line.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed IMAP line.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    /// The tag, or the sentinels `*` (untagged) and `+` (continuation).
    pub tag: String,
    /// Command name, with the casing as received. Empty iff `tag` is `+`.
    pub command: String,
    /// Parsed attributes. Empty when the line carried none.
    pub attributes: Vec<Attribute>,
    /// Number of leading NUL bytes stripped before parsing.
    ///
    /// Some Exchange versions prefix responses with NUL bytes; they are
    /// removed and counted rather than rejected.
    pub null_bytes_removed: usize,
}

/// A single attribute of a parsed line.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Attribute {
    /// The atom `NIL`.
    Nil,
    /// A bare identifier token.
    Atom {
        value: String,
        /// The bracketed group attached to this atom, e.g. `BODY[HEADER]`.
        section: Option<Vec<Attribute>>,
        /// The `<offset.length>` range attached to this atom.
        partial: Option<(u64, u64)>,
    },
    /// A quoted string, with escapes resolved.
    String { value: String },
    /// A literal payload.
    Literal { value: LiteralValue },
    /// A sequence-set token such as `1:4,7,*`.
    Sequence { value: String },
    /// A parenthesised group.
    List(Vec<Attribute>),
    /// The human-readable tail of a status response.
    Text { value: String },
}

impl Attribute {
    /// A plain atom without section or partial range.
    pub fn atom<V>(value: V) -> Self
    where
        V: Into<String>,
    {
        Self::Atom {
            value: value.into(),
            section: None,
            partial: None,
        }
    }
}

/// Payload of a literal.
///
/// The payload stays raw when the enclosing command is `APPEND` (message
/// bodies must survive byte-for-byte); everywhere else it is decoded as
/// 8-bit text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LiteralValue {
    Binary(Vec<u8>),
    Text(String),
}
