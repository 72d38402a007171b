//! Character classes of the IMAP4rev1 formal syntax ([RFC 3501, section 9](https://datatracker.ietf.org/doc/html/rfc3501#section-9)).
//!
//! The token and line parsers consult these predicates one byte at a time;
//! [`verify`] validates a whole element against a single class and reports
//! where it first goes wrong.

use abnf_core::{is_alpha, is_digit};

/// A character class of the formal syntax.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Element {
    /// `DIGIT = %x30-39`
    Digit,
    /// `ATOM-CHAR = <any CHAR except atom-specials>`
    AtomChar,
    /// `TAG-CHAR = <any ATOM-CHAR except "+">`
    TagChar,
    /// ASCII letter, the alphabet of command names.
    CommandChar,
    /// `SP = %x20`
    Sp,
}

/// `CHAR = %x01-7F`
fn is_char(byte: u8) -> bool {
    matches!(byte, 0x01..=0x7f)
}

/// `CTL = %x00-1F / %x7F`
fn is_ctl(byte: u8) -> bool {
    matches!(byte, 0x00..=0x1f | 0x7f)
}

/// `atom-specials = "(" / ")" / "{" / SP / CTL / list-wildcards / quoted-specials / resp-specials`
fn is_atom_specials(byte: u8) -> bool {
    match byte {
        b'(' | b')' | b'{' | b' ' | b'%' | b'*' | b'"' | b'\\' | b']' => true,
        byte => is_ctl(byte),
    }
}

/// `ATOM-CHAR = <any CHAR except atom-specials>`
pub fn is_atom_char(byte: u8) -> bool {
    is_char(byte) && !is_atom_specials(byte)
}

/// `TAG-CHAR = <any ATOM-CHAR except "+">`
pub fn is_tag_char(byte: u8) -> bool {
    is_atom_char(byte) && byte != b'+'
}

/// Command names consist of ASCII letters only.
pub fn is_command_char(byte: u8) -> bool {
    is_alpha(byte)
}

/// `SP = %x20`
pub fn is_sp(byte: u8) -> bool {
    byte == b' '
}

/// Returns whether `byte` is a member of `element`.
pub fn is_allowed(byte: u8, element: Element) -> bool {
    match element {
        Element::Digit => is_digit(byte),
        Element::AtomChar => is_atom_char(byte),
        Element::TagChar => is_tag_char(byte),
        Element::CommandChar => is_command_char(byte),
        Element::Sp => is_sp(byte),
    }
}

/// Returns the offset of the first byte of `element` that is not a member of
/// `allowed`, or `None` when every byte is permitted.
pub fn verify(element: &[u8], allowed: Element) -> Option<usize> {
    element.iter().position(|&byte| !is_allowed(byte, allowed))
}

/// Bytes that may start an atom in the relaxed grammar of the token parser:
/// regular atom characters plus `\` (flags), `%` (list wildcards) and
/// everything past US-ASCII.
pub(crate) fn is_atom_start(byte: u8) -> bool {
    is_atom_char(byte) || byte == b'\\' || byte == b'%' || byte >= 0x80
}

/// Bytes accepted inside an atom once it has started. `]` is tolerated
/// because some servers leak it out of response codes and body sections.
pub(crate) fn is_atom_part(byte: u8) -> bool {
    is_atom_char(byte) || byte == b']' || byte >= 0x80
}
