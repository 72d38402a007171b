//! Line parser: the caller-facing entry point.
//!
//! Splits a line into tag, command and argument region, separates the
//! bracketed response code and human-readable text of status responses, and
//! hands the argument region to the token parser.

use std::{collections::VecDeque, ops::Range};

use crate::{
    error::{ParseError, ParseErrorKind},
    response::{Attribute, Response},
    syntax::{self, Element},
    tokens::{is_status_command, TokenParser},
    utils::decode_8bit,
};

/// Bare availability notice some Exchange versions send instead of a
/// well-formed status response.
const SERVER_UNAVAILABLE: &[u8] = b"Server Unavailable.";

/// Options for [`parse`].
#[derive(Debug, Default)]
pub struct ParseOptions {
    /// Pre-captured literal payloads, in occurrence order. When a literal
    /// marker is reached and a payload is queued here, it is grafted into
    /// the output instead of reading the payload from the line buffer.
    pub literals: VecDeque<Vec<u8>>,
    /// Accept `{n+}` as a non-synchronizing literal prefix.
    pub literal_plus: bool,
}

/// Parses a single line, given without the trailing CRLF.
///
/// Byte positions in errors are absolute into `line`.
pub fn parse(line: &[u8], options: ParseOptions) -> Result<Response, ParseError> {
    // Exchange sometimes prefixes a response with NUL bytes; strip and
    // count them instead of rejecting the line
    let null_bytes_removed = line.iter().take_while(|&&byte| byte == 0x00).count();

    let mut response = match parse_stripped(line, null_bytes_removed, options) {
        Ok(response) => response,
        Err(error) if error.kind == ParseErrorKind::ServerUnavailable => {
            // another Exchange oddity, recovered as an untagged BAD
            Response {
                tag: "*".into(),
                command: "BAD".into(),
                attributes: vec![Attribute::Text {
                    value: decode_8bit(SERVER_UNAVAILABLE),
                }],
                null_bytes_removed: 0,
            }
        }
        Err(error) => return Err(error),
    };

    response.null_bytes_removed = null_bytes_removed;

    Ok(response)
}

fn parse_stripped(
    line: &[u8],
    start: usize,
    mut options: ParseOptions,
) -> Result<Response, ParseError> {
    let mut cursor = start;

    if &line[cursor..] == SERVER_UNAVAILABLE {
        return Err(ParseError::new(ParseErrorKind::ServerUnavailable, cursor, line));
    }

    // --- tag ---

    let (tag_start, tag) = read_token(line, &mut cursor)?;
    if let Some(offset) = tag
        .iter()
        .position(|&byte| !(syntax::is_tag_char(byte) || byte == b'*' || byte == b'+'))
    {
        return Err(ParseError::at_byte(
            ParseErrorKind::UnexpectedChar,
            tag_start + offset,
            tag[offset],
            line,
        ));
    }
    let tag = decode_8bit(tag);

    // --- continuation ---

    if tag == "+" {
        // the whole remainder is free-form text; servers may also send a
        // bare `+`
        let attributes = text_of(&line[cursor..])
            .map(|value| vec![Attribute::Text { value }])
            .unwrap_or_default();
        return Ok(Response {
            tag,
            command: String::new(),
            attributes,
            null_bytes_removed: 0,
        });
    }

    // --- exactly one space, then the command ---

    skip_space(line, &mut cursor)?;
    let mut command = decode_8bit(read_command_word(line, &mut cursor)?);

    // --- two-word commands ---

    if command.eq_ignore_ascii_case("UID") || command.eq_ignore_ascii_case("AUTHENTICATE") {
        skip_space(line, &mut cursor)?;
        command.push(' ');
        command.push_str(&decode_8bit(read_command_word(line, &mut cursor)?));
    }

    // --- response code and human-readable text ---

    let mut human_readable = None;
    let mut argument_range: Option<Range<usize>> = None;

    if is_status_command(&command) {
        let mut probe = cursor;
        while probe < line.len() && line[probe] == b' ' {
            probe += 1;
        }
        if probe < line.len() && line[probe] == b'[' {
            match matching_bracket(line, probe) {
                Some(close) => {
                    argument_range = Some(probe..close + 1);
                    human_readable = text_of(&line[close + 1..]);
                }
                None => {
                    // unbalanced code; let the token parser point at the
                    // position where it falls over
                    argument_range = Some(probe..line.len());
                }
            }
        } else {
            human_readable = text_of(&line[cursor..]);
        }
    } else if cursor < line.len() {
        // the byte at `cursor` is the space that ended the command
        argument_range = Some(cursor + 1..line.len());
    }

    // --- attributes ---

    let mut attributes = match argument_range {
        Some(range) if !range.is_empty() => TokenParser::new(
            line,
            range,
            &command,
            options.literal_plus,
            &mut options.literals,
        )
        .parse()?,
        _ => Vec::new(),
    };

    if let Some(value) = human_readable {
        attributes.push(Attribute::Text { value });
    }

    Ok(Response {
        tag,
        command,
        attributes,
        null_bytes_removed: 0,
    })
}

/// Reads the next space-delimited token; an empty token reports why.
fn read_token<'a>(line: &'a [u8], cursor: &mut usize) -> Result<(usize, &'a [u8]), ParseError> {
    let start = *cursor;
    while *cursor < line.len() && line[*cursor] != b' ' {
        *cursor += 1;
    }

    let token = &line[start..*cursor];
    if token.is_empty() {
        return Err(if start < line.len() {
            ParseError::at_byte(ParseErrorKind::UnexpectedWhitespace, start, b' ', line)
        } else {
            ParseError::new(ParseErrorKind::UnexpectedEndOfInput, start, line)
        });
    }

    Ok((start, token))
}

/// Reads a command word and checks it against the command alphabet.
fn read_command_word<'a>(line: &'a [u8], cursor: &mut usize) -> Result<&'a [u8], ParseError> {
    let (start, word) = read_token(line, cursor)?;

    match syntax::verify(word, Element::CommandChar) {
        Some(offset) => Err(ParseError::at_byte(
            ParseErrorKind::UnexpectedChar,
            start + offset,
            word[offset],
            line,
        )),
        None => Ok(word),
    }
}

/// The single space separating line elements.
fn skip_space(line: &[u8], cursor: &mut usize) -> Result<(), ParseError> {
    if *cursor >= line.len() {
        return Err(ParseError::new(ParseErrorKind::UnexpectedEndOfInput, *cursor, line));
    }
    *cursor += 1;
    Ok(())
}

/// Trimmed human-readable text, `None` when nothing is left.
fn text_of(bytes: &[u8]) -> Option<String> {
    let text = trim_spaces(bytes);
    (!text.is_empty()).then(|| decode_8bit(text))
}

/// Finds the `]` matching the `[` at `open`, counting nested brackets.
fn matching_bracket(line: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;

    for (offset, &byte) in line[open..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset);
                }
            }
            _ => {}
        }
    }

    None
}

fn trim_spaces(mut bytes: &[u8]) -> &[u8] {
    while let [b' ', rest @ ..] = bytes {
        bytes = rest;
    }
    while let [rest @ .., b' '] = bytes {
        bytes = rest;
    }
    bytes
}
