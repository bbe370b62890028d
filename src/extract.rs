//! Extraction of the obfuscated listing structure embedded in a folder page.
//!
//! Drive serves the child listing of a shared folder as an escaped JSON blob
//! assigned to a well-known variable inside an inline script block. The blob
//! is not part of any documented contract; everything about its location is
//! reverse engineered and isolated here so a host-page layout change only
//! touches this module.

use std::sync::LazyLock;

use scraper::{Html, Selector};
use serde_json::Value;

use crate::error::{Error, Result};

/// Variable name identifying the script block that carries the listing data.
pub const STRUCTURE_MARKER: &str = "_DRIVE_ivd";

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid selector"));

/// Extracts and decodes the embedded listing structure from a folder page.
///
/// The marker variable's own name is the first single-quoted string literal
/// in the block; the payload is the second. This positional convention (not
/// naming) is how the payload is distinguished.
///
/// # Errors
///
/// Returns [`Error::StructureNotFound`] if no script block contains the
/// marker, [`Error::PayloadNotFound`] if the marker block holds fewer than
/// two string literals, and [`Error::MalformedPayload`] if the unescaped
/// payload is not valid JSON.
pub fn extract(page_text: &str) -> Result<Value> {
    let document = Html::parse_document(page_text);

    let block = document
        .select(&SCRIPT_SELECTOR)
        .map(|script| script.text().collect::<String>())
        .find(|inner| inner.contains(STRUCTURE_MARKER))
        .ok_or(Error::StructureNotFound)?;

    // Literal 0 is the marker name itself, literal 1 is the encoded payload.
    let payload = string_literals(&block)
        .nth(1)
        .ok_or(Error::PayloadNotFound)?;

    let decoded = unescape(payload);
    serde_json::from_str(&decoded).map_err(Error::MalformedPayload)
}

/// Iterates over the contents of single-quoted, backslash-escaped string
/// literals in `text`, in order of appearance.
fn string_literals(text: &str) -> StringLiterals<'_> {
    StringLiterals { text, pos: 0 }
}

struct StringLiterals<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for StringLiterals<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();

        // Find the opening quote.
        while self.pos < bytes.len() && bytes[self.pos] != b'\'' {
            self.pos += 1;
        }
        if self.pos >= bytes.len() {
            return None;
        }

        let start = self.pos + 1;
        let mut i = start;
        while i < bytes.len() {
            match bytes[i] {
                // Skip the escaped character; continuation bytes of a
                // multi-byte char never equal an ASCII quote, so landing
                // inside one is harmless.
                b'\\' => i += 2,
                b'\'' => {
                    self.pos = i + 1;
                    return Some(&self.text[start..i]);
                }
                _ => i += 1,
            }
        }

        // Unterminated literal: nothing more to yield.
        self.pos = bytes.len();
        None
    }
}

/// Decodes JS-style escape sequences in a string literal body.
///
/// Handles `\xHH`, `\uHHHH` (including UTF-16 surrogate pairs), and the
/// common C-style escapes. Unknown escapes pass the escaped character
/// through unchanged; malformed hex sequences decode to U+FFFD so a broken
/// payload still reaches the JSON parser and fails there with a uniform
/// error.
fn unescape(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if chars[i] != '\\' {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let Some(&escape) = chars.get(i + 1) else {
            out.push('\\');
            break;
        };
        i += 2;
        match escape {
            'x' => {
                match hex_value(&chars, i, 2) {
                    Some(code) => {
                        out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        i += 2;
                    }
                    None => out.push(char::REPLACEMENT_CHARACTER),
                }
            }
            'u' => {
                // Gather consecutive \uHHHH units so surrogate pairs decode
                // as one code point.
                let mut units = Vec::new();
                loop {
                    match hex_value(&chars, i, 4) {
                        Some(code) => {
                            #[allow(clippy::cast_possible_truncation)]
                            units.push(code as u16);
                            i += 4;
                        }
                        None => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            break;
                        }
                    }
                    if chars.get(i) == Some(&'\\') && chars.get(i + 1) == Some(&'u') {
                        i += 2;
                    } else {
                        break;
                    }
                }
                out.push_str(&String::from_utf16_lossy(&units));
            }
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            '0' => out.push('\0'),
            other => out.push(other),
        }
    }

    out
}

/// Reads `len` hex digits starting at `chars[at]` as a code value.
fn hex_value(chars: &[char], at: usize, len: usize) -> Option<u32> {
    if at + len > chars.len() {
        return None;
    }
    chars[at..at + len]
        .iter()
        .try_fold(0u32, |acc, c| c.to_digit(16).map(|d| acc * 16 + d))
}
