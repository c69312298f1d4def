//! Token-sequence rendering.
//!
//! Turns a decoded display payload into readable text by looking each
//! byte up in an injected [`TokenTable`]. Output is built in a
//! fixed-capacity string; overlong sequences are truncated rather than
//! rejected, matching what the physical display itself would do.

use heapless::String;

use crate::tokens::TokenTable;

/// Capacity of the rendered output buffer.
pub const RENDERED_MAX: usize = 1024;

/// Render a token sequence as display text.
///
/// Newline tokens carry through as line breaks. Unknown bytes render as
/// `?`, a backspace token removes the previously rendered character, and
/// trailing whitespace is trimmed.
pub fn render(table: &TokenTable, bytes: &[u8]) -> String<RENDERED_MAX> {
    let mut out = String::new();
    for &byte in bytes {
        match table.get(byte) {
            Some(tok) if tok.starts_with('\u{0008}') => {
                out.pop();
            }
            Some(tok) => {
                let _ = out.push_str(tok);
            }
            None => {
                let _ = out.push('?');
            }
        }
    }
    trim_trailing_whitespace(&mut out);
    out
}

/// Render a token sequence on a single line, for logs.
///
/// Line-break tokens collapse into a ` | ` separator instead of a
/// newline; a line break on the final token renders nothing. Everything
/// else behaves as in [`render`].
pub fn render_one_line(table: &TokenTable, bytes: &[u8]) -> String<RENDERED_MAX> {
    let mut out = String::new();
    for (i, &byte) in bytes.iter().enumerate() {
        match table.get(byte) {
            Some(tok) if tok.starts_with('\n') => {
                if i + 1 < bytes.len() && !out.is_empty() {
                    // Avoid doubling the space before the separator.
                    let sep = if ends_with_whitespace(&out) { "| " } else { " | " };
                    let _ = out.push_str(sep);
                }
            }
            Some(tok) if tok.starts_with('\u{0008}') => {
                out.pop();
            }
            Some(tok) => {
                let _ = out.push_str(tok);
            }
            None => {
                let _ = out.push('?');
            }
        }
    }
    trim_trailing_whitespace(&mut out);
    out
}

fn ends_with_whitespace(s: &str) -> bool {
    s.chars().last().is_some_and(char::is_whitespace)
}

fn trim_trailing_whitespace(s: &mut String<RENDERED_MAX>) {
    while ends_with_whitespace(s) {
        s.pop();
    }
}
