//! Field decomposer: splits a literal interior into ordered top-level
//! `name: value` fields.

use errfix_types::Field;
use tracing::trace;

use crate::lex::{strip_comments, LexState};

/// Result of decomposing one literal interior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    /// Top-level fields in source order.
    pub fields: Vec<Field>,

    /// Segments with no top-level colon (shorthand init, `..` rest patterns).
    /// Their presence means the literal is not a plain constructor expression
    /// and must be left untouched rather than half-repaired.
    pub malformed: Vec<String>,
}

impl Decomposition {
    pub fn is_clean(&self) -> bool {
        self.malformed.is_empty()
    }
}

/// Splits `interior` on top-level commas, then each segment at its first
/// unquoted, unnested, non-`::` colon.
///
/// A comma is top-level only when brace, paren and bracket depth are all zero
/// and the lexer is outside string literals, char literals and comments, so
/// commas inside nested structures, call arguments, strings or comments never
/// separate fields. Empty segments from trailing commas and segments holding
/// nothing but a comment are dropped. Comments preceding a field name are
/// trivia and stripped from the name; values containing colons, commas and
/// nested braces survive unsplit in `raw_value`.
pub fn decompose(interior: &str) -> Decomposition {
    let mut out = Decomposition::default();

    for segment in split_top_level(interior) {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }
        match split_name_value(trimmed) {
            Some((name, raw_value)) => {
                let index = out.fields.len();
                out.fields.push(Field::new(name, raw_value, index));
            }
            None => {
                if strip_comments(trimmed).trim().is_empty() {
                    continue;
                }
                trace!(segment = trimmed, "segment has no top-level colon");
                out.malformed.push(trimmed.to_string());
            }
        }
    }

    out
}

/// Splits on commas at zero nesting depth, quote-aware.
fn split_top_level(interior: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut state = LexState::Normal;
    let mut brace = 0usize;
    let mut paren = 0usize;
    let mut bracket = 0usize;
    let mut seg_start = 0;

    for (i, c) in interior.char_indices() {
        if !state.step(c) {
            continue;
        }
        match c {
            '{' => brace += 1,
            '}' => brace = brace.saturating_sub(1),
            '(' => paren += 1,
            ')' => paren = paren.saturating_sub(1),
            '[' => bracket += 1,
            ']' => bracket = bracket.saturating_sub(1),
            ',' if brace == 0 && paren == 0 && bracket == 0 => {
                segments.push(&interior[seg_start..i]);
                seg_start = i + 1;
            }
            _ => {}
        }
    }
    segments.push(&interior[seg_start..]);

    segments
}

/// Finds the first top-level single colon of a segment. `::` path separators
/// are skipped as one token so a value like `Foo::bar(x)` is never split at a
/// path colon. Comments before the colon are trivia around the name, not part
/// of it.
fn split_name_value(segment: &str) -> Option<(String, &str)> {
    let mut state = LexState::Normal;
    let mut brace = 0usize;
    let mut paren = 0usize;
    let mut bracket = 0usize;
    let mut skip_next_colon = false;

    for (i, c) in segment.char_indices() {
        if !state.step(c) {
            continue;
        }
        match c {
            '{' => brace += 1,
            '}' => brace = brace.saturating_sub(1),
            '(' => paren += 1,
            ')' => paren = paren.saturating_sub(1),
            '[' => bracket += 1,
            ']' => bracket = bracket.saturating_sub(1),
            ':' if brace == 0 && paren == 0 && bracket == 0 => {
                if skip_next_colon {
                    skip_next_colon = false;
                    continue;
                }
                if segment[i + 1..].starts_with(':') {
                    skip_next_colon = true;
                    continue;
                }
                let name = strip_comments(&segment[..i]);
                let name = name.trim();
                let value = segment[i + 1..].trim().trim_end_matches(',').trim_end();
                if name.is_empty() {
                    return None;
                }
                return Some((name.to_string(), value));
            }
            _ => {}
        }
    }

    None
}
