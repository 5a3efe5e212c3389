//! Token-span scanner: finds tagged literal occurrences and the byte span of
//! their balanced closing brace.

use errfix_types::{LiteralSpan, LiteralTag};
use thiserror::Error;
use tracing::trace;

use crate::lex::LexState;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScanError {
    /// A tag's opening brace was found but no closing brace balances it
    /// before end-of-text. The file must be left unmodified (fail closed).
    #[error("unbalanced `{tag}` literal opened at byte {offset}")]
    UnbalancedLiteral { tag: LiteralTag, offset: usize },
}

/// Finds the next occurrence of `tag`'s literal at or after `from`.
///
/// The opening pattern is the tag text at an identifier boundary, followed by
/// optional whitespace and `{`. Assumes `from` is not inside a string
/// literal; [`scan_literals`] is the entry point that tracks string state
/// across a whole file.
pub fn find_next_literal(
    text: &str,
    tag: &LiteralTag,
    from: usize,
) -> Result<Option<LiteralSpan>, ScanError> {
    let mut at = from;
    while let Some(rel) = text[at..].find(tag.as_str()) {
        let tag_start = at + rel;
        if at_boundary(text, tag_start) {
            if let Some(open) = opening_brace(text, tag_start + tag.as_str().len()) {
                let span = balance(text, tag, open)?;
                return Ok(Some(span));
            }
        }
        at = tag_start + 1;
    }
    Ok(None)
}

/// Collects every registered tag's literal spans in one linear left-to-right
/// sweep over `text`.
///
/// The sweep keeps string-literal and comment state from the start of the
/// file, so tag text spelled inside a string or a comment is not treated as
/// an occurrence. Returned
/// spans never overlap and are in increasing offset order; scanning resumes
/// after each located span's closing brace.
pub fn scan_literals(text: &str, tags: &[LiteralTag]) -> Result<Vec<LiteralSpan>, ScanError> {
    let mut spans = Vec::new();
    let mut state = LexState::Normal;
    let mut i = 0;

    while i < text.len() {
        let c = match text[i..].chars().next() {
            Some(c) => c,
            None => break,
        };

        if state.in_code() {
            if let Some(tag) = match_tag_at(text, i, tags) {
                if let Some(open) = opening_brace(text, i + tag.as_str().len()) {
                    let span = balance(text, tag, open)?;
                    trace!(tag = %span.tag, start = span.start, end = span.end, "located literal");
                    i = span.end + 1;
                    state = LexState::Normal;
                    spans.push(span);
                    continue;
                }
            }
        }

        state.step(c);
        i += c.len_utf8();
    }

    Ok(spans)
}

/// Balances braces from the opening brace at `open`, skipping strings, char
/// literals and comments. Returns the full span ending at the matching
/// closing brace (inclusive).
fn balance(text: &str, tag: &LiteralTag, open: usize) -> Result<LiteralSpan, ScanError> {
    debug_assert_eq!(&text[open..open + 1], "{");

    let mut state = LexState::Normal;
    let mut depth = 0usize;

    for (off, c) in text[open..].char_indices() {
        if !state.step(c) {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(LiteralSpan {
                        tag: tag.clone(),
                        start: open,
                        end: open + off,
                    });
                }
            }
            _ => {}
        }
    }

    Err(ScanError::UnbalancedLiteral {
        tag: tag.clone(),
        offset: open,
    })
}

/// A tag match must sit at an identifier boundary so `XKind` never matches
/// the tag `Kind`.
fn at_boundary(text: &str, tag_start: usize) -> bool {
    match text[..tag_start].chars().next_back() {
        None => true,
        Some(prev) => !(prev.is_alphanumeric() || prev == '_' || prev == ':'),
    }
}

fn match_tag_at<'t>(text: &str, at: usize, tags: &'t [LiteralTag]) -> Option<&'t LiteralTag> {
    if !at_boundary(text, at) {
        return None;
    }
    // Longest match wins when one tag is a prefix of another.
    tags.iter()
        .filter(|tag| text[at..].starts_with(tag.as_str()))
        .max_by_key(|tag| tag.as_str().len())
}

/// Skips whitespace after the tag text; the occurrence only counts when the
/// next non-whitespace character is `{`.
fn opening_brace(text: &str, after_tag: usize) -> Option<usize> {
    for (off, c) in text[after_tag..].char_indices() {
        if c.is_whitespace() {
            continue;
        }
        return (c == '{').then_some(after_tag + off);
    }
    None
}
