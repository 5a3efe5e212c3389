use serde::{Deserialize, Serialize};

/// The fixed leading tag of an error-construction literal, e.g.
/// `SsbcError::ParseError`. A tag identifies exactly one [`crate::Schema`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiteralTag(pub String);

impl LiteralTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LiteralTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One balanced occurrence of a tagged literal inside a source buffer.
///
/// `start` is the byte offset of the opening brace, `end` the offset of its
/// matching closing brace (inclusive). Spans produced by a single scan pass
/// never overlap and arrive in increasing `start` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSpan {
    pub tag: LiteralTag,
    pub start: usize,
    pub end: usize,
}

impl LiteralSpan {
    /// The literal interior, excluding both braces.
    pub fn interior<'t>(&self, text: &'t str) -> &'t str {
        &text[self.start + 1..self.end]
    }
}

/// One top-level `name: value` field of a decomposed literal.
///
/// `raw_value` is the untouched value expression and may itself contain
/// braces, parens, commas, colons, or string literals. `first_seen_index` is
/// the field's ordinal position in the original literal; repair keeps
/// original relative order by this index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub raw_value: String,
    pub first_seen_index: usize,
}

impl Field {
    pub fn new(name: impl Into<String>, raw_value: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            raw_value: raw_value.into(),
            first_seen_index: index,
        }
    }
}
