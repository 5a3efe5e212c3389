//! Lexical layer of the errfix pipeline.
//!
//! Responsibilities:
//! - Locate tagged literal spans in raw source text, balancing nested braces
//!   and string quoting (`scan`).
//! - Decompose a literal interior into ordered top-level `name: value` fields
//!   (`fields`).
//!
//! Everything here is pure computation over `&str`; no grammar, no I/O. The
//! shared discipline is a small explicit state machine (Normal / InString /
//! Escaped) instead of layered regular expressions, so nested and reordered
//! inputs cannot confuse the boundary detection.

mod fields;
mod lex;
mod scan;

pub use fields::{decompose, Decomposition};
pub use lex::string_spans;
pub use scan::{find_next_literal, scan_literals, ScanError};
