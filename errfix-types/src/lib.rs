//! Shared types for the errfix repair pipeline.
//!
//! This crate owns the data model only: literal tags and spans, decomposed
//! fields, the declarative schemas that drive repair, and per-file reports.
//! It performs no scanning and no I/O.

mod literal;
mod report;
mod schema;

pub use literal::{Field, LiteralSpan, LiteralTag};
pub use report::{FileReport, FileStatus, RunSummary};
pub use schema::{builtin_schemas, CorruptionMergeRule, FieldSpec, Schema};
