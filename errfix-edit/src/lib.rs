//! Repair engine for tagged error literals.
//!
//! Responsibilities:
//! - Run the scan → decompose → repair pipeline over one source buffer.
//! - Stage span replacements against the original text and apply them in a
//!   single back-to-front pass, so earlier offsets stay valid.
//! - Read and write files whole: a file is rewritten only when at least one
//!   literal changed, and never partially.
//! - Render a unified diff preview of one file's change.

mod repair;
mod rewrite;

use anyhow::Context;
use camino::Utf8Path;
use diffy::PatchFormatter;
use errfix_scan::{decompose, scan_literals, ScanError};
use errfix_types::{FileReport, FileStatus, LiteralSpan, LiteralTag, Schema};
use fs_err as fs;
use tracing::debug;

pub use repair::{repair, RepairOutcome};
pub use rewrite::{line_indent, render_literal};

/// Options for one repair run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepairOptions {
    /// Compute repairs but write nothing back.
    pub dry_run: bool,
}

/// Result of repairing one source buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRepair {
    pub changed: bool,
    pub text: String,
    pub literals_seen: usize,
    pub literals_repaired: usize,
}

/// Runs the full pipeline over `text` for every registered schema.
///
/// All spans are collected in one sweep against the immutable original text;
/// changed literals stage `(span, replacement)` pairs which are applied from
/// the last offset to the first. Literals with malformed segments (no
/// top-level colon, e.g. match patterns) are left untouched rather than
/// half-repaired. Conformant literals keep their original bytes.
pub fn repair_source(text: &str, schemas: &[Schema]) -> Result<SourceRepair, ScanError> {
    let tags: Vec<LiteralTag> = schemas.iter().map(|s| s.tag.clone()).collect();
    let spans = scan_literals(text, &tags)?;

    let mut staged: Vec<(LiteralSpan, String)> = Vec::new();
    for span in &spans {
        let Some(schema) = schemas.iter().find(|s| s.tag == span.tag) else {
            continue;
        };

        let decomposition = decompose(span.interior(text));
        if !decomposition.is_clean() {
            debug!(
                tag = %span.tag,
                start = span.start,
                segments = ?decomposition.malformed,
                "literal has non-field segments, leaving untouched"
            );
            continue;
        }

        let outcome = repair(decomposition.fields, schema);
        if outcome.changed {
            let indent = line_indent(text, span.start);
            staged.push((span.clone(), render_literal(&outcome.fields, indent)));
        }
    }

    let literals_repaired = staged.len();
    let mut new_text = text.to_string();
    for (span, replacement) in staged.iter().rev() {
        new_text.replace_range(span.start..=span.end, replacement);
    }

    Ok(SourceRepair {
        changed: literals_repaired > 0,
        text: new_text,
        literals_seen: spans.len(),
        literals_repaired,
    })
}

/// Repairs one file on disk. Returns the report plus a unified diff of the
/// change (empty when nothing changed).
///
/// The file is read whole, repaired in memory, and written back whole only
/// when something changed and `opts.dry_run` is off. A scan failure fails
/// closed: the file is reported failed and left unmodified. I/O errors
/// propagate to the caller, which reports them per file and moves on.
pub fn repair_file(
    path: &Utf8Path,
    schemas: &[Schema],
    opts: &RepairOptions,
) -> anyhow::Result<(FileReport, String)> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path))?;

    let repaired = match repair_source(&text, schemas) {
        Ok(repaired) => repaired,
        Err(err) => {
            debug!(path = %path, %err, "scan failed, file left unmodified");
            let report = FileReport::failed(path.to_path_buf(), err.to_string());
            return Ok((report, String::new()));
        }
    };

    if repaired.changed && !opts.dry_run {
        fs::write(path, &repaired.text).with_context(|| format!("write {}", path))?;
    }

    let patch = render_patch(path, &text, &repaired.text);
    let report = FileReport {
        path: path.to_path_buf(),
        status: if repaired.changed {
            FileStatus::Changed
        } else {
            FileStatus::Unchanged
        },
        literals_seen: repaired.literals_seen,
        literals_repaired: repaired.literals_repaired,
        message: None,
    };

    Ok((report, patch))
}

/// Unified diff of one file's change, for previews.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));
    let patch = diffy::create_patch(before, after);
    out.push_str(&PatchFormatter::new().fmt_patch(&patch).to_string());
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
