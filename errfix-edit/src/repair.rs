//! Schema repairer: turns a decomposed field list into a schema-conformant
//! one.
//!
//! Rules, applied in order:
//! 1. duplicate collapse (keep the first occurrence of each name),
//! 2. corruption merge (heal a string value split by an injected field),
//! 3. missing-field insertion (append schema defaults after original fields),
//! 4. no-op guarantee (conformant input reports unchanged).

use std::collections::BTreeSet;

use errfix_scan::string_spans;
use errfix_types::{CorruptionMergeRule, Field, Schema};
use tracing::debug;

/// Corrected field list plus whether any rule fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairOutcome {
    pub fields: Vec<Field>,
    pub changed: bool,
}

/// Deterministic repair of `fields` against `schema`.
pub fn repair(fields: Vec<Field>, schema: &Schema) -> RepairOutcome {
    let mut changed = false;

    // Rule 1: duplicate collapse. Input arrives in first_seen_index order, so
    // keeping the first hit per name keeps the smallest index.
    let mut seen = BTreeSet::new();
    let mut kept: Vec<Field> = Vec::with_capacity(fields.len());
    for field in fields {
        if seen.insert(field.name.clone()) {
            kept.push(field);
        } else {
            debug!(name = %field.name, "dropping duplicate field");
            changed = true;
        }
    }

    // Rule 2: corruption merge. A value can carry several residues (one per
    // bad historical edit), so keep merging until none is left; every merge
    // shrinks the value, so this terminates.
    if let Some(rule) = &schema.merge {
        for field in kept.iter_mut().filter(|f| f.name == rule.field) {
            while let Some(merged) = merge_split_string(&field.raw_value, rule) {
                debug!(name = %field.name, "merged split string value");
                field.raw_value = merged;
                changed = true;
            }
        }
    }

    // Rule 3: missing-field insertion, schema order, after all originals.
    for spec in &schema.fields {
        if !kept.iter().any(|f| f.name == spec.name) {
            let index = kept.len();
            kept.push(Field::new(spec.name.clone(), spec.default.clone(), index));
            changed = true;
        }
    }

    RepairOutcome {
        fields: kept,
        changed,
    }
}

/// Heals the first split-string residue inside `raw`, if present; the caller
/// re-invokes until the value is residue-free.
///
/// The residue is the exact shape `{,` ws `injected_name` ws `:` ws
/// `injected_value` ws `}` sitting inside a string literal of the value; it is
/// what remains after an earlier edit injected a field into the middle of a
/// string. Collapsing it to `{}` reconstructs the value and removes the
/// injected field in one step. Values without the residue are never altered.
fn merge_split_string(raw: &str, rule: &CorruptionMergeRule) -> Option<String> {
    let strings = string_spans(raw);

    let mut search = 0;
    while let Some(rel) = raw[search..].find("{,") {
        let at = search + rel;
        search = at + 1;

        if !strings.iter().any(|r| r.contains(&at)) {
            continue;
        }
        let Some(end) = residue_end(&raw[at..], rule) else {
            continue;
        };

        let mut merged = String::with_capacity(raw.len());
        merged.push_str(&raw[..at]);
        merged.push_str("{}");
        merged.push_str(&raw[at + end..]);
        return Some(merged);
    }

    None
}

/// Matches `{,` ws `name` ws `:` ws `value` ws `}` at the start of `rest`,
/// returning the residue length.
fn residue_end(rest: &str, rule: &CorruptionMergeRule) -> Option<usize> {
    let mut s = rest.strip_prefix("{,")?;
    s = s.trim_start();
    s = s.strip_prefix(rule.injected_name.as_str())?;
    s = s.trim_start();
    s = s.strip_prefix(':')?;
    s = s.trim_start();
    s = s.strip_prefix(rule.injected_value.as_str())?;
    s = s.trim_start();
    s = s.strip_prefix('}')?;
    Some(rest.len() - s.len())
}
