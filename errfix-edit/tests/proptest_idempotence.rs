//! Property-based tests for the repair pipeline.
//!
//! These tests verify key invariants:
//! - Idempotence: repairing already-repaired text changes nothing
//! - Field completeness: every repaired literal carries each required field
//!   exactly once
//! - Order preservation: original fields keep their relative order
//! - Non-destructiveness: text without tagged literals is never modified

use errfix_edit::repair_source;
use errfix_scan::{decompose, scan_literals};
use errfix_types::builtin_schemas;
use proptest::prelude::*;

/// Strategy for plausible field value expressions, including nested calls,
/// tuples and strings with commas and colons.
fn arb_value() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("None".to_string()),
        Just("Some((1, 2))".to_string()),
        Just("\"plain text\".to_string()".to_string()),
        Just("format!(\"{}: {}\", line, col)".to_string()),
        Just("helper(inner {nested: 1}, 2)".to_string()),
        prop::string::string_regex("[a-z][a-z0-9_]{0,8}").unwrap(),
    ]
}

/// Strategy for a subset of the ParseError schema's fields, in arbitrary
/// order, each with an arbitrary value.
fn arb_parse_error_literal() -> impl Strategy<Value = String> {
    let field = prop_oneof![
        Just("message"),
        Just("position"),
        Just("context"),
    ];
    (
        prop::collection::vec((field, arb_value()), 0..4),
        prop::string::string_regex(" {0,8}").unwrap(),
    )
        .prop_map(|(fields, indent)| {
            let body = fields
                .iter()
                .map(|(name, value)| format!("{indent}    {name}: {value},\n"))
                .collect::<String>();
            format!("{indent}Err(SsbcError::ParseError {{\n{body}{indent}}})\n")
        })
}

proptest! {
    #[test]
    fn repair_is_idempotent(text in arb_parse_error_literal()) {
        let schemas = builtin_schemas();
        let once = repair_source(&text, &schemas).expect("first pass");
        let twice = repair_source(&once.text, &schemas).expect("second pass");
        prop_assert!(!twice.changed);
        prop_assert_eq!(&twice.text, &once.text);
    }

    #[test]
    fn repaired_literals_carry_every_required_field_once(text in arb_parse_error_literal()) {
        let schemas = builtin_schemas();
        let repaired = repair_source(&text, &schemas).expect("repair");

        let spans = scan_literals(&repaired.text, &[schemas[0].tag.clone()]).expect("rescan");
        for span in spans {
            let decomposition = decompose(span.interior(&repaired.text));
            prop_assert!(decomposition.is_clean());
            for spec in &schemas[0].fields {
                let count = decomposition
                    .fields
                    .iter()
                    .filter(|f| f.name == spec.name)
                    .count();
                prop_assert_eq!(count, 1, "field {} appears {} times", &spec.name, count);
            }
        }
    }

    #[test]
    fn original_field_order_is_preserved(text in arb_parse_error_literal()) {
        let schemas = builtin_schemas();

        let before_spans = scan_literals(&text, &[schemas[0].tag.clone()]).expect("scan");
        let original: Vec<String> = {
            let mut names = Vec::new();
            let mut seen = std::collections::BTreeSet::new();
            for span in &before_spans {
                for f in decompose(span.interior(&text)).fields {
                    if seen.insert(f.name.clone()) {
                        names.push(f.name);
                    }
                }
            }
            names
        };

        let repaired = repair_source(&text, &schemas).expect("repair");
        let after_spans =
            scan_literals(&repaired.text, &[schemas[0].tag.clone()]).expect("rescan");
        let mut after = Vec::new();
        for span in &after_spans {
            for f in decompose(span.interior(&repaired.text)).fields {
                after.push(f.name);
            }
        }

        // Originals first, in their original relative order.
        prop_assert_eq!(&after[..original.len()], &original[..]);
    }

    #[test]
    fn text_without_tagged_literals_is_untouched(text in "[ -~\n]{0,200}") {
        // Filter out accidental tag occurrences; anything else must pass
        // through unchanged.
        prop_assume!(!text.contains("SsbcError"));
        if let Ok(repaired) = repair_source(&text, &builtin_schemas()) {
            prop_assert!(!repaired.changed);
            prop_assert_eq!(repaired.text, text);
        }
    }
}
