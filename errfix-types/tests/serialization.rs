//! Wire-shape checks for the serde-facing types (config schemas, reports).

use errfix_types::{builtin_schemas, FileReport, FileStatus, Schema};
use pretty_assertions::assert_eq;

#[test]
fn schema_roundtrips_through_json() {
    for schema in builtin_schemas() {
        let json = serde_json::to_string(&schema).expect("serialize schema");
        let back: Schema = serde_json::from_str(&json).expect("deserialize schema");
        assert_eq!(back, schema);
    }
}

#[test]
fn schema_without_merge_rule_omits_the_key() {
    let mut schema = builtin_schemas().remove(0);
    schema.merge = None;
    let json = serde_json::to_string(&schema).expect("serialize schema");
    assert!(!json.contains("merge"));
}

#[test]
fn schema_deserializes_from_config_shape() {
    let json = r#"{
        "tag": "MyError::Custom",
        "fields": [
            { "name": "message", "default": "String::new()" },
            { "name": "context", "default": "None" }
        ],
        "merge": { "field": "message", "injected_name": "context", "injected_value": "None" }
    }"#;
    let schema: Schema = serde_json::from_str(json).expect("deserialize schema");
    assert_eq!(schema.tag.as_str(), "MyError::Custom");
    assert_eq!(schema.fields.len(), 2);
    let merge = schema.merge.expect("merge rule");
    assert_eq!(merge.field, "message");
    assert_eq!(merge.injected_name, "context");
}

#[test]
fn file_report_status_uses_snake_case() {
    let report = FileReport {
        path: "src/parsing.rs".into(),
        status: FileStatus::Unchanged,
        literals_seen: 3,
        literals_repaired: 0,
        message: None,
    };
    let json = serde_json::to_string(&report).expect("serialize report");
    assert!(json.contains("\"unchanged\""));
    assert!(!json.contains("message"));

    let back: FileReport = serde_json::from_str(&json).expect("deserialize report");
    assert_eq!(back, report);
}
