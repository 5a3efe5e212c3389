use serde::{Deserialize, Serialize};

use crate::literal::LiteralTag;

/// One required field of a schema: its name and the default value expression
/// inserted when the field is missing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub default: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: default.into(),
        }
    }
}

/// Describes the split-string corruption shape a schema knows how to heal.
///
/// An earlier badly-targeted edit injected `injected_name: injected_value`
/// into the middle of `field`'s string literal, leaving the residue
/// `{, injected_name: injected_value }` inside the string. The merge rule
/// collapses that residue to `{}` and thereby removes the injected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptionMergeRule {
    /// Name of the field whose string value may have been split.
    pub field: String,

    /// Name of the spuriously injected field.
    pub injected_name: String,

    /// Value expression of the spuriously injected field.
    pub injected_value: String,
}

/// Declarative description of one tagged literal kind: the required fields in
/// canonical order, their defaults, and an optional corruption-merge rule.
///
/// Schemas are configuration data consumed by a single generic engine; adding
/// a literal kind means adding a schema value, not another repair function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub tag: LiteralTag,

    pub fields: Vec<FieldSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge: Option<CorruptionMergeRule>,
}

impl Schema {
    /// Looks up the spec for a field name, if the schema requires it.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The built-in schema registry: the two error-literal kinds the original
/// repair tooling targeted.
pub fn builtin_schemas() -> Vec<Schema> {
    vec![
        Schema {
            tag: LiteralTag::new("SsbcError::ParseError"),
            fields: vec![
                FieldSpec::new("message", "String::new()"),
                FieldSpec::new("position", "None"),
                FieldSpec::new("context", "None"),
            ],
            merge: Some(CorruptionMergeRule {
                field: "message".to_string(),
                injected_name: "context".to_string(),
                injected_value: "None".to_string(),
            }),
        },
        Schema {
            tag: LiteralTag::new("SsbcError::StateError"),
            fields: vec![
                FieldSpec::new("operation", "\"state_operation\".to_string()"),
                FieldSpec::new("reason", "\"state_error\".to_string()"),
                FieldSpec::new("context", "None"),
            ],
            merge: Some(CorruptionMergeRule {
                field: "reason".to_string(),
                injected_name: "context".to_string(),
                injected_value: "None".to_string(),
            }),
        },
    ]
}
