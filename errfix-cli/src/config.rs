//! Configuration file loading for errfix.
//!
//! Discovers and loads `errfix.toml` next to the repair target. The config
//! may add schemas for project-specific error literals or replace the
//! built-in ones by tag; built-ins stay active unless switched off.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use errfix_types::{builtin_schemas, Schema};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "errfix.toml";

/// Top-level configuration from errfix.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrfixConfig {
    /// Extension filter for directory walks; CLI `--ext` takes precedence.
    pub extension: Option<String>,

    /// Whether the built-in schema registry stays active.
    pub include_builtin: bool,

    /// Additional or replacement schemas.
    #[serde(rename = "schema")]
    pub schemas: Vec<Schema>,
}

impl Default for ErrfixConfig {
    fn default() -> Self {
        Self {
            extension: None,
            include_builtin: true,
            schemas: vec![],
        }
    }
}

impl ErrfixConfig {
    /// The effective schema set: built-ins (unless disabled), with config
    /// schemas replacing same-tag entries and appending new ones.
    pub fn resolve_schemas(&self) -> Vec<Schema> {
        let mut schemas = if self.include_builtin {
            builtin_schemas()
        } else {
            vec![]
        };

        for schema in &self.schemas {
            match schemas.iter_mut().find(|s| s.tag == schema.tag) {
                Some(existing) => *existing = schema.clone(),
                None => schemas.push(schema.clone()),
            }
        }

        schemas
    }
}

/// Discover the errfix.toml config file beside the target: in the target
/// directory itself, or next to a target file.
pub fn discover_config(target: &Utf8Path) -> Option<Utf8PathBuf> {
    let dir = if target.is_dir() {
        target
    } else {
        target.parent()?
    };
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse an errfix.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<ErrfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<ErrfixConfig> {
    let config: ErrfixConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config found beside the target, or return the default.
pub fn load_or_default(target: &Utf8Path) -> anyhow::Result<ErrfixConfig> {
    match discover_config(target) {
        Some(path) => load_config(&path),
        None => Ok(ErrfixConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_empty_config_keeps_builtins() {
        let config = parse_config("").unwrap();
        assert!(config.include_builtin);
        assert!(config.schemas.is_empty());
        assert_eq!(config.resolve_schemas().len(), 2);
    }

    #[test]
    fn parse_full_config() {
        let contents = r#"
extension = "rs"
include_builtin = true

[[schema]]
tag = "AppError::Config"
fields = [
  { name = "message", default = "String::new()" },
  { name = "context", default = "None" },
]
merge = { field = "message", injected_name = "context", injected_value = "None" }
"#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.extension.as_deref(), Some("rs"));
        assert_eq!(config.schemas.len(), 1);
        let schema = &config.schemas[0];
        assert_eq!(schema.tag.as_str(), "AppError::Config");
        assert_eq!(schema.fields.len(), 2);
        assert!(schema.merge.is_some());

        // Built-ins plus the new tag.
        assert_eq!(config.resolve_schemas().len(), 3);
    }

    #[test]
    fn config_schema_replaces_builtin_with_same_tag() {
        let contents = r#"
[[schema]]
tag = "SsbcError::ParseError"
fields = [{ name = "message", default = "String::new()" }]
"#;
        let config = parse_config(contents).unwrap();
        let schemas = config.resolve_schemas();
        assert_eq!(schemas.len(), 2);
        let parse = schemas
            .iter()
            .find(|s| s.tag.as_str() == "SsbcError::ParseError")
            .unwrap();
        assert_eq!(parse.fields.len(), 1);
        assert!(parse.merge.is_none());
    }

    #[test]
    fn builtins_can_be_switched_off() {
        let config = parse_config("include_builtin = false").unwrap();
        assert!(config.resolve_schemas().is_empty());
    }

    #[test]
    fn discover_config_beside_dir_and_file() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());

        let file = root.join("lib.rs");
        std::fs::write(&file, "").expect("write file");
        assert_eq!(discover_config(&file), Some(root.join(CONFIG_FILE_NAME)));
    }

    #[test]
    fn load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let config = load_or_default(&root).expect("load default");
        assert!(config.include_builtin);
        assert!(config.schemas.is_empty());
    }
}
