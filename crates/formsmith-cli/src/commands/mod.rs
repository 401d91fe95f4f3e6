pub mod check;
pub mod evaluate;
pub mod formulas;
pub mod schemas;

use anyhow::{Context, Result};
use colored::Colorize;
use formsmith::{Config, FormSchema, SchemaIssue, SchemaStore};
use std::fs;
use std::path::Path;

pub fn open_store(config: &Config) -> Result<SchemaStore> {
    let store = SchemaStore::open(&config.store.path)
        .with_context(|| format!("Failed to open schema store: {:?}", config.store.path))?;
    Ok(store.with_pretty(config.store.pretty))
}

pub fn read_schema_file(path: &Path) -> Result<FormSchema> {
    let content = fs::read_to_string(path).with_context(|| format!("Failed to read schema file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse schema file: {:?}", path))
}

/// Resolve a schema argument: an existing file wins, otherwise a saved schema id
pub fn load_schema(config: &Config, arg: &str) -> Result<FormSchema> {
    let path = Path::new(arg);
    if path.is_file() {
        return read_schema_file(path);
    }

    let store = open_store(config)?;
    store
        .get(arg)
        .cloned()
        .with_context(|| format!("No schema file or saved schema named `{}`", arg))
}

pub fn print_issues(issues: &[SchemaIssue]) {
    for issue in issues {
        println!("  {} {}", "⚠".yellow(), issue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formsmith::{FieldType, FormField};
    use pretty_assertions::assert_eq;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.store.path = dir.join("forms.json");
        config
    }

    #[test]
    fn test_load_schema_from_file_or_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let schema = FormSchema::new("Contact")
            .unwrap()
            .with_field(FormField::new("email", FieldType::Text, "Email"));
        let file = dir.path().join("contact.json");
        fs::write(&file, serde_json::to_string(&schema).unwrap()).unwrap();

        let from_file = load_schema(&config, file.to_str().unwrap()).unwrap();
        assert_eq!(from_file, schema);

        let mut store = open_store(&config).unwrap();
        store.add(schema.clone()).unwrap();
        store.save().unwrap();

        let from_store = load_schema(&config, &schema.id).unwrap();
        assert_eq!(from_store, schema);
    }

    #[test]
    fn test_load_schema_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&config_in(dir.path()), "missing").unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
