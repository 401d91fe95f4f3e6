// File: src/store.rs
// Purpose: Saved schemas persisted as a JSON array in a single file

use formsmith_types::FormSchema;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read schema store {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write schema store {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("schema store {path:?} is not a valid schema list")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode schemas")]
    Encode(#[from] serde_json::Error),

    #[error("a schema with id `{0}` is already saved")]
    DuplicateId(String),

    #[error("no saved schema with id `{0}`")]
    NotFound(String),
}

/// File-backed collection of schemas.
///
/// Mutations stay in memory until [`save`](Self::save) is called.
#[derive(Debug)]
pub struct SchemaStore {
    path: PathBuf,
    pretty: bool,
    schemas: Vec<FormSchema>,
}

impl SchemaStore {
    /// Load the store at `path`; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let schemas = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Vec::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        tracing::debug!(path = ?path, schemas = schemas.len(), "schema store opened");

        Ok(Self {
            path,
            pretty: true,
            schemas,
        })
    }

    /// Write compact JSON instead of pretty-printed
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[FormSchema] {
        &self.schemas
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn get(&self, schema_id: &str) -> Option<&FormSchema> {
        self.schemas.iter().find(|s| s.id == schema_id)
    }

    /// Mutable access for field editing; call [`save`](Self::save) afterwards
    pub fn get_mut(&mut self, schema_id: &str) -> Option<&mut FormSchema> {
        self.schemas.iter_mut().find(|s| s.id == schema_id)
    }

    pub fn add(&mut self, schema: FormSchema) -> Result<(), StoreError> {
        if self.get(&schema.id).is_some() {
            return Err(StoreError::DuplicateId(schema.id));
        }
        tracing::debug!(schema = %schema.id, name = %schema.name, "schema added");
        self.schemas.push(schema);
        Ok(())
    }

    /// Replace the saved schema with the same id
    pub fn update(&mut self, schema: FormSchema) -> Result<(), StoreError> {
        match self.get_mut(&schema.id) {
            Some(slot) => {
                tracing::debug!(schema = %schema.id, "schema updated");
                *slot = schema;
                Ok(())
            }
            None => Err(StoreError::NotFound(schema.id)),
        }
    }

    /// Remove a schema, returning whether anything was removed
    pub fn delete(&mut self, schema_id: &str) -> bool {
        let before = self.schemas.len();
        self.schemas.retain(|s| s.id != schema_id);
        let removed = self.schemas.len() != before;
        if removed {
            tracing::debug!(schema = schema_id, "schema deleted");
        }
        removed
    }

    pub fn save(&self) -> Result<(), StoreError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(&self.schemas)?
        } else {
            serde_json::to_string(&self.schemas)?
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        }

        fs::write(&self.path, json).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = ?self.path, schemas = self.schemas.len(), "schema store saved");
        Ok(())
    }
}
