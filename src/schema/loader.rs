//! Schema loader for reading column schemas from disk
//!
//! - One schema per `*.json` file, registered under its file stem
//! - Every file passes the schema shape guard before registration
//! - Registered names are immutable

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::types::Schema;
use crate::guard::{parse_schema, ShapeError};

/// Errors raised while loading or registering schemas
#[derive(Debug, Error)]
pub enum LoadError {
    /// File or directory could not be read
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON
    #[error("invalid JSON in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// File is JSON but not a well-formed schema
    #[error("malformed schema in '{}': {source}", path.display())]
    Shape {
        path: PathBuf,
        #[source]
        source: ShapeError,
    },

    /// A schema with this name is already registered
    #[error("schema '{0}' is already registered")]
    Duplicate(String),
}

/// Result type for loader operations
pub type LoadResult<T> = Result<T, LoadError>;

/// In-memory registry of named schemas.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a single schema file and checks its shape.
    pub fn load_file(path: &Path) -> LoadResult<Schema> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        parse_schema(&value).map_err(|source| LoadError::Shape {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Registers every `*.json` file in `dir` under its file stem.
    ///
    /// Returns the number of schemas registered. Stops at the first bad file.
    pub fn load_dir(&mut self, dir: &Path) -> LoadResult<usize> {
        let entries = fs::read_dir(dir).map_err(|source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        // read_dir order is platform dependent
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let schema = Self::load_file(&path)?;
            self.register(name, schema)?;
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Registers a schema under `name`.
    pub fn register(&mut self, name: impl Into<String>, schema: Schema) -> LoadResult<()> {
        let name = name.into();
        if self.schemas.contains_key(&name) {
            return Err(LoadError::Duplicate(name));
        }
        self.schemas.insert(name, schema);
        Ok(())
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Registered schema names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
