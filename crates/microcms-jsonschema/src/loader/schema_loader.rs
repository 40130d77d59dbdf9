//! Typed loading of API schemas and bundles
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::loader::{
    error::{LoaderError, LoaderResult},
    parser::{DocumentKind, SchemaParser},
};
use crate::types::{ApiSchema, SchemaBundle};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// A loaded document of either supported kind
#[derive(Debug, Clone, PartialEq)]
pub enum LoadedDocument {
    ApiSchema(ApiSchema),
    Bundle(SchemaBundle),
}

/// Reads API schema and bundle files from disk
#[derive(Debug, Default)]
pub struct SchemaLoader {
    parser: SchemaParser,
}

impl SchemaLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single API schema
    pub fn load_api_schema(&self, path: &Path) -> LoaderResult<ApiSchema> {
        let value = self.parser.parse_file(path)?;
        Self::from_value(value, path, "API schema")
    }

    /// Load a multi-endpoint bundle
    pub fn load_bundle(&self, path: &Path) -> LoaderResult<SchemaBundle> {
        let value = self.parser.parse_file(path)?;
        Self::from_value(value, path, "schema bundle")
    }

    /// Load a file and decide from its content whether it is a schema or a bundle
    pub fn load_any(&self, path: &Path) -> LoaderResult<LoadedDocument> {
        let value = self.parser.parse_file(path)?;
        let kind = DocumentKind::detect(&value);
        debug!(path = %path.display(), kind = ?kind, "Detected document kind");

        match kind {
            DocumentKind::ApiSchema => {
                Self::from_value(value, path, "API schema").map(LoadedDocument::ApiSchema)
            }
            DocumentKind::Bundle => {
                Self::from_value(value, path, "schema bundle").map(LoadedDocument::Bundle)
            }
            DocumentKind::Unknown => Err(LoaderError::shape_error(
                path.to_path_buf(),
                "API schema or schema bundle",
                "expected a top-level `apiFields` or `apis` key",
            )),
        }
    }

    /// Load any JSON or YAML document untyped
    pub fn load_value(&self, path: &Path) -> LoaderResult<Value> {
        self.parser.parse_file(path)
    }

    fn from_value<T: DeserializeOwned>(value: Value, path: &Path, expected: &'static str) -> LoaderResult<T> {
        serde_json::from_value(value)
            .map_err(|e| LoaderError::shape_error(path.to_path_buf(), expected, e.to_string()))
    }
}
