//! Crate-level error type
//!
//! Conversion itself never fails; these errors come from the surfaces around
//! it: loading files, serializing output and compiling generated documents.
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::loader::LoaderError;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Reading or parsing an input file failed
    #[error(transparent)]
    Loader(#[from] LoaderError),

    /// A generated document could not be compiled as draft-07
    #[error("Failed to compile generated schema: {message}")]
    SchemaCompile { message: String },

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
