//! Schema file loading
//!
//! Reads microCMS API schema exports and schema bundles from JSON or YAML
//! files into the typed model in [`crate::types`].
//!
//! # Example Usage
//!
//! ```no_run
//! use microcms_jsonschema::loader::SchemaLoader;
//! use std::path::Path;
//!
//! let loader = SchemaLoader::new();
//! let schema = loader.load_api_schema(Path::new("api-posts.json"))?;
//! println!("{} top-level fields", schema.api_fields.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod parser;
pub mod schema_loader;

pub use error::{LoaderError, LoaderResult};
pub use parser::{DocumentKind, Format, SchemaParser};
pub use schema_loader::{LoadedDocument, SchemaLoader};
