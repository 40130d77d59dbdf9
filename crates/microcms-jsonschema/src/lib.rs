//! microcms-jsonschema - microCMS API schemas as JSON Schema draft-07
//!
//! This crate converts the content model exported by microCMS (a list of API
//! fields plus the custom fields they reference) into JSON Schema draft-07
//! documents for validators, type generators and documentation tools.
//!
//! ## Features
//!
//! - **Field conversion**: every microCMS field kind maps to a draft-07 node
//! - **Custom fields**: `custom` and `repeater` fields expand the custom
//!   fields they reference, with cycle detection
//! - **Bundles**: convert every endpoint of a schema pull in one call
//! - **Extensions**: optionally echo field id, label and kind as `x-microcms-*` keys
//! - **Loading**: JSON and YAML input files
//! - **Content validation**: check content against a generated document
//!
//! ## Quick Start
//!
//! ```rust
//! use microcms_jsonschema::{convert_api_schema, ApiSchema, ConvertOptions};
//! use serde_json::json;
//!
//! let schema: ApiSchema = serde_json::from_value(json!({
//!     "apiFields": [
//!         {"fieldId": "title", "name": "Title", "kind": "text", "required": true},
//!         {"fieldId": "body", "name": "Body", "kind": "richEditorV2"}
//!     ]
//! })).unwrap();
//!
//! let doc = convert_api_schema(&schema, &ConvertOptions::new().with_title("posts"));
//! let value = doc.to_value().unwrap();
//!
//! assert_eq!(value["properties"]["title"], json!({"type": "string"}));
//! assert_eq!(value["required"], json!(["title"]));
//! ```
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod assemble;
pub mod convert;
pub mod error;
pub mod loader;
pub mod schema;
pub mod types;
pub mod validation;

// Re-export commonly used types for convenience
pub use assemble::{convert_api_schema, convert_bundle, ConvertedBundle};
pub use convert::{
    AssembledObject, ConvertOptions, CustomFieldPool, FieldConverter, ResolutionPath,
};
pub use error::{Error, Result};
pub use schema::{JsonSchemaDocument, JsonType, OrderedMap, Properties, SchemaNode, DRAFT_07};
pub use types::{
    ApiSchema, BundleEntry, CustomField, FieldDefinition, FieldKind, SchemaBundle, SelectItem,
};
pub use validation::{ContentValidationError, ContentValidator, Violation};
