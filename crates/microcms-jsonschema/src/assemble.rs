//! Document and bundle assembly
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::convert::{ConvertOptions, FieldConverter, ResolutionPath};
use crate::schema::{JsonSchemaDocument, OrderedMap};
use crate::types::{ApiSchema, SchemaBundle};
use tracing::debug;

/// Converted documents keyed by endpoint name, in bundle order
pub type ConvertedBundle = OrderedMap<JsonSchemaDocument>;

/// Convert one API schema into a draft-07 document
///
/// # Examples
///
/// ```rust
/// use microcms_jsonschema::{convert_api_schema, ApiSchema, ConvertOptions, FieldDefinition, FieldKind};
///
/// let schema = ApiSchema::new(vec![
///     FieldDefinition::new("title", FieldKind::text()).with_required(true),
/// ]);
/// let doc = convert_api_schema(&schema, &ConvertOptions::new().with_title("posts"));
///
/// assert_eq!(doc.title.as_deref(), Some("posts"));
/// assert_eq!(doc.required, Some(vec!["title".to_string()]));
/// ```
pub fn convert_api_schema(schema: &ApiSchema, options: &ConvertOptions) -> JsonSchemaDocument {
    let converter = FieldConverter::with_options(&schema.custom_fields, options);

    let assembled = converter.convert_fields(&schema.api_fields, &ResolutionPath::new());

    debug!(
        title = ?options.title,
        fields = schema.api_fields.len(),
        custom_fields = converter.pool().len(),
        required = assembled.required.len(),
        "Converted API schema"
    );

    JsonSchemaDocument::new(assembled.properties, assembled.required, options.title.clone())
}

/// Convert every endpoint of a bundle, titling each document with its endpoint name
///
/// A title set in `options` is ignored in favor of the endpoint name.
pub fn convert_bundle(bundle: &SchemaBundle, options: &ConvertOptions) -> ConvertedBundle {
    debug!(
        service_domain = %bundle.service_domain,
        version = %bundle.version,
        pulled_at = %bundle.pulled_at,
        endpoints = bundle.apis.len(),
        "Converting schema bundle"
    );

    bundle
        .apis
        .iter()
        .map(|entry| {
            let entry_options = ConvertOptions {
                title: Some(entry.endpoint.clone()),
                ..options.clone()
            };
            (entry.endpoint.clone(), convert_api_schema(&entry.schema, &entry_options))
        })
        .collect()
}
