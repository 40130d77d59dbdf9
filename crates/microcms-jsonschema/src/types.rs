//! Data model for microCMS API schemas
//!
//! These types mirror the JSON document produced by the microCMS schema
//! export: a list of API fields, a pool of custom fields they may reference,
//! and the multi-endpoint bundle written by schema pull tooling.
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// One typed content-model field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Stable field identifier, used as the property name
    pub field_id: String,

    /// Human-readable label shown in the microCMS console
    pub name: String,

    /// Whether the field must be present on content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    /// Free-form help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Kind tag plus kind-specific attributes
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    /// Create a field with the given identifier and kind, using the identifier as label
    pub fn new(field_id: impl Into<String>, kind: FieldKind) -> Self {
        let field_id = field_id.into();
        Self {
            name: field_id.clone(),
            field_id,
            required: None,
            description: None,
            kind,
        }
    }

    /// Set the label
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the required flag
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// True only when the source explicitly marks the field as required
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Field kinds, keyed by the `kind` discriminator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    /// Single-line text
    #[serde(rename_all = "camelCase")]
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_size_limit_validation: Option<TextSizeLimitValidation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern_match_validation: Option<PatternMatchValidation>,
    },

    /// Multi-line text
    #[serde(rename_all = "camelCase")]
    TextArea {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_size_limit_validation: Option<TextSizeLimitValidation>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pattern_match_validation: Option<PatternMatchValidation>,
    },

    /// Rich editor producing HTML
    RichEditor,

    /// Second-generation rich editor producing HTML
    RichEditorV2,

    /// Enumeration of predefined values
    #[serde(rename_all = "camelCase")]
    Select {
        #[serde(default)]
        select_items: Vec<SelectItem>,
        #[serde(default)]
        multiple_select: bool,
    },

    /// Numeric value
    #[serde(rename_all = "camelCase")]
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        number_size_limit_validation: Option<NumberSizeLimitValidation>,
    },

    /// Date and time
    Date,

    /// On/off switch
    #[serde(rename_all = "camelCase")]
    Boolean {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        boolean_initial_value: Option<bool>,
    },

    /// Single image
    Media,

    /// Multiple images
    MediaList,

    /// Uploaded file
    File,

    /// Extension field backed by an external iframe
    Iframe,

    /// Reference to another content
    Relation,

    /// References to several contents
    RelationList,

    /// Ordered list of custom field instances
    #[serde(rename_all = "camelCase")]
    Repeater {
        #[serde(default)]
        custom_field_created_at_list: Vec<String>,
    },

    /// One instance of a custom field
    #[serde(rename_all = "camelCase")]
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        custom_field_created_at: Option<String>,
    },

    /// Any kind tag this crate does not know about
    #[serde(other)]
    Unknown,
}

impl FieldKind {
    /// Plain text field without validations
    pub fn text() -> Self {
        Self::Text {
            text_size_limit_validation: None,
            pattern_match_validation: None,
        }
    }

    /// Text area field without validations
    pub fn text_area() -> Self {
        Self::TextArea {
            text_size_limit_validation: None,
            pattern_match_validation: None,
        }
    }

    /// Custom field referencing `created_at`
    pub fn custom(created_at: impl Into<String>) -> Self {
        Self::Custom {
            custom_field_created_at: Some(created_at.into()),
        }
    }

    /// Repeater listing the given custom field identifiers
    pub fn repeater<I, S>(created_at_list: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Repeater {
            custom_field_created_at_list: created_at_list.into_iter().map(Into::into).collect(),
        }
    }

    /// The wire tag for this kind, `None` for unknown kinds
    pub fn tag(&self) -> Option<&'static str> {
        let tag = match self {
            Self::Text { .. } => "text",
            Self::TextArea { .. } => "textArea",
            Self::RichEditor => "richEditor",
            Self::RichEditorV2 => "richEditorV2",
            Self::Select { .. } => "select",
            Self::Number { .. } => "number",
            Self::Date => "date",
            Self::Boolean { .. } => "boolean",
            Self::Media => "media",
            Self::MediaList => "mediaList",
            Self::File => "file",
            Self::Iframe => "iframe",
            Self::Relation => "relation",
            Self::RelationList => "relationList",
            Self::Repeater { .. } => "repeater",
            Self::Custom { .. } => "custom",
            Self::Unknown => return None,
        };
        Some(tag)
    }
}

/// One selectable value of a `select` field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectItem {
    pub id: String,
    pub value: String,
}

impl SelectItem {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Inclusive numeric range; either bound may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Number>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberSizeLimitValidation {
    #[serde(default)]
    pub number_size: SizeRange,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSizeLimitValidation {
    #[serde(default)]
    pub text_size: SizeRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternMatchValidation {
    pub regexp: RegexpPattern,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexpPattern {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

/// A reusable group of fields, referenced by its `createdAt` identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomField {
    /// Identifier used by `custom` and `repeater` fields
    pub created_at: String,

    /// Field identifier of the custom field itself
    pub field_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Fields making up one instance, in display order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl CustomField {
    pub fn new(created_at: impl Into<String>, field_id: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self {
            created_at: created_at.into(),
            field_id: field_id.into(),
            name: None,
            fields,
        }
    }
}

/// Schema of one API endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSchema {
    /// Top-level fields in display order
    pub api_fields: Vec<FieldDefinition>,

    /// Custom fields the API fields may reference
    #[serde(default)]
    pub custom_fields: Vec<CustomField>,
}

impl ApiSchema {
    pub fn new(api_fields: Vec<FieldDefinition>) -> Self {
        Self {
            api_fields,
            custom_fields: Vec::new(),
        }
    }

    pub fn with_custom_fields(mut self, custom_fields: Vec<CustomField>) -> Self {
        self.custom_fields = custom_fields;
        self
    }
}

/// Multi-endpoint export produced by schema pull tooling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaBundle {
    /// Version of the tool that pulled the schemas
    pub version: String,

    /// When the schemas were pulled
    pub pulled_at: DateTime<Utc>,

    /// microCMS service domain the schemas came from
    pub service_domain: String,

    /// Endpoint schemas in pull order
    #[serde(default)]
    pub apis: Vec<BundleEntry>,
}

/// One endpoint inside a [`SchemaBundle`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleEntry {
    pub endpoint: String,
    pub schema: ApiSchema,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_scalar_kinds() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "title",
            "name": "Title",
            "kind": "text",
            "required": true,
            "isUnique": false
        }))
        .unwrap();

        assert_eq!(field.field_id, "title");
        assert!(field.is_required());
        assert_eq!(field.kind, FieldKind::text());

        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "body",
            "name": "Body",
            "kind": "richEditorV2"
        }))
        .unwrap();
        assert_eq!(field.kind, FieldKind::RichEditorV2);
        assert!(!field.is_required());
    }

    #[test]
    fn test_deserialize_kind_attributes() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "category",
            "name": "Category",
            "kind": "select",
            "selectItems": [{"id": "a", "value": "A"}],
            "multipleSelect": true
        }))
        .unwrap();

        match field.kind {
            FieldKind::Select { select_items, multiple_select } => {
                assert_eq!(select_items, vec![SelectItem::new("a", "A")]);
                assert!(multiple_select);
            }
            other => panic!("unexpected kind: {:?}", other),
        }

        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "score",
            "name": "Score",
            "kind": "number",
            "numberSizeLimitValidation": {"numberSize": {"min": 1, "max": 10}}
        }))
        .unwrap();

        match field.kind {
            FieldKind::Number { number_size_limit_validation: Some(limit) } => {
                assert_eq!(limit.number_size.min, Some(Number::from(1)));
                assert_eq!(limit.number_size.max, Some(Number::from(10)));
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_kind_is_tolerated() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "mystery",
            "name": "Mystery",
            "kind": "hologram",
            "hologramDepth": 3
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Unknown);
        assert_eq!(field.kind.tag(), None);
    }

    #[test]
    fn test_custom_without_reference() {
        let field: FieldDefinition = serde_json::from_value(json!({
            "fieldId": "meta",
            "name": "Meta",
            "kind": "custom"
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Custom { custom_field_created_at: None });
        assert_eq!(field.kind.tag(), Some("custom"));
    }

    #[test]
    fn test_deserialize_bundle() {
        let bundle: SchemaBundle = serde_json::from_value(json!({
            "version": "1.2.0",
            "pulledAt": "2024-05-01T12:00:00Z",
            "serviceDomain": "example",
            "apis": [
                {
                    "endpoint": "posts",
                    "schema": {
                        "apiFields": [{"fieldId": "title", "name": "Title", "kind": "text"}]
                    }
                }
            ]
        }))
        .unwrap();

        assert_eq!(bundle.service_domain, "example");
        assert_eq!(bundle.apis.len(), 1);
        assert_eq!(bundle.apis[0].endpoint, "posts");
        assert!(bundle.apis[0].schema.custom_fields.is_empty());
    }
}
