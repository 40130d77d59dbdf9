//! Field-to-schema conversion
//!
//! [`FieldConverter`] maps one microCMS field definition to one JSON Schema
//! node. Composite kinds (`custom`, `repeater`) recurse through the custom
//! field pool; a [`ResolutionPath`] carried down each branch breaks cycles.
//!
//! Conversion never fails. Inputs it cannot make sense of degrade:
//! - a `custom` field whose identifier is not in the pool becomes `{type: object}`
//! - a `repeater` drops identifiers that are not in the pool
//! - a cyclic reference becomes `{type: object}` where the cycle closes
//! - an unknown kind becomes `{}`
//!
//! By default every node has exactly the shape its kind maps to. Field
//! descriptions and text length/pattern limits are only carried over when
//! annotations are enabled.
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

pub mod resolver;

pub use resolver::{CustomFieldPool, ResolutionPath};

use crate::schema::{FieldProvenance, JsonType, Properties, SchemaNode, HTML_MEDIA_TYPE};
use crate::types::{
    CustomField, FieldDefinition, FieldKind, NumberSizeLimitValidation, PatternMatchValidation,
    SelectItem, TextSizeLimitValidation,
};
use serde_json::Value;
use tracing::{debug, trace, warn};

/// Options for the conversion entry points
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Title of the generated document
    pub title: Option<String>,
    /// Echo field id, label and kind into every property as `x-microcms-*` keys
    pub include_extensions: bool,
    /// Copy field descriptions and text size/pattern limits into the nodes
    pub include_annotations: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_extensions(mut self, include_extensions: bool) -> Self {
        self.include_extensions = include_extensions;
        self
    }

    pub fn with_annotations(mut self, include_annotations: bool) -> Self {
        self.include_annotations = include_annotations;
        self
    }
}

/// Properties and required list assembled from a list of sibling fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledObject {
    pub properties: Properties,
    pub required: Vec<String>,
}

impl AssembledObject {
    pub fn into_node(self) -> SchemaNode {
        SchemaNode::object(self.properties, self.required)
    }
}

/// Converts field definitions against one custom field pool
#[derive(Debug, Clone)]
pub struct FieldConverter<'a> {
    pool: CustomFieldPool<'a>,
    include_extensions: bool,
    include_annotations: bool,
}

impl<'a> FieldConverter<'a> {
    pub fn new(custom_fields: &'a [CustomField]) -> Self {
        Self::with_pool(CustomFieldPool::new(custom_fields))
    }

    pub fn with_pool(pool: CustomFieldPool<'a>) -> Self {
        Self {
            pool,
            include_extensions: false,
            include_annotations: false,
        }
    }

    pub fn with_extensions(mut self, include_extensions: bool) -> Self {
        self.include_extensions = include_extensions;
        self
    }

    pub fn with_annotations(mut self, include_annotations: bool) -> Self {
        self.include_annotations = include_annotations;
        self
    }

    /// Build a converter configured from conversion options
    pub fn with_options(custom_fields: &'a [CustomField], options: &ConvertOptions) -> Self {
        Self::new(custom_fields)
            .with_extensions(options.include_extensions)
            .with_annotations(options.include_annotations)
    }

    pub fn pool(&self) -> &CustomFieldPool<'a> {
        &self.pool
    }

    /// Convert a top-level field, starting from an empty resolution path
    pub fn convert_field(&self, field: &FieldDefinition) -> SchemaNode {
        self.convert_field_in(field, &ResolutionPath::new())
    }

    /// Convert a field reached through the custom fields on `path`
    pub fn convert_field_in(&self, field: &FieldDefinition, path: &ResolutionPath) -> SchemaNode {
        trace!(field_id = %field.field_id, kind = ?field.kind.tag(), depth = path.depth(), "Converting field");

        // Unknown kinds stay `{}` even in extension mode: there is no kind to record.
        let Some(kind_tag) = field.kind.tag() else {
            debug!(field_id = %field.field_id, "Unknown field kind, emitting empty schema");
            return SchemaNode::default();
        };

        let mut node = self.convert_kind(&field.kind, path);

        if self.include_annotations {
            node.description = field.description.clone();
        }

        if self.include_extensions {
            node.provenance = Some(FieldProvenance {
                field_id: field.field_id.clone(),
                name: field.name.clone(),
                kind: kind_tag.to_string(),
            });
        }

        node
    }

    /// Convert sibling fields into properties plus the ids marked required
    pub fn convert_fields(&self, fields: &[FieldDefinition], path: &ResolutionPath) -> AssembledObject {
        let mut assembled = AssembledObject::default();
        for field in fields {
            assembled
                .properties
                .insert(field.field_id.clone(), self.convert_field_in(field, path));
            if field.is_required() {
                assembled.required.push(field.field_id.clone());
            }
        }
        assembled
    }

    /// Resolve one custom field identifier into an object node
    ///
    /// Returns `None` when the identifier is not in the pool. A cycle is not a
    /// failure: it yields `{type: object}` without recursing.
    pub fn resolve_custom_field(&self, created_at: &str, path: &ResolutionPath) -> Option<SchemaNode> {
        let Some(entered) = path.enter(created_at) else {
            debug!(chain = %path.chain_to(created_at), "Circular custom field reference, truncating");
            return Some(SchemaNode::untyped_object());
        };

        let Some(custom_field) = self.pool.get(created_at) else {
            warn!(created_at = %created_at, "Custom field not found in pool");
            return None;
        };

        Some(self.convert_fields(&custom_field.fields, &entered).into_node())
    }

    fn convert_kind(&self, kind: &FieldKind, path: &ResolutionPath) -> SchemaNode {
        match kind {
            FieldKind::Text {
                text_size_limit_validation,
                pattern_match_validation,
            }
            | FieldKind::TextArea {
                text_size_limit_validation,
                pattern_match_validation,
            } if self.include_annotations => {
                text_schema(text_size_limit_validation.as_ref(), pattern_match_validation.as_ref())
            }
            FieldKind::Text { .. } | FieldKind::TextArea { .. } => SchemaNode::string(),
            FieldKind::RichEditor | FieldKind::RichEditorV2 => SchemaNode {
                content_media_type: Some(HTML_MEDIA_TYPE.to_string()),
                ..SchemaNode::string()
            },
            FieldKind::Select {
                select_items,
                multiple_select,
            } => select_schema(select_items, *multiple_select),
            FieldKind::Number {
                number_size_limit_validation,
            } => number_schema(number_size_limit_validation.as_ref()),
            FieldKind::Date => SchemaNode::string().with_format("date-time"),
            FieldKind::Boolean {
                boolean_initial_value,
            } => SchemaNode {
                default: boolean_initial_value.map(Value::Bool),
                ..SchemaNode::boolean()
            },
            FieldKind::Media => media_schema(),
            FieldKind::MediaList => SchemaNode::array_of(media_schema()),
            FieldKind::File => file_schema(),
            FieldKind::Iframe => SchemaNode::untyped_object(),
            FieldKind::Relation => relation_schema(),
            FieldKind::RelationList => SchemaNode::array_of(relation_schema()),
            FieldKind::Repeater {
                custom_field_created_at_list,
            } => self.repeater_schema(custom_field_created_at_list, path),
            FieldKind::Custom {
                custom_field_created_at,
            } => custom_field_created_at
                .as_deref()
                .and_then(|created_at| self.resolve_custom_field(created_at, path))
                .unwrap_or_else(SchemaNode::untyped_object),
            FieldKind::Unknown => SchemaNode::default(),
        }
    }

    fn repeater_schema(&self, created_at_list: &[String], path: &ResolutionPath) -> SchemaNode {
        let mut alternatives: Vec<SchemaNode> = created_at_list
            .iter()
            .filter_map(|created_at| self.resolve_custom_field(created_at, path))
            .collect();

        match alternatives.len() {
            0 => SchemaNode::bare_array(),
            1 => SchemaNode::array_of(alternatives.remove(0)),
            _ => SchemaNode::array_of(SchemaNode::one_of(alternatives)),
        }
    }
}

fn text_schema(
    size: Option<&TextSizeLimitValidation>,
    pattern: Option<&PatternMatchValidation>,
) -> SchemaNode {
    let mut node = SchemaNode::string();
    if let Some(size) = size {
        node.min_length = size.text_size.min.clone();
        node.max_length = size.text_size.max.clone();
    }
    node.pattern = pattern.map(|p| p.regexp.pattern.clone());
    node
}

fn select_schema(items: &[SelectItem], multiple: bool) -> SchemaNode {
    let choices = SchemaNode {
        enumeration: Some(items.iter().map(|item| item.value.clone()).collect()),
        ..SchemaNode::string()
    };

    if multiple {
        SchemaNode::array_of(choices)
    } else {
        choices
    }
}

fn number_schema(limit: Option<&NumberSizeLimitValidation>) -> SchemaNode {
    let mut node = SchemaNode::number();
    if let Some(limit) = limit {
        node.minimum = limit.number_size.min.clone();
        node.maximum = limit.number_size.max.clone();
    }
    node
}

fn media_schema() -> SchemaNode {
    let mut properties = Properties::new();
    properties.insert("url", SchemaNode::string().with_format("uri"));
    properties.insert("height", SchemaNode::number());
    properties.insert("width", SchemaNode::number());
    SchemaNode::object(properties, vec!["url".to_string()])
}

fn file_schema() -> SchemaNode {
    let mut properties = Properties::new();
    properties.insert("url", SchemaNode::string().with_format("uri"));
    properties.insert("fileSize", SchemaNode::number());
    SchemaNode::object(properties, vec!["url".to_string()])
}

fn relation_schema() -> SchemaNode {
    let mut properties = Properties::new();
    properties.insert("id", SchemaNode::of_type(JsonType::String));
    SchemaNode::object(properties, vec!["id".to_string()])
}
