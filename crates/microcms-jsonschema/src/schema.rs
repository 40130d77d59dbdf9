//! JSON Schema draft-07 output types
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Number, Value};
use std::collections::HashMap;

/// Dialect marker written into every generated document
pub const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Media type hint for rich editor output
pub const HTML_MEDIA_TYPE: &str = "text/html";

/// Extension key echoing the source field identifier
pub const EXT_FIELD_ID: &str = "x-microcms-field-id";
/// Extension key echoing the source field label
pub const EXT_NAME: &str = "x-microcms-name";
/// Extension key echoing the source field kind tag
pub const EXT_KIND: &str = "x-microcms-kind";

/// JSON Schema primitive type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Boolean,
    Object,
    Array,
}

/// Insertion-ordered map with replace-in-place semantics on duplicate keys
///
/// Entries live in a `Vec` for ordered iteration; a key-to-position index
/// keeps `insert` and `get` at constant time.
#[derive(Debug, Clone)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Property schemas of an object node
pub type Properties = OrderedMap<SchemaNode>;

/// Provenance metadata attached in extension mode
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldProvenance {
    #[serde(rename = "x-microcms-field-id")]
    pub field_id: String,
    #[serde(rename = "x-microcms-name")]
    pub name: String,
    #[serde(rename = "x-microcms-kind")]
    pub kind: String,
}

/// One JSON Schema draft-07 node
///
/// Every member is optional; absent members are left out of the serialized
/// output entirely, so `SchemaNode::default()` serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<JsonType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_media_type: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<Number>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaNode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<SchemaNode>>,

    #[serde(flatten)]
    pub provenance: Option<FieldProvenance>,
}

impl SchemaNode {
    /// Node constrained only by its type
    pub fn of_type(schema_type: JsonType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Self::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type(JsonType::String)
    }

    pub fn number() -> Self {
        Self::of_type(JsonType::Number)
    }

    pub fn boolean() -> Self {
        Self::of_type(JsonType::Boolean)
    }

    /// `{type: object}` with no further constraints
    pub fn untyped_object() -> Self {
        Self::of_type(JsonType::Object)
    }

    /// `{type: array}` with no items constraint
    pub fn bare_array() -> Self {
        Self::of_type(JsonType::Array)
    }

    /// `{type: array, items: <items>}`
    pub fn array_of(items: SchemaNode) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::bare_array()
        }
    }

    /// Object node from assembled properties; an empty required list is dropped
    pub fn object(properties: Properties, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required: if required.is_empty() { None } else { Some(required) },
            ..Self::untyped_object()
        }
    }

    /// `{oneOf: [...]}`
    pub fn one_of(alternatives: Vec<SchemaNode>) -> Self {
        Self {
            one_of: Some(alternatives),
            ..Self::default()
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// True for the `{}` node
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Top-level draft-07 document describing one API's content
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct JsonSchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,

    #[serde(rename = "type")]
    pub schema_type: JsonType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    pub properties: Properties,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

impl JsonSchemaDocument {
    /// Wrap assembled properties in the draft-07 envelope
    pub fn new(properties: Properties, required: Vec<String>, title: Option<String>) -> Self {
        Self {
            schema: DRAFT_07.to_string(),
            schema_type: JsonType::Object,
            title,
            properties,
            required: if required.is_empty() { None } else { Some(required) },
        }
    }

    /// Serialize into a `serde_json::Value`
    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}
