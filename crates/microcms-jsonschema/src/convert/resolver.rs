//! Custom field lookup and cycle tracking
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::types::CustomField;
use std::collections::HashMap;
use tracing::warn;

/// Read-only lookup of custom fields by their `createdAt` identifier
#[derive(Debug, Clone, Default)]
pub struct CustomFieldPool<'a> {
    by_id: HashMap<&'a str, &'a CustomField>,
}

impl<'a> CustomFieldPool<'a> {
    /// Index a list of custom fields. A later definition with an already seen
    /// identifier replaces the earlier one.
    pub fn new(custom_fields: &'a [CustomField]) -> Self {
        let mut by_id = HashMap::with_capacity(custom_fields.len());
        for custom_field in custom_fields {
            if by_id
                .insert(custom_field.created_at.as_str(), custom_field)
                .is_some()
            {
                warn!(
                    created_at = %custom_field.created_at,
                    field_id = %custom_field.field_id,
                    "Duplicate custom field identifier, keeping the last definition"
                );
            }
        }
        Self { by_id }
    }

    pub fn get(&self, created_at: &str) -> Option<&'a CustomField> {
        self.by_id.get(created_at).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Custom field identifiers entered on the current recursion path
///
/// Values are never shared between branches: [`ResolutionPath::enter`]
/// returns a new path, so siblings resolved from the same parent path do not
/// see each other's identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPath {
    stack: Vec<String>,
}

impl ResolutionPath {
    /// Empty path for a top-level field
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, created_at: &str) -> bool {
        self.stack.iter().any(|entered| entered == created_at)
    }

    /// Path extended with `created_at`, or `None` if it is already on the path
    pub fn enter(&self, created_at: &str) -> Option<Self> {
        if self.contains(created_at) {
            return None;
        }

        let mut stack = self.stack.clone();
        stack.push(created_at.to_string());
        Some(Self { stack })
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Human-readable chain ending in `next`, e.g. `a -> b -> a`
    pub fn chain_to(&self, next: &str) -> String {
        self.stack
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(next))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
