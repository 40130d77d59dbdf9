//! Validate content against a generated document
//!
//! Compiles a [`JsonSchemaDocument`] with the `jsonschema` crate in draft-07
//! mode and checks microCMS content (for example an API response item)
//! against it.
//!
//! Copyright (c) 2026 microcms-jsonschema contributors
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::schema::JsonSchemaDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One failed constraint inside a content document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// JSON pointer into the content, empty for the root
    pub instance_path: String,
    /// What went wrong
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{}: {}", path, self.message)
    }
}

/// Content did not satisfy the schema
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub struct ContentValidationError {
    pub violations: Vec<Violation>,
}

impl fmt::Display for ContentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Content failed validation with {} violation(s)", self.violations.len())?;
        for violation in &self.violations {
            write!(f, "\n  - {}", violation)?;
        }
        Ok(())
    }
}

/// Draft-07 validator compiled from a generated document
pub struct ContentValidator {
    validator: jsonschema::Validator,
}

impl fmt::Debug for ContentValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentValidator").finish_non_exhaustive()
    }
}

impl ContentValidator {
    /// Compile a generated document
    pub fn new(document: &JsonSchemaDocument) -> Result<Self> {
        let schema = document.to_value()?;
        Self::from_value(&schema)
    }

    /// Compile an arbitrary draft-07 schema value
    pub fn from_value(schema: &Value) -> Result<Self> {
        let validator = jsonschema::draft7::new(schema).map_err(|e| Error::SchemaCompile {
            message: e.to_string(),
        })?;
        Ok(Self { validator })
    }

    pub fn is_valid(&self, content: &Value) -> bool {
        self.validator.is_valid(content)
    }

    /// Validate content, collecting every violation
    pub fn validate(&self, content: &Value) -> std::result::Result<(), ContentValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(content)
            .map(|error| Violation {
                instance_path: error.instance_path.to_string(),
                message: error.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ContentValidationError { violations })
        }
    }
}
