//! Validate command handler

use super::{convert_options, ensure_exists};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use microcms_jsonschema::loader::{LoadedDocument, SchemaLoader};
use microcms_jsonschema::{
    convert_api_schema, ApiSchema, ContentValidator, SchemaBundle, Violation,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, instrument};

/// Machine-readable result of the validate command
#[derive(Debug, Serialize)]
struct ValidationReport {
    content: PathBuf,
    valid: bool,
    violations: Vec<Violation>,
}

/// Handle the validate command
#[instrument(skip_all, fields(content = %args.content.display(), schema = %args.schema.display()))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate", &args.content.display().to_string());
    ensure_exists(&args.schema)?;
    ensure_exists(&args.content)?;

    output.info(&format!(
        "Validating {} against {}",
        args.content.display(),
        args.schema.display()
    ))?;

    let loader = SchemaLoader::new();
    let (schema, default_title) = match loader.load_any(&args.schema)? {
        LoadedDocument::ApiSchema(schema) => {
            if let Some(endpoint) = &args.endpoint {
                output.warning(&format!(
                    "Ignoring --endpoint {}: {} is a single API schema",
                    endpoint,
                    args.schema.display()
                ))?;
            }
            (schema, None)
        }
        LoadedDocument::Bundle(bundle) => {
            let (endpoint, schema) = select_endpoint(bundle, args.endpoint.as_deref())?;
            (schema, Some(endpoint))
        }
    };

    let options = convert_options(args.title.or(default_title), false, args.annotations, config);
    let document = convert_api_schema(&schema, &options);
    let validator = ContentValidator::new(&document)?;

    let content = loader.load_value(&args.content)?;
    debug!("Loaded content document");

    let violations = match validator.validate(&content) {
        Ok(()) => Vec::new(),
        Err(err) => err.violations,
    };
    let count = violations.len();

    if output.format() == OutputFormat::Human {
        if count == 0 {
            output.success(&format!("✓ {} is valid", args.content.display()))?;
        } else {
            output.error(&format!(
                "✗ {} has {} violation(s)",
                args.content.display(),
                count
            ))?;
            output.violations(&violations)?;
        }
    } else {
        output.data(&ValidationReport {
            content: args.content.clone(),
            valid: count == 0,
            violations,
        })?;
    }

    if count == 0 {
        Ok(())
    } else {
        Err(Error::other(format!(
            "Validation failed with {} violation(s)",
            count
        )))
    }
}

/// Pick the endpoint to validate against from a bundle
///
/// A single-endpoint bundle needs no `--endpoint`.
fn select_endpoint(mut bundle: SchemaBundle, endpoint: Option<&str>) -> Result<(String, ApiSchema)> {
    let available = || {
        bundle
            .apis
            .iter()
            .map(|entry| entry.endpoint.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let index = match endpoint {
        Some(name) => bundle
            .apis
            .iter()
            .rposition(|entry| entry.endpoint == name)
            .ok_or_else(|| {
                Error::invalid_args(format!(
                    "Unknown endpoint '{}'. Available endpoints: {}",
                    name,
                    available()
                ))
            })?,
        None if bundle.apis.len() == 1 => 0,
        None => {
            return Err(Error::invalid_args(format!(
                "--endpoint is required when the schema file is a bundle. Available endpoints: {}",
                available()
            )));
        }
    };

    let entry = bundle.apis.swap_remove(index);
    Ok((entry.endpoint, entry.schema))
}
