//! Convert command handler

use super::{convert_options, ensure_exists, write_json_file};
use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use microcms_jsonschema::loader::{LoadedDocument, SchemaLoader};
use microcms_jsonschema::convert_api_schema;
use tracing::{info, instrument};

/// Handle the convert command
#[instrument(skip_all, fields(file = %args.api_schema.display()))]
pub fn handle_convert(args: ConvertArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("convert", &args.api_schema.display().to_string());
    ensure_exists(&args.api_schema)?;

    output.info(&format!("Converting API schema: {}", args.api_schema.display()))?;

    let schema = match SchemaLoader::new().load_any(&args.api_schema)? {
        LoadedDocument::ApiSchema(schema) => schema,
        LoadedDocument::Bundle(_) => {
            return Err(Error::InvalidFormat {
                path: args.api_schema.clone(),
                expected: "an API schema (use the bundle command for schema bundles)".to_string(),
            });
        }
    };

    let options = convert_options(args.title, args.extensions, args.annotations, config);
    let document = convert_api_schema(&schema, &options);

    info!(
        properties = document.properties.len(),
        custom_fields = schema.custom_fields.len(),
        "Converted API schema"
    );

    match args.save_to {
        Some(path) => {
            write_json_file(&path, &document, config.output.pretty)?;
            output.success(&format!("✓ Schema saved to {}", path.display()))?;
        }
        None => output.data(&document)?,
    }

    timer.finish();
    Ok(())
}
