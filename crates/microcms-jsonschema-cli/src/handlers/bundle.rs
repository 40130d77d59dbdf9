//! Bundle command handler

use super::{convert_options, ensure_exists, write_json_file};
use crate::cli::BundleArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use microcms_jsonschema::loader::SchemaLoader;
use microcms_jsonschema::{convert_bundle, ConvertedBundle};
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

/// Suffix of per-endpoint files written with `--out-dir`
pub const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Handle the bundle command
#[instrument(skip_all, fields(file = %args.bundle.display()))]
pub fn handle_bundle(args: BundleArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("bundle", &args.bundle.display().to_string());
    ensure_exists(&args.bundle)?;

    output.info(&format!("Converting schema bundle: {}", args.bundle.display()))?;

    let bundle = SchemaLoader::new().load_bundle(&args.bundle)?;
    let options = convert_options(None, args.extensions, args.annotations, config);
    let converted = convert_bundle(&bundle, &options);

    info!(
        service_domain = %bundle.service_domain,
        endpoints = converted.len(),
        "Converted schema bundle"
    );

    // --save-to wins over an out_dir from the config file
    let out_dir = match (&args.save_to, args.out_dir) {
        (Some(_), _) => None,
        (None, Some(dir)) => Some(dir),
        (None, None) => config.bundle.out_dir.clone(),
    };

    if let Some(path) = &args.save_to {
        write_json_file(path, &converted, config.output.pretty)?;
        output.success(&format!(
            "✓ {} endpoint schema(s) saved to {}",
            converted.len(),
            path.display()
        ))?;
    } else if let Some(dir) = out_dir {
        write_endpoint_files(&converted, &dir, config.output.pretty, output)?;
    } else {
        output.data(&converted)?;
    }

    timer.finish();
    Ok(())
}

/// Write one `<endpoint>.schema.json` per endpoint into `dir`
fn write_endpoint_files(
    converted: &ConvertedBundle,
    dir: &Path,
    pretty: bool,
    output: &mut OutputWriter,
) -> Result<()> {
    fs::create_dir_all(dir)?;

    for endpoint in converted.keys() {
        if !is_safe_file_stem(endpoint) {
            return Err(Error::other(format!(
                "Endpoint name '{}' cannot be used as a file name",
                endpoint
            )));
        }
    }

    output.section("Endpoint Schemas")?;
    for (endpoint, document) in converted.iter() {
        let path = dir.join(format!("{}{}", endpoint, SCHEMA_FILE_SUFFIX));
        write_json_file(&path, document, pretty)?;
        output.success(&format!("✓ {} -> {}", endpoint, path.display()))?;
    }

    Ok(())
}

/// Endpoint names become file names; reject anything that could escape `dir`
fn is_safe_file_stem(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}
