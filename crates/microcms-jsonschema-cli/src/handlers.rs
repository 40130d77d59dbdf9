//! Command handlers for CLI subcommands
//!
//! Each subcommand lives in its own module; this module holds the helpers
//! they share.

mod bundle;
mod completions;
mod config;
mod convert;
mod validate;

pub use bundle::handle_bundle;
pub use completions::handle_completions;
pub use config::handle_config;
pub use convert::handle_convert;
pub use validate::handle_validate;

use crate::config::Config;
use crate::error::{Error, Result};
use microcms_jsonschema::ConvertOptions;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Fail with `FileNotFound` unless `path` exists
fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::FileNotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Build conversion options from command flags and configuration defaults
///
/// A flag can only switch a setting on; configuration supplies the default.
fn convert_options(
    title: Option<String>,
    extensions: bool,
    annotations: bool,
    config: &Config,
) -> ConvertOptions {
    let mut options = ConvertOptions::new()
        .with_extensions(extensions || config.convert.include_extensions)
        .with_annotations(annotations || config.convert.include_annotations);
    if let Some(title) = title {
        options = options.with_title(title);
    }
    options
}

/// Write a value as JSON, creating parent directories as needed
fn write_json_file<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    let mut content = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    content.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, &content)?;
    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_convert_options_merge_config() {
        let mut config = Config::default();
        let options = convert_options(None, false, false, &config);
        assert!(!options.include_extensions);
        assert!(!options.include_annotations);
        assert!(options.title.is_none());

        config.convert.include_extensions = true;
        let options = convert_options(Some("posts".to_string()), false, false, &config);
        assert!(options.include_extensions);
        assert!(!options.include_annotations);
        assert_eq!(options.title.as_deref(), Some("posts"));

        let options = convert_options(None, false, true, &Config::default());
        assert!(options.include_annotations);

        config.convert.include_annotations = true;
        assert!(convert_options(None, false, false, &config).include_annotations);
    }

    #[test]
    fn test_write_json_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("posts.schema.json");

        write_json_file(&path, &serde_json::json!({"type": "object"}), false).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"type\":\"object\"}\n");
    }

    #[test]
    fn test_ensure_exists() {
        let err = ensure_exists(Path::new("/nonexistent/api.json")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
