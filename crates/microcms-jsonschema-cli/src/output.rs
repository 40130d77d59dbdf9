//! Output formatting and writing utilities
//!
//! Generated documents and reports are written in the format chosen with
//! `--output`. Status messages only appear in human mode, so machine formats
//! stay parseable.

use crate::cli::OutputFormat;
use crate::error::Result;
use colored::Colorize;
use microcms_jsonschema::Violation;
use serde::Serialize;
use std::io::{self, Write};
use tracing::{debug, trace};

/// Trait for formatting output values
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format content validation violations
    fn format_violations(&self, violations: &[Violation]) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => {
                Ok(serde_json::to_string_pretty(value)?)
            }
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
        }
    }

    fn format_violations(&self, violations: &[Violation]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_violations_human(violations)),
            _ => self.format(&violations),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self::with_writer(format, use_color, quiet, Box::new(io::stdout()))
    }

    /// Create an output writer with a custom writer
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    ///
    /// Data is the command's result, so it is written even in quiet mode.
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        trace!(bytes = formatted.len(), "Writing data");

        if self.format == OutputFormat::Yaml {
            // serde_yaml already ends documents with a newline
            self.write(&formatted)
        } else {
            self.writeln(&formatted)
        }
    }

    /// Write content validation violations
    pub fn violations(&mut self, violations: &[Violation]) -> Result<()> {
        let formatted = self.format.format_violations(violations)?;
        if self.use_color && self.is_human() {
            self.writeln(&formatted.red().to_string())
        } else {
            self.writeln(&formatted)
        }
    }
}

fn format_violations_human(violations: &[Violation]) -> String {
    let mut output = String::new();
    for violation in violations {
        output.push_str(&format!("  • {}\n", violation));
    }
    output.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Writer whose contents stay readable after the OutputWriter takes it
    #[derive(Clone, Default)]
    struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.borrow().clone()).unwrap()
        }
    }

    fn writer(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
        let buffer = SharedBuffer::default();
        let output = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
        (output, buffer)
    }

    fn sample_violations() -> Vec<Violation> {
        vec![
            Violation {
                instance_path: String::new(),
                message: "\"title\" is a required property".to_string(),
            },
            Violation {
                instance_path: "/rating".to_string(),
                message: "9 is greater than the maximum of 5".to_string(),
            },
        ]
    }

    #[test]
    fn test_human_messages() {
        let (mut output, buffer) = writer(OutputFormat::Human, false);
        output.info("Loading api-posts.json").unwrap();
        output.section("Document").unwrap();
        output.warning("unresolved custom field").unwrap();

        let text = buffer.contents();
        assert!(text.contains("INFO: Loading api-posts.json"));
        assert!(text.contains("=== Document ==="));
        assert!(text.contains("WARNING: unresolved custom field"));
    }

    #[test]
    fn test_quiet_mode_keeps_data() {
        let (mut output, buffer) = writer(OutputFormat::Human, true);
        output.info("hidden").unwrap();
        output.success("hidden").unwrap();
        output.data(&json!({"type": "object"})).unwrap();

        let text = buffer.contents();
        assert!(!text.contains("hidden"));
        assert!(text.contains("\"type\": \"object\""));
    }

    #[test]
    fn test_machine_formats_only_emit_data() {
        let (mut output, buffer) = writer(OutputFormat::Json, false);
        output.info("hidden").unwrap();
        output.error("hidden").unwrap();
        output.data(&json!({"a": 1})).unwrap();

        assert_eq!(buffer.contents(), "{\"a\":1}\n");
    }

    #[test]
    fn test_yaml_data() {
        let (mut output, buffer) = writer(OutputFormat::Yaml, false);
        output.data(&json!({"type": "string"})).unwrap();
        assert_eq!(buffer.contents(), "type: string\n");
    }

    #[test]
    fn test_violations_human() {
        let (mut output, buffer) = writer(OutputFormat::Human, false);
        output.violations(&sample_violations()).unwrap();

        let text = buffer.contents();
        assert!(text.contains("  • /: \"title\" is a required property"));
        assert!(text.contains("  • /rating: 9 is greater than the maximum of 5"));
    }

    #[test]
    fn test_violations_json() {
        let formatted = OutputFormat::Json.format_violations(&sample_violations()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();
        assert_eq!(value[1]["instance_path"], json!("/rating"));
    }
}
