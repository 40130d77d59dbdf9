//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// microcms-jsonschema - microCMS API schemas as JSON Schema draft-07
///
/// Converts microCMS API schema exports and schema bundles into JSON Schema
/// documents, and validates content against them.
#[derive(Parser, Debug)]
#[command(
    name = "microcms-jsonschema",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MICROCMS_JSONSCHEMA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert an API schema export into a JSON Schema document
    Convert(ConvertArgs),

    /// Convert every endpoint of a schema bundle
    Bundle(BundleArgs),

    /// Validate a content document against a converted API schema
    Validate(ValidateArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the convert command
#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Path to the API schema file (JSON or YAML)
    #[arg(value_name = "API_SCHEMA")]
    pub api_schema: PathBuf,

    /// Title of the generated document
    #[arg(long)]
    pub title: Option<String>,

    /// Add x-microcms-* provenance keys to every field node
    #[arg(long)]
    pub extensions: bool,

    /// Copy field descriptions and text length/pattern limits into the nodes
    #[arg(long)]
    pub annotations: bool,

    /// Write the document to a file instead of stdout
    #[arg(long = "save-to", value_name = "FILE")]
    pub save_to: Option<PathBuf>,
}

/// Arguments for the bundle command
#[derive(Parser, Debug)]
pub struct BundleArgs {
    /// Path to the schema bundle file (JSON or YAML)
    #[arg(value_name = "BUNDLE")]
    pub bundle: PathBuf,

    /// Add x-microcms-* provenance keys to every field node
    #[arg(long)]
    pub extensions: bool,

    /// Copy field descriptions and text length/pattern limits into the nodes
    #[arg(long)]
    pub annotations: bool,

    /// Write the endpoint-to-document mapping to a file
    #[arg(long = "save-to", value_name = "FILE", conflicts_with = "out_dir")]
    pub save_to: Option<PathBuf>,

    /// Write one `<endpoint>.schema.json` file per endpoint into this directory
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the content document (JSON or YAML)
    #[arg(value_name = "CONTENT")]
    pub content: PathBuf,

    /// API schema or schema bundle the content should satisfy
    #[arg(short, long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Endpoint to validate against when the schema file is a bundle
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Title of the generated document
    #[arg(long)]
    pub title: Option<String>,

    /// Also check text length/pattern limits declared on the fields
    #[arg(long)]
    pub annotations: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "yaml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}
