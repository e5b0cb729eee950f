//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use docqa_report::ExportFormat;
use std::path::PathBuf;

/// docqa CLI - Extract text from documents and ask questions over them.
#[derive(Debug, Parser)]
#[command(name = "docqa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.docqa/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose tracing output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract text from documents, then preview or export it
    Extract(ExtractArgs),

    /// Ingest documents and ask a question over them
    Ask(AskArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Files to extract
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Export format
    #[arg(short, long, value_enum, default_value = "txt")]
    pub format: FormatArg,

    /// Directory to write exports into (previews to stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Process files above the size-confirmation threshold without asking
    #[arg(long)]
    pub confirm_large: bool,
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Question to ask
    pub question: String,

    /// File to ingest before asking (repeatable)
    #[arg(short, long = "file", required = true)]
    pub files: Vec<PathBuf>,

    /// Ask over a single document, by filename
    #[arg(short, long)]
    pub doc: Option<String>,

    /// Answering model (defaults to the configured model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Process files above the size-confirmation threshold without asking
    #[arg(long)]
    pub confirm_large: bool,
}

/// Export format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
    /// Plain text
    Txt,
    /// JSON object
    Json,
    /// Standalone HTML page
    Html,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ExportFormat::Txt,
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Html => ExportFormat::Html,
        }
    }
}
