//! Command implementations.

pub mod ask;
pub mod extract;

pub use self::ask::execute_ask;
pub use self::extract::execute_extract;

use crate::config::Config;
use crate::error::{CliError, Result};
use docqa_extract::{ExtractorRegistry, RemoteExtractor};
use docqa_ingest::{IngestFile, IngestOptions};
use docqa_llm::ChatProvider;
use docqa_report::JsonlSink;
use docqa_session::Session;
use std::fs;
use std::path::PathBuf;

pub(crate) type CliSession = Session<ExtractorRegistry, ChatProvider, JsonlSink>;

/// Build a session from the CLI configuration.
pub(crate) fn build_session(config: &Config) -> Result<CliSession> {
    let extractor = match &config.extraction.endpoint {
        Some(endpoint) => ExtractorRegistry::with_remote(RemoteExtractor::new(endpoint)),
        None => ExtractorRegistry::native_only(),
    };
    let answerer = ChatProvider::new(
        &config.api.endpoint,
        config.api_key().unwrap_or_default(),
    );
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let sink = JsonlSink::open(log_path)?;
    Ok(Session::new(extractor, answerer, sink, config.session.clone())?)
}

/// Read file payloads from disk.
pub(crate) fn read_files(paths: &[PathBuf]) -> Result<Vec<IngestFile>> {
    paths
        .iter()
        .map(|path| {
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| {
                    CliError::InvalidInput(format!("unusable filename: {}", path.display()))
                })?;
            let bytes = fs::read(path)?;
            Ok(IngestFile::new(filename, bytes))
        })
        .collect()
}

/// Ingest options for one invocation.
///
/// `--confirm-large` counts as explicit confirmation for every submitted
/// file; there is no interactive prompt in one-shot mode.
pub(crate) fn ingest_options(files: &[IngestFile], confirm_large: bool) -> IngestOptions {
    let mut options = IngestOptions::default();
    if confirm_large {
        options.confirmed = files.iter().map(|f| f.filename.clone()).collect();
    }
    options
}
