//! The extract command: ingest files and preview or export their text.

use super::{build_session, ingest_options, read_files};
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use docqa_report::ExportFormat;
use std::fs;
use std::path::Path;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let session = build_session(config)?;

    let files = read_files(&args.files)?;
    let options = ingest_options(&files, args.confirm_large);
    let batch = session.ingest(files, options).await?;

    let summary = session.summary(&batch)?;
    println!("{}", formatter.summary(&summary));

    let format = ExportFormat::from(args.format);
    for (id, filename) in session.succeeded_documents()? {
        let rendered = session.export(id, format)?;
        match &args.output {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                let path = dir.join(export_name(&filename, format));
                fs::write(&path, rendered)?;
                println!("Wrote {}", path.display());
            }
            None => println!("{}", formatter.preview(&filename, &rendered)),
        }
    }

    Ok(())
}

fn export_name(filename: &str, format: ExportFormat) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    format!("{}.{}", stem, format.extension())
}
