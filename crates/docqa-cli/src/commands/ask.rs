//! The ask command: ingest files, then ask a question over them.

use super::{build_session, ingest_options, read_files};
use crate::cli::AskArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use docqa_domain::QueryRequest;

/// Execute the ask command.
pub async fn execute_ask(args: AskArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut session = build_session(config)?;

    let files = read_files(&args.files)?;
    let options = ingest_options(&files, args.confirm_large);
    let batch = session.ingest(files, options).await?;

    let summary = session.summary(&batch)?;
    if summary.failed > 0 {
        eprintln!("{}", formatter.summary(&summary));
    }

    // An empty model defers to the session default
    let model = args.model.unwrap_or_default();
    let request = match &args.doc {
        Some(name) => {
            let id = session.find_document(name)?.ok_or_else(|| {
                CliError::InvalidInput(format!("no ingested document named '{}'", name))
            })?;
            QueryRequest::single(&args.question, id, model)
        }
        None => QueryRequest::multi(&args.question, Vec::new(), model),
    };

    let result = session.ask(request).await?;

    let names: Vec<String> = session
        .succeeded_documents()?
        .into_iter()
        .filter(|(id, _)| result.citations.contains(id))
        .map(|(_, name)| name)
        .collect();
    println!("{}", formatter.answer(&result, &names));

    Ok(())
}
