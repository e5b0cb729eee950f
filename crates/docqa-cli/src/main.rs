//! docqa CLI - Extract text from documents and ask questions over them.

use clap::Parser;
use docqa_cli::commands;
use docqa_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::Ask(args) => commands::execute_ask(args, &config, &formatter).await?,
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
