//! globmap command-line entry point

use clap::Parser;
use globmap_cli::commands::Commands;

/// Map source paths to destination paths
#[derive(Debug, Parser)]
#[command(name = "globmap", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute().await
}
