use clap::Parser;

use prime_cli::cli::Cli;
use prime_cli::setup_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_tracing();

    prime_cli::cli::run(cli).await
}
