use clap::Parser;
use tableql_cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tableql_cli::init_tracing()?;
    Cli::parse().run().await
}
