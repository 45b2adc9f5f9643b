mod config;
mod query;
mod sdl;
mod tables;
mod utility;

pub use config::Config;
pub use query::QueryCommand;
pub use tables::TablesCommand;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Serve a GraphQL API derived from a PostgreSQL schema from the command line
#[derive(Parser, Debug)]
#[command(name = "tableql")]
#[command(about = "tableql - GraphQL over an introspected PostgreSQL schema")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    config: Config,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser, Debug)]
enum Command {
    /// Print the derived schema as GraphQL SDL
    Sdl,

    /// Run a GraphQL query and print the JSON response
    Query(QueryCommand),

    /// List introspected tables, primary keys and foreign keys
    Tables(TablesCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let db = self.config.connect().await?;

        match self.command {
            Command::Sdl => sdl::run(&db),
            Command::Query(cmd) => cmd.run(&db).await,
            Command::Tables(cmd) => cmd.run(&db),
        }
    }
}

/// Installs the global subscriber. Logs go to stderr so command output can
/// be piped; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
