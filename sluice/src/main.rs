// sluice/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug sluice load ... to see every step
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load {
            source,
            database,
            schema,
            target_dir,
        } => commands::load::execute(source, database, schema, target_dir).await,
        Commands::Validate { source } => commands::validate::execute(source),
        Commands::Ddl {
            config,
            dialect,
            table,
            schema,
        } => commands::ddl::execute(config, dialect, table, schema),
        Commands::Scaffold {
            csv,
            output,
            force,
            delimiter,
        } => commands::scaffold::execute(csv, output, force, delimiter),
        Commands::Summary { config } => commands::summary::execute(config),
        Commands::Inspect {
            table,
            database,
            schema,
            limit,
        } => commands::inspect::execute(database, schema, table, limit),
    }
}
