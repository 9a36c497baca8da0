mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

// Re-export from lib for internal use
use sage_indexer::{error, indexer, lookup, schema};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sage_indexer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index { roots } => {
            cli::index_roots(&roots, &cli.strings)?;
        }
        Commands::Definition { name, root } => {
            cli::find_definition(&name, &root, &cli.strings)?;
        }
        Commands::Symbols {
            prefix,
            kind,
            root,
            format,
        } => {
            cli::list_symbols(prefix.as_deref(), kind.as_deref(), &root, &cli.strings, &format)?;
        }
        Commands::Complete {
            prefix,
            file,
            line,
            root,
        } => {
            cli::complete(&prefix, &file, line, &root, &cli.strings, cli.schema.as_deref())?;
        }
        Commands::Stats { root } => {
            cli::show_stats(&root, &cli.strings)?;
        }
    }

    Ok(())
}
