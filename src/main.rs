mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lineconf=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump { file, format } => {
            cli::dump(&file, format)?;
        }
        Commands::Get {
            file,
            key,
            value_type,
            default,
        } => {
            cli::get_value(&file, &key, value_type, default.as_deref())?;
        }
        Commands::Has { file, name, option } => {
            cli::has(&file, &name, option)?;
        }
    }

    Ok(())
}
