use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use reelfeed::app::AppContext;
use reelfeed::cli::{commands, Cli, Commands};
use reelfeed::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // The TUI owns the terminal, so it only logs when given a file
    let to_stderr = !matches!(cli.command, Commands::Tui);
    init_tracing(cli.log.as_deref(), to_stderr)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(config, cli.base_url.as_deref())?;

    match cli.command {
        Commands::Page {
            offset,
            limit,
            category,
            json,
        } => {
            commands::show_page(&ctx, offset, limit, category.as_deref(), json).await?;
        }
        Commands::StreamUrl { id } => {
            commands::show_stream_url(&ctx, id);
        }
        Commands::Scroll { steps } => {
            commands::scroll(&ctx, steps).await?;
        }
        Commands::Tui => {
            reelfeed::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}

fn init_tracing(log_file: Option<&Path>, to_stderr: bool) -> anyhow::Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_writer(Arc::new(file)).with_ansi(false))
        }
        None => None,
    };
    let stderr_layer =
        (file_layer.is_none() && to_stderr).then(|| fmt::layer().with_writer(std::io::stderr));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    Ok(())
}
