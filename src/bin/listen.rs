use anyhow::{Context, Result};
use clap::Parser;
use lttng_rotation::{config, listen, CancelToken, Lttng};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Follow every registered trigger with a notify action and describe each
/// notification it emits.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {}

fn main() -> Result<()> {
    Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lttng_rotation=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cancel = CancelToken::on_interrupt().context("failed to watch for interrupt signals")?;
    let poll_interval = config::poll_interval_from_env()?;

    let mut stdout = io::stdout().lock();
    listen::run(&Lttng, poll_interval, &cancel, &mut stdout)?;
    Ok(())
}
