use anyhow::{Context, Result};
use clap::Parser;
use lttng_rotation::{monitor, CancelToken, Config, Lttng, SessionName};
use std::io::{self, IsTerminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Monitor the rotations of a set of sessions.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Session(s) to monitor for rotations
    #[arg(required = true, value_name = "SESSION")]
    sessions: Vec<SessionName>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lttng_rotation=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cancel = CancelToken::on_interrupt().context("failed to watch for interrupt signals")?;
    let config = Config::from_env(cli.sessions)?.with_color(io::stdout().is_terminal());

    let mut stdout = io::stdout().lock();
    monitor::run(&Lttng, &config, &cancel, &mut stdout)?;
    Ok(())
}
