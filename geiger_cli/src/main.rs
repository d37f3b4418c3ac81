mod cli;
mod run;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eyre::{Result, WrapErr};

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(&cli);

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            flag.store(true, Ordering::Relaxed);
        })
        .wrap_err("failed to install Ctrl-C handler")?;
    }

    match cli.cmd {
        Commands::Run {
            cpm,
            seconds,
            flip_every,
            tube_pin,
        } => run::run(cpm, tube_pin, seconds, flip_every, shutdown),
        Commands::SelfCheck => run::self_check(),
    }
}

/// Console logging: RUST_LOG wins, then --log-level; --json switches the
/// format to JSON lines.
fn init_tracing(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
