//! CLI argument definitions.

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "geiger", version, about = "Geiger counter host runner")]
pub struct Cli {
    /// Log as JSON lines instead of pretty
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the counting and display loop on simulated hardware
    Run {
        /// Simulated source activity in counts per minute (ignored on
        /// hardware builds, where the real tube drives the counter)
        #[arg(long, default_value_t = 1_200)]
        cpm: u32,

        /// GPIO pin of the tube pulse input (hardware builds only)
        #[arg(long, value_name = "PIN", default_value_t = 4)]
        tube_pin: u8,

        /// Stop after roughly this many seconds (runs until Ctrl-C when
        /// omitted)
        #[arg(long, value_name = "SECS")]
        seconds: Option<u64>,

        /// Press the simulated touch pad every N seconds to exercise the
        /// mode toggle
        #[arg(long, value_name = "SECS")]
        flip_every: Option<u64>,
    },
    /// Exercise every simulated device once and report their readings
    SelfCheck,
}
