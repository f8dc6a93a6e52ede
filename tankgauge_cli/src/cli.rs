//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(name = "tankgauge", version, about = "Oil tank level and usage CLI")]
pub struct Cli {
    /// Path to config TOML (typed)
    #[arg(long, value_name = "FILE", default_value = "etc/tankgauge.toml")]
    pub config: PathBuf,

    /// Emit JSON lines instead of pretty text (data and errors)
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); overrides [logging].level
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one sensor reading to oil depth, volume and fill level
    Level {
        /// Distance from the sensor down to the oil surface, in cm
        #[arg(long, value_name = "CM")]
        depth_cm: f64,
    },
    /// Replay an observation log (CSV) and account daily usage
    Track {
        /// CSV with header `timestamp,depth_cm`; `-` reads stdin
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Usage snapshot to continue from and update (JSON)
        #[arg(long, value_name = "FILE")]
        state: Option<PathBuf>,
        /// Override pricing.price_per_litre from the config
        #[arg(long, value_name = "PRICE")]
        price_per_litre: Option<f64>,
    },
    /// Poll the depth sensor on an interval and report continuously
    Watch {
        /// Usage snapshot to continue from and update (JSON)
        #[arg(long, value_name = "FILE")]
        state: Option<PathBuf>,
        /// Override sensor.poll_interval_secs from the config
        #[arg(long, value_name = "SECS")]
        interval_secs: Option<u64>,
        /// Stop after this many readings (0 = run until Ctrl-C)
        #[arg(long, value_name = "N", default_value_t = 0)]
        samples: u64,
    },
}
