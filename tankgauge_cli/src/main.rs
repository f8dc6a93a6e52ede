//! `tankgauge`: oil tank level and usage from ultrasonic depth readings.
//!
//! Subcommands:
//! - `level`: one-shot conversion of a sensor distance to volume and fill
//! - `track`: replay an observation log (CSV) and account daily usage
//! - `watch`: poll the sensor on an interval and stream status lines

mod cli;
mod error_fmt;
mod sim;
mod track;
mod watch;

use clap::Parser;
use eyre::WrapErr;
use tankgauge_config::Config;
use tankgauge_core::TankGeometry;
use tankgauge_core::util::{ensure_finite, round_dp};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};

fn main() {
    if let Err(err) = try_main() {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&err));
        } else {
            eprintln!("{}", error_fmt::humanize(&err));
        }
        std::process::exit(error_fmt::exit_code_for_error(&err));
    }
}

fn try_main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let text = std::fs::read_to_string(&cli.config)
        .wrap_err_with(|| format!("read config file {}", cli.config.display()))?;
    let cfg = tankgauge_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config file {}", cli.config.display()))?;
    cfg.validate()?;

    init_tracing(&cli, &cfg);

    match &cli.cmd {
        Commands::Level { depth_cm } => run_level(&cli, &cfg, *depth_cm),
        Commands::Track {
            input,
            state,
            price_per_litre,
        } => track::run_track(&cli, &cfg, input, state.as_deref(), *price_per_litre),
        Commands::Watch {
            state,
            interval_secs,
            samples,
        } => watch::run_watch(&cli, &cfg, state.as_deref(), *interval_secs, *samples),
    }
}

/// One-shot conversion: sensor distance in, oil depth / volume / fill out.
fn run_level(cli: &Cli, cfg: &Config, depth_cm: f64) -> eyre::Result<()> {
    let depth_cm = ensure_finite("depth", depth_cm)?;
    let geometry = TankGeometry::try_from(&cfg.tank)?;
    let oil_depth = geometry.oil_depth_cm(depth_cm);
    let level = geometry.level_at(depth_cm);

    if cli.json {
        println!(
            "{}",
            serde_json::json!({
                "oil_depth_cm": round_dp(oil_depth, 1),
                "volume_litres": round_dp(level.volume_litres, 1),
                "fill_percent": round_dp(level.fill_percent, 1),
            })
        );
    } else {
        println!(
            "oil depth {oil_depth:.1} cm, volume {vol:.1} L, {fill:.1}% full",
            vol = level.volume_litres,
            fill = level.fill_percent,
        );
    }
    Ok(())
}

/// Install the global tracing subscriber: stderr output (pretty or JSON
/// lines) plus an optional non-blocking rolling file writer from `[logging]`.
///
/// Filter precedence: `RUST_LOG` > `--log-level` > `logging.level` > "info".
fn init_tracing(cli: &Cli, cfg: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = cli
        .log_level
        .as_deref()
        .or(cfg.logging.level.as_deref())
        .unwrap_or("info");
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let file_layer = cfg.logging.file.as_deref().map(|path| {
        let path = std::path::Path::new(path);
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => std::path::Path::new("."),
        };
        let name = path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("tankgauge.log"));
        let appender = match cfg.logging.rotation.as_deref() {
            Some("daily") => tracing_appender::rolling::daily(dir, name),
            Some("hourly") => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        // Keep the worker alive for the whole process.
        let _ = FILE_GUARD.set(guard);
        tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
    });

    // Logs go to stderr in both modes; stdout is reserved for data rows.
    if cli.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
