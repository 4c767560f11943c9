use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wxdash_core::{App, AppError, ComparisonRequest, ConfigError};
use wxdash_weather::{TemperatureUnit, TrendIndicator};

/// Compare forecast days with historical baselines
#[derive(Debug, Parser)]
#[command(name = "wxdash", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true, env = "WXDASH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Compare a JSON request of forecast days against its baselines
    Compare {
        /// Request file
        request: PathBuf,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Convert a temperature
    Convert {
        #[arg(allow_hyphen_values = true)]
        value: f64,

        /// Target unit (F or C); defaults to the configured display unit
        #[arg(long)]
        to: Option<TemperatureUnit>,

        /// Source unit; inferred from magnitude when omitted
        #[arg(long)]
        from: Option<TemperatureUnit>,
    },

    /// Format a per-decade trend value
    Trend {
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Unit suffix, e.g. "°F" or "%"
        #[arg(long, default_value = "")]
        unit: String,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = wxdash_core::init() {
        eprintln!("{e:#}");
    }

    if let Err(e) = run(cli) {
        let user_message = e
            .downcast_ref::<AppError>()
            .map(AppError::user_message)
            .or_else(|| e.downcast_ref::<ConfigError>().map(ConfigError::user_message));
        match user_message {
            Some(message) => {
                tracing::error!("{:#}", e);
                eprintln!("{message}");
            }
            None => eprintln!("Error: {e:#}"),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let app = App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Compare { request, pretty } => {
            let request = ComparisonRequest::load(&request).map_err(AppError::from)?;
            let comparisons = app.compare(&request)?;
            let output = if pretty {
                serde_json::to_string_pretty(&comparisons)
            } else {
                serde_json::to_string(&comparisons)
            }
            .context("Failed to serialize comparison results")?;
            println!("{output}");
        }
        Command::Convert { value, to, from } => {
            let converted = app.convert(value, from, to);
            let unit = to.unwrap_or(app.config().display.temperature_unit);
            println!("{converted}°{unit}");
        }
        Command::Trend { value, unit } => {
            let indicator = TrendIndicator::parse(&value, &unit);
            println!(
                "{}",
                serde_json::to_string(&indicator).context("Failed to serialize trend")?
            );
        }
    }

    Ok(())
}
