//! # numfield
//!
//! Replays scripted UI events against a numeric field and prints every
//! reaction as a JSON line.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize Logging ────────────────────────────────► stderr        │
//! │  2. Load Config ─────── defaults ► TOML ► NUMFIELD_* ► validate        │
//! │  3. Build Field ─────── NumericField::new(config).with_value(..)       │
//! │  4. Replay Script ───── file or stdin, one step per line               │
//! │  5. Print Reactions ─── stdout, one JSON object per line               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod script;

use clap::{Parser, Subcommand};
use numfield_core::NumericField;
use serde::Serialize;
use std::io::{BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use config::CliConfig;
use error::AppResult;
use script::Host;

#[derive(Parser, Debug)]
#[command(name = "numfield")]
#[command(version)]
#[command(about = "Replay UI events against a locale-aware numeric field")]
#[command(
    long_about = "Builds one numeric field from a configuration and replays a script of UI \
    events against it, simulating the host text buffer.\n\n\
    Environment variables:\n  \
    NUMFIELD_LOCALE                BCP 47 locale tag\n  \
    NUMFIELD_CURRENCY              ISO 4217 currency code (empty clears it)\n  \
    NUMFIELD_MIN / NUMFIELD_MAX    Bounds\n  \
    NUMFIELD_MAX_FRACTION_DIGITS   Maximum fraction digits\n  \
    NUMFIELD_USE_GROUPING          Group thousands in the display form"
)]
struct Cli {
    /// Path to numfield.toml (defaults to the platform config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines event script
    Replay {
        /// Script file, or `-` for stdin
        script: PathBuf,

        /// Initial value supplied by the field owner
        #[arg(long)]
        value: Option<f64>,
    },

    /// Print the effective field configuration as JSON
    Config,
}

/// Final state printed after a replay.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary<'a> {
    /// Host text after the last step.
    text: &'a str,
    edit_text: &'a str,
    value: Option<f64>,
    editing: bool,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "numfield failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let config = CliConfig::load(cli.config)?;

    match cli.command {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config.field)?);
        }
        Commands::Replay { script, value } => {
            info!(locale = %config.field.locale, ?script, "Replaying script");
            let field = NumericField::new(config.field)?.with_value(value);
            let mut host = Host::new(field);

            if script.as_os_str() == "-" {
                host.replay(std::io::stdin().lock())?;
            } else {
                host.replay(BufReader::new(std::fs::File::open(&script)?))?;
            }

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for record in host.records() {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }

            let field = host.field();
            let summary = Summary {
                text: host.text(),
                edit_text: field.edit_text(),
                value: field.value(),
                editing: field.is_editing(),
            };
            writeln!(out, "{}", serde_json::to_string(&summary)?)?;
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber for logging.
///
/// Logs go to stderr so stdout stays machine-readable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=numfield=trace` - Show every accepted edit and mode change
/// - Default: INFO, DEBUG for numfield crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,numfield=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
