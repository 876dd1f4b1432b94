//! boundbuf CLI: demo driver for the bounded buffer.

mod scenarios;

use std::fs;
use std::io;
use std::path::PathBuf;

use boundbuf_core::BufferConfig;
use clap::{Parser, Subcommand};
use scenarios::Format;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "boundbuf")]
#[command(about = "Bounded position/limit/mark buffer demos", long_about = None)]
struct Cli {
    /// JSON buffer configuration (replaces environment, overridden by flags)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a buffer through put/flip/rewind/clear/mark/reset and print each state
    Positional {
        /// Print one JSON object per step
        #[arg(long)]
        json: bool,
    },

    /// Echo standard input back to standard output through a char buffer
    Echo {
        /// Buffer capacity in chars (overrides config)
        #[arg(long)]
        capacity: Option<usize>,

        /// Max chars handed to stdout per write (overrides config)
        #[arg(long)]
        chunk: Option<usize>,
    },

    /// Allocate managed and external buffers and print ledger usage
    Backing {
        /// Buffer capacity in bytes (overrides config)
        #[arg(long)]
        capacity: Option<usize>,

        /// Hard cap for the ledger in bytes (overrides config)
        #[arg(long)]
        ledger_cap: Option<usize>,

        /// Print one JSON object per step
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Positional { json } => {
            let mut out = io::stdout().lock();
            scenarios::positional(&mut out, format(json))?;
        }
        Commands::Echo { capacity, chunk } => {
            apply_overrides(&mut config, capacity, None, chunk);
            config.validate()?;
            println!("Write something and see it being echoed back!");
            let stats = scenarios::echo(&config, io::stdin().lock(), io::stdout().lock())?;
            tracing::info!(
                cycles = stats.cycles,
                chars = stats.elements,
                "end of input"
            );
        }
        Commands::Backing {
            capacity,
            ledger_cap,
            json,
        } => {
            apply_overrides(&mut config, capacity, ledger_cap, None);
            config.validate()?;
            tracing::debug!(
                capacity = config.capacity,
                ledger_cap = ?config.ledger_cap_bytes,
                "backing report"
            );
            let mut out = io::stdout().lock();
            scenarios::backing(&config, &mut out, format(json))?;
        }
    }

    Ok(())
}

fn format(json: bool) -> Format {
    if json {
        Format::Json
    } else {
        Format::Text
    }
}

/// The JSON file when one is given, the environment otherwise.
fn load_config(path: Option<&PathBuf>) -> Result<BufferConfig, Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            let text = fs::read_to_string(p)?;
            Ok(BufferConfig::from_json(&text)?)
        }
        None => Ok(BufferConfig::from_env()),
    }
}

fn apply_overrides(
    cfg: &mut BufferConfig,
    capacity: Option<usize>,
    ledger_cap: Option<usize>,
    chunk: Option<usize>,
) {
    if let Some(c) = capacity {
        cfg.capacity = c;
    }
    if let Some(cap) = ledger_cap {
        cfg.ledger_cap_bytes = Some(cap);
    }
    if let Some(n) = chunk {
        cfg.transfer_chunk = Some(n);
    }
}
