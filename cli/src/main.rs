//! Interactive terminal driver for the split ledger.

use std::{error::Error, fs, io, path::PathBuf};

use clap::Parser;
use split_ledger_core::engine::{IdGeneratorConfig, LedgerConfig, LedgerEngine};

mod repl;

#[derive(Parser, Debug)]
#[command(name = "split-ledger")]
#[command(about = "Track shared expenses with friends, one split at a time")]
struct Cli {
    /// JSON config file with the starting roster and id generator.
    #[arg(long, env = "SPLIT_LEDGER_CONFIG", conflicts_with = "demo")]
    config: Option<PathBuf>,

    /// Start with the demo roster (Clark, Sarah, Anthony).
    #[arg(long)]
    demo: bool,

    /// Seed for deterministic six-digit person ids.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, e.g. `info` or `split_ledger_core=debug`.
    #[arg(long, env = "SPLIT_LEDGER_LOG", default_value = "warn")]
    log_level: String,
}

fn load_config(cli: &Cli) -> Result<LedgerConfig, Box<dyn Error>> {
    let mut config = match &cli.config {
        Some(path) => LedgerConfig::from_json_str(&fs::read_to_string(path)?)?,
        None if cli.demo => LedgerConfig::demo(),
        None => LedgerConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.id_generator = IdGeneratorConfig::Seeded { seed };
    }
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(cli.log_level.as_str())
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    let mut engine = LedgerEngine::new(config)?;
    tracing::info!(people = engine.roster().len(), "ledger ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(&mut engine, stdin.lock(), stdout.lock())?;
    Ok(())
}
