use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{REFERENCE_CYCLES, REFERENCE_STEP_SIZE, SpinlockConfig};
use crate::shortcut;
use crate::spinlock::{SpinlockBuffer, SpinlockOutcome};

#[derive(Parser, Debug)]
#[command(name = "spinring")]
#[command(about = "Simulate the spinlock circular buffer and report what follows 0")]
#[command(version)]
pub struct Cli {
    /// Positions to step forward before each insertion
    #[arg(
        short,
        long,
        env = "SPINRING_STEP_SIZE",
        default_value_t = REFERENCE_STEP_SIZE as i64,
        allow_negative_numbers = true
    )]
    pub step_size: i64,

    /// Number of values to insert after the initial 0
    #[arg(
        short,
        long,
        env = "SPINRING_CYCLES",
        default_value_t = REFERENCE_CYCLES as i64,
        allow_negative_numbers = true
    )]
    pub cycles: i64,

    /// How to compute the result
    #[arg(long, value_enum, default_value = "linked")]
    pub solver: Solver,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Solver {
    /// Build the full sequence in a node pool
    Linked,
    /// Track only the insertion index, without allocating a pool
    Shortcut,
}

/// Install the stderr subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(cli: &Cli) -> Result<SpinlockOutcome> {
    let config = SpinlockConfig::new(cli.step_size, cli.cycles).context("invalid configuration")?;

    match cli.solver {
        Solver::Linked => {
            let mut buffer =
                SpinlockBuffer::new(config).context("failed to set up spinlock buffer")?;
            buffer.run().context("spinlock simulation failed")
        }
        Solver::Shortcut => Ok(SpinlockOutcome {
            head: 0,
            after_head: shortcut::value_after_zero(config),
        }),
    }
}
