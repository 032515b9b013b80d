//! Command line arguments and logging setup.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

const ABOUT: &str = "
eco-bridge-sim deploys the settlement-layer and rollup bridges in memory, runs a scenario of
deposits, withdrawals, rebases and upgrades against them, and prints the resulting balances. Without
a scenario file it runs a single deposit and withdrawal round trip.
";

/// The simulator CLI arguments.
#[derive(Parser, Clone, Debug)]
#[command(about = ABOUT, version)]
pub(crate) struct SimCli {
    /// Verbosity level (0-4)
    #[arg(long, short, help = "Verbosity level (0 [error] - 4 [trace]) - Default: 0", action = ArgAction::Count)]
    pub(crate) v: u8,
    /// Path to a JSON scenario file.
    #[arg(long, env = "ECO_SIM_SCENARIO")]
    pub(crate) scenario: Option<PathBuf>,
    /// Print the final state as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

/// Initializes the tracing subscriber
///
/// # Arguments
/// * `verbosity_level` - The verbosity level (0-4)
///
/// # Returns
/// * `Result<()>` - Ok if successful, Err otherwise.
pub(crate) fn init_tracing_subscriber(verbosity_level: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(match verbosity_level {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = SimCli::parse_from(["eco-bridge-sim", "-vv", "--json", "--scenario", "s.json"]);
        assert_eq!(cli.v, 2);
        assert!(cli.json);
        assert_eq!(cli.scenario, Some(PathBuf::from("s.json")));

        let cli = SimCli::parse_from(["eco-bridge-sim"]);
        assert_eq!(cli.v, 0);
        assert!(!cli.json);
        assert!(cli.scenario.is_none());
    }
}
