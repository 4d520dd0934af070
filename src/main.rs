//! Terminal memory game runner (default binary).
//!
//! Click pairs of face-down tiles until every pair is found. The score is the
//! number of whole seconds that took.

use anyhow::Result;

use tui_memory::config::{CliCommand, GameConfig, USAGE};
use tui_memory::logging::init_tracing;
use tui_memory::{run_game, ExitStatus};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match GameConfig::from_env_and_args(&args)? {
        CliCommand::Help => {
            println!("{}", USAGE);
            return Ok(());
        }
        CliCommand::Play(config) => config,
    };

    init_tracing(config.log_file.as_deref());

    // The terminal is restored by the time run_game returns.
    match run_game(&config)? {
        ExitStatus::Completed { score_secs } => {
            println!("All pairs found in {} seconds.", score_secs);
        }
        ExitStatus::Abandoned {
            pairs_found,
            elapsed_secs,
        } => {
            println!(
                "Closed after {} seconds with {}/{} pairs found.",
                elapsed_secs,
                pairs_found,
                config.pair_count()
            );
        }
    }
    Ok(())
}
