//! Command-line interface for scoring Kindred profiles.
//!
//! Two subcommands read JSON party documents (`{"id": ..., "profile": ...}`)
//! and print JSON results:
//! - `score` compares two parties.
//! - `rank` scores a seeker against a pool of candidates.
//!
//! Paths and options can come from CLI flags, configuration files, or
//! environment variables, layered by `ortho_config`.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod documents;
mod error;
mod rank;
mod score;

pub use error::CliError;

use documents::{DefaultEngineBuilder, EngineBuilder, load_document, require_existing, write_json};
use rank::{RankArgs, run_rank_with};
use score::{ScoreArgs, run_score_with};

pub(crate) const ARG_FIRST: &str = "first";
pub(crate) const ARG_SECOND: &str = "second";
pub(crate) const ARG_SEEKER: &str = "seeker";
pub(crate) const ARG_POOL: &str = "pool";
pub(crate) const ARG_ENGINE_CONFIG: &str = "engine-config";
pub(crate) const ARG_CACHE: &str = "cache";
pub(crate) const ARG_MAX_DISTANCE_KM: &str = "max-distance-km";
pub(crate) const ARG_MIN_TIER: &str = "min-tier";
pub(crate) const ARG_LIMIT: &str = "limit";
pub(crate) const ENV_FIRST: &str = "KINDRED_CMDS_SCORE_FIRST";
pub(crate) const ENV_SECOND: &str = "KINDRED_CMDS_SCORE_SECOND";
pub(crate) const ENV_SEEKER: &str = "KINDRED_CMDS_RANK_SEEKER";
pub(crate) const ENV_POOL: &str = "KINDRED_CMDS_RANK_POOL";

/// Run the Kindred CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, input documents, or
/// scoring fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    let builder = DefaultEngineBuilder;
    match cli.command {
        Command::Score(args) => run_score_with(args, &builder, &mut stdout),
        Command::Rank(args) => run_rank_with(args, &builder, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "kindred",
    about = "Score compatibility between Kindred profiles",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score two party documents against each other.
    Score(ScoreArgs),
    /// Rank a pool of candidates for one seeker.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
