//! `score` command: compare two party documents.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kindred_core::{CompatibilityResult, CompatibilityScorer, PartyId};
use kindred_scorer::{Candidate, ConfigFingerprint, ResultCache};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CACHE, ARG_ENGINE_CONFIG, ARG_FIRST, ARG_SECOND, CliError, ENV_FIRST, ENV_SECOND,
    EngineBuilder, load_document, require_existing, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "score",
    about = "Score two parties against each other",
    long_about = "Score two parties against each other. Each party is a JSON \
                  document holding an `id` and a `profile`. The result is \
                  printed as JSON: the overall score, the tier, and one entry \
                  per category, or the hard filter that excluded the pair."
)]
#[ortho_config(prefix = "KINDRED")]
pub(crate) struct ScoreArgs {
    /// Path to the first party document.
    #[arg(value_name = "first")]
    #[serde(default)]
    pub(crate) first: Option<Utf8PathBuf>,
    /// Path to the second party document.
    #[arg(value_name = "second")]
    #[serde(default)]
    pub(crate) second: Option<Utf8PathBuf>,
    /// JSON engine configuration overriding weights, tiers, and structures.
    #[arg(long = ARG_ENGINE_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) engine_config: Option<Utf8PathBuf>,
    /// Result cache file to reuse and update.
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ScoreConfig {
    pub(crate) first: Utf8PathBuf,
    pub(crate) second: Utf8PathBuf,
    pub(crate) engine_config: Option<Utf8PathBuf>,
    pub(crate) cache: Option<Utf8PathBuf>,
}

impl ScoreConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.first, ARG_FIRST)?;
        require_existing(&self.second, ARG_SECOND)?;
        if let Some(path) = &self.engine_config {
            require_existing(path, ARG_ENGINE_CONFIG)?;
        }
        Ok(())
    }
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let first = args.first.ok_or(CliError::MissingArgument {
            field: ARG_FIRST,
            env: ENV_FIRST,
        })?;
        let second = args.second.ok_or(CliError::MissingArgument {
            field: ARG_SECOND,
            env: ENV_SECOND,
        })?;
        Ok(Self {
            first,
            second,
            engine_config: args.engine_config,
            cache: args.cache,
        })
    }
}

/// JSON printed by the `score` command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreReport {
    pub(crate) first: PartyId,
    pub(crate) second: PartyId,
    pub(crate) result: CompatibilityResult,
}

pub(crate) fn run_score_with(
    args: ScoreArgs,
    builder: &dyn EngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_score(args, builder)?;
    write_json(writer, &report)
}

fn execute_score(args: ScoreArgs, builder: &dyn EngineBuilder) -> Result<ScoreReport, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let first: Candidate = load_document(&config.first, ARG_FIRST)?;
    let second: Candidate = load_document(&config.second, ARG_SECOND)?;
    let engine = builder.build(config.engine_config.as_deref())?;

    let result = match &config.cache {
        Some(path) => {
            let mut cache = ResultCache::load(path, ConfigFingerprint::of(engine.config())?)?;
            let result = cache.get_or_compute(
                &engine,
                (&first.id, &first.profile),
                (&second.id, &second.profile),
            )?;
            cache.write(path)?;
            result
        }
        None => engine.score(&first.profile, &second.profile)?,
    };
    log::info!(
        "scored {} against {}: {} ({})",
        first.id,
        second.id,
        result.overall_score(),
        result.tier()
    );
    Ok(ScoreReport {
        first: first.id,
        second: second.id,
        result,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScoreConfig, CliError> {
    let merged = ScoreArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScoreConfig::try_from(merged)
}
