//! `rank` command: rank a candidate pool for one seeker.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use kindred_core::Tier;
use kindred_scorer::{
    Candidate, ConfigFingerprint, PoolOptions, PoolRanking, ResultCache, rank_candidates,
    rank_candidates_cached,
};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_CACHE, ARG_ENGINE_CONFIG, ARG_LIMIT, ARG_MAX_DISTANCE_KM, ARG_MIN_TIER, ARG_POOL,
    ARG_SEEKER, CliError, ENV_POOL, ENV_SEEKER, EngineBuilder, load_document, require_existing,
    write_json,
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "rank",
    about = "Rank a candidate pool for one seeker",
    long_about = "Score a seeker against every candidate in a pool and print \
                  the surviving matches by descending score. The seeker is a \
                  party document; the pool is a JSON array of party \
                  documents. Candidates with incomplete profiles are listed \
                  separately instead of failing the run."
)]
#[ortho_config(prefix = "KINDRED")]
pub(crate) struct RankArgs {
    /// Path to the seeker's party document.
    #[arg(value_name = "seeker")]
    #[serde(default)]
    pub(crate) seeker: Option<Utf8PathBuf>,
    /// Path to a JSON array of candidate party documents.
    #[arg(value_name = "pool")]
    #[serde(default)]
    pub(crate) pool: Option<Utf8PathBuf>,
    /// JSON engine configuration overriding weights, tiers, and structures.
    #[arg(long = ARG_ENGINE_CONFIG, value_name = "path")]
    #[serde(default)]
    pub(crate) engine_config: Option<Utf8PathBuf>,
    /// Drop matches further away than this many kilometres.
    #[arg(long = ARG_MAX_DISTANCE_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance_km: Option<u32>,
    /// Drop matches below this tier (bronze, silver, gold, platinum).
    #[arg(long = ARG_MIN_TIER, value_name = "tier")]
    #[serde(default)]
    pub(crate) min_tier: Option<Tier>,
    /// Keep at most this many matches.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Result cache file to reuse and update.
    #[arg(long = ARG_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) seeker: Utf8PathBuf,
    pub(crate) pool: Utf8PathBuf,
    pub(crate) engine_config: Option<Utf8PathBuf>,
    pub(crate) options: PoolOptions,
    pub(crate) cache: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.seeker, ARG_SEEKER)?;
        require_existing(&self.pool, ARG_POOL)?;
        if let Some(path) = &self.engine_config {
            require_existing(path, ARG_ENGINE_CONFIG)?;
        }
        Ok(())
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let seeker = args.seeker.ok_or(CliError::MissingArgument {
            field: ARG_SEEKER,
            env: ENV_SEEKER,
        })?;
        let pool = args.pool.ok_or(CliError::MissingArgument {
            field: ARG_POOL,
            env: ENV_POOL,
        })?;

        let mut options = PoolOptions::default();
        if let Some(km) = args.max_distance_km {
            options = options.with_max_distance_km(km);
        }
        if let Some(tier) = args.min_tier {
            options = options.with_min_tier(tier);
        }
        if let Some(limit) = args.limit {
            options = options.with_limit(limit);
        }

        Ok(Self {
            seeker,
            pool,
            engine_config: args.engine_config,
            options,
            cache: args.cache,
        })
    }
}

pub(crate) fn run_rank_with(
    args: RankArgs,
    builder: &dyn EngineBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let ranking = execute_rank(args, builder)?;
    write_json(writer, &ranking)
}

fn execute_rank(args: RankArgs, builder: &dyn EngineBuilder) -> Result<PoolRanking, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let seeker: Candidate = load_document(&config.seeker, ARG_SEEKER)?;
    let pool: Vec<Candidate> = load_document(&config.pool, ARG_POOL)?;
    let engine = builder.build(config.engine_config.as_deref())?;

    let ranking = match &config.cache {
        Some(path) => {
            let mut cache = ResultCache::load(path, ConfigFingerprint::of(engine.config())?)?;
            let ranking =
                rank_candidates_cached(&engine, &mut cache, &seeker, &pool, &config.options)?;
            cache.write(path)?;
            ranking
        }
        None => rank_candidates(&engine, &seeker.profile, &pool, &config.options)?,
    };
    log::info!(
        "ranked {} candidates for {}: {} matched, {} filtered, {} rejected",
        pool.len(),
        seeker.id,
        ranking.matches.len(),
        ranking.filtered,
        ranking.rejected.len()
    );
    Ok(ranking)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
