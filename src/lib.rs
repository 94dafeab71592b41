//! Facade crate for the Kindred compatibility engine.
//!
//! This crate re-exports the core domain types and exposes the scoring engine,
//! pool ranking, and result cache behind the `scorer` feature.

#![forbid(unsafe_code)]

pub use kindred_core::{
    Answer, Bucket, Category, CategoryScore, CategoryWeights, CompatibilityConfig,
    CompatibilityError, CompatibilityResult, CompatibilityScorer, ConfigError, DiscretionLevel,
    Exclusion, Identity, Intent, Location, MatchContext, PartyId, PartyProfile, PartySide,
    RequiredField, Structure, StructureFit, StructureTable, SurveyAnswers, Tier, TierThresholds,
    Verification,
};

#[cfg(feature = "scorer")]
pub use kindred_scorer::{
    Candidate, CompatibilityEngine, ConfigFingerprint, PairKey, PoolOptions, PoolRanking,
    ProfileFingerprint, RankedMatch, RejectedCandidate, ResultCache, ResultCacheError,
    compute_compatibility, rank_candidates, rank_candidates_cached,
};
