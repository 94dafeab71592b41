//! Compatibility scoring for Kindred parties.
//!
//! The crate provides three layers over the domain types in `kindred-core`:
//! - **Pairwise scoring** with [`CompatibilityEngine`], which applies the
//!   mutual-interest and structure hard filters, scores each weighted
//!   category from survey answers, renormalises weights over the categories
//!   with data, and maps the overall score onto a tier. It implements
//!   [`CompatibilityScorer`](kindred_core::CompatibilityScorer).
//! - **Pool ranking** with [`rank_candidates`], which scores a seeker against
//!   many candidates in parallel and returns a deterministic ordering.
//! - **Result caching** with [`ResultCache`], which keys results by BLAKE3
//!   profile fingerprints, scopes them to one configuration, and persists
//!   them with `bincode`.
//!
//! # Examples
//!
//! ```
//! use kindred_core::{Identity, PartyProfile, Structure, Tier};
//! use kindred_scorer::compute_compatibility;
//!
//! let a = PartyProfile::new(Identity::Single, [Identity::Couple], Structure::Monogamous);
//! let b = PartyProfile::new(Identity::Couple, [Identity::Single], Structure::Polyamorous);
//!
//! let result = compute_compatibility(&a, &b).expect("complete profiles");
//! assert_eq!(result.tier(), Tier::Excluded);
//! ```

#![forbid(unsafe_code)]

use std::sync::LazyLock;

use kindred_core::{CompatibilityError, CompatibilityResult, CompatibilityScorer, PartyProfile};

mod cache;
mod categories;
mod engine;
mod error;
mod pool;
mod rules;

pub use cache::{ConfigFingerprint, PairKey, ProfileFingerprint, ResultCache};
pub use engine::CompatibilityEngine;
pub use error::ResultCacheError;
pub use pool::{
    Candidate, PoolOptions, PoolRanking, RankedMatch, RejectedCandidate, rank_candidates,
    rank_candidates_cached,
};

static DEFAULT_ENGINE: LazyLock<CompatibilityEngine> = LazyLock::new(CompatibilityEngine::default);

/// Bincode options used for result cache files.
pub(crate) fn bincode_options() -> impl bincode::Options {
    bincode::DefaultOptions::new()
}

/// Score two parties with the default configuration.
///
/// # Errors
/// Returns [`CompatibilityError::InvalidProfile`] naming the party and the
/// first structural field it is missing.
pub fn compute_compatibility(
    a: &PartyProfile,
    b: &PartyProfile,
) -> Result<CompatibilityResult, CompatibilityError> {
    DEFAULT_ENGINE.score(a, b)
}
