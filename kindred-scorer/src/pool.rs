//! Rank a candidate pool against one seeker.
//!
//! Candidates are scored in parallel with `rayon`; the final order depends
//! only on scores and party ids, never on thread scheduling.
#![forbid(unsafe_code)]

use kindred_core::{
    CompatibilityError, CompatibilityResult, CompatibilityScorer, PartyId, PartyProfile,
    PartySide, RequiredField, Tier,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cache::{PairKey, ProfileFingerprint, ResultCache};
use crate::error::ResultCacheError;

/// A party in a candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Stable identifier.
    pub id: PartyId,
    /// The party's profile.
    pub profile: PartyProfile,
}

impl Candidate {
    /// Pair an id with a profile.
    #[must_use]
    pub fn new(id: impl Into<PartyId>, profile: PartyProfile) -> Self {
        Self {
            id: id.into(),
            profile,
        }
    }
}

/// Filters applied after scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolOptions {
    /// Drop matches further away than this; unknown distances are kept.
    pub max_distance_km: Option<u32>,
    /// Drop matches below this tier.
    pub min_tier: Tier,
    /// Keep at most this many matches.
    pub limit: Option<usize>,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_distance_km: None,
            min_tier: Tier::Bronze,
            limit: None,
        }
    }
}

impl PoolOptions {
    /// Set the distance cap while returning `self` for chaining.
    #[must_use]
    pub const fn with_max_distance_km(mut self, km: u32) -> Self {
        self.max_distance_km = Some(km);
        self
    }

    /// Set the minimum tier while returning `self` for chaining.
    ///
    /// [`Tier::Excluded`] is raised to [`Tier::Bronze`]: excluded pairs are
    /// never ranked.
    #[must_use]
    pub fn with_min_tier(mut self, tier: Tier) -> Self {
        self.min_tier = tier.max(Tier::Bronze);
        self
    }

    /// Set the result limit while returning `self` for chaining.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn admits(&self, result: &CompatibilityResult) -> bool {
        if result.is_excluded() || result.tier() < self.min_tier.max(Tier::Bronze) {
            return false;
        }
        match (self.max_distance_km, result.context().and_then(|c| c.distance_km)) {
            (Some(cap), Some(distance)) => distance <= cap,
            _ => true,
        }
    }
}

/// A scored candidate that survived the pool filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    /// The candidate's id.
    pub party_id: PartyId,
    /// The candidate's result against the seeker.
    pub result: CompatibilityResult,
}

/// A candidate whose profile could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    /// The candidate's id.
    pub party_id: PartyId,
    /// The structural field the candidate is missing.
    pub field: RequiredField,
}

/// Outcome of ranking a pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PoolRanking {
    /// Matches by descending score, ties broken by ascending party id.
    pub matches: Vec<RankedMatch>,
    /// Candidates with incomplete profiles, by ascending party id.
    pub rejected: Vec<RejectedCandidate>,
    /// Scored candidates dropped by a hard filter or by [`PoolOptions`],
    /// including those cut by the limit.
    pub filtered: usize,
}

/// Score every candidate against `seeker` and rank the survivors.
///
/// # Errors
/// Returns [`CompatibilityError::InvalidProfile`] for side A when the
/// seeker's own profile is incomplete. Incomplete candidates are reported in
/// [`PoolRanking::rejected`] instead.
///
/// # Examples
/// ```
/// use kindred_core::{Identity, PartyProfile, Structure};
/// use kindred_scorer::{Candidate, CompatibilityEngine, PoolOptions, rank_candidates};
///
/// let seeker = PartyProfile::new(Identity::Single, [Identity::Couple], Structure::Open);
/// let pool = vec![
///     Candidate::new("c-2", PartyProfile::new(Identity::Couple, [Identity::Single], Structure::Enm)),
///     Candidate::new("c-1", PartyProfile::new(Identity::Couple, [Identity::Single], Structure::Open)),
/// ];
///
/// let ranking = rank_candidates(
///     &CompatibilityEngine::default(),
///     &seeker,
///     &pool,
///     &PoolOptions::default(),
/// )
/// .expect("seeker is complete");
/// assert_eq!(ranking.matches[0].party_id.as_str(), "c-1");
/// ```
pub fn rank_candidates<S>(
    scorer: &S,
    seeker: &PartyProfile,
    pool: &[Candidate],
    options: &PoolOptions,
) -> Result<PoolRanking, CompatibilityError>
where
    S: CompatibilityScorer + ?Sized,
{
    ensure_seeker(seeker)?;
    let outcomes: Vec<_> = pool
        .par_iter()
        .map(|candidate| scorer.score(seeker, &candidate.profile))
        .collect();
    Ok(finish(pool, outcomes, options))
}

/// Rank a pool like [`rank_candidates`], reusing and filling `cache`.
///
/// # Errors
/// Returns [`ResultCacheError::Score`] when the seeker is incomplete and
/// [`ResultCacheError::Fingerprint`] when a profile cannot be fingerprinted.
pub fn rank_candidates_cached<S>(
    scorer: &S,
    cache: &mut ResultCache,
    seeker: &Candidate,
    pool: &[Candidate],
    options: &PoolOptions,
) -> Result<PoolRanking, ResultCacheError>
where
    S: CompatibilityScorer + ?Sized,
{
    ensure_seeker(&seeker.profile)?;
    let seeker_print = ProfileFingerprint::of(&seeker.profile)?;
    let keys = pool
        .par_iter()
        .map(|candidate| {
            let print = ProfileFingerprint::of(&candidate.profile)?;
            Ok(PairKey::new(
                (seeker.id.clone(), seeker_print),
                (candidate.id.clone(), print),
            ))
        })
        .collect::<Result<Vec<_>, ResultCacheError>>()?;

    let shared: &ResultCache = cache;
    let scored: Vec<(Result<CompatibilityResult, CompatibilityError>, bool)> = pool
        .par_iter()
        .zip(keys.par_iter())
        .map(|(candidate, key)| match shared.get(key) {
            Some(hit) => (Ok(hit.clone()), false),
            None => (scorer.score(&seeker.profile, &candidate.profile), true),
        })
        .collect();

    let mut fresh = 0_usize;
    let mut outcomes = Vec::with_capacity(scored.len());
    for (key, (outcome, is_fresh)) in keys.into_iter().zip(scored) {
        if is_fresh && let Ok(result) = &outcome {
            cache.insert(key, result.clone());
            fresh += 1;
        }
        outcomes.push(outcome);
    }
    log::debug!(
        "scored {fresh} of {} candidates; the rest came from the cache",
        pool.len()
    );
    Ok(finish(pool, outcomes, options))
}

fn ensure_seeker(seeker: &PartyProfile) -> Result<(), CompatibilityError> {
    seeker
        .structural()
        .map(|_| ())
        .map_err(|field| CompatibilityError::InvalidProfile {
            side: PartySide::A,
            field,
        })
}

fn finish(
    pool: &[Candidate],
    outcomes: Vec<Result<CompatibilityResult, CompatibilityError>>,
    options: &PoolOptions,
) -> PoolRanking {
    let mut ranking = PoolRanking::default();
    for (candidate, outcome) in pool.iter().zip(outcomes) {
        match outcome {
            Ok(result) if options.admits(&result) => ranking.matches.push(RankedMatch {
                party_id: candidate.id.clone(),
                result,
            }),
            Ok(_) => ranking.filtered += 1,
            Err(CompatibilityError::InvalidProfile { field, .. }) => {
                ranking.rejected.push(RejectedCandidate {
                    party_id: candidate.id.clone(),
                    field,
                });
            }
        }
    }

    ranking.matches.sort_by(|left, right| {
        right
            .result
            .overall_score()
            .cmp(&left.result.overall_score())
            .then_with(|| left.party_id.cmp(&right.party_id))
    });
    ranking
        .rejected
        .sort_by(|left, right| left.party_id.cmp(&right.party_id));
    if let Some(limit) = options.limit
        && ranking.matches.len() > limit
    {
        ranking.filtered += ranking.matches.len() - limit;
        ranking.matches.truncate(limit);
    }
    ranking
}
