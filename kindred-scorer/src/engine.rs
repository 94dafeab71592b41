//! The weighted compatibility engine.
#![forbid(unsafe_code)]

use kindred_core::{
    Category, CategoryScore, CompatibilityConfig, CompatibilityError, CompatibilityResult,
    CompatibilityScorer, ConfigError, Exclusion, MatchContext, PartyProfile, PartySide,
    StructureFit, profile::StructuralView,
};

use crate::categories::survey_category;

/// Scores pairs of parties with a validated [`CompatibilityConfig`].
///
/// Scoring is pure: the engine holds no mutable state, so a single instance
/// can be shared across threads while ranking a candidate pool.
///
/// # Examples
/// ```
/// use kindred_core::{
///     CompatibilityConfig, CompatibilityScorer, Identity, PartyProfile, Structure, Tier,
/// };
/// use kindred_scorer::CompatibilityEngine;
///
/// let engine = CompatibilityEngine::new(CompatibilityConfig::default()).expect("valid config");
/// let alex = PartyProfile::new(Identity::Single, [Identity::Couple], Structure::Open);
/// let sam = PartyProfile::new(Identity::Couple, [Identity::Single], Structure::Open);
///
/// let result = engine.score(&alex, &sam).expect("complete profiles");
/// assert_eq!(result.tier(), Tier::Platinum);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompatibilityEngine {
    config: CompatibilityConfig,
}

impl CompatibilityEngine {
    /// Build an engine after validating `config`.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the weights, tier thresholds or neutral
    /// score are invalid.
    pub fn new(config: CompatibilityConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            config: config.validate()?,
        })
    }

    /// The configuration in force.
    #[must_use]
    pub const fn config(&self) -> &CompatibilityConfig {
        &self.config
    }

    fn category_scores(&self, a: &PartyProfile, b: &PartyProfile, fit: u8) -> Vec<CategoryScore> {
        let neutral = f64::from(self.config.neutral_score);
        let raw: Vec<(Category, Option<u8>)> = Category::ALL
            .into_iter()
            .map(|category| {
                let score = match category {
                    Category::StructureFit => Some(fit),
                    other => survey_category(other, a, b, neutral).map(Self::sanitise),
                };
                (category, score)
            })
            .collect();

        let included_weight = raw
            .iter()
            .filter(|(_, score)| score.is_some())
            .map(|(category, _)| self.config.weights.weight(*category))
            .sum::<f64>();

        raw.into_iter()
            .map(|(category, score)| {
                let weight = self.config.weights.weight(category);
                CategoryScore {
                    category,
                    label: category.label().to_owned(),
                    score: score.unwrap_or(self.config.neutral_score),
                    weight,
                    effective_weight: if score.is_some() {
                        share(weight, included_weight)
                    } else {
                        0.0
                    },
                    included: score.is_some(),
                }
            })
            .collect()
    }
}

impl CompatibilityScorer for CompatibilityEngine {
    fn score(
        &self,
        a: &PartyProfile,
        b: &PartyProfile,
    ) -> Result<CompatibilityResult, CompatibilityError> {
        let view_a = a.structural().map_err(|field| CompatibilityError::InvalidProfile {
            side: PartySide::A,
            field,
        })?;
        let view_b = b.structural().map_err(|field| CompatibilityError::InvalidProfile {
            side: PartySide::B,
            field,
        })?;

        let fit = match hard_filters(&view_a, &view_b, &self.config) {
            Ok(fit) => fit,
            Err(reason) => return Ok(CompatibilityResult::excluded(reason)),
        };

        let categories = self.category_scores(a, b, fit);
        let overall = Self::sanitise(weighted_mean(&categories));
        let tier = self.config.tiers.tier_for(overall);
        Ok(CompatibilityResult::scored(
            overall,
            tier,
            categories,
            match_context(a, b),
        ))
    }
}

/// Apply the mutual-interest and structure filters in that order.
///
/// Returns the graded structure fit when both pass.
fn hard_filters(
    a: &StructuralView<'_>,
    b: &StructuralView<'_>,
    config: &CompatibilityConfig,
) -> Result<u8, Exclusion> {
    let mutual =
        a.seeking_targets.contains(&b.identity) && b.seeking_targets.contains(&a.identity);
    if !mutual {
        return Err(Exclusion::MutualInterest);
    }
    match config.structures.fit(a.structure, b.structure) {
        StructureFit::Graded(score) => Ok(score.min(100)),
        StructureFit::Incompatible => Err(Exclusion::IncompatibleStructures),
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "weighted average over included categories"
)]
fn weighted_mean(categories: &[CategoryScore]) -> f64 {
    categories
        .iter()
        .filter(|category| category.included)
        .map(|category| f64::from(category.score) * category.effective_weight)
        .sum()
}

#[expect(clippy::float_arithmetic, reason = "renormalising weights")]
fn share(weight: f64, included_weight: f64) -> f64 {
    if included_weight > 0.0 {
        weight / included_weight
    } else {
        0.0
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "distances are rounded, finite, and non-negative before the cast"
)]
fn match_context(a: &PartyProfile, b: &PartyProfile) -> MatchContext {
    let distance_km = a
        .location
        .as_ref()
        .zip(b.location.as_ref())
        .and_then(|(left, right)| left.distance_km(right))
        .filter(|km| km.is_finite())
        .map(|km| km.round().clamp(0.0, f64::from(u32::MAX)) as u32);
    MatchContext {
        distance_km,
        both_verified: a.verification.identity_verified && b.verification.identity_verified,
    }
}
