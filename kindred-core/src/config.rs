//! Immutable configuration for compatibility scoring.
//!
//! Category weights, tier thresholds, the structure compatibility table and
//! the neutral score for unknown answers all live in one
//! [`CompatibilityConfig`] value so tests can override any of them and every
//! product decision is visible in one place.
//!
//! # Examples
//! ```
//! use kindred_core::{CompatibilityConfig, Tier};
//!
//! let config = CompatibilityConfig::default().validate()?;
//! assert_eq!(config.tiers.tier_for(85), Tier::Platinum);
//! assert_eq!(config.tiers.tier_for(84), Tier::Gold);
//! # Ok::<(), kindred_core::ConfigError>(())
//! ```

use thiserror::Error;

use crate::{Category, Structure, StructureTable, Tier};

/// Tolerance when checking that category weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Default category weights.
pub const DEFAULT_CATEGORY_WEIGHTS: CategoryWeights = CategoryWeights {
    goals: 0.25,
    structure: 0.25,
    boundaries: 0.20,
    openness: 0.15,
    chemistry: 0.15,
};

/// Default tier thresholds.
pub const DEFAULT_TIER_THRESHOLDS: TierThresholds = TierThresholds {
    platinum: 85,
    gold: 70,
    silver: 50,
    bronze: 1,
};

/// Score given to an item when only one party answered it.
pub const DEFAULT_NEUTRAL_SCORE: u8 = 50;

/// Errors raised while validating a [`CompatibilityConfig`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A category weight was not finite or not strictly positive.
    #[error("weight {value} for category `{category}` must be finite and positive")]
    InvalidWeight {
        /// Offending category.
        category: Category,
        /// Configured weight.
        value: f64,
    },
    /// Category weights did not add up to one.
    #[error("category weights must sum to 1.0, found {total}")]
    WeightsDoNotSumToOne {
        /// Sum of configured weights.
        total: f64,
    },
    /// A tier threshold was zero or above 100.
    #[error("threshold {value} for tier `{tier}` must lie in 1..=100")]
    ThresholdOutOfRange {
        /// Offending tier.
        tier: Tier,
        /// Configured threshold.
        value: u8,
    },
    /// Tier thresholds were not strictly ascending from bronze to platinum.
    #[error("threshold for `{higher}` must exceed threshold for `{lower}`")]
    ThresholdsOutOfOrder {
        /// The lower tier.
        lower: Tier,
        /// The higher tier.
        higher: Tier,
    },
    /// The neutral score was above 100.
    #[error("neutral score {score} must lie in 0..=100")]
    NeutralScoreOutOfRange {
        /// Configured neutral score.
        score: u8,
    },
    /// A structure pair had no entry in the table.
    #[error("structure table has no entry for `{first}` with `{second}`")]
    MissingStructurePair {
        /// One side of the pair.
        first: Structure,
        /// The other side of the pair.
        second: Structure,
    },
    /// A structure pair was listed more than once.
    #[error("structure table lists `{first}` with `{second}` more than once")]
    DuplicateStructurePair {
        /// One side of the pair.
        first: Structure,
        /// The other side of the pair.
        second: Structure,
    },
    /// A graded structure fit was above 100.
    #[error("structure fit {score} for `{first}` with `{second}` must lie in 0..=100")]
    StructureFitOutOfRange {
        /// One side of the pair.
        first: Structure,
        /// The other side of the pair.
        second: Structure,
        /// Configured score.
        score: u8,
    },
}

/// Relative importance of each category in the overall score.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CategoryWeights {
    /// Weight of [`Category::Goals`].
    pub goals: f64,
    /// Weight of [`Category::StructureFit`].
    pub structure: f64,
    /// Weight of [`Category::Boundaries`].
    pub boundaries: f64,
    /// Weight of [`Category::Openness`].
    pub openness: f64,
    /// Weight of [`Category::Chemistry`].
    pub chemistry: f64,
}

impl CategoryWeights {
    /// Weight configured for `category`.
    #[must_use]
    pub const fn weight(&self, category: Category) -> f64 {
        match category {
            Category::Goals => self.goals,
            Category::StructureFit => self.structure,
            Category::Boundaries => self.boundaries,
            Category::Openness => self.openness,
            Category::Chemistry => self.chemistry,
        }
    }

    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidWeight`] for a non-finite or non-positive
    /// weight and [`ConfigError::WeightsDoNotSumToOne`] when the total drifts
    /// from one.
    #[expect(
        clippy::float_arithmetic,
        reason = "validation sums weights and compares against one"
    )]
    pub fn validate(self) -> Result<Self, ConfigError> {
        let mut total = 0.0_f64;
        for category in Category::ALL {
            let value = self.weight(category);
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidWeight { category, value });
            }
            total += value;
        }
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSumToOne { total });
        }
        Ok(self)
    }
}

impl Default for CategoryWeights {
    fn default() -> Self {
        DEFAULT_CATEGORY_WEIGHTS
    }
}

/// Minimum overall score for each passing tier.
///
/// A score below `bronze` maps to [`Tier::Excluded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TierThresholds {
    /// Minimum score for [`Tier::Platinum`].
    pub platinum: u8,
    /// Minimum score for [`Tier::Gold`].
    pub gold: u8,
    /// Minimum score for [`Tier::Silver`].
    pub silver: u8,
    /// Minimum score for [`Tier::Bronze`].
    pub bronze: u8,
}

impl TierThresholds {
    /// Thresholds from the highest tier to the lowest.
    #[must_use]
    pub const fn ladder(&self) -> [(Tier, u8); 4] {
        [
            (Tier::Platinum, self.platinum),
            (Tier::Gold, self.gold),
            (Tier::Silver, self.silver),
            (Tier::Bronze, self.bronze),
        ]
    }

    /// Map an overall score onto a tier. The first threshold met wins.
    #[must_use]
    pub fn tier_for(&self, score: u8) -> Tier {
        self.ladder()
            .into_iter()
            .find(|&(_, minimum)| score >= minimum)
            .map_or(Tier::Excluded, |(tier, _)| tier)
    }

    /// Validate the thresholds and return a copy.
    ///
    /// # Errors
    /// Returns [`ConfigError::ThresholdOutOfRange`] for a threshold outside
    /// `1..=100` and [`ConfigError::ThresholdsOutOfOrder`] when a higher tier
    /// does not require a strictly higher score.
    pub fn validate(self) -> Result<Self, ConfigError> {
        let ladder = self.ladder();
        for (tier, value) in ladder {
            if !(1..=100).contains(&value) {
                return Err(ConfigError::ThresholdOutOfRange { tier, value });
            }
        }
        for pair in ladder.windows(2) {
            if let [(higher, high), (lower, low)] = pair
                && high <= low
            {
                return Err(ConfigError::ThresholdsOutOfOrder {
                    lower: *lower,
                    higher: *higher,
                });
            }
        }
        Ok(self)
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        DEFAULT_TIER_THRESHOLDS
    }
}

/// Everything that shapes a compatibility score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CompatibilityConfig {
    /// Category weights.
    pub weights: CategoryWeights,
    /// Tier thresholds.
    pub tiers: TierThresholds,
    /// Structure compatibility table.
    pub structures: StructureTable,
    /// Item score used when only one party answered.
    pub neutral_score: u8,
}

impl CompatibilityConfig {
    /// Validate every part of the configuration and return it.
    ///
    /// # Errors
    /// Propagates [`CategoryWeights::validate`] and
    /// [`TierThresholds::validate`] failures and returns
    /// [`ConfigError::NeutralScoreOutOfRange`] for a neutral score above 100.
    pub fn validate(self) -> Result<Self, ConfigError> {
        self.weights.validate()?;
        self.tiers.validate()?;
        if self.neutral_score > 100 {
            return Err(ConfigError::NeutralScoreOutOfRange {
                score: self.neutral_score,
            });
        }
        Ok(self)
    }

    /// Replace the weights while returning `self` for chaining.
    #[must_use]
    pub const fn with_weights(mut self, weights: CategoryWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Replace the tier thresholds while returning `self` for chaining.
    #[must_use]
    pub const fn with_tiers(mut self, tiers: TierThresholds) -> Self {
        self.tiers = tiers;
        self
    }

    /// Replace the structure table while returning `self` for chaining.
    #[must_use]
    pub fn with_structures(mut self, structures: StructureTable) -> Self {
        self.structures = structures;
        self
    }

    /// Replace the neutral score while returning `self` for chaining.
    #[must_use]
    pub const fn with_neutral_score(mut self, score: u8) -> Self {
        self.neutral_score = score;
        self
    }
}

impl Default for CompatibilityConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_CATEGORY_WEIGHTS,
            tiers: DEFAULT_TIER_THRESHOLDS,
            structures: StructureTable::default(),
            neutral_score: DEFAULT_NEUTRAL_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn defaults_validate() {
        assert!(CompatibilityConfig::default().validate().is_ok());
    }

    #[rstest]
    #[case(100, Tier::Platinum)]
    #[case(85, Tier::Platinum)]
    #[case(84, Tier::Gold)]
    #[case(70, Tier::Gold)]
    #[case(69, Tier::Silver)]
    #[case(50, Tier::Silver)]
    #[case(49, Tier::Bronze)]
    #[case(1, Tier::Bronze)]
    #[case(0, Tier::Excluded)]
    fn default_thresholds_are_exact(#[case] score: u8, #[case] expected: Tier) {
        assert_eq!(DEFAULT_TIER_THRESHOLDS.tier_for(score), expected);
    }

    #[rstest]
    fn weights_reject_non_positive_values() {
        let weights = CategoryWeights {
            openness: 0.0,
            chemistry: 0.30,
            ..DEFAULT_CATEGORY_WEIGHTS
        };
        let err = weights.validate().expect_err("zero weight should be invalid");
        assert!(matches!(
            err,
            ConfigError::InvalidWeight {
                category: Category::Openness,
                ..
            }
        ));
    }

    #[rstest]
    fn weights_reject_non_finite_values() {
        let weights = CategoryWeights {
            goals: f64::NAN,
            ..DEFAULT_CATEGORY_WEIGHTS
        };
        assert!(weights.validate().is_err());
    }

    #[rstest]
    fn weights_must_sum_to_one() {
        let weights = CategoryWeights {
            goals: 0.5,
            ..DEFAULT_CATEGORY_WEIGHTS
        };
        let err = weights.validate().expect_err("sum above one should be invalid");
        assert!(matches!(err, ConfigError::WeightsDoNotSumToOne { .. }));
    }

    #[rstest]
    fn thresholds_must_ascend() {
        let tiers = TierThresholds {
            gold: 50,
            ..DEFAULT_TIER_THRESHOLDS
        };
        let err = tiers.validate().expect_err("gold equal to silver is invalid");
        assert_eq!(
            err,
            ConfigError::ThresholdsOutOfOrder {
                lower: Tier::Silver,
                higher: Tier::Gold,
            }
        );
    }

    #[rstest]
    #[case(TierThresholds { bronze: 0, ..DEFAULT_TIER_THRESHOLDS }, Tier::Bronze)]
    #[case(TierThresholds { platinum: 101, ..DEFAULT_TIER_THRESHOLDS }, Tier::Platinum)]
    fn thresholds_must_stay_in_range(#[case] tiers: TierThresholds, #[case] tier: Tier) {
        let err = tiers.validate().expect_err("out of range threshold");
        assert!(matches!(err, ConfigError::ThresholdOutOfRange { tier: t, .. } if t == tier));
    }

    #[rstest]
    fn neutral_score_must_stay_in_range() {
        let err = CompatibilityConfig::default()
            .with_neutral_score(101)
            .validate()
            .expect_err("neutral above 100");
        assert_eq!(err, ConfigError::NeutralScoreOutOfRange { score: 101 });
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn partial_json_overrides_fill_in_defaults() {
        let config: CompatibilityConfig =
            serde_json::from_str(r#"{"tiers":{"platinum":90},"neutral_score":40}"#)
                .expect("parse partial config");
        assert_eq!(config.tiers.platinum, 90);
        assert_eq!(config.tiers.gold, DEFAULT_TIER_THRESHOLDS.gold);
        assert_eq!(config.neutral_score, 40);
        assert_eq!(config.weights, DEFAULT_CATEGORY_WEIGHTS);
        assert_eq!(config.structures, StructureTable::default());
    }
}
