//! Compatibility results, tiers, and the per-category breakdown.
//!
//! A [`CompatibilityResult`] is a pure derived value: scorers build a fresh one
//! for every call and nothing mutates it afterwards. Callers persist or
//! display it verbatim.

use crate::Category;

/// Ordered compatibility bucket derived from the overall score.
///
/// # Examples
/// ```
/// use kindred_core::{Bucket, Tier};
///
/// assert!(Tier::Gold > Tier::Silver);
/// assert_eq!(Tier::Gold.bucket(), Some(Bucket::High));
/// assert_eq!(Tier::Excluded.bucket(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Tier {
    /// A hard filter failed or the score is zero.
    Excluded,
    /// Lowest passing tier.
    Bronze,
    /// Middle tier.
    Silver,
    /// Strong match.
    Gold,
    /// Exceptional match.
    Platinum,
}

impl Tier {
    /// Return the tier as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excluded => "excluded",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    /// Project onto the coarse three-bucket view.
    ///
    /// Platinum and Gold are high, Silver is medium, Bronze is low. Excluded
    /// matches have no bucket.
    #[must_use]
    pub const fn bucket(self) -> Option<Bucket> {
        match self {
            Self::Excluded => None,
            Self::Bronze => Some(Bucket::Low),
            Self::Silver => Some(Bucket::Medium),
            Self::Gold | Self::Platinum => Some(Bucket::High),
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "excluded" => Ok(Self::Excluded),
            "bronze" => Ok(Self::Bronze),
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "platinum" => Ok(Self::Platinum),
            _ => Err(format!("unknown tier '{s}'")),
        }
    }
}

impl TryFrom<String> for Tier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Tier> for &'static str {
    fn from(tier: Tier) -> Self {
        tier.as_str()
    }
}

/// Coarse three-level view of a [`Tier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Bucket {
    /// Bronze.
    Low,
    /// Silver.
    Medium,
    /// Gold or Platinum.
    High,
}

/// Which hard filter excluded a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Exclusion {
    /// At least one party is not seeking the other's identity.
    MutualInterest,
    /// The structure table marks the pair as incompatible.
    IncompatibleStructures,
}

/// Score for one category of a compatibility result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryScore {
    /// Which category this is.
    pub category: Category,
    /// Display label for the category.
    pub label: String,
    /// Score in `0..=100`. Excluded categories report the neutral score.
    pub score: u8,
    /// Configured weight.
    pub weight: f64,
    /// Share of the overall score after renormalisation; zero when excluded.
    pub effective_weight: f64,
    /// Whether the category contributed to the overall score.
    pub included: bool,
}

/// Non-scoring facts about a pair that passed the hard filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchContext {
    /// Distance between the parties in whole kilometres, when known.
    pub distance_km: Option<u32>,
    /// Both parties have passed identity verification.
    pub both_verified: bool,
}

/// Outcome of scoring two parties.
///
/// # Examples
/// ```
/// use kindred_core::{CompatibilityResult, Exclusion, Tier};
///
/// let result = CompatibilityResult::excluded(Exclusion::MutualInterest);
/// assert_eq!(result.tier(), Tier::Excluded);
/// assert_eq!(result.overall_score(), 0);
/// assert!(result.categories().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompatibilityResult {
    overall_score: u8,
    tier: Tier,
    categories: Vec<CategoryScore>,
    exclusion: Option<Exclusion>,
    context: Option<MatchContext>,
}

impl CompatibilityResult {
    /// Build the result for a pair rejected by a hard filter.
    #[must_use]
    pub const fn excluded(reason: Exclusion) -> Self {
        Self {
            overall_score: 0,
            tier: Tier::Excluded,
            categories: Vec::new(),
            exclusion: Some(reason),
            context: None,
        }
    }

    /// Build the result for a pair that passed the hard filters.
    ///
    /// The overall score is clamped into `0..=100`.
    #[must_use]
    pub fn scored(
        overall_score: u8,
        tier: Tier,
        categories: Vec<CategoryScore>,
        context: MatchContext,
    ) -> Self {
        Self {
            overall_score: overall_score.min(100),
            tier,
            categories,
            exclusion: None,
            context: Some(context),
        }
    }

    /// Overall score in `0..=100`.
    #[must_use]
    pub const fn overall_score(&self) -> u8 {
        self.overall_score
    }

    /// Tier derived from the overall score.
    #[must_use]
    pub const fn tier(&self) -> Tier {
        self.tier
    }

    /// Per-category breakdown in [`Category::ALL`] order; empty when excluded.
    #[must_use]
    pub fn categories(&self) -> &[CategoryScore] {
        &self.categories
    }

    /// Look up one category's score.
    #[must_use]
    pub fn category(&self, category: Category) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// The hard filter that excluded the pair, if any.
    #[must_use]
    pub const fn exclusion(&self) -> Option<Exclusion> {
        self.exclusion
    }

    /// Distance and verification facts; absent when excluded.
    #[must_use]
    pub const fn context(&self) -> Option<MatchContext> {
        self.context
    }

    /// Report whether a hard filter excluded the pair.
    #[must_use]
    pub const fn is_excluded(&self) -> bool {
        self.exclusion.is_some()
    }
}
