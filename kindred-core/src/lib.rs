//! Core domain types for the Kindred compatibility engine.
//!
//! The crate models the two sides of a prospective match ([`PartyProfile`]),
//! the immutable [`CompatibilityConfig`] that drives scoring, and the
//! [`CompatibilityResult`] every scorer produces. Scoring itself lives behind
//! the [`CompatibilityScorer`] trait so callers can swap implementations.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod category;
pub mod config;
pub mod error;
pub mod identity;
pub mod profile;
pub mod result;
pub mod scorer;
pub mod structure;
pub mod survey;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use category::Category;
pub use config::{CategoryWeights, CompatibilityConfig, ConfigError, TierThresholds};
pub use error::{CompatibilityError, PartySide, RequiredField};
pub use identity::{DiscretionLevel, Identity, Intent};
pub use profile::{Location, PartyId, PartyProfile, Verification};
pub use result::{Bucket, CategoryScore, CompatibilityResult, Exclusion, MatchContext, Tier};
pub use scorer::CompatibilityScorer;
pub use structure::{Structure, StructureFit, StructureTable};
pub use survey::{Answer, SurveyAnswers};

/// Lower-case a label and fold `_` and spaces into `-` for lenient parsing.
pub(crate) fn normalise_label(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}
