//! Errors raised by compatibility scorers.

use thiserror::Error;

/// Which side of a scored pair an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum PartySide {
    /// The first argument of the scoring call.
    A,
    /// The second argument of the scoring call.
    B,
}

impl std::fmt::Display for PartySide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::A => "party A",
            Self::B => "party B",
        })
    }
}

/// Structural profile fields a scorer cannot proceed without.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum RequiredField {
    /// [`PartyProfile::identity`](crate::PartyProfile::identity).
    Identity,
    /// [`PartyProfile::seeking_targets`](crate::PartyProfile::seeking_targets).
    SeekingTargets,
    /// [`PartyProfile::structure`](crate::PartyProfile::structure).
    Structure,
}

impl RequiredField {
    /// Field name as it appears in serialised profiles.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::SeekingTargets => "seeking_targets",
            Self::Structure => "structure",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by [`CompatibilityScorer::score`](crate::CompatibilityScorer::score).
///
/// Missing survey answers are never errors; only the structural fields named
/// by [`RequiredField`] are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompatibilityError {
    /// A profile lacks a field required to evaluate the hard filters.
    #[error("{side} profile is missing required field `{field}`")]
    InvalidProfile {
        /// Which argument was incomplete.
        side: PartySide,
        /// The missing field.
        field: RequiredField,
    },
}
