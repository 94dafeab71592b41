//! Score the compatibility of two parties.
//!
//! The `CompatibilityScorer` trait turns two [`PartyProfile`]s into a
//! [`CompatibilityResult`].

use crate::{CompatibilityError, CompatibilityResult, PartyProfile};

/// Calculate a compatibility result for a pair of parties.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so callers can score
/// candidate pools across threads, and must be pure: the same inputs always
/// yield an identical result.
///
/// Implementations must:
/// - Return [`CompatibilityError::InvalidProfile`] when a structural field is
///   missing from either party, and for nothing else.
/// - Be symmetric: `score(a, b)` and `score(b, a)` agree.
/// - Keep every score within `0..=100`.
///
/// Use [`CompatibilityScorer::sanitise`] to map raw averages onto that range.
///
/// # Examples
///
/// ```rust
/// use kindred_core::{
///     CompatibilityError, CompatibilityResult, CompatibilityScorer, Exclusion, Identity,
///     PartyProfile, Structure,
/// };
///
/// struct NeverScorer;
///
/// impl CompatibilityScorer for NeverScorer {
///     fn score(
///         &self,
///         _a: &PartyProfile,
///         _b: &PartyProfile,
///     ) -> Result<CompatibilityResult, CompatibilityError> {
///         Ok(CompatibilityResult::excluded(Exclusion::MutualInterest))
///     }
/// }
///
/// let party = PartyProfile::new(Identity::Single, [Identity::Single], Structure::Open);
/// let result = NeverScorer.score(&party, &party).unwrap();
/// assert!(result.is_excluded());
/// ```
pub trait CompatibilityScorer: Send + Sync {
    /// Score `a` against `b`.
    ///
    /// # Errors
    /// Returns [`CompatibilityError::InvalidProfile`] naming the first missing
    /// structural field.
    fn score(
        &self,
        a: &PartyProfile,
        b: &PartyProfile,
    ) -> Result<CompatibilityResult, CompatibilityError>;

    /// Round and clamp a raw score into `0..=100`.
    ///
    /// Returns `0` for non-finite values.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the value is rounded and clamped into 0..=100 before the cast"
    )]
    fn sanitise(score: f64) -> u8
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0;
        }
        score.round().clamp(0.0, 100.0) as u8
    }
}
