//! Comparison rules for a single survey item.
//!
//! Every rule is symmetric in its two answers so that scoring `a` against
//! `b` and `b` against `a` produces identical values.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use kindred_core::{
    Answer,
    survey::{SCALE_MAX, SCALE_MIN},
};

const FULL_MARKS: f64 = 100.0;
const COMPLEMENTARY_ROLE: f64 = 100.0;
const SWITCH_WITH_OTHER_ROLE: f64 = 75.0;
const SAME_FIXED_ROLE: f64 = 25.0;

const DOMINANT: &str = "dominant";
const SUBMISSIVE: &str = "submissive";
const SWITCH: &str = "switch";

/// How two answers to the same item are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Rule {
    /// Linear distance on an ordinal scale: equal values score 100, the
    /// widest gap scores 0.
    Distance {
        /// Lowest value on the scale.
        min: u8,
        /// Highest value on the scale.
        max: u8,
    },
    /// Jaccard overlap between two sets of choices.
    Overlap,
    /// Identical answers score 100, anything else 0.
    Exact,
    /// Complementary role preferences.
    RoleFit,
}

/// Distance rule on the 1 to 10 survey scale.
pub(crate) const SURVEY_SCALE: Rule = Rule::Distance {
    min: SCALE_MIN,
    max: SCALE_MAX,
};

/// Score one item for a pair of (possibly missing) answers.
///
/// Returns `None` when neither party answered, `neutral` when only one did
/// or the answers cannot be compared, and the rule's score otherwise.
pub(crate) fn compare_item(
    rule: Rule,
    a: Option<&Answer>,
    b: Option<&Answer>,
    neutral: f64,
) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (Some(_), None) | (None, Some(_)) => Some(neutral),
        (Some(left), Some(right)) => Some(rule.apply(left, right).unwrap_or(neutral)),
    }
}

impl Rule {
    fn apply(self, a: &Answer, b: &Answer) -> Option<f64> {
        match (self, a, b) {
            (Self::Distance { min, max }, Answer::Scale(x), Answer::Scale(y)) => {
                Some(distance_score(*x, *y, min, max))
            }
            (Self::Overlap, Answer::Multi(x), Answer::Multi(y)) => Some(jaccard(x, y)),
            (Self::RoleFit, Answer::Single(x), Answer::Single(y)) => Some(role_fit(x, y)),
            (Self::Exact, Answer::Single(x), Answer::Single(y)) => {
                Some(all_or_nothing(x.trim().eq_ignore_ascii_case(y.trim())))
            }
            (Self::Exact, Answer::Scale(x), Answer::Scale(y)) => Some(all_or_nothing(x == y)),
            (Self::Exact, Answer::Toggle(x), Answer::Toggle(y)) => Some(all_or_nothing(x == y)),
            (Self::Exact, Answer::Multi(x), Answer::Multi(y)) => Some(all_or_nothing(x == y)),
            _ => None,
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "linear interpolation between full and zero marks"
)]
fn distance_score(x: u8, y: u8, min: u8, max: u8) -> f64 {
    if max <= min {
        return all_or_nothing(x == y);
    }
    let left = x.clamp(min, max);
    let right = y.clamp(min, max);
    let gap = f64::from(left.abs_diff(right));
    let span = f64::from(max - min);
    FULL_MARKS * (1.0 - gap / span)
}

#[expect(
    clippy::float_arithmetic,
    reason = "Jaccard similarity divides intersection by union"
)]
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return FULL_MARKS;
    }
    let shared = a.intersection(b).count();
    FULL_MARKS * ratio(shared, union)
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "set sizes are tiny so the conversion is exact"
)]
fn ratio(numerator: usize, denominator: usize) -> f64 {
    numerator as f64 / denominator as f64
}

fn role_fit(a: &str, b: &str) -> f64 {
    let left = a.trim().to_ascii_lowercase();
    let right = b.trim().to_ascii_lowercase();
    let known = |role: &str| matches!(role, DOMINANT | SUBMISSIVE | SWITCH);
    if !(known(&left) && known(&right)) {
        return all_or_nothing(left == right);
    }
    match (left.as_str(), right.as_str()) {
        (SWITCH, SWITCH) => FULL_MARKS,
        (SWITCH, _) | (_, SWITCH) => SWITCH_WITH_OTHER_ROLE,
        (x, y) if x == y => SAME_FIXED_ROLE,
        _ => COMPLEMENTARY_ROLE,
    }
}

const fn all_or_nothing(matched: bool) -> f64 {
    if matched { FULL_MARKS } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const NEUTRAL: f64 = 50.0;

    #[rstest]
    #[case(5, 5, 100.0)]
    #[case(1, 10, 0.0)]
    #[case(10, 1, 0.0)]
    #[case(4, 7, 66.666_666)]
    #[case(0, 1, 100.0)]
    #[case(12, 10, 100.0)]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn scale_distance_is_linear(#[case] x: u8, #[case] y: u8, #[case] expected: f64) {
        let score = compare_item(
            SURVEY_SCALE,
            Some(&Answer::Scale(x)),
            Some(&Answer::Scale(y)),
            NEUTRAL,
        )
        .expect("both answered");
        assert!((score - expected).abs() < 1e-4, "got {score}");
    }

    #[rstest]
    #[case(&["a", "b"], &["a", "b"], 100.0)]
    #[case(&["a", "b"], &["b", "c"], 33.333_333)]
    #[case(&["a"], &["b"], 0.0)]
    #[case(&[], &[], 100.0)]
    #[case(&["a"], &[], 0.0)]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn overlap_uses_jaccard(#[case] x: &[&str], #[case] y: &[&str], #[case] expected: f64) {
        let left = Answer::multi(x.iter().copied());
        let right = Answer::multi(y.iter().copied());
        let score = compare_item(Rule::Overlap, Some(&left), Some(&right), NEUTRAL)
            .expect("both answered");
        assert!((score - expected).abs() < 1e-4, "got {score}");
    }

    #[rstest]
    #[case("dominant", "submissive", 100.0)]
    #[case("switch", "switch", 100.0)]
    #[case("switch", "dominant", 75.0)]
    #[case("Submissive", "switch", 75.0)]
    #[case("dominant", "dominant", 25.0)]
    #[case("vanilla", "vanilla", 100.0)]
    #[case("vanilla", "switch", 0.0)]
    fn role_fit_rewards_complementary_roles(
        #[case] x: &str,
        #[case] y: &str,
        #[case] expected: f64,
    ) {
        assert_eq!(role_fit(x, y), expected);
        assert_eq!(role_fit(y, x), expected);
    }

    #[rstest]
    fn exact_match_ignores_case_and_padding() {
        let score = compare_item(
            Rule::Exact,
            Some(&Answer::single(" Months")),
            Some(&Answer::single("months")),
            NEUTRAL,
        );
        assert_eq!(score, Some(100.0));
    }

    #[rstest]
    fn missing_on_one_side_is_neutral() {
        let answer = Answer::scale(3);
        assert_eq!(
            compare_item(SURVEY_SCALE, Some(&answer), None, NEUTRAL),
            Some(NEUTRAL)
        );
        assert_eq!(
            compare_item(SURVEY_SCALE, None, Some(&answer), NEUTRAL),
            Some(NEUTRAL)
        );
    }

    #[rstest]
    fn missing_on_both_sides_is_skipped() {
        assert_eq!(compare_item(Rule::Overlap, None, None, NEUTRAL), None);
    }

    #[rstest]
    fn mismatched_answer_kinds_are_neutral() {
        let score = compare_item(
            SURVEY_SCALE,
            Some(&Answer::scale(3)),
            Some(&Answer::multi(["x"])),
            NEUTRAL,
        );
        assert_eq!(score, Some(NEUTRAL));
    }

    #[rstest]
    fn degenerate_scale_falls_back_to_equality() {
        assert_eq!(distance_score(2, 2, 3, 3), 100.0);
        assert_eq!(distance_score(2, 4, 3, 3), 0.0);
    }
}
