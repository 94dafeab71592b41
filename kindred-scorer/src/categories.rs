//! Survey items behind each weighted category.
//!
//! Structure Fit is scored from the structure table rather than from
//! survey items, so it has no entries here.
#![forbid(unsafe_code)]

use std::borrow::Cow;

use kindred_core::{Answer, Category, DiscretionLevel, Intent, PartyProfile, survey::questions};

use crate::rules::{Rule, SURVEY_SCALE, compare_item};

/// Where an item's answer is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Source {
    /// A keyed survey answer.
    Survey(&'static str),
    /// The profile's declared intent, compared as a set.
    Intent,
    /// The profile's discretion level, compared on its ordinal.
    Discretion,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Item {
    pub(crate) source: Source,
    pub(crate) rule: Rule,
}

const DISCRETION_SCALE: Rule = Rule::Distance {
    min: DiscretionLevel::Low.rank(),
    max: DiscretionLevel::High.rank(),
};

const GOALS: &[Item] = &[
    Item {
        source: Source::Intent,
        rule: Rule::Overlap,
    },
    Item {
        source: Source::Survey(questions::GOALS_TIMELINE),
        rule: Rule::Exact,
    },
    Item {
        source: Source::Survey(questions::GOALS_READINESS),
        rule: SURVEY_SCALE,
    },
];

const BOUNDARIES: &[Item] = &[
    Item {
        source: Source::Discretion,
        rule: DISCRETION_SCALE,
    },
    Item {
        source: Source::Survey(questions::BOUNDARIES_EXCLUSIVITY),
        rule: SURVEY_SCALE,
    },
    Item {
        source: Source::Survey(questions::BOUNDARIES_DISCRETION),
        rule: SURVEY_SCALE,
    },
    Item {
        source: Source::Survey(questions::BOUNDARIES_PACE),
        rule: SURVEY_SCALE,
    },
];

const OPENNESS: &[Item] = &[
    Item {
        source: Source::Survey(questions::OPENNESS_EXPLORATION),
        rule: SURVEY_SCALE,
    },
    Item {
        source: Source::Survey(questions::OPENNESS_VARIETY),
        rule: SURVEY_SCALE,
    },
    Item {
        source: Source::Survey(questions::OPENNESS_CURIOSITIES),
        rule: Rule::Overlap,
    },
];

const CHEMISTRY: &[Item] = &[
    Item {
        source: Source::Survey(questions::CHEMISTRY_STYLES),
        rule: Rule::Overlap,
    },
    Item {
        source: Source::Survey(questions::CHEMISTRY_FREQUENCY),
        rule: SURVEY_SCALE,
    },
    Item {
        source: Source::Survey(questions::CHEMISTRY_ROLE),
        rule: Rule::RoleFit,
    },
];

/// Items scored for `category`.
pub(crate) const fn items(category: Category) -> &'static [Item] {
    match category {
        Category::Goals => GOALS,
        Category::StructureFit => &[],
        Category::Boundaries => BOUNDARIES,
        Category::Openness => OPENNESS,
        Category::Chemistry => CHEMISTRY,
    }
}

fn answer_for(source: Source, profile: &PartyProfile) -> Option<Cow<'_, Answer>> {
    match source {
        Source::Survey(question) => profile.answers.get(question).map(Cow::Borrowed),
        Source::Intent if profile.intent.is_empty() => None,
        Source::Intent => Some(Cow::Owned(Answer::multi(
            profile.intent.iter().copied().map(Intent::as_str),
        ))),
        Source::Discretion => profile
            .discretion
            .map(|level| Cow::Owned(Answer::Scale(level.rank()))),
    }
}

/// Mean item score for a survey-driven category.
///
/// Returns `None` when neither party answered any of its items.
#[expect(
    clippy::float_arithmetic,
    reason = "category scores are the mean of item scores"
)]
pub(crate) fn survey_category(
    category: Category,
    a: &PartyProfile,
    b: &PartyProfile,
    neutral: f64,
) -> Option<f64> {
    let mut total = 0.0;
    let mut answered = 0.0;
    for item in items(category) {
        let left = answer_for(item.source, a);
        let right = answer_for(item.source, b);
        if let Some(score) = compare_item(item.rule, left.as_deref(), right.as_deref(), neutral) {
            total += score;
            answered += 1.0;
        }
    }
    (answered > 0.0).then(|| total / answered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kindred_core::test_support::{ALL_QUESTIONS, PartyProfileTestExt, enm_couple, enm_single};
    use rstest::rstest;

    const NEUTRAL: f64 = 50.0;

    #[rstest]
    fn every_survey_question_belongs_to_one_category() {
        for question in ALL_QUESTIONS {
            let owners = Category::ALL
                .into_iter()
                .filter(|category| {
                    items(*category)
                        .iter()
                        .any(|item| item.source == Source::Survey(question))
                })
                .count();
            assert_eq!(owners, 1, "{question} should be scored exactly once");
        }
    }

    #[rstest]
    fn structure_fit_has_no_survey_items() {
        assert!(items(Category::StructureFit).is_empty());
    }

    #[rstest]
    fn unanswered_category_is_skipped() {
        let mut a = enm_single();
        let mut b = enm_couple();
        for question in [
            questions::CHEMISTRY_STYLES,
            questions::CHEMISTRY_FREQUENCY,
            questions::CHEMISTRY_ROLE,
        ] {
            a = a.without_answer(question);
            b = b.without_answer(question);
        }

        assert_eq!(survey_category(Category::Chemistry, &a, &b, NEUTRAL), None);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "tests compare floating point values")]
    fn openness_averages_its_items() {
        // Scales 7 and 8 score 100 * (1 - 1/9) each; curiosities match fully.
        let score = survey_category(Category::Openness, &enm_single(), &enm_couple(), NEUTRAL)
            .expect("openness answered");
        let scale = 100.0 * (1.0 - 1.0 / 9.0);
        let expected = (scale + scale + 100.0) / 3.0;
        assert!((score - expected).abs() < 1e-9, "got {score}");
    }

    #[rstest]
    fn intent_overlap_reads_declared_intent() {
        let a = enm_single().with_intent([Intent::Friendship]);
        let b = enm_couple().with_intent([Intent::Friendship]);
        let left = answer_for(Source::Intent, &a).expect("intent present");
        let right = answer_for(Source::Intent, &b).expect("intent present");
        assert_eq!(left, right);
    }

    #[rstest]
    fn empty_intent_counts_as_unanswered() {
        let mut profile = enm_single();
        profile.intent.clear();
        assert!(answer_for(Source::Intent, &profile).is_none());
    }
}
