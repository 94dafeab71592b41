//! Test-only profile builders shared by unit, behaviour, and property tests.

use crate::{
    Answer, DiscretionLevel, Identity, Intent, Location, PartyProfile, RequiredField, Structure,
    SurveyAnswers, Verification, survey::questions,
};

/// Every survey question the scorer reads.
pub const ALL_QUESTIONS: [&str; 11] = [
    questions::GOALS_TIMELINE,
    questions::GOALS_READINESS,
    questions::BOUNDARIES_EXCLUSIVITY,
    questions::BOUNDARIES_DISCRETION,
    questions::BOUNDARIES_PACE,
    questions::OPENNESS_EXPLORATION,
    questions::OPENNESS_VARIETY,
    questions::OPENNESS_CURIOSITIES,
    questions::CHEMISTRY_STYLES,
    questions::CHEMISTRY_FREQUENCY,
    questions::CHEMISTRY_ROLE,
];

/// Answer every question, using `scale` for all scale questions.
#[must_use]
pub fn complete_answers(scale: u8) -> SurveyAnswers {
    SurveyAnswers::new()
        .with_answer(questions::GOALS_TIMELINE, Answer::single("months"))
        .with_answer(questions::GOALS_READINESS, Answer::scale(scale))
        .with_answer(questions::BOUNDARIES_EXCLUSIVITY, Answer::scale(scale))
        .with_answer(questions::BOUNDARIES_DISCRETION, Answer::scale(scale))
        .with_answer(questions::BOUNDARIES_PACE, Answer::scale(scale))
        .with_answer(questions::OPENNESS_EXPLORATION, Answer::scale(scale))
        .with_answer(questions::OPENNESS_VARIETY, Answer::scale(scale))
        .with_answer(
            questions::OPENNESS_CURIOSITIES,
            Answer::multi(["travel", "dancing", "parties"]),
        )
        .with_answer(
            questions::CHEMISTRY_STYLES,
            Answer::multi(["sensual", "playful"]),
        )
        .with_answer(questions::CHEMISTRY_FREQUENCY, Answer::scale(scale))
        .with_answer(questions::CHEMISTRY_ROLE, Answer::single("switch"))
}

/// A single seeking couples and women, ENM, dating and play.
#[must_use]
pub fn enm_single() -> PartyProfile {
    PartyProfile::new(
        Identity::Single,
        [Identity::Couple, Identity::Woman],
        Structure::Enm,
    )
    .with_intent([Intent::Dating, Intent::Play])
    .with_discretion(DiscretionLevel::Medium)
    .with_location(Location::Coordinates {
        latitude: 52.52,
        longitude: 13.405,
    })
    .with_verification(Verification {
        identity_verified: true,
        background_checked: false,
    })
    .with_answers(complete_answers(7))
}

/// A couple seeking singles and couples, ENM, dating and play.
#[must_use]
pub fn enm_couple() -> PartyProfile {
    PartyProfile::new(
        Identity::Couple,
        [Identity::Single, Identity::Couple],
        Structure::Enm,
    )
    .with_intent([Intent::Dating, Intent::Play])
    .with_discretion(DiscretionLevel::Medium)
    .with_location(Location::Coordinates {
        latitude: 52.40,
        longitude: 13.06,
    })
    .with_verification(Verification {
        identity_verified: true,
        background_checked: true,
    })
    .with_answers(complete_answers(8))
}

/// Helpers for tweaking profiles in tests.
pub trait PartyProfileTestExt {
    /// Drop one survey answer.
    #[must_use]
    fn without_answer(self, question: &str) -> Self;

    /// Drop one structural field.
    #[must_use]
    fn without_field(self, field: RequiredField) -> Self;
}

impl PartyProfileTestExt for PartyProfile {
    fn without_answer(mut self, question: &str) -> Self {
        self.answers.remove(question);
        self
    }

    fn without_field(mut self, field: RequiredField) -> Self {
        match field {
            RequiredField::Identity => self.identity = None,
            RequiredField::SeekingTargets => self.seeking_targets = None,
            RequiredField::Structure => self.structure = None,
        }
        self
    }
}
