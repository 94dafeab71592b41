//! Survey answers keyed by question.
//!
//! Answers come in four shapes: a 1 to 10 scale, a single choice, a set of
//! choices, and a yes/no toggle. A missing key means the party skipped the
//! question; scorers treat that as unknown rather than as a disagreement.
//!
//! # Examples
//! ```
//! use kindred_core::{Answer, SurveyAnswers, survey::questions};
//!
//! let answers = SurveyAnswers::new()
//!     .with_answer(questions::OPENNESS_EXPLORATION, Answer::scale(8))
//!     .with_answer(questions::CHEMISTRY_ROLE, Answer::single("switch"));
//! assert_eq!(answers.get(questions::OPENNESS_EXPLORATION), Some(&Answer::Scale(8)));
//! assert!(answers.get(questions::GOALS_TIMELINE).is_none());
//! ```

use std::collections::{BTreeMap, BTreeSet};

/// Question keys understood by the compatibility scorer.
pub mod questions {
    /// Single choice: when the party wants things to happen.
    pub const GOALS_TIMELINE: &str = "goals.timeline";
    /// Scale: how ready the party is to meet.
    pub const GOALS_READINESS: &str = "goals.readiness";
    /// Scale: how much exclusivity the party expects.
    pub const BOUNDARIES_EXCLUSIVITY: &str = "boundaries.exclusivity";
    /// Scale: how much privacy the party expects from a match.
    pub const BOUNDARIES_DISCRETION: &str = "boundaries.discretion";
    /// Scale: how quickly the party likes things to move.
    pub const BOUNDARIES_PACE: &str = "boundaries.pace";
    /// Scale: willingness to try new experiences.
    pub const OPENNESS_EXPLORATION: &str = "openness.exploration";
    /// Scale: appetite for variety in partners.
    pub const OPENNESS_VARIETY: &str = "openness.variety";
    /// Multiple choice: experiences the party is curious about.
    pub const OPENNESS_CURIOSITIES: &str = "openness.curiosities";
    /// Multiple choice: preferred erotic styles.
    pub const CHEMISTRY_STYLES: &str = "chemistry.styles";
    /// Scale: desired frequency of intimacy.
    pub const CHEMISTRY_FREQUENCY: &str = "chemistry.frequency";
    /// Single choice: preferred role (dominant, submissive, switch, ...).
    pub const CHEMISTRY_ROLE: &str = "chemistry.role";
}

/// Lowest value on the survey scale.
pub const SCALE_MIN: u8 = 1;
/// Highest value on the survey scale.
pub const SCALE_MAX: u8 = 10;

/// A single survey answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Answer {
    /// A position on the 1 to 10 scale.
    Scale(u8),
    /// One option from a single-select question.
    Single(String),
    /// Options from a multi-select question.
    Multi(BTreeSet<String>),
    /// A yes/no answer.
    Toggle(bool),
}

impl Answer {
    /// Build a scale answer, clamping into `1..=10`.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::Answer;
    ///
    /// assert_eq!(Answer::scale(14), Answer::Scale(10));
    /// assert_eq!(Answer::scale(0), Answer::Scale(1));
    /// ```
    #[must_use]
    pub fn scale(value: u8) -> Self {
        Self::Scale(value.clamp(SCALE_MIN, SCALE_MAX))
    }

    /// Build a single-select answer.
    #[must_use]
    pub fn single(choice: impl Into<String>) -> Self {
        Self::Single(choice.into())
    }

    /// Build a multi-select answer from any collection of options.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::Answer;
    ///
    /// let answer = Answer::multi(["travel", "dancing", "travel"]);
    /// assert_eq!(answer, Answer::multi(["dancing", "travel"]));
    /// ```
    #[must_use]
    pub fn multi<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Multi(choices.into_iter().map(Into::into).collect())
    }
}

/// Survey answers keyed by question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct SurveyAnswers {
    answers: BTreeMap<String, Answer>,
}

impl SurveyAnswers {
    /// Construct an empty answer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the answer for a question, if given.
    #[must_use]
    pub fn get(&self, question: &str) -> Option<&Answer> {
        self.answers.get(question)
    }

    /// Insert or replace an answer.
    pub fn insert(&mut self, question: impl Into<String>, answer: Answer) {
        self.answers.insert(question.into(), answer);
    }

    /// Remove an answer, returning it if present.
    pub fn remove(&mut self, question: &str) -> Option<Answer> {
        self.answers.remove(question)
    }

    /// Add an answer while returning `self` for chaining.
    #[must_use]
    pub fn with_answer(mut self, question: impl Into<String>, answer: Answer) -> Self {
        self.insert(question, answer);
        self
    }

    /// Number of answered questions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Report whether no question has been answered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterate over answers in question-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.answers.iter().map(|(key, answer)| (key.as_str(), answer))
    }
}
