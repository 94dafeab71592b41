//! One side of a prospective match.
//!
//! [`PartyProfile`] gathers a party's structural attributes, optional
//! metadata, and survey answers. The structural fields are optional in the
//! type so incomplete records from the profile store can still be loaded;
//! scorers reject them through [`PartyProfile::structural`].

use std::collections::BTreeSet;

use geo::{Distance, Haversine, Point};

use crate::{
    Answer, DiscretionLevel, Identity, Intent, RequiredField, Structure, SurveyAnswers,
};

const METRES_PER_KILOMETRE: f64 = 1_000.0;

/// Identifier of a party in the profile store.
///
/// # Examples
/// ```
/// use kindred_core::PartyId;
///
/// let id = PartyId::from("alex-and-sam");
/// assert_eq!(id.as_str(), "alex-and-sam");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct PartyId(String);

impl PartyId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PartyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PartyId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PartyId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Where a party is based.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Location {
    /// WGS84 coordinates in decimal degrees.
    Coordinates {
        /// Latitude in degrees.
        latitude: f64,
        /// Longitude in degrees.
        longitude: f64,
    },
    /// A free-form city name.
    City(String),
}

impl Location {
    /// Great-circle distance to `other` in kilometres, when it can be known.
    ///
    /// Two coordinate pairs use the haversine formula. Two city names match
    /// case-insensitively and report zero; any other combination is unknown.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::Location;
    ///
    /// let berlin = Location::City("Berlin".into());
    /// assert_eq!(berlin.distance_km(&Location::City(" berlin ".into())), Some(0.0));
    /// assert_eq!(berlin.distance_km(&Location::City("Paris".into())), None);
    /// ```
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "converting metres to kilometres divides by a constant"
    )]
    pub fn distance_km(&self, other: &Self) -> Option<f64> {
        match (self, other) {
            (
                Self::Coordinates {
                    latitude: lat_a,
                    longitude: lon_a,
                },
                Self::Coordinates {
                    latitude: lat_b,
                    longitude: lon_b,
                },
            ) => {
                if ![*lat_a, *lon_a, *lat_b, *lon_b].iter().all(|v| v.is_finite()) {
                    return None;
                }
                let from = Point::new(*lon_a, *lat_a);
                let to = Point::new(*lon_b, *lat_b);
                Some(Haversine.distance(from, to) / METRES_PER_KILOMETRE)
            }
            (Self::City(a), Self::City(b)) if a.trim().eq_ignore_ascii_case(b.trim()) => {
                Some(0.0)
            }
            _ => None,
        }
    }
}

/// Verification performed on a party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Verification {
    /// Photo or document identity check passed.
    pub identity_verified: bool,
    /// Background check passed.
    pub background_checked: bool,
}

/// The structural fields of a profile once all are known to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructuralView<'a> {
    /// Who the party is.
    pub identity: Identity,
    /// Who the party wants to meet.
    pub seeking_targets: &'a BTreeSet<Identity>,
    /// The party's relationship structure.
    pub structure: Structure,
}

/// A party's profile as read from the profile store.
///
/// # Examples
/// ```
/// use kindred_core::{Identity, PartyProfile, Structure};
///
/// let profile = PartyProfile::new(Identity::Single, [Identity::Couple], Structure::Enm);
/// assert!(profile.seeks(Identity::Couple));
/// assert!(profile.structural().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct PartyProfile {
    /// Who the party is. Required for scoring.
    pub identity: Option<Identity>,
    /// Identities the party is open to meeting. Required for scoring.
    pub seeking_targets: Option<BTreeSet<Identity>>,
    /// Relationship structure. Required for scoring.
    pub structure: Option<Structure>,
    /// What the party is looking for.
    pub intent: BTreeSet<Intent>,
    /// Where the party is based.
    pub location: Option<Location>,
    /// How much discretion the party needs.
    pub discretion: Option<DiscretionLevel>,
    /// Verification status.
    pub verification: Verification,
    /// Survey answers.
    pub answers: SurveyAnswers,
}

impl PartyProfile {
    /// Construct a profile with every structural field present.
    #[must_use]
    pub fn new<I>(identity: Identity, seeking_targets: I, structure: Structure) -> Self
    where
        I: IntoIterator<Item = Identity>,
    {
        Self {
            identity: Some(identity),
            seeking_targets: Some(seeking_targets.into_iter().collect()),
            structure: Some(structure),
            ..Self::default()
        }
    }

    /// Borrow the structural fields, or name the first one missing.
    ///
    /// Fields are checked in the order identity, seeking targets, structure.
    ///
    /// # Errors
    /// Returns the [`RequiredField`] that is absent.
    pub fn structural(&self) -> Result<StructuralView<'_>, RequiredField> {
        let identity = self.identity.ok_or(RequiredField::Identity)?;
        let seeking_targets = self
            .seeking_targets
            .as_ref()
            .ok_or(RequiredField::SeekingTargets)?;
        let structure = self.structure.ok_or(RequiredField::Structure)?;
        Ok(StructuralView {
            identity,
            seeking_targets,
            structure,
        })
    }

    /// Report whether the party is open to meeting `identity`.
    #[must_use]
    pub fn seeks(&self, identity: Identity) -> bool {
        self.seeking_targets
            .as_ref()
            .is_some_and(|targets| targets.contains(&identity))
    }

    /// Replace the intent set while returning `self` for chaining.
    #[must_use]
    pub fn with_intent<I>(mut self, intent: I) -> Self
    where
        I: IntoIterator<Item = Intent>,
    {
        self.intent = intent.into_iter().collect();
        self
    }

    /// Set the location while returning `self` for chaining.
    #[must_use]
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the discretion level while returning `self` for chaining.
    #[must_use]
    pub const fn with_discretion(mut self, level: DiscretionLevel) -> Self {
        self.discretion = Some(level);
        self
    }

    /// Set the verification status while returning `self` for chaining.
    #[must_use]
    pub const fn with_verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }

    /// Add one survey answer while returning `self` for chaining.
    #[must_use]
    pub fn with_answer(mut self, question: impl Into<String>, answer: Answer) -> Self {
        self.answers.insert(question, answer);
        self
    }

    /// Replace all survey answers while returning `self` for chaining.
    #[must_use]
    pub fn with_answers(mut self, answers: SurveyAnswers) -> Self {
        self.answers = answers;
        self
    }
}
