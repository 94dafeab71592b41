//! Categorical party attributes: who a party is, what they want, and how
//! discreet they need to be.
//!
//! Labels parse leniently: case is ignored, `_` and spaces count as `-`, and
//! plural spellings used in seeking lists (`couples`, `women`) resolve to the
//! same identity as their singular form.
//!
//! # Examples
//! ```
//! use kindred_core::{Identity, Intent};
//!
//! assert_eq!("Couples".parse::<Identity>(), Ok(Identity::Couple));
//! assert_eq!(Intent::LongTerm.to_string(), "long-term");
//! ```

use crate::normalise_label;

/// Who a party is when presented to others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Identity {
    /// An individual presenting on their own.
    Single,
    /// Two people presenting together.
    Couple,
    /// A woman.
    Woman,
    /// A man.
    Man,
    /// A non-binary person.
    NonBinary,
    /// Three or more people presenting together.
    Pod,
}

impl Identity {
    /// Return the identity as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::Identity;
    ///
    /// assert_eq!(Identity::NonBinary.as_str(), "non-binary");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Couple => "couple",
            Self::Woman => "woman",
            Self::Man => "man",
            Self::NonBinary => "non-binary",
            Self::Pod => "pod",
        }
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Identity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "single" | "singles" => Ok(Self::Single),
            "couple" | "couples" => Ok(Self::Couple),
            "woman" | "women" => Ok(Self::Woman),
            "man" | "men" => Ok(Self::Man),
            "non-binary" | "nonbinary" | "enby" => Ok(Self::NonBinary),
            "pod" | "pods" => Ok(Self::Pod),
            _ => Err(format!("unknown identity '{s}'")),
        }
    }
}

impl TryFrom<String> for Identity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for &'static str {
    fn from(identity: Identity) -> Self {
        identity.as_str()
    }
}

/// Why a party is on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Intent {
    /// Dating with a view to something ongoing.
    Dating,
    /// Casual play.
    Play,
    /// Platonic friendship.
    Friendship,
    /// A long-term relationship.
    LongTerm,
    /// Social events and community.
    Social,
}

impl Intent {
    /// Return the intent as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dating => "dating",
            Self::Play => "play",
            Self::Friendship => "friendship",
            Self::LongTerm => "long-term",
            Self::Social => "social",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "dating" => Ok(Self::Dating),
            "play" => Ok(Self::Play),
            "friendship" | "friends" => Ok(Self::Friendship),
            "long-term" | "longterm" => Ok(Self::LongTerm),
            "social" => Ok(Self::Social),
            _ => Err(format!("unknown intent '{s}'")),
        }
    }
}

impl TryFrom<String> for Intent {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Intent> for &'static str {
    fn from(intent: Intent) -> Self {
        intent.as_str()
    }
}

/// How much discretion a party needs. Ordered from least to most discreet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum DiscretionLevel {
    /// Comfortable being open about non-traditional dating.
    Low,
    /// Selectively open.
    Medium,
    /// Requires strict discretion.
    High,
}

impl DiscretionLevel {
    /// Position on the three-step discretion ladder, starting at 1.
    ///
    /// # Examples
    /// ```
    /// use kindred_core::DiscretionLevel;
    ///
    /// assert_eq!(DiscretionLevel::High.rank(), 3);
    /// ```
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }

    /// Return the level as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for DiscretionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DiscretionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("unknown discretion level '{s}'")),
        }
    }
}

impl TryFrom<String> for DiscretionLevel {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DiscretionLevel> for &'static str {
    fn from(level: DiscretionLevel) -> Self {
        level.as_str()
    }
}
