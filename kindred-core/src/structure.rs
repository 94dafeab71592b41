//! Relationship structures and the explicit table that grades how well two
//! structures fit together.
//!
//! The table is symmetric: `fit(a, b) == fit(b, a)` for every pair. A pair
//! marked [`StructureFit::Incompatible`] fails the structure hard filter;
//! graded pairs feed the Structure Fit category directly.
//!
//! # Examples
//! ```
//! use kindred_core::{Structure, StructureFit, StructureTable};
//!
//! let table = StructureTable::default();
//! assert_eq!(table.fit(Structure::Open, Structure::Polyamorous), StructureFit::Graded(75));
//! assert_eq!(
//!     table.fit(Structure::Polyamorous, Structure::Monogamous),
//!     StructureFit::Incompatible
//! );
//! ```

use std::collections::BTreeMap;

use crate::{ConfigError, normalise_label};

/// A party's relationship style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Structure {
    /// Strictly monogamous.
    Monogamous,
    /// A primary relationship open to outside connections.
    Open,
    /// Multiple loving relationships.
    Polyamorous,
    /// Partner swapping within the swinger scene.
    Swinger,
    /// Ethical non-monogamy without a narrower label.
    Enm,
}

impl Structure {
    /// Every structure in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Monogamous,
        Self::Open,
        Self::Polyamorous,
        Self::Swinger,
        Self::Enm,
    ];

    /// Return the structure as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monogamous => "monogamous",
            Self::Open => "open",
            Self::Polyamorous => "polyamorous",
            Self::Swinger => "swinger",
            Self::Enm => "enm",
        }
    }
}

impl std::fmt::Display for Structure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Structure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalise_label(s).as_str() {
            "monogamous" | "mono" | "monogamy" => Ok(Self::Monogamous),
            "open" | "open-relationship" => Ok(Self::Open),
            "polyamorous" | "poly" | "polyamory" => Ok(Self::Polyamorous),
            "swinger" | "swingers" | "swinging" => Ok(Self::Swinger),
            "enm" | "ethical-non-monogamy" | "non-monogamous" => Ok(Self::Enm),
            _ => Err(format!("unknown structure '{s}'")),
        }
    }
}

impl TryFrom<String> for Structure {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Structure> for &'static str {
    fn from(structure: Structure) -> Self {
        structure.as_str()
    }
}

/// How well two structures fit together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StructureFit {
    /// The pair can never match.
    Incompatible,
    /// The pair can match; the value is the Structure Fit score in `0..=100`.
    Graded(u8),
}

/// One row of a [`StructureTable`], used for serialisation and construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructurePairing {
    /// One side of the pair.
    pub first: Structure,
    /// The other side of the pair.
    pub second: Structure,
    /// Fit between the two.
    pub fit: StructureFit,
}

const DEFAULT_PAIRINGS: [(Structure, Structure, StructureFit); 15] = {
    use Structure::{Enm, Monogamous, Open, Polyamorous, Swinger};
    use StructureFit::{Graded, Incompatible};
    [
        (Monogamous, Monogamous, Graded(100)),
        (Monogamous, Open, Graded(30)),
        (Monogamous, Polyamorous, Incompatible),
        (Monogamous, Swinger, Incompatible),
        (Monogamous, Enm, Incompatible),
        (Open, Open, Graded(100)),
        (Open, Polyamorous, Graded(75)),
        (Open, Swinger, Graded(80)),
        (Open, Enm, Graded(85)),
        (Polyamorous, Polyamorous, Graded(100)),
        (Polyamorous, Swinger, Graded(55)),
        (Polyamorous, Enm, Graded(85)),
        (Swinger, Swinger, Graded(100)),
        (Swinger, Enm, Graded(80)),
        (Enm, Enm, Graded(100)),
    ]
};

/// Symmetric compatibility table covering every pair of [`Structure`]s.
///
/// Construct through [`Default`] or [`StructureTable::from_pairings`]; both
/// guarantee the table is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<StructurePairing>", into = "Vec<StructurePairing>")
)]
pub struct StructureTable {
    entries: BTreeMap<(Structure, Structure), StructureFit>,
}

impl StructureTable {
    /// Build a table from explicit pairings.
    ///
    /// # Errors
    /// Returns [`ConfigError::DuplicateStructurePair`] when a pair is listed
    /// twice (in either order), [`ConfigError::StructureFitOutOfRange`] for a
    /// graded fit above 100, and [`ConfigError::MissingStructurePair`] when
    /// the pairings do not cover every combination.
    pub fn from_pairings<I>(pairings: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = StructurePairing>,
    {
        let mut entries = BTreeMap::new();
        for pairing in pairings {
            if let StructureFit::Graded(score) = pairing.fit
                && score > 100
            {
                return Err(ConfigError::StructureFitOutOfRange {
                    first: pairing.first,
                    second: pairing.second,
                    score,
                });
            }
            let key = ordered(pairing.first, pairing.second);
            if entries.insert(key, pairing.fit).is_some() {
                return Err(ConfigError::DuplicateStructurePair {
                    first: key.0,
                    second: key.1,
                });
            }
        }
        let table = Self { entries };
        table.ensure_complete()?;
        Ok(table)
    }

    /// Look up the fit between two structures in either order.
    #[must_use]
    pub fn fit(&self, a: Structure, b: Structure) -> StructureFit {
        self.entries
            .get(&ordered(a, b))
            .copied()
            .unwrap_or(StructureFit::Incompatible)
    }

    /// Replace the fit for one pair while returning `self` for chaining.
    ///
    /// Graded values are clamped into `0..=100`.
    #[must_use]
    pub fn with_fit(mut self, a: Structure, b: Structure, fit: StructureFit) -> Self {
        let clamped = match fit {
            StructureFit::Graded(score) => StructureFit::Graded(score.min(100)),
            StructureFit::Incompatible => StructureFit::Incompatible,
        };
        self.entries.insert(ordered(a, b), clamped);
        self
    }

    /// Iterate over every pairing in canonical order.
    pub fn pairings(&self) -> impl Iterator<Item = StructurePairing> + '_ {
        self.entries
            .iter()
            .map(|(&(first, second), &fit)| StructurePairing { first, second, fit })
    }

    fn ensure_complete(&self) -> Result<(), ConfigError> {
        for (index, &first) in Structure::ALL.iter().enumerate() {
            for &second in Structure::ALL.iter().skip(index) {
                if !self.entries.contains_key(&ordered(first, second)) {
                    return Err(ConfigError::MissingStructurePair { first, second });
                }
            }
        }
        Ok(())
    }
}

impl Default for StructureTable {
    fn default() -> Self {
        let entries = DEFAULT_PAIRINGS
            .iter()
            .map(|&(first, second, fit)| (ordered(first, second), fit))
            .collect();
        Self { entries }
    }
}

impl TryFrom<Vec<StructurePairing>> for StructureTable {
    type Error = ConfigError;

    fn try_from(pairings: Vec<StructurePairing>) -> Result<Self, Self::Error> {
        Self::from_pairings(pairings)
    }
}

impl From<StructureTable> for Vec<StructurePairing> {
    fn from(table: StructureTable) -> Self {
        table.pairings().collect()
    }
}

const fn ordered(a: Structure, b: Structure) -> (Structure, Structure) {
    if (a as u8) <= (b as u8) { (a, b) } else { (b, a) }
}
