//! The fixed set of scored compatibility dimensions.
//!
//! # Examples
//! ```
//! use kindred_core::Category;
//!
//! assert_eq!(Category::Boundaries.key(), "boundaries");
//! assert_eq!(Category::Boundaries.label(), "Boundaries & Comfort");
//! ```

/// One scored dimension of compatibility.
///
/// Declaration order is the order categories appear in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "&'static str")
)]
pub enum Category {
    /// Shared intent, timeline, and readiness.
    Goals,
    /// Graded fit between relationship structures.
    StructureFit,
    /// Exclusivity, discretion, and pace.
    Boundaries,
    /// Willingness to explore and appetite for variety.
    Openness,
    /// Erotic style, frequency, and role preferences.
    Chemistry,
}

impl Category {
    /// Every category in result order.
    pub const ALL: [Self; 5] = [
        Self::Goals,
        Self::StructureFit,
        Self::Boundaries,
        Self::Openness,
        Self::Chemistry,
    ];

    /// Stable machine-readable key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Goals => "goals",
            Self::StructureFit => "structure",
            Self::Boundaries => "boundaries",
            Self::Openness => "openness",
            Self::Chemistry => "chemistry",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Goals => "Goals & Expectations",
            Self::StructureFit => "Structure Fit",
            Self::Boundaries => "Boundaries & Comfort",
            Self::Openness => "Openness & Curiosity",
            Self::Chemistry => "Sexual Energy / Chemistry",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

impl TryFrom<String> for Category {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for &'static str {
    fn from(category: Category) -> Self {
        category.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn keys_parse_back() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(category.key()), Ok(category));
        }
    }

    #[test]
    fn parsing_rejects_unknown() {
        let err = Category::from_str("astrology").unwrap_err();
        assert!(err.contains("unknown category"));
    }
}
