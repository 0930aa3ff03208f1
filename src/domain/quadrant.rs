//! The four cells of the Eisenhower priority matrix.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Priority classification of a wished-for item.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Quadrant {
    /// Important and urgent.
    #[serde(rename = "IU")]
    ImportantUrgent,
    /// Important, not urgent.
    #[serde(rename = "I")]
    Important,
    /// Urgent, not important.
    #[serde(rename = "U")]
    Urgent,
    /// Neither important nor urgent.
    #[serde(rename = "N")]
    #[default]
    Neither,
}

impl Quadrant {
    /// Display order of the matrix cells.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::ImportantUrgent,
        Quadrant::Important,
        Quadrant::Urgent,
        Quadrant::Neither,
    ];

    /// Wire tag used in the persisted document.
    pub fn tag(self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "IU",
            Quadrant::Important => "I",
            Quadrant::Urgent => "U",
            Quadrant::Neither => "N",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::ImportantUrgent => "Important & Urgent",
            Quadrant::Important => "Important",
            Quadrant::Urgent => "Urgent",
            Quadrant::Neither => "Neither",
        }
    }

    /// Strict tag lookup; exactly `IU`, `I`, `U` or `N`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "IU" => Some(Quadrant::ImportantUrgent),
            "I" => Some(Quadrant::Important),
            "U" => Some(Quadrant::Urgent),
            "N" => Some(Quadrant::Neither),
            _ => None,
        }
    }

    /// Lenient lookup for hand-typed input: trims and upper-cases first.
    pub fn parse_input(input: &str) -> Result<Self, ValidationError> {
        Self::from_tag(&input.trim().to_ascii_uppercase()).ok_or(ValidationError::InvalidQuadrant)
    }

    /// Maps unknown tags into the `N` cell so that nothing is ever dropped from view.
    pub fn from_tag_or_neither(tag: &str) -> Self {
        Self::from_tag(tag).unwrap_or(Quadrant::Neither)
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Quadrant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or(ValidationError::InvalidQuadrant)
    }
}
