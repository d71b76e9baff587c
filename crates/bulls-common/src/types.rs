//! Identifiers and small enums shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// NBA franchise identifier (e.g. `1610612741` for Chicago).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub u32);

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NBA player identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NBA game identifier. Kept as a string since leading zeros are significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub String);

impl GameId {
    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for GameId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Outcome of a game from the team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Win
    #[serde(rename = "W")]
    Win,
    /// Loss
    #[serde(rename = "L")]
    Loss,
}

impl GameResult {
    /// Single letter code used by the stats API.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Win => "W",
            Self::Loss => "L",
        }
    }

    /// Whether this is a win.
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Win)
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for GameResult {
    type Err = crate::BullsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "W" | "w" => Ok(Self::Win),
            "L" | "l" => Ok(Self::Loss),
            other => Err(crate::BullsError::validation_field(
                format!("unknown game result '{other}'"),
                "result",
            )),
        }
    }
}

/// Two- or three-point attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotType {
    /// Two-point field goal
    #[serde(rename = "2PT")]
    Two,
    /// Three-point field goal
    #[serde(rename = "3PT")]
    Three,
}

impl ShotType {
    /// Classify the API's `SHOT_TYPE` text ("3PT Field Goal", "2PT Field Goal").
    #[must_use]
    pub fn from_api(text: &str) -> Self {
        if text.contains("3PT") {
            Self::Three
        } else {
            Self::Two
        }
    }

    /// Points awarded when the attempt is made.
    #[must_use]
    pub const fn points(self) -> u32 {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl fmt::Display for ShotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Two => f.write_str("2PT"),
            Self::Three => f.write_str("3PT"),
        }
    }
}

/// Basic shot zone as reported in `SHOT_ZONE_BASIC`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ShotZone {
    /// At the rim
    RestrictedArea,
    /// Paint outside the restricted area
    InThePaintNonRa,
    /// Long two
    MidRange,
    /// Left corner three
    LeftCorner3,
    /// Right corner three
    RightCorner3,
    /// Arc three
    AboveTheBreak3,
    /// Beyond half court
    Backcourt,
    /// Anything the API adds later
    Other(String),
}

impl ShotZone {
    /// All named zones in court order.
    pub const NAMED: [Self; 7] = [
        Self::RestrictedArea,
        Self::InThePaintNonRa,
        Self::MidRange,
        Self::LeftCorner3,
        Self::RightCorner3,
        Self::AboveTheBreak3,
        Self::Backcourt,
    ];

    /// The API's label for this zone.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::RestrictedArea => "Restricted Area",
            Self::InThePaintNonRa => "In The Paint (Non-RA)",
            Self::MidRange => "Mid-Range",
            Self::LeftCorner3 => "Left Corner 3",
            Self::RightCorner3 => "Right Corner 3",
            Self::AboveTheBreak3 => "Above the Break 3",
            Self::Backcourt => "Backcourt",
            Self::Other(name) => name,
        }
    }

    /// Whether shots from this zone are three-point attempts.
    #[must_use]
    pub fn is_three(&self) -> bool {
        match self {
            Self::LeftCorner3 | Self::RightCorner3 | Self::AboveTheBreak3 => true,
            Self::Other(name) => {
                let lower = name.to_lowercase();
                name.contains('3') || lower.contains("corner") || lower.contains("above the break")
            }
            _ => false,
        }
    }

    /// Whether this is the backcourt zone.
    #[must_use]
    pub const fn is_backcourt(&self) -> bool {
        matches!(self, Self::Backcourt)
    }

    /// Representative court coordinate for annotations.
    #[must_use]
    pub const fn center(&self) -> (f64, f64) {
        match self {
            Self::RestrictedArea => (0.0, 0.0),
            Self::InThePaintNonRa => (0.0, 70.0),
            Self::MidRange => (0.0, 200.0),
            Self::LeftCorner3 => (-180.0, 50.0),
            Self::RightCorner3 => (180.0, 50.0),
            Self::AboveTheBreak3 => (0.0, 300.0),
            Self::Backcourt | Self::Other(_) => (0.0, 400.0),
        }
    }
}

impl fmt::Display for ShotZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ShotZone {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Restricted Area" => Self::RestrictedArea,
            "In The Paint (Non-RA)" => Self::InThePaintNonRa,
            "Mid-Range" => Self::MidRange,
            "Left Corner 3" => Self::LeftCorner3,
            "Right Corner 3" => Self::RightCorner3,
            "Above the Break 3" => Self::AboveTheBreak3,
            "Backcourt" => Self::Backcourt,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ShotZone {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ShotZone> for String {
    fn from(value: ShotZone) -> Self {
        value.as_str().to_string()
    }
}
