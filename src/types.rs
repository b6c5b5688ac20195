use crate::consts::{
    CHALLENGE_MODE_LIMIT_SECS, MAX_HINTS_EASY, MAX_HINTS_HARD, MAX_HINTS_MEDIUM,
    TIMED_MODE_LIMIT_SECS,
};
use crate::error::{CfResult, CountyForgeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// Stable identifier of a county (e.g. `"los-angeles"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountyId(String);

impl CountyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CountyId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CountyId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Hint budget granted for this tier.
    pub fn max_hints(self) -> u32 {
        match self {
            Self::Easy => MAX_HINTS_EASY,
            Self::Medium => MAX_HINTS_MEDIUM,
            Self::Hard => MAX_HINTS_HARD,
        }
    }

    pub fn parse(s: &str) -> CfResult<Self> {
        Self::from_str(s.trim()).map_err(|_| CountyForgeError::UnknownDifficulty(s.to_string()))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Practice,
    Timed,
    Challenge,
    Learn,
}

impl GameMode {
    /// Session time limit, `None` for untimed modes.
    pub fn time_limit_seconds(self) -> Option<f64> {
        match self {
            Self::Timed => Some(TIMED_MODE_LIMIT_SECS),
            Self::Challenge => Some(CHALLENGE_MODE_LIMIT_SECS),
            Self::Practice | Self::Learn => None,
        }
    }

    pub fn parse(s: &str) -> CfResult<Self> {
        Self::from_str(s.trim()).map_err(|_| CountyForgeError::UnknownMode(s.to_string()))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Northern,
    BayArea,
    CentralValley,
    CentralCoast,
    Southern,
}

impl Region {
    pub fn label(self) -> &'static str {
        match self {
            Self::Northern => "Northern California",
            Self::BayArea => "Bay Area",
            Self::CentralValley => "Central Valley",
            Self::CentralCoast => "Central Coast",
            Self::Southern => "Southern California",
        }
    }

    pub fn parse(s: &str) -> CfResult<Self> {
        Self::from_str(s.trim()).map_err(|_| CountyForgeError::UnknownRegion(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn derived_fields_cover_every_variant() {
        let hints: Vec<u32> = Difficulty::iter().map(Difficulty::max_hints).collect();
        assert_eq!(hints, vec![5, 3, 1]);

        let limits: Vec<Option<f64>> = GameMode::iter().map(GameMode::time_limit_seconds).collect();
        assert_eq!(limits, vec![None, Some(300.0), Some(180.0), None]);
    }

    #[test]
    fn parsing_is_case_insensitive_and_reports_bad_input() {
        assert_eq!(Difficulty::parse("HARD").unwrap(), Difficulty::Hard);
        assert_eq!(GameMode::parse(" timed ").unwrap(), GameMode::Timed);
        assert_eq!(Region::parse("bay_area").unwrap(), Region::BayArea);

        let err = Difficulty::parse("expert").unwrap_err();
        assert!(matches!(err, CountyForgeError::UnknownDifficulty(ref s) if s == "expert"));
        assert!(matches!(
            GameMode::parse("arcade"),
            Err(CountyForgeError::UnknownMode(_))
        ));
    }

    #[test]
    fn serde_uses_snake_case_names() {
        assert_eq!(serde_json::to_string(&Region::CentralValley).unwrap(), "\"central_valley\"");
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        let id: CountyId = serde_json::from_str("\"orange\"").unwrap();
        assert_eq!(id, CountyId::from("orange"));
    }
}
