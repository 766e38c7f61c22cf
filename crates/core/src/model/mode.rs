use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown game mode: {raw}")]
pub struct ParseModeError {
    pub raw: String,
}

/// Session variant; decides the timer length and how progress is framed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    #[default]
    Menu,
    Climb,
    Blitz,
    Marathon,
    Custom,
    Study,
}

impl GameMode {
    pub const ALL: [GameMode; 6] = [
        GameMode::Menu,
        GameMode::Climb,
        GameMode::Blitz,
        GameMode::Marathon,
        GameMode::Custom,
        GameMode::Study,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GameMode::Menu => "menu",
            GameMode::Climb => "climb",
            GameMode::Blitz => "blitz",
            GameMode::Marathon => "marathon",
            GameMode::Custom => "custom",
            GameMode::Study => "study",
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameMode::Climb => "Climb Mode",
            GameMode::Blitz => "Blitz Mode",
            GameMode::Marathon => "Marathon Mode",
            GameMode::Custom => "Custom Practice",
            GameMode::Menu | GameMode::Study => "Practice Mode",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameMode::Climb => "Progress through topics step by step",
            GameMode::Blitz => "60-second rapid-fire challenges",
            GameMode::Marathon => "Perfect accuracy required",
            GameMode::Custom => "Pick a topic and practise at your own pace",
            GameMode::Study => "Flashcards and mental math tricks",
            GameMode::Menu => "",
        }
    }

    /// Whether the once-per-second countdown runs in this mode.
    #[must_use]
    pub fn is_timed(self) -> bool {
        !matches!(self, GameMode::Menu | GameMode::Study)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        GameMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseModeError { raw: s.to_owned() })
    }
}

/// Formats remaining seconds as `m:ss`.
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
