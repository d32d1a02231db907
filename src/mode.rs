//! Presentation modes
//!
//! `Mode` is the closed classification domain. `ViewState` is the UI state,
//! which additionally has the pre-classification `Landing` screen.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three terminal presentation states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Business audience
    Architect,
    /// Editorial audience
    Author,
    /// Technical audience
    Lab,
}

impl Mode {
    /// Mode used whenever nothing else decides
    pub const DEFAULT: Mode = Mode::Architect;

    pub const ALL: [Mode; 3] = [Mode::Architect, Mode::Author, Mode::Lab];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Architect => "architect",
            Self::Author => "author",
            Self::Lab => "lab",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "architect" | "business" => Some(Self::Architect),
            "author" | "editorial" => Some(Self::Author),
            "lab" | "technical" => Some(Self::Lab),
            _ => None,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Architect => "Business: strategy, leadership, hiring and client work",
            Self::Author => "Editorial: essays, stories and long-form writing",
            Self::Lab => "Technical: code, experiments and engineering notes",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::DEFAULT
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// UI state, including the landing screen shown before classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Landing,
    Architect,
    Author,
    Lab,
}

impl ViewState {
    /// Narrow the UI state to a classification mode.
    ///
    /// Landing has no mode of its own and reads as `Author`, the most neutral
    /// of the three voices for ambient text.
    pub fn narrow(self) -> Mode {
        match self {
            ViewState::Landing => Mode::Author,
            ViewState::Architect => Mode::Architect,
            ViewState::Author => Mode::Author,
            ViewState::Lab => Mode::Lab,
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "landing" => Some(ViewState::Landing),
            other => Mode::from_str(other).map(ViewState::from),
        }
    }
}

impl From<Mode> for ViewState {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Architect => ViewState::Architect,
            Mode::Author => ViewState::Author,
            Mode::Lab => ViewState::Lab,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trip_names() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(Mode::from_str("landing"), None);
    }

    #[test]
    fn test_landing_narrows_to_author() {
        assert_eq!(ViewState::Landing.narrow(), Mode::Author);
        assert_eq!(ViewState::Lab.narrow(), Mode::Lab);
        assert_eq!(ViewState::from(Mode::Architect).narrow(), Mode::Architect);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Lab).unwrap(), "\"lab\"");
        let state: ViewState = serde_json::from_str("\"landing\"").unwrap();
        assert_eq!(state, ViewState::Landing);
    }
}
