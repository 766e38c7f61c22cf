use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown topic: {raw}")]
pub struct ParseTopicError {
    pub raw: String,
}

//
// ─── TOPIC ────────────────────────────────────────────────────────────────────
//

/// A math skill category a session practises.
///
/// Only the first five have a dedicated question template; the rest are
/// listed in the catalog but generate multiplication questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topic {
    #[default]
    Multiplication,
    Squares,
    Cubes,
    Fractions,
    Powers,
    SquareRoots,
    CubeRoots,
    Percentages,
    Divisibility,
}

impl Topic {
    pub const ALL: [Topic; 9] = [
        Topic::Multiplication,
        Topic::Squares,
        Topic::Cubes,
        Topic::Fractions,
        Topic::Powers,
        Topic::SquareRoots,
        Topic::CubeRoots,
        Topic::Percentages,
        Topic::Divisibility,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Multiplication => "multiplication",
            Topic::Squares => "squares",
            Topic::Cubes => "cubes",
            Topic::Fractions => "fractions",
            Topic::Powers => "powers",
            Topic::SquareRoots => "square-roots",
            Topic::CubeRoots => "cube-roots",
            Topic::Percentages => "percentages",
            Topic::Divisibility => "divisibility",
        }
    }

    /// Heading shown above a running session.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Topic::Multiplication => "Multiplication Tables",
            Topic::Squares => "Squares",
            Topic::Cubes => "Cubes",
            Topic::Fractions => "Fractions to %",
            Topic::Powers => "Powers",
            _ => "Math Practice",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topic {
    type Err = ParseTopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Topic::ALL
            .into_iter()
            .find(|topic| topic.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseTopicError { raw: s.to_owned() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_catalog_name() {
        for topic in Topic::ALL {
            assert_eq!(topic.as_str().parse::<Topic>().unwrap(), topic);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(" Squares ".parse::<Topic>().unwrap(), Topic::Squares);
    }

    #[test]
    fn unknown_topic_is_an_error() {
        let err = "calculus".parse::<Topic>().unwrap_err();
        assert_eq!(err.raw, "calculus");
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&Topic::SquareRoots).unwrap();
        assert_eq!(json, "\"square-roots\"");
    }

    #[test]
    fn untemplated_topics_share_generic_title() {
        assert_eq!(Topic::Fractions.title(), "Fractions to %");
        assert_eq!(Topic::Divisibility.title(), "Math Practice");
    }
}
