//! Named priority levels
//!
//! The priority queue is generic over any `Ord` priority. `Priority` is the
//! named scale used by config and the CLI; each level also has a numeric
//! weight so named and raw integer priorities can share one queue.

use serde::{Deserialize, Serialize};

/// Named priority level, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Priority {
    /// Every level, least urgent first
    pub const ALL: [Priority; 4] = [Self::Low, Self::Normal, Self::High, Self::Critical];

    /// Numeric weight of this level on the integer priority scale
    pub fn weight(self) -> i64 {
        match self {
            Self::Low => 1,
            Self::Normal => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown priority level: {}", s))
    }
}

/// Parse a priority given either as a named level or as a raw integer
pub fn parse_level(s: &str) -> Result<i64, String> {
    let s = s.trim();
    if let Ok(value) = s.parse::<i64>() {
        return Ok(value);
    }
    s.parse::<Priority>()
        .map(Priority::weight)
        .map_err(|_| format!("Invalid priority '{}': expected low, normal, high, critical or an integer", s))
}
