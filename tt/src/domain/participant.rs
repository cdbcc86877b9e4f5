//! Participants of the round-robin scheduler

use serde::{Deserialize, Serialize};

/// How many turns a participant has left
///
/// Integer budgets cross the API boundary as `i64`; any value `<= 0` means
/// the participant is never retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnBudget {
    Finite(u64),
    Unlimited,
}

impl TurnBudget {
    /// Convert an integer turn count into a budget
    pub fn from_turns(turns: i64) -> Self {
        if turns <= 0 {
            Self::Unlimited
        } else {
            Self::Finite(turns as u64)
        }
    }

    pub fn is_unlimited(self) -> bool {
        matches!(self, Self::Unlimited)
    }

    /// Turns left, or `None` when unlimited
    pub fn remaining(self) -> Option<u64> {
        match self {
            Self::Finite(n) => Some(n),
            Self::Unlimited => None,
        }
    }

    /// Integer encoding of this budget, with 0 standing for unlimited
    pub fn as_turns(self) -> i64 {
        match self {
            Self::Finite(n) => i64::try_from(n).unwrap_or(i64::MAX),
            Self::Unlimited => 0,
        }
    }
}

impl std::fmt::Display for TurnBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{}", n),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}

/// A named participant and its remaining turn budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    name: String,
    budget: TurnBudget,
}

impl Participant {
    /// Create a participant with `turns` turns; `turns <= 0` means unlimited
    pub fn new(name: impl Into<String>, turns: i64) -> Self {
        Self {
            name: name.into(),
            budget: TurnBudget::from_turns(turns),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn budget(&self) -> TurnBudget {
        self.budget
    }

    pub fn is_unlimited(&self) -> bool {
        self.budget.is_unlimited()
    }

    /// True once a finite budget has been used up
    pub fn is_retired(&self) -> bool {
        self.budget == TurnBudget::Finite(0)
    }

    /// Consume one turn and report whether the participant stays in rotation.
    ///
    /// Unlimited budgets are left untouched. Only the scheduler calls this.
    pub(crate) fn take_turn(&mut self) -> bool {
        match &mut self.budget {
            TurnBudget::Unlimited => true,
            TurnBudget::Finite(n) => {
                *n = n.saturating_sub(1);
                *n > 0
            }
        }
    }
}

impl std::fmt::Display for Participant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.budget)
    }
}

/// A `name[:turns]` participant description from the CLI or a scenario file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turns: Option<i64>,
}

impl ParticipantSpec {
    /// Turn count to register with, falling back to `default_turns`
    pub fn turns_or(&self, default_turns: i64) -> i64 {
        self.turns.unwrap_or(default_turns)
    }
}

impl std::str::FromStr for ParticipantSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, turns) = match s.rsplit_once(':') {
            Some((name, turns)) => {
                let turns = turns
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| format!("Invalid turn count in '{}': expected an integer", s))?;
                (name.trim(), Some(turns))
            }
            None => (s, None),
        };

        if name.is_empty() {
            return Err(format!("Missing participant name in '{}'", s));
        }

        Ok(Self {
            name: name.to_string(),
            turns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_positive_turns_are_unlimited() {
        assert_eq!(TurnBudget::from_turns(0), TurnBudget::Unlimited);
        assert_eq!(TurnBudget::from_turns(-5), TurnBudget::Unlimited);
        assert_eq!(TurnBudget::from_turns(3), TurnBudget::Finite(3));
    }

    #[test]
    fn test_budget_integer_encoding() {
        assert_eq!(TurnBudget::Finite(7).as_turns(), 7);
        assert_eq!(TurnBudget::Unlimited.as_turns(), 0);
        assert_eq!(TurnBudget::Finite(2).remaining(), Some(2));
        assert_eq!(TurnBudget::Unlimited.remaining(), None);
    }

    #[test]
    fn test_take_turn_finite() {
        let mut p = Participant::new("Alice", 2);
        assert!(p.take_turn());
        assert_eq!(p.budget(), TurnBudget::Finite(1));
        assert!(!p.take_turn());
        assert_eq!(p.budget(), TurnBudget::Finite(0));
    }

    #[test]
    fn test_is_retired_only_after_last_turn() {
        let mut p = Participant::new("Alice", 2);
        assert!(!p.is_retired());
        p.take_turn();
        assert!(!p.is_retired());
        p.take_turn();
        assert!(p.is_retired());

        let mut forever = Participant::new("Bob", 0);
        forever.take_turn();
        assert!(!forever.is_retired());
    }

    #[test]
    fn test_take_turn_unlimited_never_changes() {
        let mut p = Participant::new("Bob", 0);
        for _ in 0..100 {
            assert!(p.take_turn());
        }
        assert_eq!(p.budget(), TurnBudget::Unlimited);
    }

    #[test]
    fn test_participant_display() {
        assert_eq!(Participant::new("Alice", 2).to_string(), "Alice (2)");
        assert_eq!(Participant::new("Bob", -1).to_string(), "Bob (unlimited)");
    }

    #[test]
    fn test_participant_spec_parse() {
        let spec: ParticipantSpec = "Alice:3".parse().unwrap();
        assert_eq!(spec.name, "Alice");
        assert_eq!(spec.turns, Some(3));

        let spec: ParticipantSpec = "Bob".parse().unwrap();
        assert_eq!(spec.turns, None);
        assert_eq!(spec.turns_or(4), 4);

        let spec: ParticipantSpec = "Carol:-1".parse().unwrap();
        assert_eq!(spec.turns, Some(-1));
    }

    #[test]
    fn test_participant_spec_parse_errors() {
        assert!("Alice:many".parse::<ParticipantSpec>().is_err());
        assert!(":3".parse::<ParticipantSpec>().is_err());
        assert!("".parse::<ParticipantSpec>().is_err());
    }

    #[test]
    fn test_budget_serde() {
        assert_eq!(serde_json::to_string(&TurnBudget::Unlimited).unwrap(), "\"unlimited\"");
        assert_eq!(serde_json::to_string(&TurnBudget::Finite(2)).unwrap(), "{\"finite\":2}");
    }
}
