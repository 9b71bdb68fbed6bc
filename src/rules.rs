use serde::{Serialize, Deserialize};

/// How the score cap behaves once a game reaches the cap point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapMode {
    /// No cap; win-by-two can extend a game indefinitely.
    None,
    /// At the cap point the win-by-two requirement drops to win-by-one.
    Soft,
    /// The first side to reach the cap point wins outright.
    Hard,
}

/// Ruleset for a single match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRules {
    pub best_of: u32,
    pub points_to_win: u32,
    pub win_by_two: bool,
    pub cap: CapMode,
    pub cap_points: u32,
}

impl Default for MatchRules {
    fn default() -> MatchRules {
        MatchRules {
            best_of: 3,
            points_to_win: 11,
            win_by_two: true,
            cap: CapMode::None,
            cap_points: 0,
        }
    }
}

/// Every stage owns a base ruleset, optionally overridden per round.
/// Overrides resolve index-or-last: rounds past the end of the override
/// list reuse the last override given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StageRules {
    pub base: MatchRules,
    pub round_overrides: Vec<MatchRules>,
}

impl StageRules {
    pub fn new(base: MatchRules) -> StageRules {
        StageRules {
            base,
            round_overrides: Vec::new(),
        }
    }

    /// Rules in effect for the given 0-based round index.
    pub fn for_round(&self, round_index: usize) -> MatchRules {
        match self.round_overrides.get(round_index) {
            Some(rules) => *rules,
            None => match self.round_overrides.last() {
                Some(last) => *last,
                None => self.base,
            },
        }
    }
}
