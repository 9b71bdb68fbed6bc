use std::fmt;
use serde::{Serialize, Deserialize};
use uuid::Uuid;

/// A registered entrant, as supplied by the surrounding application.
/// The planner only ever needs identity plus the optional strength
/// score used by rating-ordered seeding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    pub id: Uuid,
    pub name: String,
    pub rating: Option<i32>,
}

impl Entrant {
    pub fn new(id: Uuid, name: &str, rating: Option<i32>) -> Entrant {
        Entrant {
            id,
            name: name.to_string(),
            rating,
        }
    }
}

/// One side of a match slot. Every committed slot holds exactly one
/// variant; a reference to a future outcome is only valid if that
/// outcome's stage/round precedes the slot's own position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SeedSlot {
    /// A concrete entrant.
    Registration { id: Uuid },
    /// The team finishing `rank` in `group` of an earlier group stage.
    GroupRank { stage: usize, group: usize, rank: u32 },
    /// The winner of match `ordinal` in `round` of stage `stage`.
    StageMatchWinner { stage: usize, round: u32, ordinal: u32 },
    /// The loser of match `ordinal` in `round` of stage `stage`.
    StageMatchLoser { stage: usize, round: u32, ordinal: u32 },
    /// Explicit non-entrant filler; a match against a BYE auto-advances
    /// the other side.
    Bye,
}

impl SeedSlot {
    pub fn is_bye(&self) -> bool {
        matches!(self, SeedSlot::Bye)
    }

    /// True for any slot that will eventually resolve to a real entrant.
    pub fn is_genuine(&self) -> bool {
        !self.is_bye()
    }

    /// The source group of a group-rank placeholder, if any. Used by the
    /// section-collision placement strategies.
    pub fn group(&self) -> Option<usize> {
        match self {
            SeedSlot::GroupRank { group, .. } => Some(*group),
            _ => None,
        }
    }
}

impl fmt::Display for SeedSlot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SeedSlot::Registration { id } => {
                write!(f, "{}", &id.to_string()[..8])
            }
            SeedSlot::GroupRank { group, rank, .. } => {
                write!(f, "G{}#{}", group + 1, rank)
            }
            SeedSlot::StageMatchWinner { round, ordinal, .. } => {
                write!(f, "W-R{}-M{}", round, ordinal)
            }
            SeedSlot::StageMatchLoser { round, ordinal, .. } => {
                write!(f, "L-R{}-M{}", round, ordinal)
            }
            SeedSlot::Bye => write!(f, "BYE"),
        }
    }
}

/// One scheduled matchup within a round: a 1-based ordinal and two slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub ordinal: u32,
    pub a: SeedSlot,
    pub b: SeedSlot,
}

impl Pair {
    pub fn new(ordinal: u32, a: SeedSlot, b: SeedSlot) -> Pair {
        Pair { ordinal, a, b }
    }

    pub fn is_double_bye(&self) -> bool {
        self.a.is_bye() && self.b.is_bye()
    }

    /// Number of genuine (non-BYE) slots in this pair: 0, 1 or 2.
    pub fn genuine_count(&self) -> u32 {
        self.a.is_genuine() as u32 + self.b.is_genuine() as u32
    }
}

/// One round of a stage. `number` is the display round number, which
/// continues across stages via the base-round offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub pairs: Vec<Pair>,
}
