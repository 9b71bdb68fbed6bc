use std::error::Error;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Raised by [`Plan::validate`](crate::Plan::validate) when a committed
/// slot references an outcome that cannot resolve. The planner itself
/// never produces these; they guard externally edited plans before the
/// commit step materializes real matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanError {
    /// A slot points at a stage or round that has not happened yet by
    /// evaluation order.
    ForwardReference { stage: usize, round: u32 },
    /// A winner/loser reference names a match that does not exist.
    UnknownMatch { stage: usize, round: u32, ordinal: u32 },
    /// A group-rank reference names a group or rank outside the group
    /// stage's configuration.
    UnknownGroup { stage: usize, group: usize },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self {
            PlanError::ForwardReference { stage, round } => {
                write!(f, "Error: Slot in stage {} round {} references a future outcome.", stage, round)
            }
            PlanError::UnknownMatch { stage, round, ordinal } => {
                write!(f, "Error: Reference to missing match {} in round {} of stage {}.", ordinal, round, stage)
            }
            PlanError::UnknownGroup { stage, group } => {
                write!(f, "Error: Reference to missing group {} of stage {}.", group, stage)
            }
        }
    }
}

impl Error for PlanError {}
