//! This crate computes tournament draw plans: group sizing, play-off
//! loser cascades that trim an awkward field down to a power of two,
//! and knockout brackets drawn with a choice of seeding strategies.
//!
//! The planner is a pure library. It takes an entrant snapshot plus a
//! [`DrawConfig`] and returns a [`Plan`]: every stage, every round,
//! every slot filled with exactly one [`SeedSlot`]. It performs no I/O,
//! rejects nothing, and clamps out-of-range configuration instead of
//! failing; fetching entrants, persisting the plan and committing it
//! into real matches are the surrounding application's business.
//!
//! ## Example usage
//! ```
//! use drawplan::{DrawConfig, Entrant, KnockoutConfig, PairingMethod, Plan, PlayOffConfig};
//! use uuid::Uuid;
//!
//! let entrants: Vec<Entrant> = (0..13)
//!     .map(|i| Entrant::new(Uuid::new_v4(), &format!("team {}", i), Some(1000 + i)))
//!     .collect();
//!
//! // 13 entrants: a three-round play-off cascade feeds a 16-slot
//! // knockout drawn ladder-style, with round numbers flowing through.
//! let config = DrawConfig {
//!     group: None,
//!     play_off: Some(PlayOffConfig::new(3, PairingMethod::Cross)),
//!     knockout: KnockoutConfig::new(0, PairingMethod::Ladder),
//!     seed_by_rating: true,
//! };
//!
//! let plan = Plan::compute(&config, &entrants);
//! assert_eq!(plan.stages.len(), 2);
//! assert_eq!(plan.stages[0].rounds.len(), 3);
//! assert!(plan.validate().is_ok());
//!
//! // Recomputing from the same snapshot is a no-op.
//! assert_eq!(plan, Plan::compute(&config, &entrants));
//! ```

mod error;
mod groups;
mod knockout;
mod pairing;
mod plan;
mod playoff;
mod rematch;
mod rules;
mod section;
mod seed;

#[cfg(test)]
mod tests;

pub use error::*;
pub use groups::*;
pub use knockout::*;
pub use pairing::*;
pub use plan::*;
pub use playoff::*;
pub use rematch::*;
pub use rules::*;
pub use section::*;
pub use seed::*;
