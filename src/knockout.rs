use serde::{Serialize, Deserialize};

use crate::pairing::PairingMethod;
use crate::rules::StageRules;
use crate::seed::{Pair, Round, SeedSlot};

/// Configuration for the final power-of-two single-elimination stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnockoutConfig {
    /// Requested bracket capacity. 0 means "size to the qualifier feed".
    /// Non-power-of-two values are rounded up, never rejected.
    pub draw_size: u32,
    pub method: PairingMethod,
    /// Key for the deterministic shuffle used by the random methods.
    pub seed_key: String,
    pub rules: StageRules,
}

impl KnockoutConfig {
    pub fn new(draw_size: u32, method: PairingMethod) -> KnockoutConfig {
        KnockoutConfig {
            draw_size,
            method,
            seed_key: String::new(),
            rules: StageRules::default(),
        }
    }
}

/// Bracket capacity for a knockout stage: the next power of two at or
/// above the requested size, never below 2.
pub fn knockout_draw_size(requested: u32) -> u32 {
    requested.max(2).next_power_of_two()
}

/// Classic bisection seed order for a power-of-two bracket: seed 1 and
/// seed 2 land in opposite halves, seeds 3-4 in opposite quarters, and
/// so on. Returns the seed number occupying each position.
pub fn bisection_seed_order(size: u32) -> Vec<u32> {
    let size = size.max(1).next_power_of_two();
    let mut order = vec![1u32];
    let mut width = 1;
    while width < size {
        width *= 2;
        let mut next = Vec::with_capacity(width as usize);
        for &seed in &order {
            next.push(seed);
            next.push(width + 1 - seed);
        }
        order = next;
    }
    order
}

/// Position (0-based) each 1-based seed takes in the bisection order.
/// `seed_positions(n)[k - 1]` is where seed `k` goes.
pub fn seed_positions(size: u32) -> Vec<usize> {
    let order = bisection_seed_order(size);
    let mut positions = vec![0usize; order.len()];
    for (position, &seed) in order.iter().enumerate() {
        positions[seed as usize - 1] = position;
    }
    positions
}

/// Synthesizes every round after round 1 by pairing consecutive
/// winners: round k's match i references the winners of round k-1's
/// matches 2i-1 and 2i. An odd leftover match advances its winner
/// against a BYE. Display round numbers continue from
/// `base_round_offset`.
pub fn build_knockout_rounds(round_one: Vec<Pair>, stage: usize, base_round_offset: u32) -> Vec<Round> {
    let mut rounds = vec![Round {
        number: base_round_offset + 1,
        pairs: round_one,
    }];

    let mut stage_round = 1u32;
    loop {
        let prev_count = rounds.last().map(|r| r.pairs.len()).unwrap_or(0) as u32;
        if prev_count <= 1 {
            break;
        }
        stage_round += 1;

        let mut pairs = Vec::new();
        let mut ordinal = 1u32;
        let mut feed = 1u32;
        while feed <= prev_count {
            let a = SeedSlot::StageMatchWinner { stage, round: stage_round - 1, ordinal: feed };
            let b = if feed + 1 <= prev_count {
                SeedSlot::StageMatchWinner { stage, round: stage_round - 1, ordinal: feed + 1 }
            } else {
                SeedSlot::Bye
            };
            pairs.push(Pair::new(ordinal, a, b));
            ordinal += 1;
            feed += 2;
        }

        rounds.push(Round {
            number: base_round_offset + stage_round,
            pairs,
        });
    }

    rounds
}
