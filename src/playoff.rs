use serde::{Serialize, Deserialize};

use crate::pairing::PairingMethod;
use crate::rules::StageRules;
use crate::seed::{Pair, Round, SeedSlot};

/// Configuration for the preliminary single-elimination ladder that
/// trims a non-power-of-two field down before the knockout stage.
/// Losers cascade: losers of round r feed round r+1 instead of being
/// eliminated, and every round's winners qualify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayOffConfig {
    /// Requested round count; clamped to `max_play_off_rounds`.
    pub rounds: u32,
    pub method: PairingMethod,
    pub seed_key: String,
    pub rules: StageRules,
}

impl PlayOffConfig {
    pub fn new(rounds: u32, method: PairingMethod) -> PlayOffConfig {
        PlayOffConfig {
            rounds,
            method,
            seed_key: String::new(),
            rules: StageRules::default(),
        }
    }
}

/// Maximum number of play-off rounds for a field of the given size:
/// 1 + floor(log2(floor(n/2))), never below 1.
pub fn max_play_off_rounds(entrant_count: u32) -> u32 {
    let half = entrant_count / 2;
    if half <= 1 {
        return 1;
    }
    1 + half.ilog2()
}

/// Size of the pool entering the given round: the whole field for round
/// 1, then the loser count halving (floor) every round after.
pub fn losers_pool_at_round(entrant_count: u32, round: u32) -> u32 {
    let mut pool = entrant_count;
    for _ in 1..round.max(1) {
        pool /= 2;
    }
    pool
}

/// Match count for one play-off round. Round 1 plays ceil(n/2) matches
/// (an odd field gives the unpaired entrant a BYE in the last match);
/// later rounds play ceil(pool/2) over the cascading losers pool.
/// Out-of-range rounds are clamped.
pub fn play_off_matches_in_round(entrant_count: u32, round: u32) -> u32 {
    if entrant_count == 0 {
        return 0;
    }
    let round = round.clamp(1, max_play_off_rounds(entrant_count));
    losers_pool_at_round(entrant_count, round).div_ceil(2)
}

/// Synthesizes the full play-off from a round-1 seed assignment. Each
/// later round pairs the consecutive losers of the previous round; BYEs
/// sit in the last match of a round, so losers always come from the
/// leading matches. Display round numbers continue from
/// `base_round_offset`.
pub fn build_play_off_rounds(
    round_one: Vec<Pair>,
    entrant_count: u32,
    rounds: u32,
    stage: usize,
    base_round_offset: u32,
) -> Vec<Round> {
    let rounds = rounds.clamp(1, max_play_off_rounds(entrant_count));
    let mut built = vec![Round {
        number: base_round_offset + 1,
        pairs: round_one,
    }];

    for stage_round in 2..=rounds {
        let loser_count = losers_pool_at_round(entrant_count, stage_round);
        let match_count = play_off_matches_in_round(entrant_count, stage_round);

        let mut pairs = Vec::with_capacity(match_count as usize);
        for ordinal in 1..=match_count {
            let feed_a = ordinal * 2 - 1;
            let feed_b = ordinal * 2;
            let a = SeedSlot::StageMatchLoser { stage, round: stage_round - 1, ordinal: feed_a };
            let b = if feed_b <= loser_count {
                SeedSlot::StageMatchLoser { stage, round: stage_round - 1, ordinal: feed_b }
            } else {
                SeedSlot::Bye
            };
            pairs.push(Pair::new(ordinal, a, b));
        }

        built.push(Round {
            number: base_round_offset + stage_round,
            pairs,
        });
    }

    built
}

/// Every match winner of every round, round-ascending then
/// match-ascending. This ordered list feeds the knockout prefill.
pub fn play_off_qualifiers(entrant_count: u32, rounds: u32, stage: usize) -> Vec<SeedSlot> {
    let rounds = rounds.clamp(1, max_play_off_rounds(entrant_count.max(1)));
    let mut qualifiers = Vec::new();
    for round in 1..=rounds {
        for ordinal in 1..=play_off_matches_in_round(entrant_count, round) {
            qualifiers.push(SeedSlot::StageMatchWinner { stage, round, ordinal });
        }
    }
    qualifiers
}

/// Round-1 winners never lost; winners of later rounds each carry at
/// least one loss. The strong/weak and ladder prefills use this split.
pub fn split_strong_weak(qualifiers: &[SeedSlot]) -> (Vec<SeedSlot>, Vec<SeedSlot>) {
    let mut strong = Vec::new();
    let mut weak = Vec::new();
    for &slot in qualifiers {
        match slot {
            SeedSlot::StageMatchWinner { round: 1, .. } => strong.push(slot),
            _ => weak.push(slot),
        }
    }
    (strong, weak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntest::test_case;
    use uuid::Uuid;

    #[test_case(0, 1)]
    #[test_case(2, 1)]
    #[test_case(3, 1)]
    #[test_case(4, 2)]
    #[test_case(13, 3)]
    #[test_case(16, 4)]
    #[test_case(17, 4)]
    fn max_rounds(entrants: u32, expected: u32) {
        assert_eq!(max_play_off_rounds(entrants), expected);
    }

    #[test]
    fn test_thirteen_entrant_cascade() {
        // Round 1: ceil(13/2). Losers pool 6 enters round 2, then 3.
        assert_eq!(play_off_matches_in_round(13, 1), 7);
        assert_eq!(play_off_matches_in_round(13, 2), 3);
        assert_eq!(play_off_matches_in_round(13, 3), 2);
    }

    #[test]
    fn test_round_clamped_to_max() {
        // Round 9 does not exist for 13 entrants; clamps to round 3.
        assert_eq!(play_off_matches_in_round(13, 9), 2);
        assert_eq!(play_off_matches_in_round(13, 0), 7);
    }

    #[test]
    fn test_zero_entrants_play_nothing() {
        assert_eq!(play_off_matches_in_round(0, 1), 0);
    }

    fn seeded_round_one(entrants: u32) -> Vec<Pair> {
        let matches = play_off_matches_in_round(entrants, 1);
        (1..=matches)
            .map(|ordinal| {
                let a = SeedSlot::Registration { id: Uuid::new_v4() };
                let b = if ordinal * 2 <= entrants {
                    SeedSlot::Registration { id: Uuid::new_v4() }
                } else {
                    SeedSlot::Bye
                };
                Pair::new(ordinal, a, b)
            })
            .collect()
    }

    #[test]
    fn test_cascade_references_previous_round_losers() {
        let rounds = build_play_off_rounds(seeded_round_one(13), 13, 3, 1, 0);
        assert_eq!(rounds.len(), 3);
        assert_eq!(rounds[1].pairs.len(), 3);
        assert_eq!(
            rounds[1].pairs[0].a,
            SeedSlot::StageMatchLoser { stage: 1, round: 1, ordinal: 1 }
        );
        assert_eq!(
            rounds[1].pairs[2].b,
            SeedSlot::StageMatchLoser { stage: 1, round: 1, ordinal: 6 }
        );
        // Round 3: three losers, so the last match holds a BYE.
        assert_eq!(rounds[2].pairs.len(), 2);
        assert_eq!(rounds[2].pairs[1].b, SeedSlot::Bye);
    }

    #[test]
    fn test_requested_rounds_clamp_down() {
        let rounds = build_play_off_rounds(seeded_round_one(13), 13, 99, 0, 0);
        assert_eq!(rounds.len(), 3);
    }

    #[test]
    fn test_round_numbers_continue_from_offset() {
        let rounds = build_play_off_rounds(seeded_round_one(6), 6, 2, 1, 4);
        let numbers: Vec<u32> = rounds.iter().map(|r| r.number).collect();
        assert_eq!(numbers, vec![5, 6]);
    }

    #[test]
    fn test_qualifier_enumeration_order() {
        let qualifiers = play_off_qualifiers(13, 3, 1);
        assert_eq!(qualifiers.len(), 7 + 3 + 2);
        assert_eq!(qualifiers[0], SeedSlot::StageMatchWinner { stage: 1, round: 1, ordinal: 1 });
        assert_eq!(qualifiers[7], SeedSlot::StageMatchWinner { stage: 1, round: 2, ordinal: 1 });
        assert_eq!(qualifiers[11], SeedSlot::StageMatchWinner { stage: 1, round: 3, ordinal: 2 });
    }

    #[test]
    fn test_strong_weak_split() {
        let qualifiers = play_off_qualifiers(13, 3, 0);
        let (strong, weak) = split_strong_weak(&qualifiers);
        assert_eq!(strong.len(), 7);
        assert_eq!(weak.len(), 5);
        assert!(strong.iter().all(|s| matches!(s, SeedSlot::StageMatchWinner { round: 1, .. })));
    }
}
