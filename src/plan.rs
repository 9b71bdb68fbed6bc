use serde::{Serialize, Deserialize};

use crate::error::PlanError;
use crate::groups::{
    assign_groups, compute_group_sizes, flatten_matrix, group_qualifier_matrix, rating_order,
    round_robin_round_count, GroupConfig,
};
use crate::knockout::{build_knockout_rounds, knockout_draw_size, KnockoutConfig};
use crate::pairing::{arrange_into_pairs, pair_from_matrix, pair_ladder, pair_strong_weak, PairingMethod};
use crate::playoff::{
    build_play_off_rounds, max_play_off_rounds, play_off_matches_in_round, play_off_qualifiers,
    split_strong_weak, PlayOffConfig,
};
use crate::seed::{Entrant, Round, SeedSlot};

/// One phase of competition. Closed union, matched exhaustively at
/// every consumption point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StageConfig {
    Group(GroupConfig),
    PlayOff(PlayOffConfig),
    Knockout(KnockoutConfig),
}

/// The full draw configuration. Stages compose in a fixed sequence:
/// zero-or-one group stage, then zero-or-one play-off, then exactly one
/// knockout stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawConfig {
    pub group: Option<GroupConfig>,
    pub play_off: Option<PlayOffConfig>,
    pub knockout: KnockoutConfig,
    /// Order the entrant snapshot strongest-first by rating before
    /// dealing. Off by default: the entrant source order stands.
    pub seed_by_rating: bool,
}

impl DrawConfig {
    pub fn knockout_only(knockout: KnockoutConfig) -> DrawConfig {
        DrawConfig {
            group: None,
            play_off: None,
            knockout,
            seed_by_rating: false,
        }
    }
}

/// One planned stage: its configuration plus what the planner drew for
/// it. Group stages carry sizes and memberships; play-off and knockout
/// stages carry rounds, of which only round 1 is directly editable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagePlan {
    pub config: StageConfig,
    pub group_sizes: Vec<u32>,
    pub groups: Vec<Vec<SeedSlot>>,
    pub rounds: Vec<Round>,
}

/// The root artifact: a pure value, recomputed from configuration plus
/// entrant snapshot, immutable once produced. Persisting and committing
/// it are the surrounding application's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub stages: Vec<StagePlan>,
}

impl Plan {
    /// Runs the whole pipeline. Deterministic: identical configuration
    /// and entrant snapshot always produce an equal plan. Degenerate
    /// input degrades (clamped rounds, BYE-padded draws) instead of
    /// failing.
    pub fn compute(config: &DrawConfig, entrants: &[Entrant]) -> Plan {
        let mut stages: Vec<StagePlan> = Vec::new();
        let mut base_round = 0u32;
        let mut stage_index = 0usize;

        let field = if config.seed_by_rating {
            rating_order(entrants)
        } else {
            entrants.to_vec()
        };

        let mut matrix: Option<Vec<Vec<SeedSlot>>> = None;
        if let Some(group) = &config.group {
            let sizes = compute_group_sizes(
                field.len() as u32,
                group.group_count,
                group.manual_extras.as_deref(),
            );
            let members = assign_groups(&field, &sizes);
            base_round += sizes.iter().map(|&s| round_robin_round_count(s)).max().unwrap_or(0);
            matrix = Some(group_qualifier_matrix(
                group.group_count,
                stage_index,
                group.qualifiers_per_group,
            ));
            stages.push(StagePlan {
                config: StageConfig::Group(group.clone()),
                group_sizes: sizes,
                groups: members,
                rounds: Vec::new(),
            });
            stage_index += 1;
        }

        let mut play_off_feed: Option<(u32, u32, usize)> = None;
        if let Some(play_off) = &config.play_off {
            let feed: Vec<SeedSlot> = match &matrix {
                Some(matrix) => flatten_matrix(matrix, false),
                None => field.iter().map(|e| SeedSlot::Registration { id: e.id }).collect(),
            };
            let entrant_count = feed.len() as u32;
            let rounds = play_off.rounds.clamp(1, max_play_off_rounds(entrant_count));
            let pair_count = play_off_matches_in_round(entrant_count, 1).max(1);

            let round_one = match matrix.take() {
                Some(matrix) => pair_from_matrix(&matrix, pair_count, play_off.method, &play_off.seed_key),
                None => arrange_into_pairs(&feed, pair_count, play_off.method, &play_off.seed_key),
            };
            let built = build_play_off_rounds(round_one, entrant_count, rounds, stage_index, base_round);
            base_round += built.len() as u32;
            stages.push(StagePlan {
                config: StageConfig::PlayOff(play_off.clone()),
                group_sizes: Vec::new(),
                groups: Vec::new(),
                rounds: built,
            });
            play_off_feed = Some((entrant_count, rounds, stage_index));
            stage_index += 1;
        }

        let knockout = &config.knockout;
        let feed: Vec<SeedSlot> = match (&play_off_feed, &matrix) {
            (Some((entrant_count, rounds, stage)), _) => play_off_qualifiers(*entrant_count, *rounds, *stage),
            (None, Some(matrix)) => flatten_matrix(matrix, false),
            (None, None) => field.iter().map(|e| SeedSlot::Registration { id: e.id }).collect(),
        };
        let draw = knockout_draw_size(if knockout.draw_size == 0 {
            feed.len() as u32
        } else {
            knockout.draw_size
        });
        let pair_count = draw / 2;

        let round_one = match knockout.method {
            PairingMethod::StrongWeak => {
                let (strong, weak) = split_strong_weak(&feed);
                pair_strong_weak(&strong, &weak, pair_count)
            }
            PairingMethod::Ladder | PairingMethod::LadderReverse => {
                let (strong, weak) = split_strong_weak(&feed);
                pair_ladder(&strong, &weak, pair_count, knockout.method == PairingMethod::LadderReverse)
            }
            method @ (PairingMethod::Snake | PairingMethod::PotDraw | PairingMethod::AntiSameGroup) => {
                match &matrix {
                    Some(matrix) => pair_from_matrix(matrix, pair_count, method, &knockout.seed_key),
                    None => arrange_into_pairs(&feed, pair_count, method, &knockout.seed_key),
                }
            }
            method => arrange_into_pairs(&feed, pair_count, method, &knockout.seed_key),
        };
        stages.push(StagePlan {
            config: StageConfig::Knockout(knockout.clone()),
            group_sizes: Vec::new(),
            groups: Vec::new(),
            rounds: build_knockout_rounds(round_one, stage_index, base_round),
        });

        Plan { stages }
    }

    /// Checks the guarantee the commit consumer relies on: every slot is
    /// one of the reference variants and nothing dangles forward to an
    /// unresolvable stage/round/ordinal.
    pub fn validate(&self) -> Result<(), PlanError> {
        for (stage_index, stage) in self.stages.iter().enumerate() {
            for (round_index, round) in stage.rounds.iter().enumerate() {
                for pair in &round.pairs {
                    for slot in [pair.a, pair.b] {
                        self.check_slot(slot, stage_index, round_index as u32 + 1)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_slot(&self, slot: SeedSlot, at_stage: usize, at_round: u32) -> Result<(), PlanError> {
        match slot {
            SeedSlot::Registration { .. } | SeedSlot::Bye => Ok(()),
            SeedSlot::GroupRank { stage, group, rank } => {
                if stage >= at_stage {
                    return Err(PlanError::ForwardReference { stage: at_stage, round: at_round });
                }
                match &self.stages[stage].config {
                    StageConfig::Group(config)
                        if (group as u32) < config.group_count
                            && rank >= 1
                            && rank <= config.qualifiers_per_group =>
                    {
                        Ok(())
                    }
                    _ => Err(PlanError::UnknownGroup { stage, group }),
                }
            }
            SeedSlot::StageMatchWinner { stage, round, ordinal }
            | SeedSlot::StageMatchLoser { stage, round, ordinal } => {
                let forward = stage > at_stage || (stage == at_stage && round >= at_round);
                if forward {
                    return Err(PlanError::ForwardReference { stage: at_stage, round: at_round });
                }
                let known = round >= 1
                    && self.stages[stage]
                        .rounds
                        .get(round as usize - 1)
                        .is_some_and(|r| ordinal >= 1 && ordinal as usize <= r.pairs.len());
                if known {
                    Ok(())
                } else {
                    Err(PlanError::UnknownMatch { stage, round, ordinal })
                }
            }
        }
    }

    /// Display number of the last planned round, for chaining further
    /// stages or labeling.
    pub fn last_round_number(&self) -> u32 {
        self.stages
            .iter()
            .flat_map(|s| s.rounds.iter())
            .map(|r| r.number)
            .max()
            .unwrap_or(0)
    }
}
