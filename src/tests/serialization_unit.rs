use uuid::Uuid;

use crate::{
    CapMode, DrawConfig, Entrant, GroupConfig, KnockoutConfig, MatchRules, PairingMethod, Plan,
    PlayOffConfig, SeedSlot, StageRules,
};

fn entrants(n: usize) -> Vec<Entrant> {
    (0..n)
        .map(|i| Entrant::new(Uuid::new_v4(), &format!("team {}", i), Some(1500 - i as i32)))
        .collect()
}

/// The external persistence contract: put(plan) then get() must yield
/// an equivalent plan. JSON stands in for whatever the store speaks.
#[test]
fn test_plan_round_trips_through_json() {
    let config = DrawConfig {
        group: Some(GroupConfig::new(4, 2)),
        play_off: Some(PlayOffConfig::new(2, PairingMethod::Cross)),
        knockout: KnockoutConfig::new(0, PairingMethod::AntiSameGroup),
        seed_by_rating: true,
    };
    let plan = Plan::compute(&config, &entrants(13));

    let json = serde_json::to_string(&plan).unwrap();
    let restored: Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, restored);
}

#[test]
fn test_draw_config_round_trips_through_json() {
    let mut config = DrawConfig {
        group: Some(GroupConfig::new(3, 2)),
        play_off: None,
        knockout: KnockoutConfig::new(8, PairingMethod::Random),
        seed_by_rating: false,
    };
    config.knockout.seed_key = "draw-2026".to_string();
    config.knockout.rules = StageRules {
        base: MatchRules { best_of: 5, points_to_win: 11, win_by_two: true, cap: CapMode::Soft, cap_points: 15 },
        round_overrides: vec![MatchRules::default(), MatchRules { best_of: 7, ..MatchRules::default() }],
    };

    let json = serde_json::to_string(&config).unwrap();
    let restored: DrawConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, restored);
}

#[test]
fn test_seed_slot_serialization_is_tagged() {
    let slot = SeedSlot::StageMatchWinner { stage: 1, round: 2, ordinal: 3 };
    let json = serde_json::to_value(&slot).unwrap();
    assert_eq!(json["type"], "stage_match_winner");
    assert_eq!(json["round"], 2);

    let bye = serde_json::to_value(SeedSlot::Bye).unwrap();
    assert_eq!(bye["type"], "bye");
}

#[test]
fn test_seed_slot_round_trips_all_variants() {
    let slots = [
        SeedSlot::Registration { id: Uuid::new_v4() },
        SeedSlot::GroupRank { stage: 0, group: 2, rank: 1 },
        SeedSlot::StageMatchWinner { stage: 1, round: 3, ordinal: 4 },
        SeedSlot::StageMatchLoser { stage: 1, round: 1, ordinal: 6 },
        SeedSlot::Bye,
    ];
    for slot in slots {
        let json = serde_json::to_string(&slot).unwrap();
        let restored: SeedSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(slot, restored);
    }
}

#[test]
fn test_entrant_round_trips_with_missing_rating() {
    let entrant = Entrant::new(Uuid::new_v4(), "unrated newcomer", None);
    let json = serde_json::to_string(&entrant).unwrap();
    let restored: Entrant = serde_json::from_str(&json).unwrap();
    assert_eq!(entrant, restored);
}
