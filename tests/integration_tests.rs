use drawplan::{
    DrawConfig, Entrant, GroupConfig, KnockoutConfig, PairingMethod, Plan, PlayOffConfig,
    SeedSlot, StageConfig,
};
use rand::{thread_rng, Rng};
use uuid::Uuid;

fn entrants(n: usize) -> Vec<Entrant> {
    (0..n)
        .map(|i| Entrant::new(Uuid::new_v4(), &format!("club {}", i), Some(1800 - i as i32)))
        .collect()
}

#[test]
fn full_season_draw() {
    // 21 clubs: four round-robin groups, the 12 qualifiers play a
    // two-round loser cascade, and the 9 survivors enter a 16-slot
    // knockout drawn by pot.
    let config = DrawConfig {
        group: Some(GroupConfig::new(4, 3)),
        play_off: Some(PlayOffConfig::new(2, PairingMethod::Cross)),
        knockout: KnockoutConfig::new(0, PairingMethod::PotDraw),
        seed_by_rating: true,
    };
    let field = entrants(21);
    let plan = Plan::compute(&config, &field);

    assert_eq!(plan.stages.len(), 3);
    assert!(matches!(plan.stages[0].config, StageConfig::Group(_)));
    assert_eq!(plan.stages[0].group_sizes.iter().sum::<u32>(), 21);

    // A 6-team group plays 5 rounds, so the play-off opens at round 6
    // and every later round number follows without a gap.
    let mut expected = 6;
    for stage in &plan.stages[1..] {
        for round in &stage.rounds {
            assert_eq!(round.number, expected);
            assert!(!round.pairs.is_empty());
            expected += 1;
        }
    }
    assert_eq!(plan.last_round_number(), expected - 1);

    // 12 qualifiers: 6 play-off matches, then 3 over the losers.
    let shape: Vec<usize> = plan.stages[1].rounds.iter().map(|r| r.pairs.len()).collect();
    assert_eq!(shape, vec![6, 3]);

    // 9 survivors in 16 slots leaves 7 BYEs, and nobody gets lost.
    let first = &plan.stages[2].rounds[0];
    assert_eq!(first.pairs.len(), 8);
    let byes = first
        .pairs
        .iter()
        .flat_map(|p| [p.a, p.b])
        .filter(SeedSlot::is_bye)
        .count();
    assert_eq!(byes, 7);

    assert_eq!(plan.validate(), Ok(()));
    assert_eq!(plan, Plan::compute(&config, &field));
}

#[test]
fn plan_survives_json_round_trip() {
    let config = DrawConfig {
        group: Some(GroupConfig::new(4, 2)),
        play_off: Some(PlayOffConfig::new(2, PairingMethod::Shift)),
        knockout: KnockoutConfig::new(0, PairingMethod::AntiSameGroup),
        seed_by_rating: false,
    };
    let plan = Plan::compute(&config, &entrants(17));
    let json = serde_json::to_string(&plan).unwrap();
    let restored: Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(plan, restored);
    assert_eq!(restored.validate(), Ok(()));
}

#[test]
fn keyed_draws_are_reproducible_across_runs() {
    let field = entrants(11);
    let mut knockout = KnockoutConfig::new(0, PairingMethod::Random);
    knockout.seed_key = "club-championship-2026".to_string();
    let config = DrawConfig::knockout_only(knockout);

    let first = Plan::compute(&config, &field);
    let second = Plan::compute(&config, &field);
    assert_eq!(first, second);

    let mut rekeyed_config = config.clone();
    rekeyed_config.knockout.seed_key = "club-championship-2027".to_string();
    let rekeyed = Plan::compute(&rekeyed_config, &field);
    assert_ne!(first, rekeyed);
}

#[test]
fn arbitrary_field_sizes_always_validate() {
    let mut rng = thread_rng();
    for _ in 0..25 {
        let config = DrawConfig {
            group: Some(GroupConfig::new(rng.gen_range(1..6), rng.gen_range(1..4))),
            play_off: Some(PlayOffConfig::new(rng.gen_range(1..5), PairingMethod::Consecutive)),
            knockout: KnockoutConfig::new(0, PairingMethod::StrongWeak),
            seed_by_rating: rng.gen_bool(0.5),
        };
        let plan = Plan::compute(&config, &entrants(rng.gen_range(0..40)));
        assert_eq!(plan.validate(), Ok(()));
    }
}
