use std::time::Duration;

use gatefall_core::{
    AgentId, Command, Event, GameConfig, RejectReason, RunOutcome, RunState, SaveData, TargetKind,
    UpgradeKind, WaveNumber, WorldPoint, ZoneIndex,
};
use gatefall_world::{apply, query, World};

fn run(world: &mut World, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, command, &mut events);
    events
}

fn spawned_agents(events: &[Event]) -> Vec<AgentId> {
    events
        .iter()
        .filter_map(|event| match event {
            Event::AgentSpawned { agent, .. } => Some(*agent),
            _ => None,
        })
        .collect()
}

fn spawn_wave(world: &mut World, wave: u32, count: u32) -> Vec<AgentId> {
    let wave = WaveNumber::new(wave);
    let begin = run(
        world,
        Command::BeginWave {
            wave,
            target_count: count,
        },
    );
    assert!(
        begin
            .iter()
            .any(|event| matches!(event, Event::WaveStarted { .. })),
        "wave should open: {begin:?}"
    );

    let mut agents = Vec::new();
    for _ in 0..count {
        let events = run(
            world,
            Command::SpawnAgent {
                wave,
                position: WorldPoint::new(0.0, 45.0),
            },
        );
        agents.extend(spawned_agents(&events));
    }
    assert_eq!(agents.len(), count as usize);
    agents
}

fn kill(world: &mut World, agent: AgentId) -> Vec<Event> {
    run(
        world,
        Command::DamageAgent {
            agent,
            amount: 10_000.0,
        },
    )
}

#[test]
fn wave_clear_reward_is_granted_exactly_once() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 3);
    let mut cleared = 0;
    for agent in agents {
        let events = kill(&mut world, agent);
        cleared += events
            .iter()
            .filter(|event| matches!(event, Event::WaveCleared { .. }))
            .count();
    }

    assert_eq!(cleared, 1);
    // three kill bounties plus nothing else touched Gold
    assert_eq!(query::gold(&world), 30);
    assert_eq!(query::essence(&world), 10);
}

#[test]
fn session_completes_only_after_every_scheduled_wave_cleared() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let mut waves: Vec<Vec<AgentId>> = Vec::new();
    for number in 1..=10 {
        waves.push(spawn_wave(&mut world, number, 1));
    }

    // clear nine of the ten scheduled waves
    let mut completed = false;
    for wave in waves.iter().take(9) {
        for agent in wave {
            let events = kill(&mut world, *agent);
            completed |= events
                .iter()
                .any(|event| matches!(event, Event::SessionCompleted { .. }));
        }
    }
    assert!(!completed, "one wave still holds a live agent");
    assert_eq!(query::run_state(&world), RunState::WaveSession);

    let progress = query::wave_progress(&world);
    assert_eq!(progress.begun, 10);
    assert_eq!(progress.cleared, 9);
    assert_eq!(progress.open.len(), 1);
    assert_eq!(progress.open[0].live, 1);

    let events = kill(&mut world, waves[9][0]);
    let reward = events.iter().find_map(|event| match event {
        Event::SessionCompleted { reward, .. } => Some(*reward),
        _ => None,
    });
    // zone 0 held: base 50 times the zone-0 multiplier of 3
    assert_eq!(reward, Some(150));
    assert_eq!(query::run_state(&world), RunState::BetweenSessions);
}

#[test]
fn fallback_retargets_every_live_agent_in_one_step() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);
    let _ = spawn_wave(&mut world, 1, 5);

    let events = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(0),
            amount: 600.0,
        },
    );

    assert!(events
        .iter()
        .any(|event| matches!(event, Event::ObjectiveDestroyed { zone } if zone.get() == 0)));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ZoneFallback {
            from,
            to: Some(to),
            retargeted: 5,
        } if from.get() == 0 && to.get() == 1
    )));

    let expected = TargetKind::Objective(ZoneIndex::new(1));
    let agents = query::agent_view(&world);
    assert_eq!(agents.len(), 5);
    assert!(agents.iter().all(|agent| agent.target == expected));

    let zones = query::zone_view(&world);
    assert!(!zones[0].active && zones[0].destroyed);
    assert!(zones[1].active);
    assert_eq!(zones.iter().filter(|zone| zone.active).count(), 1);
}

#[test]
fn destroying_an_objective_twice_falls_back_once() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let first = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(0),
            amount: 600.0,
        },
    );
    let second = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(0),
            amount: 600.0,
        },
    );

    let fallbacks = |events: &[Event]| {
        events
            .iter()
            .filter(|event| matches!(event, Event::ZoneFallback { .. }))
            .count()
    };
    assert_eq!(fallbacks(&first), 1);
    assert_eq!(fallbacks(&second), 0);
}

#[test]
fn objective_health_stays_within_bounds() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let _ = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(0),
            amount: 123.0,
        },
    );
    let zones = query::zone_view(&world);
    assert!(zones[0].objective_health >= 0.0);
    assert!(zones[0].objective_health <= zones[0].objective_max);
    assert!((zones[0].objective_health - 377.0).abs() < f32::EPSILON);
}

#[test]
fn losing_the_final_zone_ends_the_run_in_defeat() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    for zone in 0..2 {
        let _ = run(
            &mut world,
            Command::DamageObjective {
                zone: ZoneIndex::new(zone),
                amount: 600.0,
            },
        );
    }
    let events = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(2),
            amount: 600.0,
        },
    );

    let ended = events.iter().find_map(|event| match event {
        Event::RunEnded { outcome, summary } => Some((*outcome, *summary)),
        _ => None,
    });
    let (outcome, summary) = ended.expect("run should end");
    assert_eq!(outcome, RunOutcome::Defeat);
    // the chain fully collapsed, so the settlement keys off the last zone
    assert_eq!(summary.settlement, 30);

    assert_eq!(query::run_state(&world), RunState::PreRunMenu);
    assert!(!query::run_active(&world));
    assert_eq!(
        query::player_position(&world),
        Some(GameConfig::default().run.base_anchor)
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::PlayerTeleported { .. })));

    let record = query::save_data(&world);
    assert_eq!(record.total_runs_failed, 1);
    assert_eq!(record.total_runs_completed, 0);
}

#[test]
fn rest_timer_expiry_starts_the_next_session() {
    let mut config = GameConfig::default();
    config.waves.session_wave_target = 1;
    let mut world = World::new(config);
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 1);
    let _ = kill(&mut world, agents[0]);
    assert_eq!(query::run_state(&world), RunState::BetweenSessions);

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(60),
        },
    );
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::SessionStarted { session } if session.get() == 2)));
    assert_eq!(query::run_state(&world), RunState::WaveSession);
}

#[test]
fn explicit_continuation_skips_the_rest_timer() {
    let mut config = GameConfig::default();
    config.waves.session_wave_target = 1;
    let mut world = World::new(config);
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 1);
    let _ = kill(&mut world, agents[0]);

    let events = run(&mut world, Command::StartNextSession);
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::SessionStarted { session } if session.get() == 2)));
}

#[test]
fn continuation_outside_the_rest_interval_is_rejected() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let events = run(&mut world, Command::StartNextSession);
    assert_eq!(
        events,
        vec![Event::CommandRejected {
            reason: RejectReason::NotBetweenSessions,
        }]
    );
}

#[test]
fn ending_the_run_cancels_the_rest_timer() {
    let mut config = GameConfig::default();
    config.waves.session_wave_target = 1;
    let mut world = World::new(config);
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 1);
    let _ = kill(&mut world, agents[0]);
    assert_eq!(query::run_state(&world), RunState::BetweenSessions);

    let _ = run(&mut world, Command::EndRun { victory: false });
    assert_eq!(query::rest_timer(&world), Duration::ZERO);

    let events = run(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(600),
        },
    );
    assert!(
        !events
            .iter()
            .any(|event| matches!(event, Event::SessionStarted { .. })),
        "the countdown must not fire after the run ended"
    );
}

#[test]
fn run_settlement_happens_at_most_once() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let first = run(&mut world, Command::EndRun { victory: true });
    assert!(first
        .iter()
        .any(|event| matches!(event, Event::RunEnded { .. })));
    let settled = query::essence(&world);

    let second = run(&mut world, Command::EndRun { victory: true });
    assert_eq!(
        second,
        vec![Event::CommandRejected {
            reason: RejectReason::RunNotActive,
        }]
    );
    assert_eq!(query::essence(&world), settled);
}

#[test]
fn reaching_the_victory_session_target_settles_with_the_victory_bonus() {
    let mut config = GameConfig::default();
    config.waves.session_wave_target = 1;
    config.run.victory_session_target = Some(1);
    let mut world = World::new(config);
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 1);
    let events = kill(&mut world, agents[0]);

    let ended = events.iter().find_map(|event| match event {
        Event::RunEnded { outcome, summary } => Some((*outcome, *summary)),
        _ => None,
    });
    let (outcome, summary) = ended.expect("victory should end the run");
    assert_eq!(outcome, RunOutcome::Victory);
    // zone 0 held (100) plus the flat victory bonus (150)
    assert_eq!(summary.settlement, 250);

    let record = query::save_data(&world);
    assert_eq!(record.total_runs_completed, 1);
}

#[test]
fn upgrade_purchases_spend_essence_and_persist_levels() {
    let save = SaveData {
        essence: 500,
        ..SaveData::default()
    };
    let mut world = World::restore(GameConfig::default(), &save);

    for expected_cost in [50, 100, 150] {
        let events = run(
            &mut world,
            Command::PurchaseUpgrade {
                stat: UpgradeKind::Damage,
            },
        );
        assert!(events.iter().any(|event| matches!(
            event,
            Event::UpgradePurchased { stat: UpgradeKind::Damage, cost, .. } if *cost == expected_cost
        )));
    }

    // base 10 plus three levels at 5 damage each
    assert!((query::stats(&world).damage() - 25.0).abs() < f32::EPSILON);
    let record = query::save_data(&world);
    assert_eq!(record.damage_level, 3);
    assert_eq!(record.essence, 200);
}

#[test]
fn underfunded_purchase_is_rejected_and_changes_nothing() {
    let save = SaveData {
        essence: 49,
        ..SaveData::default()
    };
    let mut world = World::restore(GameConfig::default(), &save);

    let events = run(
        &mut world,
        Command::PurchaseUpgrade {
            stat: UpgradeKind::Damage,
        },
    );
    assert_eq!(
        events,
        vec![Event::PurchaseRejected {
            needed: 50,
            available: 49,
        }]
    );
    assert_eq!(query::essence(&world), 49);
    assert_eq!(query::save_data(&world).damage_level, 0);
}

#[test]
fn level_ups_apply_automatic_temporary_bonuses() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let baseline = query::stats(&world).damage();
    let events = run(&mut world, Command::GrantExperience { amount: 100 });
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::LevelUp { level: 2, milestone: false })));

    // +2 flat damage scaled by the zone-0 damage bonus of 15%
    let expected = baseline + 2.0 * 1.15;
    assert!((query::stats(&world).damage() - expected).abs() < 1e-4);
}

#[test]
fn starting_a_new_run_resets_run_scoped_state() {
    let mut world = World::new(GameConfig::default());
    let _ = run(&mut world, Command::StartRun);

    let agents = spawn_wave(&mut world, 1, 3);
    for agent in agents {
        let _ = kill(&mut world, agent);
    }
    let _ = run(&mut world, Command::GrantExperience { amount: 100 });
    let _ = run(
        &mut world,
        Command::DamageObjective {
            zone: ZoneIndex::new(0),
            amount: 600.0,
        },
    );
    assert!(query::gold(&world) > 0);

    let _ = run(&mut world, Command::EndRun { victory: false });
    let events = run(&mut world, Command::StartRun);
    assert!(events.contains(&Event::RunStarted));

    assert_eq!(query::gold(&world), 0);
    assert_eq!(query::experience(&world).level, 1);
    let zones = query::zone_view(&world);
    assert!(zones[0].active && !zones[0].destroyed);
    assert!((zones[0].objective_health - zones[0].objective_max).abs() < f32::EPSILON);
    assert!(query::agent_view(&world).is_empty());

    // essence earned before the reset survives into the new run
    assert!(query::essence(&world) > 0);
}
