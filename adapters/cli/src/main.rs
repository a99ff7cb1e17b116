#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots and drives the Gatefall engine headlessly.
//!
//! The binary builds one world plus one instance of each pure system, then
//! runs the deterministic pump: every tick it applies `Command::Tick`, feeds
//! the resulting events to the systems, applies the commands they emit, and
//! repeats until the batch settles. A scripted combat driver stands in for
//! the player so whole runs play out without any presentation layer.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gatefall_core::{Command, Event, GameConfig, RunState, UpgradeKind};
use gatefall_save::{FileStore, MemoryStore, SaveStore};
use gatefall_system_targeting::{Config as TargetingConfig, TargetAcquisition};
use gatefall_system_waves::{Config as WaveConfig, WaveDirector};
use gatefall_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Headless driver for the Gatefall progression engine.
#[derive(Debug, Parser)]
#[command(name = "gatefall", about = "Run a scripted Gatefall session headlessly")]
struct Args {
    /// Path of the persistent save file.
    #[arg(long, default_value = "gatefall-save.json")]
    save: PathBuf,

    /// Optional TOML tuning file overriding the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for every stochastic draw in the simulation.
    #[arg(long, default_value_t = 0x6a7e_fa11)]
    seed: u64,

    /// Number of fixed ticks to simulate.
    #[arg(long, default_value_t = 20_000)]
    ticks: u64,

    /// Simulated milliseconds per tick.
    #[arg(long, default_value_t = 100)]
    tick_ms: u64,

    /// End the run victoriously after this many completed sessions.
    #[arg(long, default_value_t = 2)]
    win_after_sessions: u32,

    /// Keep progression in memory instead of touching the save file.
    #[arg(long)]
    ephemeral: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    config.run.victory_session_target = Some(args.win_after_sessions);

    let store: Box<dyn SaveStore> = if args.ephemeral {
        Box::new(MemoryStore::default())
    } else {
        Box::new(FileStore::new(args.save.clone()))
    };
    let save = store.load().context("failed to load the save record")?;

    let mut world = World::restore(config.clone(), &save);
    let mut director = WaveDirector::new(WaveConfig::new(&config.waves, args.seed));
    let mut targeting =
        TargetAcquisition::new(TargetingConfig::new(config.agents.priority_radius));
    let mut driver = CombatDriver::new(args.seed);

    println!("{}", query::welcome_banner(&world));
    println!(
        "essence {} | runs won {} | runs lost {} | highest wave {}",
        save.essence,
        save.total_runs_completed,
        save.total_runs_failed,
        save.highest_wave_reached
    );

    pump(
        &mut world,
        &mut director,
        &mut targeting,
        Command::StartRun,
        store.as_ref(),
    )?;

    let dt = Duration::from_millis(args.tick_ms);
    for _ in 0..args.ticks {
        pump(
            &mut world,
            &mut director,
            &mut targeting,
            Command::Tick { dt },
            store.as_ref(),
        )?;

        for command in driver.plan(&world, dt) {
            pump(&mut world, &mut director, &mut targeting, command, store.as_ref())?;
        }

        if !query::run_active(&world) {
            break;
        }
    }

    if query::run_active(&world) {
        pump(
            &mut world,
            &mut director,
            &mut targeting,
            Command::EndRun { victory: false },
            store.as_ref(),
        )?;
    }

    let record = query::save_data(&world);
    store
        .store(&record)
        .context("failed to persist the save record")?;
    if let Some(outcome) = query::last_outcome(&world) {
        println!("last run outcome: {outcome:?}");
    }
    println!(
        "saved: essence {} | runs won {} | runs lost {} | highest wave {}",
        record.essence,
        record.total_runs_completed,
        record.total_runs_failed,
        record.highest_wave_reached
    );
    for stat in UpgradeKind::ALL {
        println!("  {stat:?} level {}", record.level(stat));
    }
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Applies one command and keeps exchanging events and system commands until
/// the batch settles, printing and persisting along the way.
fn pump(
    world: &mut World,
    director: &mut WaveDirector,
    targeting: &mut TargetAcquisition,
    command: Command,
    store: &dyn SaveStore,
) -> Result<()> {
    let mut events = Vec::new();
    world::apply(world, command, &mut events);

    loop {
        report(world, &events, store)?;

        let mut commands = Vec::new();
        director.handle(&events, query::spawn_context(world), &mut commands);

        let agents = query::agent_view(world);
        let active_zone = query::active_zone(world).map(|zone| zone.index);
        targeting.handle(
            &events,
            &agents,
            query::player_position(world),
            active_zone,
            &mut commands,
        );

        if commands.is_empty() {
            return Ok(());
        }

        events.clear();
        for command in commands {
            world::apply(world, command, &mut events);
        }
    }
}

fn report(world: &World, events: &[Event], store: &dyn SaveStore) -> Result<()> {
    let mut persist = false;
    for event in events {
        if let Some(line) = describe(event) {
            println!("{line}");
        }
        persist = persist
            || matches!(
                event,
                Event::WaveCleared { .. }
                    | Event::SessionCompleted { .. }
                    | Event::UpgradePurchased { .. }
                    | Event::RunEnded { .. }
            );
    }
    if persist {
        store
            .store(&query::save_data(world))
            .context("failed to persist the save record")?;
    }
    Ok(())
}

fn describe(event: &Event) -> Option<String> {
    match event {
        Event::RunStarted => Some("=== run started ===".to_owned()),
        Event::SessionStarted { session } => {
            Some(format!("--- session {} started ---", session.get()))
        }
        Event::WaveStarted { wave, target_count } => Some(format!(
            "wave {} incoming: {} hostiles",
            wave.get(),
            target_count
        )),
        Event::WaveCleared { wave, reward } => {
            Some(format!("wave {} cleared (+{} essence)", wave.get(), reward))
        }
        Event::SessionCompleted { session, reward } => Some(format!(
            "--- session {} complete (+{} gold) ---",
            session.get(),
            reward
        )),
        Event::ZoneActivated { zone } => Some(format!("zone {} active", zone.get() + 1)),
        Event::ObjectiveDestroyed { zone } => {
            Some(format!("zone {} objective destroyed!", zone.get() + 1))
        }
        Event::ZoneFallback {
            from,
            to,
            retargeted,
        } => Some(match to {
            Some(to) => format!(
                "falling back from zone {} to zone {} ({retargeted} hostiles redirected)",
                from.get() + 1,
                to.get() + 1
            ),
            None => format!("zone {} was the last line of defense", from.get() + 1),
        }),
        Event::LevelUp { level, milestone } => Some(if *milestone {
            format!("reached level {level} — milestone upgrade waiting")
        } else {
            format!("reached level {level}")
        }),
        Event::RunEnded { outcome, summary } => Some(format!(
            "=== run ended: {:?} | sessions {} | highest wave {} | kills {} | essence earned {} (settlement {}) ===",
            outcome,
            summary.sessions_completed,
            summary.highest_wave,
            summary.enemies_killed,
            summary.essence_earned,
            summary.settlement
        )),
        Event::CommandRejected { reason } => Some(format!("warning: command ignored ({reason:?})")),
        _ => None,
    }
}

/// Scripted stand-in for the player: holds the active objective and strikes
/// the nearest hostile in reach on a cadence derived from the stat ledger.
#[derive(Debug)]
struct CombatDriver {
    rng: ChaCha8Rng,
    swing_timer: Duration,
}

impl CombatDriver {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ 0x9e37_79b9),
            swing_timer: Duration::ZERO,
        }
    }

    fn plan(&mut self, world: &World, dt: Duration) -> Vec<Command> {
        let mut commands = Vec::new();
        if query::run_state(world) != RunState::WaveSession {
            return commands;
        }

        // stand at the objective being defended
        let player = query::player_position(world);
        if let Some(zone) = query::active_zone(world) {
            if player != Some(zone.position) {
                commands.push(Command::SetPlayerPosition {
                    position: zone.position,
                });
                return commands;
            }
        }

        let Some(player) = player else {
            return commands;
        };

        self.swing_timer = self.swing_timer.saturating_sub(dt);
        if !self.swing_timer.is_zero() {
            return commands;
        }

        let stats = query::stats(world);
        let reach = stats.attack_range();
        let nearest = query::agent_view(world)
            .into_vec()
            .into_iter()
            .filter(|agent| agent.position.distance_to(player) <= reach)
            .min_by(|a, b| {
                a.position
                    .distance_to(player)
                    .total_cmp(&b.position.distance_to(player))
            });

        if let Some(agent) = nearest {
            let damage = stats.final_damage(&mut self.rng);
            let swing_seconds = 1.0 / stats.attack_speed_multiplier().max(0.1);
            self.swing_timer = Duration::from_secs_f32(swing_seconds);
            commands.push(Command::DamageAgent {
                agent: agent.id,
                amount: damage,
            });
        }

        commands
    }
}
