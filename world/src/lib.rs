#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Gatefall.
//!
//! The world owns the run state machine, the defense-zone chain, the
//! hostile-agent registry, per-wave membership bookkeeping, the economy and
//! the stat ledger. All mutation flows through [`apply`], which executes one
//! [`Command`] deterministically and broadcasts the resulting [`Event`]s.

mod agents;
mod economy;
mod experience;
mod stats;
mod waves;
mod zones;

pub use stats::StatLedger;

use std::time::Duration;

use agents::AgentRegistry;
use economy::Economy;
use experience::ExperienceTrack;
use gatefall_core::{
    AgentId, BonusKind, Command, Event, GameConfig, RejectReason, RunOutcome, RunState,
    RunSummary, SaveData, SessionIndex, TargetKind, WaveNumber, WorldPoint, ZoneIndex,
    WELCOME_BANNER,
};
use waves::{SpawnRegistration, WaveLedger};
use zones::{DamageOutcome, ZoneChain};

/// Lifetime counters mirrored into the persisted save record.
#[derive(Clone, Copy, Debug, Default)]
struct LifetimeCounters {
    runs_completed: u32,
    runs_failed: u32,
    enemies_killed: u32,
    highest_wave: u32,
}

/// Represents the authoritative Gatefall world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: GameConfig,
    state: RunState,
    run_active: bool,
    session: SessionIndex,
    rest_timer: Duration,
    last_outcome: Option<RunOutcome>,
    player: Option<WorldPoint>,
    agents: AgentRegistry,
    zones: ZoneChain,
    waves: WaveLedger,
    economy: Economy,
    stats: StatLedger,
    experience: ExperienceTrack,
    kills_this_run: u32,
    highest_wave_this_run: u32,
    sessions_completed: u32,
    counters: LifetimeCounters,
}

impl World {
    /// Creates a world with no persisted progression.
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self::restore(config, &SaveData::default())
    }

    /// Creates a world seeded from a persisted save record.
    #[must_use]
    pub fn restore(config: GameConfig, save: &SaveData) -> Self {
        let zones = ZoneChain::from_tuning(&config.run.zones);
        let stats = StatLedger::from_save(config.stats.clone(), save);
        let experience = ExperienceTrack::new(config.experience.clone());
        let player = Some(config.run.base_anchor);
        Self {
            banner: WELCOME_BANNER,
            state: RunState::PreRunMenu,
            run_active: false,
            session: SessionIndex::new(0),
            rest_timer: Duration::ZERO,
            last_outcome: None,
            player,
            agents: AgentRegistry::new(),
            zones,
            waves: WaveLedger::new(),
            economy: Economy::with_essence(save.essence),
            stats,
            experience,
            kills_this_run: 0,
            highest_wave_this_run: 0,
            sessions_completed: 0,
            counters: LifetimeCounters {
                runs_completed: save.total_runs_completed,
                runs_failed: save.total_runs_failed,
                enemies_killed: save.total_enemies_killed,
                highest_wave: save.highest_wave_reached,
            },
            config,
        }
    }

    fn push_currency(&self, out: &mut Vec<Event>) {
        out.push(Event::CurrencyChanged {
            gold: self.economy.gold(),
            essence: self.economy.essence(),
        });
    }

    fn start_run(&mut self, out: &mut Vec<Event>) {
        if self.run_active {
            out.push(Event::CommandRejected {
                reason: RejectReason::RunAlreadyActive,
            });
            return;
        }

        self.run_active = true;
        self.session = SessionIndex::new(0);
        self.last_outcome = None;
        self.kills_this_run = 0;
        self.highest_wave_this_run = 0;
        self.sessions_completed = 0;
        self.rest_timer = Duration::ZERO;

        self.economy.reset_in_run();
        self.stats.reset_temporary();
        self.experience.reset();
        self.zones.reset();
        self.agents.clear();
        self.waves.session_reset();

        out.push(Event::RunStarted);
        self.push_currency(out);
        self.apply_active_zone_bonuses(ZoneIndex::new(0), out);
        self.start_next_session(out);
    }

    fn start_next_session(&mut self, out: &mut Vec<Event>) {
        self.session = SessionIndex::new(self.session.get() + 1);
        self.state = RunState::WaveSession;
        self.rest_timer = Duration::ZERO;
        self.waves.session_reset();
        out.push(Event::SessionStarted {
            session: self.session,
        });
    }

    fn complete_session(&mut self, out: &mut Vec<Event>) {
        let held = self.held_zone_index();
        let multiplier = table_value(&self.config.rewards.session_gold_multipliers, held);
        let reward = self.config.rewards.session_gold_base.saturating_mul(multiplier);
        self.economy.add_gold(reward);
        self.push_currency(out);
        self.sessions_completed += 1;
        out.push(Event::SessionCompleted {
            session: self.session,
            reward,
        });

        if let Some(target) = self.config.run.victory_session_target {
            if self.session.get() >= target {
                self.end_run(RunOutcome::Victory, out);
                return;
            }
        }

        self.state = RunState::BetweenSessions;
        self.rest_timer = Duration::from_millis(self.config.run.between_sessions_ms);
        out.push(Event::RestTimerTick {
            remaining: self.rest_timer,
        });
    }

    fn end_run(&mut self, outcome: RunOutcome, out: &mut Vec<Event>) {
        if !self.run_active {
            return;
        }

        self.run_active = false;
        self.state = RunState::PreRunMenu;
        self.rest_timer = Duration::ZERO;
        self.last_outcome = Some(outcome);
        self.agents.clear();
        self.waves.session_reset();

        let anchor = self.config.run.base_anchor;
        self.player = Some(anchor);
        out.push(Event::PlayerTeleported { position: anchor });

        let held = self.held_zone_index();
        let mut settlement = table_value(&self.config.rewards.zone_held_essence, held);
        if outcome == RunOutcome::Victory {
            settlement = settlement.saturating_add(self.config.rewards.victory_essence);
        }
        if settlement > 0 {
            self.economy.add_essence(settlement);
            self.push_currency(out);
        }

        match outcome {
            RunOutcome::Victory => self.counters.runs_completed += 1,
            RunOutcome::Defeat => self.counters.runs_failed += 1,
        }

        out.push(Event::RunEnded {
            outcome,
            summary: RunSummary {
                sessions_completed: self.sessions_completed,
                highest_wave: self.highest_wave_this_run,
                enemies_killed: self.kills_this_run,
                essence_earned: self.economy.essence_earned_run(),
                settlement,
            },
        });
    }

    fn held_zone_index(&self) -> ZoneIndex {
        self.zones
            .active_index()
            .or_else(|| self.zones.last_index())
            .unwrap_or(ZoneIndex::new(0))
    }

    fn tick(&mut self, dt: Duration, out: &mut Vec<Event>) {
        out.push(Event::TimeAdvanced { dt });

        match self.state {
            RunState::BetweenSessions if self.run_active => {
                self.rest_timer = self.rest_timer.saturating_sub(dt);
                out.push(Event::RestTimerTick {
                    remaining: self.rest_timer,
                });
                if self.rest_timer.is_zero() {
                    self.start_next_session(out);
                }
            }
            RunState::WaveSession if self.run_active => {
                self.tick_agents(dt, out);
            }
            _ => {}
        }
    }

    fn tick_agents(&mut self, dt: Duration, out: &mut Vec<Event>) {
        let tuning = self.config.agents.clone();
        let dt_seconds = dt.as_secs_f32();

        for id in self.agents.ids() {
            let Some(agent) = self.agents.get(id) else {
                continue;
            };
            let goal = match agent.target {
                TargetKind::Player => self.player,
                TargetKind::Objective(zone) => self
                    .zones
                    .zone(zone)
                    .filter(|zone| !zone.is_destroyed())
                    .map(|zone| zone.position()),
                TargetKind::Idle => None,
            };

            let mut strike = None;
            {
                let Some(agent) = self.agents.get_mut(id) else {
                    continue;
                };
                agent.cooldown = agent.cooldown.saturating_sub(dt);
                let Some(goal) = goal else {
                    continue;
                };
                if agent.position.distance_to(goal) > tuning.stopping_distance {
                    agent.position = agent
                        .position
                        .step_toward(goal, tuning.move_speed * dt_seconds);
                }
                if agent.position.distance_to(goal) <= tuning.attack_range
                    && agent.cooldown.is_zero()
                {
                    agent.cooldown = Duration::from_millis(tuning.attack_cooldown_ms);
                    strike = Some(agent.target);
                }
            }

            match strike {
                Some(TargetKind::Objective(zone)) => {
                    self.apply_objective_damage(zone, tuning.attack_damage, out);
                }
                Some(TargetKind::Player) => out.push(Event::PlayerAttacked {
                    agent: id,
                    damage: tuning.attack_damage,
                }),
                _ => {}
            }
        }
    }

    fn apply_objective_damage(&mut self, zone: ZoneIndex, amount: f32, out: &mut Vec<Event>) {
        match self.zones.damage_objective(zone, amount) {
            DamageOutcome::Damaged { remaining, max } => {
                out.push(Event::ObjectiveDamaged {
                    zone,
                    remaining,
                    max,
                });
            }
            DamageOutcome::Destroyed { max } => {
                out.push(Event::ObjectiveDamaged {
                    zone,
                    remaining: 0.0,
                    max,
                });
                out.push(Event::ObjectiveDestroyed { zone });
                self.fall_back(zone, out);
            }
            DamageOutcome::AlreadyDestroyed => {}
        }
    }

    fn fall_back(&mut self, lost: ZoneIndex, out: &mut Vec<Event>) {
        // retire is the one-shot guard: a second destruction report of the
        // same objective must not trigger a second fallback
        if !self.zones.retire(lost) {
            return;
        }

        self.stats.clear_zone_bonus();
        out.push(Event::StatsChanged);

        match self.zones.next_index(lost) {
            Some(next) => {
                self.apply_active_zone_bonuses(next, out);
                let retargeted = self.agents.retarget_all(TargetKind::Objective(next));
                out.push(Event::ZoneFallback {
                    from: lost,
                    to: Some(next),
                    retargeted,
                });
            }
            None => {
                out.push(Event::ZoneFallback {
                    from: lost,
                    to: None,
                    retargeted: 0,
                });
                self.end_run(RunOutcome::Defeat, out);
            }
        }
    }

    fn apply_active_zone_bonuses(&mut self, index: ZoneIndex, out: &mut Vec<Event>) {
        if !self.zones.activate(index) {
            return;
        }
        let Some(zone) = self.zones.zone(index) else {
            return;
        };
        let (damage, attack_speed, move_speed) = zone.bonuses();
        self.stats.set_zone_bonus(damage, attack_speed, move_speed);
        out.push(Event::ZoneActivated { zone: index });
        out.push(Event::StatsChanged);
    }

    fn begin_wave(&mut self, wave: WaveNumber, target_count: u32, out: &mut Vec<Event>) {
        if self.state != RunState::WaveSession {
            out.push(Event::CommandRejected {
                reason: RejectReason::NotInWaveSession,
            });
            return;
        }
        // re-announcing an open wave is a no-op
        if !self.waves.begin(wave, target_count) {
            return;
        }

        self.highest_wave_this_run = self.highest_wave_this_run.max(wave.get());
        self.counters.highest_wave = self.counters.highest_wave.max(wave.get());
        out.push(Event::WaveStarted { wave, target_count });
    }

    fn spawn_agent(&mut self, wave: WaveNumber, position: WorldPoint, out: &mut Vec<Event>) {
        if self.state != RunState::WaveSession {
            out.push(Event::CommandRejected {
                reason: RejectReason::NotInWaveSession,
            });
            return;
        }
        match self.waves.probe(wave) {
            SpawnRegistration::UnknownWave => {
                out.push(Event::CommandRejected {
                    reason: RejectReason::UnknownWave { wave },
                });
            }
            SpawnRegistration::FullySpawned => {
                out.push(Event::CommandRejected {
                    reason: RejectReason::WaveFullySpawned { wave },
                });
            }
            SpawnRegistration::Accepted => {
                let target = self
                    .zones
                    .active_index()
                    .map(TargetKind::Objective)
                    .unwrap_or(TargetKind::Player);
                let agent =
                    self.agents
                        .spawn(wave, position, self.config.agents.max_health, target);
                let _ = self.waves.register_spawn(wave, agent);
                out.push(Event::AgentSpawned {
                    agent,
                    wave,
                    position,
                });
            }
        }
    }

    fn damage_agent(&mut self, agent: AgentId, amount: f32, out: &mut Vec<Event>) {
        let Some(state) = self.agents.get_mut(agent) else {
            out.push(Event::CommandRejected {
                reason: RejectReason::UnknownAgent { agent },
            });
            return;
        };

        state.health = (state.health - amount).max(0.0);
        if state.health > 0.0 {
            return;
        }

        let wave = state.wave;
        let _ = self.agents.remove(agent);
        self.kills_this_run += 1;
        self.counters.enemies_killed = self.counters.enemies_killed.saturating_add(1);

        let bounty = self.config.rewards.gold_per_kill;
        if bounty > 0 {
            self.economy.add_gold(bounty);
            self.push_currency(out);
        }
        out.push(Event::AgentDied { agent, wave });
        self.grant_experience(self.config.rewards.xp_per_kill, out);

        // membership pruning precedes the clearance check by construction
        if self.waves.remove_member(wave, agent) {
            let reward = self.config.rewards.essence_per_wave;
            self.economy.add_essence(reward);
            self.push_currency(out);
            out.push(Event::WaveCleared { wave, reward });

            if self.state == RunState::WaveSession
                && self
                    .waves
                    .session_complete(self.config.waves.session_wave_target)
            {
                self.complete_session(out);
            }
        }
    }

    fn grant_experience(&mut self, amount: u32, out: &mut Vec<Event>) {
        if amount == 0 {
            return;
        }
        let gains = self.experience.grant(amount);
        if gains.is_empty() {
            return;
        }

        let tuning = self.config.experience.clone();
        let mut stats_changed = false;
        for gain in gains {
            if gain.milestone {
                out.push(Event::LevelUp {
                    level: gain.level,
                    milestone: true,
                });
            } else {
                self.stats.add_temporary(BonusKind::Damage, tuning.auto_damage);
                self.stats
                    .add_temporary(BonusKind::MaxHealth, tuning.auto_max_health);
                self.stats
                    .add_temporary(BonusKind::MoveSpeed, tuning.auto_move_speed);
                stats_changed = true;
                out.push(Event::LevelUp {
                    level: gain.level,
                    milestone: false,
                });
            }
        }
        if stats_changed {
            out.push(Event::StatsChanged);
        }
    }

    fn purchase_upgrade(&mut self, stat: gatefall_core::UpgradeKind, out: &mut Vec<Event>) {
        let cost = self.stats.upgrade_cost(stat);
        if !self.economy.spend_essence(cost) {
            out.push(Event::PurchaseRejected {
                needed: cost,
                available: self.economy.essence(),
            });
            return;
        }
        let level = self.stats.raise_level(stat);
        self.push_currency(out);
        out.push(Event::UpgradePurchased { stat, level, cost });
        out.push(Event::StatsChanged);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => world.tick(dt, out_events),
        Command::StartRun => world.start_run(out_events),
        Command::StartNextSession => {
            if !world.run_active {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::RunNotActive,
                });
            } else if world.state != RunState::BetweenSessions {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::NotBetweenSessions,
                });
            } else {
                world.start_next_session(out_events);
            }
        }
        Command::EndRun { victory } => {
            if !world.run_active {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::RunNotActive,
                });
            } else {
                let outcome = if victory {
                    RunOutcome::Victory
                } else {
                    RunOutcome::Defeat
                };
                world.end_run(outcome, out_events);
            }
        }
        Command::BeginWave { wave, target_count } => {
            world.begin_wave(wave, target_count, out_events);
        }
        Command::SpawnAgent { wave, position } => {
            world.spawn_agent(wave, position, out_events);
        }
        Command::DamageAgent { agent, amount } => {
            world.damage_agent(agent, amount, out_events);
        }
        Command::DamageObjective { zone, amount } => {
            if !world.run_active {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::RunNotActive,
                });
            } else if world.zones.zone(zone).is_none() {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::UnknownZone { zone },
                });
            } else {
                world.apply_objective_damage(zone, amount, out_events);
            }
        }
        Command::RetargetAgent { agent, target } => {
            // the targeting system may race a death in the same batch, so a
            // missing agent is not worth a rejection event
            if let Some(state) = world.agents.get_mut(agent) {
                state.target = target;
            }
        }
        Command::SetPlayerPosition { position } => {
            world.player = Some(position);
        }
        Command::GrantGold { amount } => {
            if !world.run_active {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::RunNotActive,
                });
            } else {
                world.economy.add_gold(amount);
                world.push_currency(out_events);
            }
        }
        Command::SpendGold { amount } => {
            if world.economy.spend_gold(amount) {
                world.push_currency(out_events);
            } else {
                out_events.push(Event::PurchaseRejected {
                    needed: amount,
                    available: world.economy.gold(),
                });
            }
        }
        Command::GrantExperience { amount } => {
            if !world.run_active {
                out_events.push(Event::CommandRejected {
                    reason: RejectReason::RunNotActive,
                });
            } else {
                world.grant_experience(amount, out_events);
            }
        }
        Command::PurchaseUpgrade { stat } => world.purchase_upgrade(stat, out_events),
        Command::AddTemporaryBonus { bonus, amount } => {
            world.stats.add_temporary(bonus, amount);
            out_events.push(Event::StatsChanged);
        }
    }
}

fn table_value(table: &[u32], index: ZoneIndex) -> u32 {
    let position = index.get() as usize;
    table
        .get(position)
        .or_else(|| table.last())
        .copied()
        .unwrap_or(0)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{StatLedger, World};
    use gatefall_core::{
        AgentSnapshot, AgentView, RunOutcome, RunState, SaveData, SessionIndex, SpawnContext,
        UpgradeKind, WaveNumber, WorldPoint, ZoneIndex,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Current state of the run lifecycle.
    #[must_use]
    pub fn run_state(world: &World) -> RunState {
        world.state
    }

    /// Whether a run is currently active.
    #[must_use]
    pub fn run_active(world: &World) -> bool {
        world.run_active
    }

    /// One-based index of the current session.
    #[must_use]
    pub fn session_index(world: &World) -> SessionIndex {
        world.session
    }

    /// Remaining rest time between sessions.
    #[must_use]
    pub fn rest_timer(world: &World) -> Duration {
        world.rest_timer
    }

    /// Outcome of the most recently ended run, if any.
    #[must_use]
    pub fn last_outcome(world: &World) -> Option<RunOutcome> {
        world.last_outcome
    }

    /// Current player position, if a player entity is known.
    #[must_use]
    pub fn player_position(world: &World) -> Option<WorldPoint> {
        world.player
    }

    /// Captures a read-only view of every live hostile agent.
    #[must_use]
    pub fn agent_view(world: &World) -> AgentView {
        let snapshots: Vec<AgentSnapshot> = world
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                position: agent.position,
                target: agent.target,
                wave: agent.wave,
                health: agent.health,
            })
            .collect();
        AgentView::from_snapshots(snapshots)
    }

    /// Immutable description of a single defense zone.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ZoneSnapshot {
        /// Zero-based position of the zone within the chain.
        pub index: ZoneIndex,
        /// Center of the zone on the ground plane.
        pub position: WorldPoint,
        /// Whether the zone is the currently defended one.
        pub active: bool,
        /// Whether the zone's objective was destroyed this run.
        pub destroyed: bool,
        /// Health the objective has remaining.
        pub objective_health: f32,
        /// Maximum health of the objective.
        pub objective_max: f32,
    }

    /// Captures the whole defense-zone chain in order.
    #[must_use]
    pub fn zone_view(world: &World) -> Vec<ZoneSnapshot> {
        world
            .zones
            .iter()
            .map(|zone| ZoneSnapshot {
                index: zone.index(),
                position: zone.position(),
                active: zone.is_active(),
                destroyed: zone.is_destroyed(),
                objective_health: zone.objective().current(),
                objective_max: zone.objective().max(),
            })
            .collect()
    }

    /// Snapshot of the currently active zone, if one exists.
    #[must_use]
    pub fn active_zone(world: &World) -> Option<ZoneSnapshot> {
        let index = world.zones.active_index()?;
        zone_view(world)
            .into_iter()
            .find(|zone| zone.index == index)
    }

    /// Immutable description of one open wave.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct WaveSnapshot {
        /// Run-wide number of the wave.
        pub wave: WaveNumber,
        /// Number of agents the wave will spawn in total.
        pub target_count: u32,
        /// Number of agents spawned so far.
        pub spawned: u32,
        /// Number of members currently alive.
        pub live: u32,
    }

    /// Progress of the current session's waves.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct WaveProgress {
        /// Waves begun since the session started.
        pub begun: u32,
        /// Waves cleared since the session started.
        pub cleared: u32,
        /// Number of waves that make up the session.
        pub session_wave_target: u32,
        /// Waves that still hold live or unspawned members.
        pub open: Vec<WaveSnapshot>,
    }

    /// Captures per-wave membership progress for the current session.
    #[must_use]
    pub fn wave_progress(world: &World) -> WaveProgress {
        WaveProgress {
            begun: world.waves.begun_this_session(),
            cleared: world.waves.cleared_this_session(),
            session_wave_target: world.config.waves.session_wave_target,
            open: world
                .waves
                .iter()
                .map(|(number, record)| WaveSnapshot {
                    wave: *number,
                    target_count: record.target_count(),
                    spawned: record.spawned(),
                    live: record.live_count(),
                })
                .collect(),
        }
    }

    /// Run-scoped Gold balance.
    #[must_use]
    pub fn gold(world: &World) -> u32 {
        world.economy.gold()
    }

    /// Persistent Essence balance.
    #[must_use]
    pub fn essence(world: &World) -> u32 {
        world.economy.essence()
    }

    /// Read-only access to the stat ledger and its derived values.
    #[must_use]
    pub fn stats(world: &World) -> &StatLedger {
        &world.stats
    }

    /// Snapshot of the in-run experience track.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ExperienceSnapshot {
        /// Current level of the track.
        pub level: u32,
        /// Experience accumulated toward the next level.
        pub current: u32,
        /// Experience required for the next level.
        pub required: u32,
    }

    /// Captures the in-run experience track.
    #[must_use]
    pub fn experience(world: &World) -> ExperienceSnapshot {
        let (current, required) = world.experience.progress();
        ExperienceSnapshot {
            level: world.experience.level(),
            current,
            required,
        }
    }

    /// Anchoring information for the wave-emission system.
    ///
    /// The anchor prefers the configured global override, then the active
    /// zone, then the player's own position.
    #[must_use]
    pub fn spawn_context(world: &World) -> SpawnContext {
        let zone_anchor = world
            .zones
            .active_index()
            .and_then(|index| world.zones.zone(index))
            .map(|zone| zone.position());
        let anchor = world
            .config
            .run
            .spawn_anchor_override
            .or(zone_anchor)
            .or(world.player);
        SpawnContext {
            player: world.player,
            anchor,
        }
    }

    /// Assembles the persisted save record from the current world state.
    #[must_use]
    pub fn save_data(world: &World) -> SaveData {
        SaveData {
            essence: world.economy.essence(),
            move_speed_level: world.stats.level(UpgradeKind::MoveSpeed),
            max_health_level: world.stats.level(UpgradeKind::MaxHealth),
            damage_level: world.stats.level(UpgradeKind::Damage),
            crit_chance_level: world.stats.level(UpgradeKind::CritChance),
            crit_damage_level: world.stats.level(UpgradeKind::CritDamage),
            attack_range_level: world.stats.level(UpgradeKind::AttackRange),
            total_runs_completed: world.counters.runs_completed,
            total_runs_failed: world.counters.runs_failed,
            total_enemies_killed: world.counters.enemies_killed,
            highest_wave_reached: world.counters.highest_wave,
        }
    }
}
