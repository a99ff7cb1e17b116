#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Gatefall engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! for systems and presentation layers to react to deterministically. Systems
//! consume event streams, query immutable snapshots, and respond exclusively
//! with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Gatefall.";

/// Top-level state of the run lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunState {
    /// Staging state before a run starts and after it ends.
    PreRunMenu,
    /// A wave session is in progress and hostiles are being emitted.
    WaveSession,
    /// The rest interval between two wave sessions.
    BetweenSessions,
}

/// Terminal outcome recorded when a run ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunOutcome {
    /// The run ended with the configured victory condition met.
    Victory,
    /// The run ended with the final defense zone lost.
    Defeat,
}

/// Unique identifier assigned to a hostile agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Wave number, monotonically increasing across a whole run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WaveNumber(u32);

impl WaveNumber {
    /// Creates a new wave number wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying wave number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// One-based index of a wave session within a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionIndex(u32);

impl SessionIndex {
    /// Creates a new session index wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying session index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Zero-based position of a defense zone within the fallback chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ZoneIndex(u32);

impl ZoneIndex {
    /// Creates a new zone index wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying zone index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position on the playfield ground plane expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    x: f32,
    z: f32,
}

impl WorldPoint {
    /// Origin of the playfield.
    pub const ORIGIN: WorldPoint = WorldPoint::new(0.0, 0.0);

    /// Creates a new point from explicit coordinates.
    #[must_use]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Depth coordinate of the point.
    #[must_use]
    pub const fn z(&self) -> f32 {
        self.z
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(self, other: WorldPoint) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Returns the point advanced toward `target` by at most `step` units.
    ///
    /// Never overshoots: when `target` is closer than `step` the target
    /// itself is returned.
    #[must_use]
    pub fn step_toward(self, target: WorldPoint, step: f32) -> WorldPoint {
        let distance = self.distance_to(target);
        if distance <= step || distance == 0.0 {
            return target;
        }
        let scale = step / distance;
        WorldPoint::new(
            self.x + (target.x - self.x) * scale,
            self.z + (target.z - self.z) * scale,
        )
    }
}

/// Target a hostile agent is currently pursuing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The agent pursues the player entity.
    Player,
    /// The agent pursues the objective of the identified zone.
    Objective(ZoneIndex),
    /// The agent has nothing to pursue and holds position.
    Idle,
}

/// Persistent stats that can be upgraded with Essence between runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    /// Player movement speed.
    MoveSpeed,
    /// Player maximum health.
    MaxHealth,
    /// Player base attack damage.
    Damage,
    /// Chance for an attack to critically strike.
    CritChance,
    /// Damage multiplier applied on a critical strike.
    CritDamage,
    /// Reach of the player's attacks.
    AttackRange,
}

impl UpgradeKind {
    /// Every purchasable upgrade in presentation order.
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::MoveSpeed,
        UpgradeKind::MaxHealth,
        UpgradeKind::Damage,
        UpgradeKind::CritChance,
        UpgradeKind::CritDamage,
        UpgradeKind::AttackRange,
    ];
}

/// Run-scoped temporary bonuses applied by level-ups and consumed pickups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BonusKind {
    /// Additive move-speed fraction.
    MoveSpeed,
    /// Flat maximum-health increase.
    MaxHealth,
    /// Flat damage increase.
    Damage,
    /// Flat critical-chance increase.
    CritChance,
    /// Flat critical-damage-multiplier increase.
    CritDamage,
    /// Additive attack-speed fraction.
    AttackSpeed,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Starts a new run from the pre-run menu.
    StartRun,
    /// Ends the rest interval early and starts the next wave session.
    StartNextSession,
    /// Ends the active run with the provided outcome.
    EndRun {
        /// Whether the run counts as a victory.
        victory: bool,
    },
    /// Registers a new wave so its membership can be tracked.
    BeginWave {
        /// Run-wide number of the wave being opened.
        wave: WaveNumber,
        /// Number of agents the wave will spawn in total.
        target_count: u32,
    },
    /// Requests that a hostile agent join the identified wave.
    SpawnAgent {
        /// Wave whose membership set receives the agent.
        wave: WaveNumber,
        /// Ground-plane position the agent spawns at.
        position: WorldPoint,
    },
    /// Applies damage to a live hostile agent.
    DamageAgent {
        /// Identifier of the agent taking damage.
        agent: AgentId,
        /// Amount of health removed.
        amount: f32,
    },
    /// Applies damage to a zone's defense objective.
    DamageObjective {
        /// Zone whose objective takes damage.
        zone: ZoneIndex,
        /// Amount of health removed.
        amount: f32,
    },
    /// Changes the target a live agent is pursuing.
    RetargetAgent {
        /// Identifier of the agent being redirected.
        agent: AgentId,
        /// Target the agent should pursue from now on.
        target: TargetKind,
    },
    /// Moves the player entity to the provided position.
    SetPlayerPosition {
        /// New ground-plane position of the player.
        position: WorldPoint,
    },
    /// Grants run-scoped Gold, e.g. from an external pickup.
    GrantGold {
        /// Amount of Gold added.
        amount: u32,
    },
    /// Spends run-scoped Gold on an external purchase.
    SpendGold {
        /// Amount of Gold removed if the balance allows it.
        amount: u32,
    },
    /// Grants experience points toward the in-run level track.
    GrantExperience {
        /// Amount of experience added.
        amount: u32,
    },
    /// Purchases one level of a persistent upgrade with Essence.
    PurchaseUpgrade {
        /// Stat whose level the purchase raises.
        stat: UpgradeKind,
    },
    /// Applies a run-scoped temporary bonus to the stat ledger.
    AddTemporaryBonus {
        /// Stat dimension receiving the bonus.
        bonus: BonusKind,
        /// Amount added to the dimension's temporary bonus.
        amount: f32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that a fresh run began.
    RunStarted,
    /// Announces that a wave session began.
    SessionStarted {
        /// One-based index of the session within the run.
        session: SessionIndex,
    },
    /// Reports the remaining rest time between sessions.
    RestTimerTick {
        /// Time left before the next session starts automatically.
        remaining: Duration,
    },
    /// Confirms that a wave opened and will begin spawning.
    WaveStarted {
        /// Run-wide number of the wave.
        wave: WaveNumber,
        /// Number of agents the wave will spawn in total.
        target_count: u32,
    },
    /// Confirms that a hostile agent entered the world.
    AgentSpawned {
        /// Identifier assigned to the agent by the world.
        agent: AgentId,
        /// Wave whose membership set tracks the agent.
        wave: WaveNumber,
        /// Position the agent spawned at.
        position: WorldPoint,
    },
    /// Reports that a hostile agent died and left its wave.
    AgentDied {
        /// Identifier of the agent that died.
        agent: AgentId,
        /// Wave the agent belonged to.
        wave: WaveNumber,
    },
    /// Announces that every agent of a fully spawned wave is gone.
    WaveCleared {
        /// Run-wide number of the cleared wave.
        wave: WaveNumber,
        /// Essence granted for the clear.
        reward: u32,
    },
    /// Announces that every scheduled wave of the session cleared.
    SessionCompleted {
        /// One-based index of the completed session.
        session: SessionIndex,
        /// Gold granted for the completion.
        reward: u32,
    },
    /// Confirms that a defense zone became the active one.
    ZoneActivated {
        /// Index of the zone that activated.
        zone: ZoneIndex,
    },
    /// Reports a change to a zone objective's health.
    ObjectiveDamaged {
        /// Zone whose objective took damage.
        zone: ZoneIndex,
        /// Health remaining after the damage.
        remaining: f32,
        /// Maximum health of the objective.
        max: f32,
    },
    /// Reports that a zone objective was destroyed.
    ObjectiveDestroyed {
        /// Zone whose objective reached zero health.
        zone: ZoneIndex,
    },
    /// Announces a completed fallback from one zone to the next.
    ZoneFallback {
        /// Zone that was lost.
        from: ZoneIndex,
        /// Zone that took over, or `None` when the chain is exhausted.
        to: Option<ZoneIndex>,
        /// Number of live agents forcibly redirected to the new objective.
        retargeted: u32,
    },
    /// Reports that an agent struck the player entity.
    PlayerAttacked {
        /// Identifier of the attacking agent.
        agent: AgentId,
        /// Damage dealt to the player.
        damage: f32,
    },
    /// Confirms that the player was repositioned by the engine.
    PlayerTeleported {
        /// Position the player was moved to.
        position: WorldPoint,
    },
    /// Reports the currency balances after a mutation.
    CurrencyChanged {
        /// Run-scoped Gold balance.
        gold: u32,
        /// Persistent Essence balance.
        essence: u32,
    },
    /// Announces that derived stat values changed.
    StatsChanged,
    /// Confirms a successful persistent upgrade purchase.
    UpgradePurchased {
        /// Stat whose level was raised.
        stat: UpgradeKind,
        /// Level reached by the purchase.
        level: u32,
        /// Essence spent on the purchase.
        cost: u32,
    },
    /// Reports that a purchase failed because funds were insufficient.
    PurchaseRejected {
        /// Amount the purchase required.
        needed: u32,
        /// Amount that was actually available.
        available: u32,
    },
    /// Announces that the in-run level track advanced.
    LevelUp {
        /// Level that was reached.
        level: u32,
        /// Whether the level is a milestone awaiting an external choice.
        milestone: bool,
    },
    /// Announces that the run ended.
    RunEnded {
        /// Terminal outcome of the run.
        outcome: RunOutcome,
        /// Aggregate statistics for presentation and logging.
        summary: RunSummary,
    },
    /// Reports that a command was ignored, with the reason.
    CommandRejected {
        /// Specific reason the command could not be applied.
        reason: RejectReason,
    },
}

/// Reasons a command may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// `StartRun` arrived while a run was already active.
    RunAlreadyActive,
    /// A run-scoped command arrived while no run was active.
    RunNotActive,
    /// The command requires an active wave session.
    NotInWaveSession,
    /// `StartNextSession` arrived outside the rest interval.
    NotBetweenSessions,
    /// The referenced wave has no membership record.
    UnknownWave {
        /// Wave number that failed to resolve.
        wave: WaveNumber,
    },
    /// The referenced wave already spawned its full complement.
    WaveFullySpawned {
        /// Wave number that rejected the spawn.
        wave: WaveNumber,
    },
    /// The referenced agent does not exist or already died.
    UnknownAgent {
        /// Agent identifier that failed to resolve.
        agent: AgentId,
    },
    /// The referenced zone does not exist in the chain.
    UnknownZone {
        /// Zone index that failed to resolve.
        zone: ZoneIndex,
    },
}

/// Aggregate statistics reported when a run ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of sessions fully completed during the run.
    pub sessions_completed: u32,
    /// Highest wave number reached during the run.
    pub highest_wave: u32,
    /// Number of hostile agents killed during the run.
    pub enemies_killed: u32,
    /// Total Essence earned across the run, settlement included.
    pub essence_earned: u32,
    /// Essence newly granted by the end-of-run settlement.
    pub settlement: u32,
}

/// Immutable representation of a single agent's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    /// Unique identifier assigned to the agent.
    pub id: AgentId,
    /// Ground-plane position the agent currently occupies.
    pub position: WorldPoint,
    /// Target the agent is currently pursuing.
    pub target: TargetKind,
    /// Wave whose membership set tracks the agent.
    pub wave: WaveNumber,
    /// Health the agent has remaining.
    pub health: f32,
}

/// Read-only snapshot describing all live hostile agents.
#[derive(Clone, Debug, Default)]
pub struct AgentView {
    snapshots: Vec<AgentSnapshot>,
}

impl AgentView {
    /// Creates a new agent view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AgentSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured agent snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentSnapshot> {
        self.snapshots.iter()
    }

    /// Number of live agents captured by the view.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view captured no agents at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AgentSnapshot> {
        self.snapshots
    }
}

/// Anchoring information the wave-emission system samples spawn points from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnContext {
    /// Current player position, if a player entity is known.
    pub player: Option<WorldPoint>,
    /// Anchor future spawns should cluster around, if one is known.
    pub anchor: Option<WorldPoint>,
}

/// Tuning for wave emission cadence and spawn placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveTuning {
    /// Agents spawned by the first wave.
    pub initial_count: u32,
    /// Additional agents added per subsequent wave before rounding.
    pub per_wave_increment: f32,
    /// Milliseconds between the starts of consecutive waves.
    pub cadence_ms: u64,
    /// Milliseconds between individual spawns within one wave.
    pub stagger_ms: u64,
    /// Number of waves that make up one session.
    pub session_wave_target: u32,
    /// Radius of the ring spawn positions are sampled on.
    pub spawn_radius: f32,
    /// Minimum distance a spawn position must keep from the player.
    pub min_player_distance: f32,
    /// Resampling budget before the last candidate is used regardless.
    pub max_placement_attempts: u32,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            initial_count: 3,
            per_wave_increment: 2.0,
            cadence_ms: 5_000,
            stagger_ms: 500,
            session_wave_target: 10,
            spawn_radius: 15.0,
            min_player_distance: 8.0,
            max_placement_attempts: 30,
        }
    }
}

/// Tuning for a single defense zone in the fallback chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneTuning {
    /// Center of the zone; spawns anchor here while the zone is active.
    pub position: WorldPoint,
    /// Maximum health of the zone's defense objective.
    pub objective_health: f32,
    /// Damage multiplier fraction granted while the zone is held.
    pub damage_bonus: f32,
    /// Attack-speed multiplier fraction granted while the zone is held.
    pub attack_speed_bonus: f32,
    /// Move-speed multiplier fraction granted while the zone is held.
    pub move_speed_bonus: f32,
}

/// Tuning for the run lifecycle and the defense-zone chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    /// Ordered defense-zone chain, first entry active at run start.
    pub zones: Vec<ZoneTuning>,
    /// Milliseconds of rest between two sessions.
    pub between_sessions_ms: u64,
    /// Sessions to complete for victory; `None` plays until defeat.
    pub victory_session_target: Option<u32>,
    /// Anchor the player is teleported to when a run ends.
    pub base_anchor: WorldPoint,
    /// Optional global override for the wave spawn anchor.
    pub spawn_anchor_override: Option<WorldPoint>,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            zones: vec![
                ZoneTuning {
                    position: WorldPoint::new(0.0, 30.0),
                    objective_health: 500.0,
                    damage_bonus: 0.15,
                    attack_speed_bonus: 0.10,
                    move_speed_bonus: 0.05,
                },
                ZoneTuning {
                    position: WorldPoint::new(0.0, 60.0),
                    objective_health: 500.0,
                    damage_bonus: 0.10,
                    attack_speed_bonus: 0.05,
                    move_speed_bonus: 0.0,
                },
                ZoneTuning {
                    position: WorldPoint::new(0.0, 90.0),
                    objective_health: 500.0,
                    damage_bonus: 0.0,
                    attack_speed_bonus: 0.0,
                    move_speed_bonus: 0.0,
                },
            ],
            between_sessions_ms: 60_000,
            victory_session_target: None,
            base_anchor: WorldPoint::ORIGIN,
            spawn_anchor_override: None,
        }
    }
}

/// Tuning for every reward the economy can grant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewardTuning {
    /// Essence granted once per cleared wave.
    pub essence_per_wave: u32,
    /// Base Gold granted per completed session before the zone multiplier.
    pub session_gold_base: u32,
    /// Session-Gold multiplier per zone index; last entry repeats.
    pub session_gold_multipliers: Vec<u32>,
    /// Essence settlement per zone index held at run end; last entry repeats.
    pub zone_held_essence: Vec<u32>,
    /// Flat Essence bonus granted on a victorious run.
    pub victory_essence: u32,
    /// Gold bounty granted per killed agent.
    pub gold_per_kill: u32,
    /// Experience granted per killed agent.
    pub xp_per_kill: u32,
}

impl Default for RewardTuning {
    fn default() -> Self {
        Self {
            essence_per_wave: 10,
            session_gold_base: 50,
            session_gold_multipliers: vec![3, 2, 1],
            zone_held_essence: vec![100, 60, 30],
            victory_essence: 150,
            gold_per_kill: 10,
            xp_per_kill: 25,
        }
    }
}

/// Base values and per-level increments for every player stat.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatTuning {
    /// Base move speed in world units per second.
    pub move_speed_base: f32,
    /// Move speed gained per upgrade level.
    pub move_speed_per_level: f32,
    /// Base maximum health.
    pub max_health_base: f32,
    /// Maximum health gained per upgrade level.
    pub max_health_per_level: f32,
    /// Base attack damage.
    pub damage_base: f32,
    /// Attack damage gained per upgrade level.
    pub damage_per_level: f32,
    /// Base critical-strike chance.
    pub crit_chance_base: f32,
    /// Critical-strike chance gained per upgrade level.
    pub crit_chance_per_level: f32,
    /// Base critical-damage multiplier.
    pub crit_damage_base: f32,
    /// Critical-damage multiplier gained per upgrade level.
    pub crit_damage_per_level: f32,
    /// Base attack range in world units.
    pub attack_range_base: f32,
    /// Attack range gained per upgrade level.
    pub attack_range_per_level: f32,
    /// Essence cost of the first level of any upgrade.
    pub upgrade_cost_base: u32,
    /// Additional Essence cost per already-owned level.
    pub upgrade_cost_per_level: u32,
}

impl Default for StatTuning {
    fn default() -> Self {
        Self {
            move_speed_base: 5.0,
            move_speed_per_level: 0.5,
            max_health_base: 100.0,
            max_health_per_level: 20.0,
            damage_base: 10.0,
            damage_per_level: 5.0,
            crit_chance_base: 0.05,
            crit_chance_per_level: 0.05,
            crit_damage_base: 1.5,
            crit_damage_per_level: 0.25,
            attack_range_base: 2.0,
            attack_range_per_level: 0.5,
            upgrade_cost_base: 50,
            upgrade_cost_per_level: 50,
        }
    }
}

/// Behavioral tuning shared by every hostile agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentTuning {
    /// Health an agent spawns with.
    pub max_health: f32,
    /// Movement speed in world units per second.
    pub move_speed: f32,
    /// Distance at which the agent can strike its target.
    pub attack_range: f32,
    /// Damage dealt per strike.
    pub attack_damage: f32,
    /// Milliseconds between two strikes of the same agent.
    pub attack_cooldown_ms: u64,
    /// Radius inside which the player is preferred over the objective.
    pub priority_radius: f32,
    /// Distance at which the agent stops closing in on its target.
    pub stopping_distance: f32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            max_health: 50.0,
            move_speed: 3.0,
            attack_range: 2.0,
            attack_damage: 10.0,
            attack_cooldown_ms: 1_500,
            priority_radius: 15.0,
            stopping_distance: 1.5,
        }
    }
}

/// Tuning for the in-run experience and level track.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceTuning {
    /// Experience required to reach level two.
    pub base_requirement: u32,
    /// Multiplicative growth of the requirement per level.
    pub scaling: f32,
    /// Every n-th level awaits an external upgrade choice.
    pub milestone_interval: u32,
    /// Flat damage bonus applied on an ordinary level-up.
    pub auto_damage: f32,
    /// Flat maximum-health bonus applied on an ordinary level-up.
    pub auto_max_health: f32,
    /// Move-speed fraction applied on an ordinary level-up.
    pub auto_move_speed: f32,
}

impl Default for ExperienceTuning {
    fn default() -> Self {
        Self {
            base_requirement: 100,
            scaling: 1.15,
            milestone_interval: 5,
            auto_damage: 2.0,
            auto_max_health: 10.0,
            auto_move_speed: 0.02,
        }
    }
}

/// Aggregated tuning for the whole engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Run lifecycle and defense-zone chain tuning.
    pub run: RunTuning,
    /// Wave emission and spawn placement tuning.
    pub waves: WaveTuning,
    /// Reward tuning for every currency grant.
    pub rewards: RewardTuning,
    /// Player stat bases and increments.
    pub stats: StatTuning,
    /// Hostile agent behavior tuning.
    pub agents: AgentTuning,
    /// In-run experience track tuning.
    pub experience: ExperienceTuning,
}

/// Persisted meta-progression record.
///
/// All fields are plain integers and the record is versionless; unknown
/// history simply loads as the defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveData {
    /// Persistent Essence balance.
    pub essence: u32,
    /// Purchased move-speed upgrade level.
    pub move_speed_level: u32,
    /// Purchased maximum-health upgrade level.
    pub max_health_level: u32,
    /// Purchased damage upgrade level.
    pub damage_level: u32,
    /// Purchased critical-chance upgrade level.
    pub crit_chance_level: u32,
    /// Purchased critical-damage upgrade level.
    pub crit_damage_level: u32,
    /// Purchased attack-range upgrade level.
    pub attack_range_level: u32,
    /// Number of runs that ended in victory.
    pub total_runs_completed: u32,
    /// Number of runs that ended in defeat.
    pub total_runs_failed: u32,
    /// Number of hostile agents killed across all runs.
    pub total_enemies_killed: u32,
    /// Highest wave number ever reached.
    pub highest_wave_reached: u32,
}

impl SaveData {
    /// Retrieves the stored level for the provided upgrade.
    #[must_use]
    pub fn level(&self, stat: UpgradeKind) -> u32 {
        match stat {
            UpgradeKind::MoveSpeed => self.move_speed_level,
            UpgradeKind::MaxHealth => self.max_health_level,
            UpgradeKind::Damage => self.damage_level,
            UpgradeKind::CritChance => self.crit_chance_level,
            UpgradeKind::CritDamage => self.crit_damage_level,
            UpgradeKind::AttackRange => self.attack_range_level,
        }
    }
}
