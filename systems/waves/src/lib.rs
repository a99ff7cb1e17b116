#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave-emission system.
//!
//! The director arms itself when a session starts and then converts elapsed
//! simulation time into `BeginWave` and `SpawnAgent` commands: one wave per
//! cadence interval, one agent per stagger interval inside each wave. Waves
//! overlap on purpose — a new wave opens on cadence regardless of whether
//! earlier waves cleared, and several spawn tracks progress concurrently.
//! Clearance itself is tracked by the world's membership ledger; this system
//! only schedules.

use std::f32::consts::TAU;
use std::time::Duration;

use gatefall_core::{Command, Event, SessionIndex, SpawnContext, WaveNumber, WaveTuning, WorldPoint};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the wave director.
#[derive(Clone, Debug)]
pub struct Config {
    initial_count: u32,
    per_wave_increment: f32,
    cadence: Duration,
    stagger: Duration,
    session_wave_target: u32,
    spawn_radius: f32,
    min_player_distance: f32,
    max_placement_attempts: u32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration from shared tuning and a seed.
    #[must_use]
    pub fn new(tuning: &WaveTuning, rng_seed: u64) -> Self {
        Self {
            initial_count: tuning.initial_count,
            per_wave_increment: tuning.per_wave_increment,
            cadence: Duration::from_millis(tuning.cadence_ms),
            stagger: Duration::from_millis(tuning.stagger_ms),
            session_wave_target: tuning.session_wave_target,
            spawn_radius: tuning.spawn_radius,
            min_player_distance: tuning.min_player_distance,
            max_placement_attempts: tuning.max_placement_attempts,
            rng_seed,
        }
    }
}

#[derive(Debug)]
struct SpawnTrack {
    wave: WaveNumber,
    remaining: u32,
    stagger_accumulator: Duration,
}

/// Pure system that deterministically schedules waves of hostile agents.
#[derive(Debug)]
pub struct WaveDirector {
    initial_count: u32,
    per_wave_increment: f32,
    cadence: Duration,
    stagger: Duration,
    session_wave_target: u32,
    spawn_radius: f32,
    min_player_distance: f32,
    max_placement_attempts: u32,
    rng: ChaCha8Rng,
    armed_session: Option<SessionIndex>,
    next_wave: u32,
    waves_started_this_session: u32,
    cadence_accumulator: Duration,
    tracks: Vec<SpawnTrack>,
}

impl WaveDirector {
    /// Creates a new wave director using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            initial_count: config.initial_count,
            per_wave_increment: config.per_wave_increment,
            cadence: config.cadence,
            stagger: config.stagger,
            session_wave_target: config.session_wave_target,
            spawn_radius: config.spawn_radius,
            min_player_distance: config.min_player_distance,
            max_placement_attempts: config.max_placement_attempts,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
            armed_session: None,
            next_wave: 1,
            waves_started_this_session: 0,
            cadence_accumulator: Duration::ZERO,
            tracks: Vec::new(),
        }
    }

    /// Consumes world events and the spawn context to emit schedule commands.
    pub fn handle(&mut self, events: &[Event], context: SpawnContext, out: &mut Vec<Command>) {
        let mut elapsed = Duration::ZERO;
        for event in events {
            match event {
                Event::RunStarted => {
                    self.next_wave = 1;
                    self.disarm();
                }
                Event::SessionStarted { session } => self.arm(*session),
                Event::SessionCompleted { .. } | Event::RunEnded { .. } => self.disarm(),
                Event::TimeAdvanced { dt } => elapsed = elapsed.saturating_add(*dt),
                _ => {}
            }
        }

        // the run-active guard re-checked at every resumption point: once
        // disarmed, no further scheduling can fire
        if self.armed_session.is_none() {
            return;
        }
        if context.anchor.is_none() && context.player.is_none() {
            // nowhere to place agents; skip scheduling entirely
            return;
        }
        if elapsed.is_zero() {
            return;
        }

        self.advance_tracks(elapsed, context, out);

        if self.waves_started_this_session < self.session_wave_target {
            self.cadence_accumulator = self.cadence_accumulator.saturating_add(elapsed);
            while self.waves_started_this_session < self.session_wave_target
                && self.cadence_accumulator >= self.cadence
            {
                self.cadence_accumulator = self.cadence_accumulator.saturating_sub(self.cadence);
                self.start_wave(context, out);
            }
        }
    }

    /// Run-wide number of the most recently started wave.
    #[must_use]
    pub fn current_wave(&self) -> u32 {
        self.next_wave.saturating_sub(1)
    }

    /// Waves started since the current session began.
    #[must_use]
    pub fn waves_started_this_session(&self) -> u32 {
        self.waves_started_this_session
    }

    /// Whether the director is currently scheduling for a session.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed_session.is_some()
    }

    fn arm(&mut self, session: SessionIndex) {
        // re-arming for the session already in progress is a no-op
        if self.armed_session == Some(session) {
            return;
        }
        self.armed_session = Some(session);
        self.waves_started_this_session = 0;
        self.cadence_accumulator = Duration::ZERO;
        self.tracks.clear();
    }

    fn disarm(&mut self) {
        self.armed_session = None;
        self.waves_started_this_session = 0;
        self.cadence_accumulator = Duration::ZERO;
        self.tracks.clear();
    }

    fn start_wave(&mut self, context: SpawnContext, out: &mut Vec<Command>) {
        let wave = WaveNumber::new(self.next_wave);
        self.next_wave += 1;
        self.waves_started_this_session += 1;

        let target_count = wave_target(self.initial_count, self.per_wave_increment, wave.get());
        out.push(Command::BeginWave { wave, target_count });

        let mut track = SpawnTrack {
            wave,
            remaining: target_count,
            stagger_accumulator: Duration::ZERO,
        };
        // the first agent of a wave spawns immediately
        if track.remaining > 0 {
            self.emit_spawn(wave, context, out);
            track.remaining -= 1;
        }
        if self.stagger.is_zero() {
            while track.remaining > 0 {
                self.emit_spawn(wave, context, out);
                track.remaining -= 1;
            }
        }
        if track.remaining > 0 {
            self.tracks.push(track);
        }
    }

    fn advance_tracks(&mut self, elapsed: Duration, context: SpawnContext, out: &mut Vec<Command>) {
        let mut tracks = std::mem::take(&mut self.tracks);
        for track in &mut tracks {
            track.stagger_accumulator = track.stagger_accumulator.saturating_add(elapsed);
            while track.remaining > 0 && track.stagger_accumulator >= self.stagger {
                track.stagger_accumulator = track.stagger_accumulator.saturating_sub(self.stagger);
                self.emit_spawn(track.wave, context, out);
                track.remaining -= 1;
            }
        }
        tracks.retain(|track| track.remaining > 0);
        self.tracks = tracks;
    }

    fn emit_spawn(&mut self, wave: WaveNumber, context: SpawnContext, out: &mut Vec<Command>) {
        let Some(position) = self.sample_position(context) else {
            return;
        };
        out.push(Command::SpawnAgent { wave, position });
    }

    /// Samples a ring position around the anchor, resampling while the
    /// candidate violates the player exclusion radius. The retry budget is
    /// hard; once exhausted the last candidate is used regardless so the
    /// spawn never blocks.
    fn sample_position(&mut self, context: SpawnContext) -> Option<WorldPoint> {
        let anchor = context.anchor.or(context.player)?;
        let mut candidate = self.sample_ring(anchor);

        if let Some(player) = context.player {
            let mut attempts = 1;
            while candidate.distance_to(player) < self.min_player_distance
                && attempts < self.max_placement_attempts
            {
                candidate = self.sample_ring(anchor);
                attempts += 1;
            }
        }

        Some(candidate)
    }

    fn sample_ring(&mut self, anchor: WorldPoint) -> WorldPoint {
        let theta: f32 = self.rng.gen_range(0.0..TAU);
        WorldPoint::new(
            anchor.x() + theta.cos() * self.spawn_radius,
            anchor.z() + theta.sin() * self.spawn_radius,
        )
    }
}

fn wave_target(initial_count: u32, per_wave_increment: f32, wave: u32) -> u32 {
    let raw = initial_count as f32 + wave.saturating_sub(1) as f32 * per_wave_increment;
    raw.round().max(0.0) as u32
}
