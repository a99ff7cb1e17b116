//! Per-wave membership bookkeeping and session progress.
//!
//! Waves overlap: several can hold live members at once while later ones are
//! still spawning. Clearance is therefore tracked per wave, never as a
//! single global alive counter — a wave clears the instant its own set
//! empties after the full complement spawned.

use std::collections::{BTreeMap, BTreeSet};

use gatefall_core::{AgentId, WaveNumber};

/// Membership record of a single wave.
#[derive(Debug)]
pub(crate) struct WaveRecord {
    target_count: u32,
    spawned: u32,
    live: BTreeSet<AgentId>,
}

impl WaveRecord {
    /// Number of agents the wave will spawn in total.
    pub(crate) fn target_count(&self) -> u32 {
        self.target_count
    }

    /// Number of agents spawned so far.
    pub(crate) fn spawned(&self) -> u32 {
        self.spawned
    }

    /// Number of members currently alive.
    pub(crate) fn live_count(&self) -> u32 {
        self.live.len() as u32
    }

    fn is_cleared(&self) -> bool {
        self.spawned >= self.target_count && self.live.is_empty()
    }
}

/// Result of registering a spawn against a wave record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SpawnRegistration {
    /// The agent joined the wave's membership set.
    Accepted,
    /// No record exists for the wave.
    UnknownWave,
    /// The wave already spawned its full complement.
    FullySpawned,
}

/// Ledger of open waves plus per-session progress counters.
#[derive(Debug)]
pub(crate) struct WaveLedger {
    records: BTreeMap<WaveNumber, WaveRecord>,
    begun_this_session: u32,
    cleared_this_session: u32,
}

impl WaveLedger {
    /// Creates an empty ledger.
    pub(crate) fn new() -> Self {
        Self {
            records: BTreeMap::new(),
            begun_this_session: 0,
            cleared_this_session: 0,
        }
    }

    /// Opens a membership record for a new wave.
    ///
    /// Re-announcing an already-open wave is a no-op and reports `false`.
    pub(crate) fn begin(&mut self, wave: WaveNumber, target_count: u32) -> bool {
        if self.records.contains_key(&wave) {
            return false;
        }
        let _ = self.records.insert(
            wave,
            WaveRecord {
                target_count,
                spawned: 0,
                live: BTreeSet::new(),
            },
        );
        self.begun_this_session += 1;
        true
    }

    /// Reports whether a wave could accept another spawn, without mutating.
    pub(crate) fn probe(&self, wave: WaveNumber) -> SpawnRegistration {
        match self.records.get(&wave) {
            None => SpawnRegistration::UnknownWave,
            Some(record) if record.spawned >= record.target_count => {
                SpawnRegistration::FullySpawned
            }
            Some(_) => SpawnRegistration::Accepted,
        }
    }

    /// Registers a spawned agent with its wave's membership set.
    pub(crate) fn register_spawn(
        &mut self,
        wave: WaveNumber,
        agent: AgentId,
    ) -> SpawnRegistration {
        let Some(record) = self.records.get_mut(&wave) else {
            return SpawnRegistration::UnknownWave;
        };
        if record.spawned >= record.target_count {
            return SpawnRegistration::FullySpawned;
        }
        record.spawned += 1;
        let _ = record.live.insert(agent);
        SpawnRegistration::Accepted
    }

    /// Prunes a dead agent from its wave and reports a resulting clear.
    ///
    /// When the removal empties a fully spawned wave the record is dropped
    /// and `true` is returned exactly once, so the per-wave reward can never
    /// be granted twice.
    pub(crate) fn remove_member(&mut self, wave: WaveNumber, agent: AgentId) -> bool {
        let Some(record) = self.records.get_mut(&wave) else {
            return false;
        };
        let _ = record.live.remove(&agent);
        if record.is_cleared() {
            let _ = self.records.remove(&wave);
            self.cleared_this_session += 1;
            return true;
        }
        false
    }

    /// Whether the session reached its wave target with every wave cleared.
    pub(crate) fn session_complete(&self, session_wave_target: u32) -> bool {
        self.begun_this_session >= session_wave_target
            && self.cleared_this_session >= self.begun_this_session
            && self.records.is_empty()
    }

    /// Waves begun since the session started.
    pub(crate) fn begun_this_session(&self) -> u32 {
        self.begun_this_session
    }

    /// Waves cleared since the session started.
    pub(crate) fn cleared_this_session(&self) -> u32 {
        self.cleared_this_session
    }

    /// Drops every record and restarts the per-session counters.
    pub(crate) fn session_reset(&mut self) {
        self.records.clear();
        self.begun_this_session = 0;
        self.cleared_this_session = 0;
    }

    /// Iterator over the open wave records in ascending wave order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&WaveNumber, &WaveRecord)> {
        self.records.iter()
    }
}
