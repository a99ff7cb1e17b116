//! Authoritative hostile-agent registry.

use std::collections::BTreeMap;
use std::time::Duration;

use gatefall_core::{AgentId, TargetKind, WaveNumber, WorldPoint};

/// State of a single live hostile agent.
#[derive(Clone, Debug)]
pub(crate) struct AgentState {
    /// Identifier allocated by the registry.
    pub(crate) id: AgentId,
    /// Ground-plane position the agent occupies.
    pub(crate) position: WorldPoint,
    /// Target the agent is pursuing.
    pub(crate) target: TargetKind,
    /// Wave whose membership set tracks the agent.
    pub(crate) wave: WaveNumber,
    /// Health the agent has remaining.
    pub(crate) health: f32,
    /// Time left before the agent may strike again.
    pub(crate) cooldown: Duration,
}

/// Registry that stores agents and manages identifier allocation.
///
/// Identifiers keep increasing across waves within a run so membership sets
/// and event logs never see a handle reused.
#[derive(Debug)]
pub(crate) struct AgentRegistry {
    entries: BTreeMap<AgentId, AgentState>,
    next_id: u32,
}

impl AgentRegistry {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Inserts a freshly spawned agent and returns its identifier.
    pub(crate) fn spawn(
        &mut self,
        wave: WaveNumber,
        position: WorldPoint,
        health: f32,
        target: TargetKind,
    ) -> AgentId {
        let id = AgentId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.entries.insert(
            id,
            AgentState {
                id,
                position,
                target,
                wave,
                health,
                cooldown: Duration::ZERO,
            },
        );
        id
    }

    /// Looks up a live agent.
    pub(crate) fn get(&self, id: AgentId) -> Option<&AgentState> {
        self.entries.get(&id)
    }

    /// Looks up a live agent for mutation.
    pub(crate) fn get_mut(&mut self, id: AgentId) -> Option<&mut AgentState> {
        self.entries.get_mut(&id)
    }

    /// Removes an agent from the registry, returning its final state.
    pub(crate) fn remove(&mut self, id: AgentId) -> Option<AgentState> {
        self.entries.remove(&id)
    }

    /// Removes every agent, used when a run ends.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Identifiers of all live agents in deterministic order.
    pub(crate) fn ids(&self) -> Vec<AgentId> {
        self.entries.keys().copied().collect()
    }

    /// Iterator over all live agents in deterministic order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &AgentState> {
        self.entries.values()
    }

    /// Redirects every live agent to the provided target.
    ///
    /// Returns how many agents were redirected; used by the fallback
    /// transition which retargets totally, regardless of previous targets.
    pub(crate) fn retarget_all(&mut self, target: TargetKind) -> u32 {
        let mut count = 0;
        for agent in self.entries.values_mut() {
            agent.target = target;
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::AgentRegistry;
    use gatefall_core::{TargetKind, WaveNumber, WorldPoint, ZoneIndex};

    #[test]
    fn identifiers_are_never_reused_within_a_run() {
        let mut registry = AgentRegistry::new();
        let wave = WaveNumber::new(1);
        let first = registry.spawn(wave, WorldPoint::ORIGIN, 50.0, TargetKind::Player);
        let _ = registry.remove(first);
        let second = registry.spawn(wave, WorldPoint::ORIGIN, 50.0, TargetKind::Player);
        assert_ne!(first, second);
    }

    #[test]
    fn retarget_all_redirects_every_live_agent() {
        let mut registry = AgentRegistry::new();
        let wave = WaveNumber::new(1);
        for _ in 0..5 {
            let _ = registry.spawn(wave, WorldPoint::ORIGIN, 50.0, TargetKind::Player);
        }

        let objective = TargetKind::Objective(ZoneIndex::new(1));
        assert_eq!(registry.retarget_all(objective), 5);
        assert!(registry.iter().all(|agent| agent.target == objective));
    }
}
