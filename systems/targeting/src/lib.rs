#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic target-acquisition system for hostile agents.
//!
//! Each tick, every agent re-decides what to pursue: the player when inside
//! the priority radius, otherwise the active zone's objective, otherwise
//! nothing. The system emits a retarget command only when the decision
//! differs from the agent's current target, so steady state is silent. The
//! forced total retargeting performed by a zone fallback happens inside the
//! world; this per-tick policy simply takes over again on the next tick.

use gatefall_core::{AgentView, Command, Event, TargetKind, WorldPoint, ZoneIndex};

/// Configuration parameters required to construct the targeting system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    priority_radius: f32,
}

impl Config {
    /// Creates a new configuration using the provided player-priority radius.
    #[must_use]
    pub const fn new(priority_radius: f32) -> Self {
        Self { priority_radius }
    }
}

/// Pure system that re-evaluates agent targets once per tick.
#[derive(Debug)]
pub struct TargetAcquisition {
    priority_radius: f32,
}

impl TargetAcquisition {
    /// Creates a new targeting system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            priority_radius: config.priority_radius,
        }
    }

    /// Consumes events and immutable views to emit retarget commands.
    pub fn handle(
        &mut self,
        events: &[Event],
        agents: &AgentView,
        player: Option<WorldPoint>,
        active_zone: Option<ZoneIndex>,
        out: &mut Vec<Command>,
    ) {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for agent in agents.iter() {
            let desired = self.decide(agent.position, player, active_zone);
            if desired != agent.target {
                out.push(Command::RetargetAgent {
                    agent: agent.id,
                    target: desired,
                });
            }
        }
    }

    fn decide(
        &self,
        position: WorldPoint,
        player: Option<WorldPoint>,
        active_zone: Option<ZoneIndex>,
    ) -> TargetKind {
        if let Some(player) = player {
            if position.distance_to(player) <= self.priority_radius {
                return TargetKind::Player;
            }
        }
        match active_zone {
            Some(zone) => TargetKind::Objective(zone),
            None => TargetKind::Idle,
        }
    }
}
