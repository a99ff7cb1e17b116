//! Authoritative defense-zone chain state.

use gatefall_core::{WorldPoint, ZoneIndex, ZoneTuning};

/// Defendable objective inside a zone.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Objective {
    current: f32,
    max: f32,
}

impl Objective {
    fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Health the objective has remaining.
    pub(crate) fn current(&self) -> f32 {
        self.current
    }

    /// Maximum health of the objective.
    pub(crate) fn max(&self) -> f32 {
        self.max
    }
}

/// One node of the ordered fallback chain.
#[derive(Clone, Debug)]
pub(crate) struct Zone {
    index: ZoneIndex,
    position: WorldPoint,
    active: bool,
    destroyed: bool,
    objective: Objective,
    damage_bonus: f32,
    attack_speed_bonus: f32,
    move_speed_bonus: f32,
}

impl Zone {
    /// Zero-based position of the zone within the chain.
    pub(crate) fn index(&self) -> ZoneIndex {
        self.index
    }

    /// Center of the zone, used as the spawn anchor while active.
    pub(crate) fn position(&self) -> WorldPoint {
        self.position
    }

    /// Whether the zone is the currently defended one.
    pub(crate) fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the zone's objective was destroyed this run.
    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The zone's defense objective.
    pub(crate) fn objective(&self) -> Objective {
        self.objective
    }

    /// Stat bonuses granted while the zone is held.
    pub(crate) fn bonuses(&self) -> (f32, f32, f32) {
        (
            self.damage_bonus,
            self.attack_speed_bonus,
            self.move_speed_bonus,
        )
    }
}

/// Outcome of applying damage to a zone objective.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum DamageOutcome {
    /// The damage was absorbed and the objective still stands.
    Damaged {
        /// Health remaining after the hit.
        remaining: f32,
        /// Maximum health of the objective.
        max: f32,
    },
    /// The hit reduced the objective to zero health.
    Destroyed {
        /// Maximum health of the objective.
        max: f32,
    },
    /// The objective was already gone; nothing changed.
    AlreadyDestroyed,
}

/// Ordered chain of defense zones with single-active-zone bookkeeping.
#[derive(Debug)]
pub(crate) struct ZoneChain {
    zones: Vec<Zone>,
}

impl ZoneChain {
    /// Builds the chain from tuning; the first zone starts active.
    pub(crate) fn from_tuning(tuning: &[ZoneTuning]) -> Self {
        let zones = tuning
            .iter()
            .enumerate()
            .map(|(index, zone)| Zone {
                index: ZoneIndex::new(index as u32),
                position: zone.position,
                active: index == 0,
                destroyed: false,
                objective: Objective::full(zone.objective_health),
                damage_bonus: zone.damage_bonus,
                attack_speed_bonus: zone.attack_speed_bonus,
                move_speed_bonus: zone.move_speed_bonus,
            })
            .collect();
        Self { zones }
    }

    /// Restores every zone to its run-start configuration.
    pub(crate) fn reset(&mut self) {
        for zone in &mut self.zones {
            zone.active = zone.index.get() == 0;
            zone.destroyed = false;
            zone.objective = Objective::full(zone.objective.max);
        }
    }

    /// Looks up a zone by index.
    pub(crate) fn zone(&self, index: ZoneIndex) -> Option<&Zone> {
        self.zones.get(index.get() as usize)
    }

    /// Index of the currently active zone, if any.
    pub(crate) fn active_index(&self) -> Option<ZoneIndex> {
        self.zones
            .iter()
            .find(|zone| zone.active)
            .map(Zone::index)
    }

    /// Index of the last zone in the chain, if the chain is non-empty.
    pub(crate) fn last_index(&self) -> Option<ZoneIndex> {
        self.zones.last().map(Zone::index)
    }

    /// Index of the zone following `index`, if one exists.
    pub(crate) fn next_index(&self, index: ZoneIndex) -> Option<ZoneIndex> {
        let next = index.get().checked_add(1)?;
        self.zone(ZoneIndex::new(next)).map(Zone::index)
    }

    /// Marks a zone active; the caller is responsible for stat bonuses.
    pub(crate) fn activate(&mut self, index: ZoneIndex) -> bool {
        let Some(zone) = self.zones.get_mut(index.get() as usize) else {
            return false;
        };
        zone.active = true;
        true
    }

    /// Applies damage to a zone objective, clamping health at zero.
    ///
    /// A destroyed objective absorbs nothing; repeated hits after
    /// destruction report [`DamageOutcome::AlreadyDestroyed`] so the caller's
    /// fallback stays one-shot.
    pub(crate) fn damage_objective(&mut self, index: ZoneIndex, amount: f32) -> DamageOutcome {
        let Some(zone) = self.zones.get_mut(index.get() as usize) else {
            return DamageOutcome::AlreadyDestroyed;
        };
        if zone.destroyed || zone.objective.current <= 0.0 {
            return DamageOutcome::AlreadyDestroyed;
        }

        zone.objective.current = (zone.objective.current - amount).max(0.0);
        if zone.objective.current <= 0.0 {
            DamageOutcome::Destroyed {
                max: zone.objective.max,
            }
        } else {
            DamageOutcome::Damaged {
                remaining: zone.objective.current,
                max: zone.objective.max,
            }
        }
    }

    /// Retires a destroyed zone, returning `false` when already retired.
    pub(crate) fn retire(&mut self, index: ZoneIndex) -> bool {
        let Some(zone) = self.zones.get_mut(index.get() as usize) else {
            return false;
        };
        if zone.destroyed {
            return false;
        }
        zone.destroyed = true;
        zone.active = false;
        true
    }

    /// Iterator over the chain in order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Zone> {
        self.zones.iter()
    }
}
