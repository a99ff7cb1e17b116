//! In-run experience and level track.

use gatefall_core::ExperienceTuning;

/// A single level-up produced by an experience grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelGain {
    /// Level that was reached.
    pub(crate) level: u32,
    /// Whether the level awaits an external upgrade choice.
    pub(crate) milestone: bool,
}

/// Level track that converts experience into level-ups.
///
/// The requirement for the next level grows geometrically
/// (`base × scaling^(level − 1)`); every `milestone_interval`-th level is
/// flagged so the caller can defer to an external choice instead of applying
/// the automatic bonuses.
#[derive(Debug)]
pub(crate) struct ExperienceTrack {
    tuning: ExperienceTuning,
    level: u32,
    total_xp: u32,
    xp_used: u32,
    required: u32,
}

impl ExperienceTrack {
    /// Creates a fresh track at level one.
    pub(crate) fn new(tuning: ExperienceTuning) -> Self {
        let required = tuning.base_requirement;
        Self {
            tuning,
            level: 1,
            total_xp: 0,
            xp_used: 0,
            required,
        }
    }

    /// Restores the track to level one at run start.
    pub(crate) fn reset(&mut self) {
        self.level = 1;
        self.total_xp = 0;
        self.xp_used = 0;
        self.required = self.tuning.base_requirement;
    }

    /// Grants experience, returning every level-up it produced in order.
    pub(crate) fn grant(&mut self, amount: u32) -> Vec<LevelGain> {
        self.total_xp = self.total_xp.saturating_add(amount);

        let mut gains = Vec::new();
        while self.total_xp - self.xp_used >= self.required {
            self.xp_used += self.required;
            self.level += 1;
            self.required = self.requirement_for(self.level);
            let milestone = self.tuning.milestone_interval > 0
                && self.level % self.tuning.milestone_interval == 0;
            gains.push(LevelGain {
                level: self.level,
                milestone,
            });
        }
        gains
    }

    /// Current level of the track.
    pub(crate) fn level(&self) -> u32 {
        self.level
    }

    /// Experience accumulated toward the next level and the requirement.
    pub(crate) fn progress(&self) -> (u32, u32) {
        (self.total_xp - self.xp_used, self.required)
    }

    fn requirement_for(&self, level: u32) -> u32 {
        let exponent = level.saturating_sub(1) as i32;
        let scaled = self.tuning.base_requirement as f32 * self.tuning.scaling.powi(exponent);
        scaled.round().max(1.0) as u32
    }
}
