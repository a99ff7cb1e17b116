//! Per-stat bookkeeping of base values, persistent levels, zone bonuses and
//! run-scoped temporary bonuses, plus the derived stat formulas.

use gatefall_core::{BonusKind, SaveData, StatTuning, UpgradeKind};
use rand::Rng;

/// Ledger that derives every player stat from its components.
///
/// Each stat combines a base constant, a persistent upgrade level, a single
/// currently-active zone bonus (replaced wholesale on zone changes, never
/// stacked) and an additive run-scoped temporary bonus.
#[derive(Debug)]
pub struct StatLedger {
    tuning: StatTuning,
    move_speed_level: u32,
    max_health_level: u32,
    damage_level: u32,
    crit_chance_level: u32,
    crit_damage_level: u32,
    attack_range_level: u32,
    zone_damage_bonus: f32,
    zone_attack_speed_bonus: f32,
    zone_move_speed_bonus: f32,
    temp_move_speed: f32,
    temp_max_health: f32,
    temp_damage: f32,
    temp_crit_chance: f32,
    temp_crit_damage: f32,
    temp_attack_speed: f32,
}

impl StatLedger {
    /// Creates a ledger from tuning values and persisted upgrade levels.
    #[must_use]
    pub fn from_save(tuning: StatTuning, save: &SaveData) -> Self {
        Self {
            tuning,
            move_speed_level: save.move_speed_level,
            max_health_level: save.max_health_level,
            damage_level: save.damage_level,
            crit_chance_level: save.crit_chance_level,
            crit_damage_level: save.crit_damage_level,
            attack_range_level: save.attack_range_level,
            zone_damage_bonus: 0.0,
            zone_attack_speed_bonus: 0.0,
            zone_move_speed_bonus: 0.0,
            temp_move_speed: 0.0,
            temp_max_health: 0.0,
            temp_damage: 0.0,
            temp_crit_chance: 0.0,
            temp_crit_damage: 0.0,
            temp_attack_speed: 0.0,
        }
    }

    /// Derived movement speed in world units per second.
    #[must_use]
    pub fn move_speed(&self) -> f32 {
        (self.tuning.move_speed_base
            + self.move_speed_level as f32 * self.tuning.move_speed_per_level)
            * (1.0 + self.zone_move_speed_bonus + self.temp_move_speed)
    }

    /// Derived maximum health.
    #[must_use]
    pub fn max_health(&self) -> f32 {
        self.tuning.max_health_base
            + self.max_health_level as f32 * self.tuning.max_health_per_level
            + self.temp_max_health
    }

    /// Derived attack damage before any critical roll.
    #[must_use]
    pub fn damage(&self) -> f32 {
        (self.tuning.damage_base
            + self.damage_level as f32 * self.tuning.damage_per_level
            + self.temp_damage)
            * (1.0 + self.zone_damage_bonus)
    }

    /// Derived chance for an attack to critically strike.
    #[must_use]
    pub fn crit_chance(&self) -> f32 {
        self.tuning.crit_chance_base
            + self.crit_chance_level as f32 * self.tuning.crit_chance_per_level
            + self.temp_crit_chance
    }

    /// Derived damage multiplier applied on a critical strike.
    #[must_use]
    pub fn crit_damage(&self) -> f32 {
        self.tuning.crit_damage_base
            + self.crit_damage_level as f32 * self.tuning.crit_damage_per_level
            + self.temp_crit_damage
    }

    /// Derived reach of the player's attacks.
    #[must_use]
    pub fn attack_range(&self) -> f32 {
        self.tuning.attack_range_base
            + self.attack_range_level as f32 * self.tuning.attack_range_per_level
    }

    /// Derived attack-speed multiplier.
    #[must_use]
    pub fn attack_speed_multiplier(&self) -> f32 {
        1.0 + self.zone_attack_speed_bonus + self.temp_attack_speed
    }

    /// Rolls a single attack, applying the critical multiplier on success.
    ///
    /// The draw comes from the injected random source so callers control
    /// seeding; a crit chance of `1.0` always multiplies and `0.0` never does.
    #[must_use]
    pub fn final_damage<R: Rng>(&self, rng: &mut R) -> f32 {
        let damage = self.damage();
        if rng.gen::<f32>() < self.crit_chance() {
            damage * self.crit_damage()
        } else {
            damage
        }
    }

    /// Current level of the provided upgrade.
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

    /// Essence cost of the next level of the provided upgrade.
    #[must_use]
    pub fn upgrade_cost(&self, stat: UpgradeKind) -> u32 {
        self.tuning.upgrade_cost_base
            + self.level(stat).saturating_mul(self.tuning.upgrade_cost_per_level)
    }

    /// Raises the provided upgrade by exactly one level, returning it.
    pub(crate) fn raise_level(&mut self, stat: UpgradeKind) -> u32 {
        let slot = match stat {
            UpgradeKind::MoveSpeed => &mut self.move_speed_level,
            UpgradeKind::MaxHealth => &mut self.max_health_level,
            UpgradeKind::Damage => &mut self.damage_level,
            UpgradeKind::CritChance => &mut self.crit_chance_level,
            UpgradeKind::CritDamage => &mut self.crit_damage_level,
            UpgradeKind::AttackRange => &mut self.attack_range_level,
        };
        *slot = slot.saturating_add(1);
        *slot
    }

    /// Replaces the active zone bonuses wholesale.
    pub(crate) fn set_zone_bonus(&mut self, damage: f32, attack_speed: f32, move_speed: f32) {
        self.zone_damage_bonus = damage;
        self.zone_attack_speed_bonus = attack_speed;
        self.zone_move_speed_bonus = move_speed;
    }

    /// Revokes the active zone bonuses.
    pub(crate) fn clear_zone_bonus(&mut self) {
        self.set_zone_bonus(0.0, 0.0, 0.0);
    }

    /// Adds to a run-scoped temporary bonus dimension.
    pub(crate) fn add_temporary(&mut self, bonus: BonusKind, amount: f32) {
        let slot = match bonus {
            BonusKind::MoveSpeed => &mut self.temp_move_speed,
            BonusKind::MaxHealth => &mut self.temp_max_health,
            BonusKind::Damage => &mut self.temp_damage,
            BonusKind::CritChance => &mut self.temp_crit_chance,
            BonusKind::CritDamage => &mut self.temp_crit_damage,
            BonusKind::AttackSpeed => &mut self.temp_attack_speed,
        };
        *slot += amount;
    }

    /// Zeroes every temporary bonus at run start.
    pub(crate) fn reset_temporary(&mut self) {
        self.temp_move_speed = 0.0;
        self.temp_max_health = 0.0;
        self.temp_damage = 0.0;
        self.temp_crit_chance = 0.0;
        self.temp_crit_damage = 0.0;
        self.temp_attack_speed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::StatLedger;
    use gatefall_core::{BonusKind, SaveData, StatTuning, UpgradeKind};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn ledger() -> StatLedger {
        StatLedger::from_save(StatTuning::default(), &SaveData::default())
    }

    #[test]
    fn three_damage_upgrades_with_default_tuning_reach_twenty_five() {
        let mut ledger = ledger();
        assert_eq!(ledger.raise_level(UpgradeKind::Damage), 1);
        assert_eq!(ledger.raise_level(UpgradeKind::Damage), 2);
        assert_eq!(ledger.raise_level(UpgradeKind::Damage), 3);
        assert!((ledger.damage() - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zone_bonus_multiplies_damage_and_is_replaced_not_stacked() {
        let mut ledger = ledger();
        ledger.set_zone_bonus(0.5, 0.0, 0.0);
        assert!((ledger.damage() - 15.0).abs() < f32::EPSILON);

        ledger.set_zone_bonus(0.1, 0.0, 0.0);
        assert!((ledger.damage() - 11.0).abs() < f32::EPSILON);

        ledger.clear_zone_bonus();
        assert!((ledger.damage() - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn move_speed_formula_combines_zone_and_temporary_fractions() {
        let mut ledger = ledger();
        let _ = ledger.raise_level(UpgradeKind::MoveSpeed);
        ledger.set_zone_bonus(0.0, 0.0, 0.1);
        ledger.add_temporary(BonusKind::MoveSpeed, 0.1);
        // (5.0 + 0.5) * (1.0 + 0.1 + 0.1)
        assert!((ledger.move_speed() - 6.6).abs() < 1e-5);
    }

    #[test]
    fn max_health_adds_flat_temporary_bonus() {
        let mut ledger = ledger();
        ledger.add_temporary(BonusKind::MaxHealth, 10.0);
        assert!((ledger.max_health() - 110.0).abs() < f32::EPSILON);

        ledger.reset_temporary();
        assert!((ledger.max_health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn attack_speed_multiplier_starts_at_one() {
        let mut ledger = ledger();
        assert!((ledger.attack_speed_multiplier() - 1.0).abs() < f32::EPSILON);
        ledger.add_temporary(BonusKind::AttackSpeed, 0.25);
        assert!((ledger.attack_speed_multiplier() - 1.25).abs() < f32::EPSILON);
    }

    #[test]
    fn final_damage_with_certain_crit_always_multiplies() {
        let tuning = StatTuning {
            crit_chance_base: 1.0,
            ..StatTuning::default()
        };
        let ledger = StatLedger::from_save(tuning, &SaveData::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..32 {
            let damage = ledger.final_damage(&mut rng);
            assert!((damage - ledger.damage() * ledger.crit_damage()).abs() < 1e-5);
        }
    }

    #[test]
    fn final_damage_with_zero_crit_never_multiplies() {
        let tuning = StatTuning {
            crit_chance_base: 0.0,
            ..StatTuning::default()
        };
        let ledger = StatLedger::from_save(tuning, &SaveData::default());
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..32 {
            let damage = ledger.final_damage(&mut rng);
            assert!((damage - ledger.damage()).abs() < 1e-5);
        }
    }

    #[test]
    fn upgrade_cost_grows_with_level() {
        let mut ledger = ledger();
        assert_eq!(ledger.upgrade_cost(UpgradeKind::Damage), 50);
        let _ = ledger.raise_level(UpgradeKind::Damage);
        assert_eq!(ledger.upgrade_cost(UpgradeKind::Damage), 100);
    }
}
