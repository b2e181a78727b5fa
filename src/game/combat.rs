//! # Combat
//!
//! Single-exchange melee resolution between two entities.

use crate::game::Entity;
use log::trace;

/// What happened in one exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CombatOutcome {
    /// Hit points actually removed from the defender
    pub damage: u8,
    /// The defender reached 0 hp and was deactivated
    pub defender_died: bool,
    /// Experience granted to a player attacker
    pub experience_gained: u16,
    /// The attacker gained a level
    pub leveled_up: bool,
}

/// Damage dealt by `attack` against `defense`; never below 1.
///
/// # Examples
///
/// ```
/// use caverns::damage_for;
///
/// assert_eq!(damage_for(5, 2), 3);
/// assert_eq!(damage_for(1, 10), 1);
/// ```
pub fn damage_for(attack: u8, defense: u8) -> u8 {
    attack.saturating_sub(defense).max(1)
}

/// Resolves one attack of `attacker` on `defender`.
///
/// A defender whose hp does not exceed the damage drops to 0 and is
/// deactivated. When the player kills an enemy it earns
/// `10 + enemy level * 5` experience and gets one level-up check.
pub fn resolve(attacker: &mut Entity, defender: &mut Entity) -> CombatOutcome {
    let damage = damage_for(attacker.stats.attack, defender.stats.defense);
    let mut outcome = CombatOutcome::default();

    if defender.stats.hp <= damage {
        outcome.damage = defender.stats.hp;
        outcome.defender_died = true;
        defender.stats.hp = 0;
        defender.active = false;

        if attacker.is_player() && defender.is_enemy() {
            let gained = 10 + u16::from(defender.stats.level) * 5;
            attacker.stats.experience = attacker.stats.experience.saturating_add(gained);
            outcome.experience_gained = gained;
            outcome.leveled_up = try_level_up(attacker);
        }
    } else {
        defender.stats.hp -= damage;
        outcome.damage = damage;
    }

    trace!(
        "{:?} at {:?} hits {:?} for {} ({} hp left)",
        attacker.kind,
        attacker.position,
        defender.kind,
        damage,
        defender.stats.hp
    );

    outcome
}

/// Applies at most one level-up if the experience threshold is met.
fn try_level_up(entity: &mut Entity) -> bool {
    let stats = &mut entity.stats;
    if stats.experience < stats.experience_for_next_level() {
        return false;
    }

    stats.level = stats.level.saturating_add(1);
    stats.max_hp = stats.max_hp.saturating_add(2);
    stats.hp = stats.max_hp;
    stats.attack = stats.attack.saturating_add(1);
    if stats.level % 3 == 0 {
        stats.defense = stats.defense.saturating_add(1);
    }
    true
}
