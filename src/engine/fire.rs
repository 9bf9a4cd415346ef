//! Fire pass resolution
//!
//! One pass resolves every live shooter of one side against the other side's
//! population. Draw order is strict: target selection, then (for a damaged
//! unit below the weak-hull threshold) the destruction roll, then the
//! rapid-fire continuation roll. Dead units stay selectable until the round's
//! compaction and still soak `times_was_shot` when hit again.

use crate::core::types::Round;
use crate::engine::catalog::UnitCatalog;
use crate::engine::combatant::UnitGroupStats;
use crate::engine::constants::{HULL_FROM_ARMOR, TECH_BONUS_PER_LEVEL, WEAK_HULL_THRESHOLD};
use crate::engine::party::{Party, Unit};
use crate::engine::rng::{RandomStream, RANDOM_MAX};

/// Resolve one side firing at the other for `round`. Both parties' stats are
/// updated in place; the random stream is consumed in the contract order.
pub fn fire_pass(
    catalog: &UnitCatalog,
    shooters: &mut Party<'_>,
    targets: &mut Party<'_>,
    round: Round,
    rng: &mut RandomStream,
) {
    let num_shooters = shooters.num_alive();
    let num_targets = targets.num_alive() as u64;

    for i in 0..num_shooters {
        let shooter = shooters.units[i];
        let shooter_attrs = catalog.attributes(shooter.kind);

        let damage = shooter_attrs.weapons
            * (1.0
                + TECH_BONUS_PER_LEVEL
                    * f32::from(shooters.combatants[usize::from(shooter.combatant_id)].weapons_tech));

        loop {
            let slot = (rng.next() as u64 % num_targets) as usize;
            let target_kind = targets.units[slot].kind;
            let target_attrs = catalog.attributes(target_kind);

            let defender = &targets.combatants[usize::from(targets.units[slot].combatant_id)];
            let shielding_tech = defender.shielding_tech;
            let armor_tech = defender.armor_tech;

            let shooter_stats = shooters.combatants[usize::from(shooter.combatant_id)]
                .stats_mut(round, shooter.kind);
            shooter_stats.times_fired += 1;

            // Split the defender side into disjoint field borrows so the
            // target unit and its owner's stats can be updated together.
            let target = &mut targets.units[slot];
            let target_stats = targets.combatants[usize::from(target.combatant_id)]
                .stats_mut(round, target_kind);
            target_stats.times_was_shot += 1;

            if target.hull != 0.0 {
                let max_shield =
                    target_attrs.shield * (1.0 + TECH_BONUS_PER_LEVEL * f32::from(shielding_tech));
                let max_hull = HULL_FROM_ARMOR
                    * target_attrs.armor
                    * (1.0 + TECH_BONUS_PER_LEVEL * f32::from(armor_tech));

                let shooter_stats = shooters.combatants[usize::from(shooter.combatant_id)]
                    .stats_mut(round, shooter.kind);
                strike(damage, max_shield, max_hull, target, shooter_stats, target_stats, rng);
            }

            let rf = catalog.rapid_fire(shooter.kind, target_kind);
            if rf == 0 {
                break;
            }
            if rng.next() % rf == 0 {
                break;
            }
        }
    }
}

/// Apply one shot's damage to a live target and run the destruction check.
///
/// Shield-absorbed damage is quantized down to the nearest 1% of max shield
/// capacity before it is subtracted; a breaching shot depletes
/// whatever shield is left and spills the remainder into hull, clipped so the
/// hull never goes negative. Both sides' damage counters record the same
/// integer-truncated amounts, which is what keeps dealt and taken totals
/// equal across the battle.
fn strike(
    damage: f32,
    max_shield: f32,
    max_hull: f32,
    target: &mut Unit,
    shooter_stats: &mut UnitGroupStats,
    target_stats: &mut UnitGroupStats,
    rng: &mut RandomStream,
) {
    let mut hull = target.hull;
    let mut hull_damage = damage - target.shield;

    if hull_damage < 0.0 {
        // Quantized down to the nearest 1% of max shield capacity.
        let shield_damage = 0.01 * (100.0 * damage / max_shield).floor() * max_shield;
        target.shield -= shield_damage;

        shooter_stats.shield_damage_dealt += shield_damage as u64;
        target_stats.shield_damage_taken += shield_damage as u64;
    } else {
        shooter_stats.shield_damage_dealt += target.shield as u64;
        target_stats.shield_damage_taken += target.shield as u64;

        target.shield = 0.0;
        if hull_damage > hull {
            hull_damage = hull;
        }
        hull -= hull_damage;

        shooter_stats.hull_damage_dealt += hull_damage as u64;
        target_stats.hull_damage_taken += hull_damage as u64;
    }

    if hull != 0.0 && hull < WEAK_HULL_THRESHOLD * max_hull {
        let draw = rng.next();
        if hull < (1.0 / RANDOM_MAX as f32) * draw as f32 * max_hull {
            hull = 0.0;
        }
    }
    target.hull = hull;
}
