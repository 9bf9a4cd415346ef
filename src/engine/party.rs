//! Engagement populations
//!
//! A `Party` is one side's roster flattened into individually-tracked units
//! for the duration of an engagement. Units carry indices instead of
//! references (arena + index); the combatant slice is borrowed for the whole
//! engagement and receives the statistics and the folded-back survivor
//! counts.

use crate::core::error::{Result, SiegeError};
use crate::core::types::{CombatantId, Round, UnitKind};
use crate::engine::catalog::UnitCatalog;
use crate::engine::combatant::Combatant;
use crate::engine::constants::{HULL_FROM_ARMOR, TECH_BONUS_PER_LEVEL};

/// One ship of the population. Shield and hull are current values; shield is
/// restored at the start of every round, hull only ever decreases. A unit
/// with `hull == 0.0` is dead but stays in place until compaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub shield: f32,
    pub hull: f32,
    pub kind: UnitKind,
    pub combatant_id: CombatantId,
}

/// Ceiling on the population size of one side; a count above this could not
/// be allocated as a contiguous `Vec<Unit>`.
pub const MAX_UNITS: u64 = (isize::MAX as u64) / (std::mem::size_of::<Unit>() as u64);

/// One side's flattened population plus the cursor delimiting the live
/// prefix. Exclusively owns its unit storage for one engagement.
pub struct Party<'a> {
    pub(crate) combatants: &'a mut [Combatant],
    pub(crate) units: Vec<Unit>,
    num_alive: usize,
}

impl<'a> Party<'a> {
    /// Flatten a roster into individuals: for each combatant in order, for
    /// each kind ascending, emit `group(kind)` units at full hull. Shields
    /// are zero until the first `restore_shields`.
    pub fn muster(catalog: &UnitCatalog, combatants: &'a mut [Combatant]) -> Result<Self> {
        let num_kinds = catalog.num_kinds();

        let mut total: u64 = 0;
        for combatant in combatants.iter() {
            for kind in 0..num_kinds {
                let count = combatant.group(kind as UnitKind);
                if count > MAX_UNITS - total {
                    return Err(SiegeError::TooManyUnits);
                }
                total += count;
            }
        }

        let mut units = Vec::with_capacity(total as usize);
        for (id, combatant) in combatants.iter().enumerate() {
            for kind in 0..num_kinds {
                let kind = kind as UnitKind;
                let max_hull = HULL_FROM_ARMOR
                    * catalog.attributes(kind).armor
                    * (1.0 + TECH_BONUS_PER_LEVEL * f32::from(combatant.armor_tech));
                for _ in 0..combatant.group(kind) {
                    units.push(Unit {
                        shield: 0.0,
                        hull: max_hull,
                        kind,
                        combatant_id: id as CombatantId,
                    });
                }
            }
        }

        let num_alive = units.len();
        Ok(Self { combatants, units, num_alive })
    }

    pub fn num_alive(&self) -> usize {
        self.num_alive
    }

    /// Recharge every live unit to its full shield capacity. Runs at the
    /// start of each round for both sides; hull is never restored.
    pub fn restore_shields(&mut self, catalog: &UnitCatalog) {
        for unit in &mut self.units[..self.num_alive] {
            let tech = self.combatants[usize::from(unit.combatant_id)].shielding_tech;
            unit.shield = catalog.attributes(unit.kind).shield
                * (1.0 + TECH_BONUS_PER_LEVEL * f32::from(tech));
        }
    }

    /// Remove units destroyed this round by compacting survivors toward the
    /// front (forward, order-preserving), crediting each survivor to its
    /// combatant's `num_remaining_units` for `round`. The only point at
    /// which dead units leave the population.
    pub fn compact(&mut self, round: Round) {
        let mut n = 0;
        for i in 0..self.num_alive {
            let unit = self.units[i];
            if unit.hull != 0.0 {
                self.units[n] = unit;
                n += 1;
                self.combatants[usize::from(unit.combatant_id)]
                    .stats_mut(round, unit.kind)
                    .num_remaining_units += 1;
            }
        }
        self.num_alive = n;
    }

    /// Fold the survivors back into the grouped representation: zero every
    /// combatant's groups, then count the live prefix. Restores the roster
    /// for callers that chain engagements off survivor counts.
    pub fn fold_back(&mut self) {
        for combatant in self.combatants.iter_mut() {
            combatant.clear_groups();
        }
        for unit in &self.units[..self.num_alive] {
            self.combatants[usize::from(unit.combatant_id)].bump_group(unit.kind);
        }
    }
}
