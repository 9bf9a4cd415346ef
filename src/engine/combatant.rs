//! Combatant rosters and per-round statistics accumulators

use serde::Serialize;

use crate::core::types::{Round, UnitKind};
use crate::engine::constants::MAX_ROUNDS;

/// Seven counters tracked per (combatant, round, kind). Written only by the
/// round engine; monotonically increasing, never reset once a round is
/// processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UnitGroupStats {
    pub times_fired: u64,
    pub times_was_shot: u64,
    pub shield_damage_dealt: u64,
    pub hull_damage_dealt: u64,
    pub shield_damage_taken: u64,
    pub hull_damage_taken: u64,
    pub num_remaining_units: u64,
}

/// One participant of an engagement: technology levels, grouped unit counts,
/// and the statistics history for every possible round.
///
/// `unit_groups` is the grouped (count-by-kind) representation; it is mutated
/// only at the roster/population boundaries, never during a round. The stats
/// table is laid out contiguously as `round * num_kinds + kind`, pre-allocated
/// for `MAX_ROUNDS` so no bookkeeping allocates mid-battle.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub weapons_tech: u8,
    pub shielding_tech: u8,
    pub armor_tech: u8,
    unit_groups: Vec<u64>,
    stats: Vec<UnitGroupStats>,
    num_kinds: usize,
}

impl Combatant {
    pub fn new(num_kinds: usize, weapons_tech: u8, shielding_tech: u8, armor_tech: u8) -> Self {
        Self {
            weapons_tech,
            shielding_tech,
            armor_tech,
            unit_groups: vec![0; num_kinds],
            stats: vec![UnitGroupStats::default(); MAX_ROUNDS * num_kinds],
            num_kinds,
        }
    }

    pub fn num_kinds(&self) -> usize {
        self.num_kinds
    }

    /// Number of units of `kind` in the grouped representation.
    pub fn group(&self, kind: UnitKind) -> u64 {
        self.unit_groups[usize::from(kind)]
    }

    pub fn set_group(&mut self, kind: UnitKind, count: u64) {
        self.unit_groups[usize::from(kind)] = count;
    }

    /// Total units across all kinds.
    pub fn total_units(&self) -> u64 {
        self.unit_groups.iter().sum()
    }

    pub(crate) fn clear_groups(&mut self) {
        self.unit_groups.iter_mut().for_each(|g| *g = 0);
    }

    pub(crate) fn bump_group(&mut self, kind: UnitKind) {
        self.unit_groups[usize::from(kind)] += 1;
    }

    pub fn stats(&self, round: Round, kind: UnitKind) -> &UnitGroupStats {
        &self.stats[round as usize * self.num_kinds + usize::from(kind)]
    }

    pub(crate) fn stats_mut(&mut self, round: Round, kind: UnitKind) -> &mut UnitGroupStats {
        &mut self.stats[round as usize * self.num_kinds + usize::from(kind)]
    }
}
