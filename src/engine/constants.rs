//! Engine tuning constants

/// Hard cap on rounds per engagement.
pub const MAX_ROUNDS: usize = 6;

/// Per-side combatant limit; keeps `CombatantId` inside a byte.
pub const MAX_SIDE_COMBATANTS: u32 = 256;

/// Effectiveness bonus per technology level (+10% per level).
pub const TECH_BONUS_PER_LEVEL: f32 = 0.1;

/// Hull capacity as a fraction of the kind's armor base value.
pub const HULL_FROM_ARMOR: f32 = 0.1;

/// Below this fraction of max hull a unit risks probabilistic destruction.
pub const WEAK_HULL_THRESHOLD: f32 = 0.7;
