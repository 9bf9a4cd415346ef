//! Core type definitions used throughout the codebase

/// Index into the unit catalog. The catalog holds at most 256 kinds, so a
/// byte is enough and keeps the per-unit footprint small.
pub type UnitKind = u8;

/// Index of a combatant within its own side (attackers or defenders each
/// hold at most 256 combatants).
pub type CombatantId = u8;

/// Round counter within one engagement.
pub type Round = u32;
