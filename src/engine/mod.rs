//! Combat resolution engine
//!
//! Grouped rosters are flattened into per-unit populations for the duration
//! of one engagement, fought over at most `MAX_ROUNDS` rounds, and folded
//! back into grouped survivor counts. Every stochastic decision consumes the
//! single threaded random stream in a fixed order, so a seed reproduces a
//! battle bit for bit.

pub mod catalog;
pub mod combatant;
pub mod constants;
pub mod engagement;
pub mod fire;
pub mod party;
pub mod rng;

pub use catalog::{KindSpec, UnitAttributes, UnitCatalog};
pub use combatant::{Combatant, UnitGroupStats};
pub use constants::*;
pub use engagement::{fight, resolve_battle, BattleOutcome, CombatantOutcome};
pub use fire::fire_pass;
pub use party::{Party, Unit};
pub use rng::RandomStream;
