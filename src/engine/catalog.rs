//! Combat attribute catalog
//!
//! Immutable per-kind base values plus the dense rapid-fire matrix. Built
//! once per run and shared by reference; the engine indexes it blindly, so
//! every kind reference is validated here at construction time.

use crate::core::error::{Result, SiegeError};
use crate::core::types::UnitKind;

/// Base combat values of one unit kind, before technology scaling.
#[derive(Debug, Clone, Copy)]
pub struct UnitAttributes {
    pub weapons: f32,
    pub shield: f32,
    pub armor: f32,
}

/// Construction-time description of one kind: base values plus a sparse
/// rapid-fire map (absent target kinds mean no bonus).
#[derive(Debug, Clone)]
pub struct KindSpec {
    pub weapons: f32,
    pub shield: f32,
    pub armor: f32,
    pub rapid_fire: Vec<(UnitKind, u32)>,
}

/// Immutable attribute table shared across the whole run.
#[derive(Debug, Clone)]
pub struct UnitCatalog {
    attributes: Vec<UnitAttributes>,
    /// Dense `num_kinds * num_kinds` matrix, row = shooter kind.
    rapid_fire: Vec<u32>,
}

impl UnitCatalog {
    /// Build and validate the catalog. Kinds are numbered by their position
    /// in `kinds`. Fails on an empty table, non-positive base values, or a
    /// rapid-fire entry naming an out-of-range kind.
    pub fn new(kinds: Vec<KindSpec>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(SiegeError::Parse(
                "num_kinds must be greater than 0".into(),
            ));
        }
        if kinds.len() > usize::from(UnitKind::MAX) + 1 {
            return Err(SiegeError::Parse(format!(
                "too many kinds: {} (limit {})",
                kinds.len(),
                usize::from(UnitKind::MAX) + 1
            )));
        }

        let num_kinds = kinds.len();
        let mut attributes = Vec::with_capacity(num_kinds);
        let mut rapid_fire = vec![0u32; num_kinds * num_kinds];

        for (kind, entry) in kinds.into_iter().enumerate() {
            if entry.weapons <= 0.0 || entry.shield <= 0.0 || entry.armor <= 0.0 {
                return Err(SiegeError::Parse(format!(
                    "kind #{kind} has non-positive base values"
                )));
            }

            for (target, rf) in entry.rapid_fire {
                let target = usize::from(target);
                if target >= num_kinds {
                    return Err(SiegeError::Parse(format!(
                        "rapid fire target #{target} is invalid for kind #{kind}"
                    )));
                }
                rapid_fire[kind * num_kinds + target] = rf;
            }

            attributes.push(UnitAttributes {
                weapons: entry.weapons,
                shield: entry.shield,
                armor: entry.armor,
            });
        }

        Ok(Self { attributes, rapid_fire })
    }

    pub fn num_kinds(&self) -> usize {
        self.attributes.len()
    }

    pub fn attributes(&self, kind: UnitKind) -> &UnitAttributes {
        &self.attributes[usize::from(kind)]
    }

    /// Rapid-fire bonus of `shooter` against `target`; 0 means no bonus.
    pub fn rapid_fire(&self, shooter: UnitKind, target: UnitKind) -> u32 {
        self.rapid_fire[usize::from(shooter) * self.num_kinds() + usize::from(target)]
    }

    /// True if `kind` names an entry of this catalog.
    pub fn contains(&self, kind: UnitKind) -> bool {
        usize::from(kind) < self.num_kinds()
    }
}
