//! Battle input parsing
//!
//! The battle stream is whitespace-separated numeric tokens: the kind count,
//! per-kind attributes with sparse rapid-fire pairs, the two side sizes, and
//! one roster per combatant. Parsing is strictly sequential; the first
//! malformed token aborts with a message naming the field and index, and the
//! engine never sees partially-valid data.

use std::str::{FromStr, SplitWhitespace};

use crate::core::error::{Result, SiegeError};
use crate::core::types::UnitKind;
use crate::engine::catalog::{KindSpec, UnitCatalog};
use crate::engine::combatant::Combatant;

/// Sequential token reader over a battle input string.
pub struct Loader<'a> {
    tokens: SplitWhitespace<'a>,
}

impl<'a> Loader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { tokens: input.split_whitespace() }
    }

    /// Parse the next token as `T`, or fail with `cannot scan {what}`.
    fn scan<T: FromStr>(&mut self, what: &str) -> Result<T> {
        self.tokens
            .next()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| SiegeError::Parse(format!("cannot scan {what}")))
    }

    /// Parse the attribute table: kind count, then per kind the three base
    /// values and its sparse rapid-fire list.
    pub fn load_catalog(&mut self) -> Result<UnitCatalog> {
        let num_kinds: u8 = self.scan("num_kinds")?;
        if num_kinds == 0 {
            return Err(SiegeError::Parse("num_kinds must be greater than 0".into()));
        }

        let mut kinds = Vec::with_capacity(usize::from(num_kinds));
        for kind in 0..num_kinds {
            let weapons: f32 = self.scan(&format!("kind #{kind}"))?;
            let shield: f32 = self.scan(&format!("kind #{kind}"))?;
            let armor: f32 = self.scan(&format!("kind #{kind}"))?;
            let num_rapid_fire: u8 = self.scan(&format!("kind #{kind}"))?;

            let mut rapid_fire = Vec::with_capacity(usize::from(num_rapid_fire));
            for i in 0..num_rapid_fire {
                let target: UnitKind =
                    self.scan(&format!("rapid fire #{i} for kind #{kind}"))?;
                let rf: u32 = self.scan(&format!("rapid fire #{i} for kind #{kind}"))?;
                if target >= num_kinds {
                    return Err(SiegeError::Parse(format!(
                        "rapid fire #{i} is invalid for kind #{kind}"
                    )));
                }
                rapid_fire.push((target, rf));
            }

            kinds.push(KindSpec { weapons, shield, armor, rapid_fire });
        }

        UnitCatalog::new(kinds)
    }

    /// Parse the attacker and defender side sizes.
    pub fn load_side_counts(&mut self) -> Result<(u32, u32)> {
        let num_attackers: u32 = self.scan("the number of combatants")?;
        let num_defenders: u32 = self.scan("the number of combatants")?;
        Ok((num_attackers, num_defenders))
    }

    /// Parse `count` combatant rosters (attackers first, then defenders;
    /// indices in diagnostics are global across both sides).
    pub fn load_combatants(
        &mut self,
        catalog: &UnitCatalog,
        count: u32,
    ) -> Result<Vec<Combatant>> {
        let num_kinds = catalog.num_kinds();
        let mut combatants = Vec::with_capacity(count as usize);

        for i in 0..count {
            let weapons_tech: u8 = self.scan(&format!("combatant #{i}"))?;
            let shielding_tech: u8 = self.scan(&format!("combatant #{i}"))?;
            let armor_tech: u8 = self.scan(&format!("combatant #{i}"))?;
            let num_unit_groups: u8 = self.scan(&format!("combatant #{i}"))?;

            let mut combatant =
                Combatant::new(num_kinds, weapons_tech, shielding_tech, armor_tech);

            for j in 0..num_unit_groups {
                let kind: UnitKind =
                    self.scan(&format!("unit group #{j} for combatant #{i}"))?;
                let num_units: u64 =
                    self.scan(&format!("unit group #{j} for combatant #{i}"))?;
                if !catalog.contains(kind) {
                    return Err(SiegeError::Parse(format!(
                        "unit group #{j} is invalid for combatant #{i}"
                    )));
                }
                combatant.set_group(kind, num_units);
            }

            combatants.push(combatant);
        }

        Ok(combatants)
    }
}
