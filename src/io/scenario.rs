//! Scenario files
//!
//! A scenario TOML names unit kinds and describes both sides' rosters, so
//! batch runs don't have to hand-assemble the numeric battle stream. Kinds
//! are numbered by their position in the file; rapid-fire maps and fleets
//! refer to kinds by name and are resolved (and validated) here.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::{Result, SiegeError};
use crate::core::types::UnitKind;
use crate::engine::catalog::{KindSpec, UnitCatalog};
use crate::engine::combatant::Combatant;
use crate::engine::constants::MAX_SIDE_COMBATANTS;

#[derive(Debug, Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    name: Option<String>,
    kinds: Vec<KindEntry>,
    #[serde(default)]
    attackers: Vec<CombatantEntry>,
    #[serde(default)]
    defenders: Vec<CombatantEntry>,
}

#[derive(Debug, Deserialize)]
struct KindEntry {
    name: String,
    weapons: f32,
    shield: f32,
    armor: f32,
    #[serde(default)]
    rapid_fire: HashMap<String, u32>,
}

#[derive(Debug, Deserialize)]
struct CombatantEntry {
    #[serde(default)]
    weapons_tech: u8,
    #[serde(default)]
    shielding_tech: u8,
    #[serde(default)]
    armor_tech: u8,
    fleet: HashMap<String, u64>,
}

/// A validated scenario: the catalog plus template rosters. Combatants are
/// cloned out per run so statistics never leak between engagements.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub kind_names: Vec<String>,
    pub catalog: UnitCatalog,
    attackers: Vec<Combatant>,
    defenders: Vec<Combatant>,
}

impl Scenario {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        let file: ScenarioFile = toml::from_str(text)?;

        let mut index = HashMap::new();
        for (i, kind) in file.kinds.iter().enumerate() {
            if index.insert(kind.name.clone(), i as UnitKind).is_some() {
                return Err(SiegeError::Scenario(format!(
                    "duplicate kind name '{}'",
                    kind.name
                )));
            }
        }

        let kind_names: Vec<String> = file.kinds.iter().map(|k| k.name.clone()).collect();

        let kinds = file
            .kinds
            .into_iter()
            .map(|kind| {
                let rapid_fire = kind
                    .rapid_fire
                    .into_iter()
                    .map(|(target, rf)| {
                        index.get(&target).copied().map(|t| (t, rf)).ok_or_else(|| {
                            SiegeError::Scenario(format!(
                                "rapid fire of kind '{}' names unknown kind '{target}'",
                                kind.name
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(KindSpec {
                    weapons: kind.weapons,
                    shield: kind.shield,
                    armor: kind.armor,
                    rapid_fire,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let catalog = UnitCatalog::new(kinds)?;

        let build_side = |entries: Vec<CombatantEntry>, side: &'static str| -> Result<Vec<Combatant>> {
            if entries.len() > MAX_SIDE_COMBATANTS as usize {
                return Err(SiegeError::TooManyCombatants { side });
            }
            entries
                .into_iter()
                .map(|entry| {
                    let mut combatant = Combatant::new(
                        catalog.num_kinds(),
                        entry.weapons_tech,
                        entry.shielding_tech,
                        entry.armor_tech,
                    );
                    for (name, count) in entry.fleet {
                        let kind = *index.get(&name).ok_or_else(|| {
                            SiegeError::Scenario(format!(
                                "{side} fleet names unknown kind '{name}'"
                            ))
                        })?;
                        combatant.set_group(kind, count);
                    }
                    Ok(combatant)
                })
                .collect()
        };

        let attackers = build_side(file.attackers, "attackers")?;
        let defenders = build_side(file.defenders, "defenders")?;

        Ok(Self {
            name: file.name.unwrap_or_else(|| "unnamed scenario".into()),
            kind_names,
            catalog,
            attackers,
            defenders,
        })
    }

    /// Fresh copies of both sides' rosters for one engagement.
    pub fn rosters(&self) -> (Vec<Combatant>, Vec<Combatant>) {
        (self.attackers.clone(), self.defenders.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        name = "patrol clash"

        [[kinds]]
        name = "interceptor"
        weapons = 50.0
        shield = 10.0
        armor = 400.0
        rapid_fire = { probe = 5 }

        [[kinds]]
        name = "probe"
        weapons = 0.01
        shield = 0.01
        armor = 100.0

        [[attackers]]
        weapons_tech = 10
        shielding_tech = 10
        armor_tech = 10
        fleet = { interceptor = 200 }

        [[defenders]]
        fleet = { probe = 50, interceptor = 10 }
    "#;

    #[test]
    fn test_scenario_parses_and_resolves_names() {
        let scenario = Scenario::from_toml(SCENARIO).unwrap();
        assert_eq!(scenario.name, "patrol clash");
        assert_eq!(scenario.kind_names, vec!["interceptor", "probe"]);
        assert_eq!(scenario.catalog.rapid_fire(0, 1), 5);

        let (attackers, defenders) = scenario.rosters();
        assert_eq!(attackers.len(), 1);
        assert_eq!(attackers[0].weapons_tech, 10);
        assert_eq!(attackers[0].group(0), 200);
        assert_eq!(defenders[0].group(1), 50);
        assert_eq!(defenders[0].group(0), 10);
        assert_eq!(defenders[0].weapons_tech, 0);
    }

    #[test]
    fn test_unknown_rapid_fire_kind_rejected() {
        let bad = r#"
            [[kinds]]
            name = "interceptor"
            weapons = 50.0
            shield = 10.0
            armor = 400.0
            rapid_fire = { ghost = 5 }
        "#;
        let err = Scenario::from_toml(bad).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_unknown_fleet_kind_rejected() {
        let bad = r#"
            [[kinds]]
            name = "interceptor"
            weapons = 50.0
            shield = 10.0
            armor = 400.0

            [[attackers]]
            fleet = { ghost = 5 }
        "#;
        let err = Scenario::from_toml(bad).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn test_duplicate_kind_name_rejected() {
        let bad = r#"
            [[kinds]]
            name = "interceptor"
            weapons = 50.0
            shield = 10.0
            armor = 400.0

            [[kinds]]
            name = "interceptor"
            weapons = 1.0
            shield = 1.0
            armor = 1.0
        "#;
        let err = Scenario::from_toml(bad).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_rosters_are_independent_copies() {
        let scenario = Scenario::from_toml(SCENARIO).unwrap();
        let (mut a1, _) = scenario.rosters();
        a1[0].set_group(0, 1);
        let (a2, _) = scenario.rosters();
        assert_eq!(a2[0].group(0), 200);
    }
}
