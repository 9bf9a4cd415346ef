//! Round engine orchestration
//!
//! Setup musters both populations, the round loop runs
//! restore/fire/fire/compact for up to `MAX_ROUNDS` rounds or until a side
//! is annihilated, and finalize folds survivor counts back into the rosters.
//! The attacker pass always precedes the defender pass; both consume the one
//! threaded random stream, so the pass order is part of the battle's
//! observable contract.

use serde::Serialize;

use crate::core::error::{Result, SiegeError};
use crate::core::types::Round;
use crate::engine::catalog::UnitCatalog;
use crate::engine::combatant::{Combatant, UnitGroupStats};
use crate::engine::constants::{MAX_ROUNDS, MAX_SIDE_COMBATANTS};
use crate::engine::fire::fire_pass;
use crate::engine::party::Party;
use crate::engine::rng::RandomStream;

/// Run one engagement to completion. Statistics land in the combatants'
/// stats tables; the grouped counts are rewritten to the survivors. Returns
/// the number of rounds actually executed.
pub fn fight(
    catalog: &UnitCatalog,
    attackers: &mut [Combatant],
    defenders: &mut [Combatant],
    rng: &mut RandomStream,
) -> Result<Round> {
    let mut attackers_party = Party::muster(catalog, attackers)?;
    let mut defenders_party = Party::muster(catalog, defenders)?;

    tracing::debug!(
        attackers = attackers_party.num_alive(),
        defenders = defenders_party.num_alive(),
        "engagement mustered"
    );

    let mut round: Round = 0;
    while (round as usize) < MAX_ROUNDS
        && attackers_party.num_alive() > 0
        && defenders_party.num_alive() > 0
    {
        attackers_party.restore_shields(catalog);
        defenders_party.restore_shields(catalog);

        fire_pass(catalog, &mut attackers_party, &mut defenders_party, round, rng);
        fire_pass(catalog, &mut defenders_party, &mut attackers_party, round, rng);

        attackers_party.compact(round);
        defenders_party.compact(round);

        tracing::debug!(
            round,
            attackers_alive = attackers_party.num_alive(),
            defenders_alive = defenders_party.num_alive(),
            "round resolved"
        );

        round += 1;
    }

    attackers_party.fold_back();
    defenders_party.fold_back();

    tracing::info!(rounds = round, "engagement finished");
    Ok(round)
}

/// Statistics history of one combatant, one entry per executed round, each
/// holding the per-kind counters in ascending kind order.
#[derive(Debug, Clone, Serialize)]
pub struct CombatantOutcome {
    rounds: Vec<Vec<UnitGroupStats>>,
}

impl CombatantOutcome {
    fn collect(combatant: &Combatant, num_rounds: Round) -> Self {
        let rounds = (0..num_rounds)
            .map(|round| {
                (0..combatant.num_kinds())
                    .map(|kind| *combatant.stats(round, kind as u8))
                    .collect()
            })
            .collect();
        Self { rounds }
    }

    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    /// Per-kind counters for one executed round.
    pub fn round_stats(&self, round: Round) -> &[UnitGroupStats] {
        &self.rounds[round as usize]
    }
}

/// Owned result of one engagement, for programmatic consumers.
#[derive(Debug, Clone, Serialize)]
pub struct BattleOutcome {
    pub num_rounds: Round,
    pub attackers: Vec<CombatantOutcome>,
    pub defenders: Vec<CombatantOutcome>,
}

/// Library facade over [`fight`]: validates seed and side sizes, runs the
/// engagement, and snapshots each combatant's statistics into an owned
/// outcome. An empty side yields a zero-round outcome without invoking the
/// engine.
pub fn resolve_battle(
    catalog: &UnitCatalog,
    attackers: &mut [Combatant],
    defenders: &mut [Combatant],
    seed: u32,
) -> Result<BattleOutcome> {
    if attackers.len() > MAX_SIDE_COMBATANTS as usize {
        return Err(SiegeError::TooManyCombatants { side: "attackers" });
    }
    if defenders.len() > MAX_SIDE_COMBATANTS as usize {
        return Err(SiegeError::TooManyCombatants { side: "defenders" });
    }

    let mut rng = RandomStream::new(seed)?;

    let num_rounds = if attackers.is_empty() || defenders.is_empty() {
        0
    } else {
        fight(catalog, attackers, defenders, &mut rng)?
    };

    Ok(BattleOutcome {
        num_rounds,
        attackers: attackers
            .iter()
            .map(|c| CombatantOutcome::collect(c, num_rounds))
            .collect(),
        defenders: defenders
            .iter()
            .map(|c| CombatantOutcome::collect(c, num_rounds))
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::catalog::KindSpec;

    fn catalog() -> UnitCatalog {
        UnitCatalog::new(vec![
            // Fighter: weak shields, modest hull.
            KindSpec { weapons: 50.0, shield: 10.0, armor: 400.0, rapid_fire: Vec::new() },
            // Bastion: heavy everything.
            KindSpec { weapons: 1000.0, shield: 200.0, armor: 11000.0, rapid_fire: Vec::new() },
        ])
        .unwrap()
    }

    fn side(kind: u8, count: u64) -> Vec<Combatant> {
        let mut c = Combatant::new(2, 10, 10, 10);
        c.set_group(kind, count);
        vec![c]
    }

    #[test]
    fn test_round_cap() {
        // Peashooters against fortress shields: every shot quantizes to zero
        // shield damage, nobody ever dies, the loop runs the full cap.
        let catalog = UnitCatalog::new(vec![KindSpec {
            weapons: 1.0,
            shield: 10000.0,
            armor: 10000.0,
            rapid_fire: Vec::new(),
        }])
        .unwrap();

        let mut attackers = vec![Combatant::new(1, 10, 10, 10)];
        attackers[0].set_group(0, 50);
        let mut defenders = vec![Combatant::new(1, 10, 10, 10)];
        defenders[0].set_group(0, 50);
        let mut rng = RandomStream::new(42).unwrap();

        let rounds = fight(&catalog, &mut attackers, &mut defenders, &mut rng).unwrap();
        assert_eq!(rounds as usize, MAX_ROUNDS);
        assert_eq!(attackers[0].total_units(), 50);
        assert_eq!(defenders[0].total_units(), 50);
    }

    #[test]
    fn test_stops_when_side_annihilated() {
        let catalog = catalog();
        // Massed heavies against a handful of fighters end well before the cap.
        let mut attackers = side(1, 500);
        let mut defenders = side(0, 3);
        let mut rng = RandomStream::new(42).unwrap();

        let rounds = fight(&catalog, &mut attackers, &mut defenders, &mut rng).unwrap();
        assert!(rounds >= 1 && (rounds as usize) < MAX_ROUNDS);
        assert_eq!(defenders[0].total_units(), 0);
        assert!(attackers[0].total_units() > 0);
    }

    #[test]
    fn test_fight_is_deterministic() {
        let catalog = catalog();

        let run = |seed: u32| {
            let mut attackers = side(0, 200);
            let mut defenders = side(1, 10);
            let mut rng = RandomStream::new(seed).unwrap();
            let rounds = fight(&catalog, &mut attackers, &mut defenders, &mut rng).unwrap();
            (rounds, attackers, defenders)
        };

        let (r1, a1, d1) = run(777);
        let (r2, a2, d2) = run(777);
        assert_eq!(r1, r2);
        for round in 0..r1 {
            for kind in 0..2u8 {
                assert_eq!(a1[0].stats(round, kind), a2[0].stats(round, kind));
                assert_eq!(d1[0].stats(round, kind), d2[0].stats(round, kind));
            }
        }

        let (r3, _, _) = run(778);
        // A different seed is allowed to coincide, but stats rarely do; just
        // sanity-check the run completed inside the cap.
        assert!(r3 as usize <= MAX_ROUNDS);
    }

    #[test]
    fn test_empty_groups_side_yields_zero_rounds() {
        let catalog = catalog();
        // A combatant is present but owns no units: the loop never starts.
        let mut attackers = side(0, 100);
        let mut defenders = vec![Combatant::new(2, 0, 0, 0)];
        let mut rng = RandomStream::new(5).unwrap();

        let rounds = fight(&catalog, &mut attackers, &mut defenders, &mut rng).unwrap();
        assert_eq!(rounds, 0);
        // Fold-back still ran: attacker counts survive untouched.
        assert_eq!(attackers[0].total_units(), 100);
    }

    #[test]
    fn test_resolve_battle_zero_combatants_short_circuits() {
        let catalog = catalog();
        let outcome = resolve_battle(&catalog, &mut [], &mut side(0, 5), 123).unwrap();
        assert_eq!(outcome.num_rounds, 0);
        assert!(outcome.attackers.is_empty());
        assert_eq!(outcome.defenders.len(), 1);
        assert_eq!(outcome.defenders[0].num_rounds(), 0);
    }

    #[test]
    fn test_resolve_battle_rejects_zero_seed() {
        let catalog = catalog();
        let err = resolve_battle(&catalog, &mut side(0, 1), &mut side(0, 1), 0);
        assert!(matches!(err, Err(SiegeError::InvalidSeed)));
    }

    #[test]
    fn test_outcome_snapshot_matches_combatant_stats() {
        let catalog = catalog();
        let mut attackers = side(0, 100);
        let mut defenders = side(0, 100);
        let outcome = resolve_battle(&catalog, &mut attackers, &mut defenders, 31337).unwrap();

        assert!(outcome.num_rounds >= 1);
        for round in 0..outcome.num_rounds {
            let snap = &outcome.attackers[0].round_stats(round)[0];
            assert_eq!(snap, attackers[0].stats(round, 0));
        }
    }
}
