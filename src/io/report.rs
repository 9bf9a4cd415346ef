//! Battle report serialization
//!
//! Wire format: the executed round count, a blank line, then for every
//! combatant in input order, for every executed round, one line of seven
//! whitespace-separated counters per kind (ascending), with a blank line
//! closing each round block. Later round slots are never reported.

use std::io::Write;

use crate::core::error::Result;
use crate::core::types::Round;
use crate::engine::combatant::Combatant;

pub fn write_report<W: Write>(
    out: &mut W,
    combatants: &[Combatant],
    num_rounds: Round,
) -> Result<()> {
    writeln!(out, "{num_rounds}")?;
    writeln!(out)?;

    for combatant in combatants {
        for round in 0..num_rounds {
            for kind in 0..combatant.num_kinds() {
                let s = combatant.stats(round, kind as u8);
                writeln!(
                    out,
                    "{} {} {} {} {} {} {}",
                    s.times_fired,
                    s.times_was_shot,
                    s.shield_damage_dealt,
                    s.hull_damage_dealt,
                    s.shield_damage_taken,
                    s.hull_damage_taken,
                    s.num_remaining_units,
                )?;
            }
            writeln!(out)?;
        }
    }

    Ok(())
}
