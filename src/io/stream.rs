//! End-to-end battle pipeline
//!
//! Wires loader, engine, and reporter over caller-supplied streams so the
//! binary stays a thin argument shim and tests can drive the exact CLI byte
//! path.

use std::io::{BufRead, Write};

use crate::core::error::{Result, SiegeError};
use crate::engine::constants::MAX_SIDE_COMBATANTS;
use crate::engine::engagement::fight;
use crate::engine::rng::RandomStream;
use crate::io::loader::Loader;
use crate::io::report::write_report;

/// Resolve one battle: parse catalog and rosters from `input`, run the
/// engagement with `seed`, and write the statistics report to `output`.
///
/// A side size of zero is a defined success: the report is `0` and the
/// engine is never invoked.
pub fn resolve_stream<R: BufRead, W: Write>(mut input: R, mut output: W, seed: u32) -> Result<()> {
    let mut rng = RandomStream::new(seed)?;

    let mut text = String::new();
    input.read_to_string(&mut text)?;
    let mut loader = Loader::new(&text);

    let catalog = loader.load_catalog()?;
    let (num_attackers, num_defenders) = loader.load_side_counts()?;

    if num_attackers == 0 || num_defenders == 0 {
        writeln!(output, "0")?;
        return Ok(());
    }
    if num_attackers > MAX_SIDE_COMBATANTS {
        return Err(SiegeError::TooManyCombatants { side: "attackers" });
    }
    if num_defenders > MAX_SIDE_COMBATANTS {
        return Err(SiegeError::TooManyCombatants { side: "defenders" });
    }

    let mut combatants = loader.load_combatants(&catalog, num_attackers + num_defenders)?;
    let (attackers, defenders) = combatants.split_at_mut(num_attackers as usize);

    let num_rounds = fight(&catalog, attackers, defenders, &mut rng)?;

    write_report(&mut output, &combatants, num_rounds)
}
