use log::{debug, info};
use rand::Rng;
use serde::Serialize;

use crate::tables::{ABILITY_LOCATIONS, ABILITY_VALUES, NEUTRAL_LOCATIONS, STAR_ROD_ABILITY};

/// One rewritten enemy ability slot.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AbilityPatch {
    pub offset: usize,
    pub ability: u8,
}

/// Candidate ability bytes for this run. Built fresh from the flags; the
/// static table is never extended in place.
pub(crate) fn ability_pool(include_star_rod: bool) -> Vec<u8> {
    let mut pool = ABILITY_VALUES.to_vec();
    if include_star_rod {
        pool.push(STAR_ROD_ABILITY);
    }
    pool
}

/// Slots that receive a new ability, in fixed table order.
pub(crate) fn ability_slots(include_neutral_enemies: bool) -> Vec<usize> {
    let mut slots = ABILITY_LOCATIONS.to_vec();
    if include_neutral_enemies {
        slots.extend_from_slice(NEUTRAL_LOCATIONS);
    }
    slots
}

/// Draw one ability per slot, uniformly from `pool`, and write it into `rom`.
/// Callers must have bounds-checked every slot.
pub(crate) fn apply_abilities<R: Rng + ?Sized>(
    rom: &mut [u8],
    slots: &[usize],
    pool: &[u8],
    rng: &mut R,
) -> Vec<AbilityPatch> {
    let mut patches = Vec::with_capacity(slots.len());

    for &offset in slots {
        let ability = pool[rng.gen_range(0..pool.len())];
        rom[offset] = ability;
        debug!("ability slot 0x{offset:05X} -> 0x{ability:02X}");
        patches.push(AbilityPatch { offset, ability });
    }

    info!(
        "randomised {} enemy ability slots from a pool of {}",
        patches.len(),
        pool.len()
    );
    patches
}
