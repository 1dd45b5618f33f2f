use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::tables::{DoorLink, DOOR_FIELD_OFFSET};

/// Where one stage door leads after shuffling.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DoorAssignment {
    /// Stage whose hub door was rewired.
    pub door: &'static str,
    /// Stage that door now leads into. Finishing it returns to `door`'s hub spot.
    pub leads_to: &'static str,
}

fn write_field(rom: &mut [u8], base: usize, value: [u8; 3]) {
    let start = base + DOOR_FIELD_OFFSET;
    rom[start..start + 3].copy_from_slice(&value);
}

/// Permute stage connections. Door `i` is pointed at stage `j = perm[i]`,
/// and stage `j`'s exit is pointed back at door `i`'s return data, so
/// entrances and exits stay paired one to one.
pub(crate) fn shuffle_doors<R: Rng + ?Sized>(
    rom: &mut [u8],
    links: &[DoorLink],
    rng: &mut R,
) -> Vec<DoorAssignment> {
    let mut perm: Vec<usize> = (0..links.len()).collect();
    perm.shuffle(rng);

    let mut assignments = Vec::with_capacity(links.len());
    for (i, &j) in perm.iter().enumerate() {
        write_field(rom, links[i].entrance, links[j].entrance_value);
        write_field(rom, links[j].exit, links[i].exit_value);

        debug!("door {} -> stage {}", links[i].stage, links[j].stage);
        assignments.push(DoorAssignment {
            door: links[i].stage,
            leads_to: links[j].stage,
        });
    }

    let fixed = perm.iter().enumerate().filter(|&(i, &j)| i == j).count();
    info!(
        "shuffled {} stage doors ({} left in place)",
        links.len(),
        fixed
    );
    assignments
}
