use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::doors::DoorAssignment;
use crate::{PatchOutcome, RandomiserError, RandomiserSettings, Result, SeedChoice};

#[derive(Debug, Serialize)]
struct AbilityEntry {
    offset: String,
    ability: String,
}

#[derive(Debug, Serialize)]
struct PaletteEntry {
    name: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct SpoilerLog<'a> {
    version: &'static str,
    seed: String,
    rng_seed: u64,
    randomize_abilities: bool,
    include_neutral_enemies: bool,
    include_star_rod: bool,
    shuffle_doors: bool,
    abilities: Vec<AbilityEntry>,
    doors: &'a [DoorAssignment],
    palette: Option<PaletteEntry>,
}

/// `<patched rom path minus extension>.spoiler.json`
pub(crate) fn spoiler_path(rom_path: &Path) -> PathBuf {
    rom_path.with_extension("spoiler.json")
}

pub(crate) fn render_spoiler(
    settings: &RandomiserSettings,
    seed: &SeedChoice,
    outcome: &PatchOutcome,
) -> Result<String> {
    let log = SpoilerLog {
        version: crate::VERSION,
        seed: seed.label(),
        rng_seed: seed.rng_seed(),
        randomize_abilities: settings.randomize_abilities,
        include_neutral_enemies: settings.include_neutral_enemies,
        include_star_rod: settings.include_star_rod,
        shuffle_doors: settings.shuffle_doors,
        abilities: outcome
            .abilities
            .iter()
            .map(|p| AbilityEntry {
                offset: format!("0x{:05X}", p.offset),
                ability: format!("0x{:02X}", p.ability),
            })
            .collect(),
        doors: &outcome.doors,
        palette: outcome.palette.map(|p| {
            let [r, g, b] = p.triple();
            PaletteEntry {
                name: p.name(),
                value: format!("{r:02X}{g:02X}{b:02X}"),
            }
        }),
    };

    serde_json::to_string_pretty(&log)
        .map_err(|e| RandomiserError::Unexpected(format!("failed to serialise spoiler log: {e}")))
}
