use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

mod abilities;
mod doors;
mod palette;
pub mod seed;
mod spoiler;
mod tables;
pub mod writer;

pub use abilities::AbilityPatch;
pub use doors::DoorAssignment;
pub use palette::{Palette, PaletteChoice};
pub use seed::{resolve_seed, SeedChoice};

use abilities::{ability_pool, ability_slots, apply_abilities};
use doors::shuffle_doors;
use palette::apply_palette;
use tables::{COLOR_LOCATIONS, DOOR_FIELD_OFFSET, DOOR_LINKS};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RandomiserSettings {
    pub input_path: PathBuf,
    /// Folder for the patched ROM. Defaults to the input's folder.
    pub output_dir: Option<PathBuf>,
    /// Empty or missing means a seed is generated.
    pub seed: Option<String>,
    pub randomize_abilities: bool,
    pub include_neutral_enemies: bool,
    pub include_star_rod: bool,
    pub shuffle_doors: bool,
    pub palette: PaletteChoice,
    pub write_spoiler: bool,
}

impl RandomiserSettings {
    /// Reject flag combinations that only make sense together.
    pub fn validate(&self) -> Result<()> {
        if !self.randomize_abilities {
            if self.include_neutral_enemies {
                return Err(RandomiserError::InvalidSettings(
                    "including neutral enemies requires ability randomisation".to_string(),
                ));
            }
            if self.include_star_rod {
                return Err(RandomiserError::InvalidSettings(
                    "the Star Rod ability requires ability randomisation".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum RandomiserError {
    #[error("no input ROM was specified")]
    MissingInput,
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("could not read {}: {source}", path.display())]
    NotReadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("invalid seed: {0}")]
    InvalidSeed(String),
    #[error("ROM is {len} bytes but offsets up to {required} bytes are patched; is this the right game?")]
    RomTooSmall { len: usize, required: usize },
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Coarse category of a [`RandomiserError`], for callers that only need to
/// decide what to tell the user.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    MissingInput,
    FileNotFound,
    NotReadable,
    WriteFailure,
    InvalidSettings,
    UnexpectedFailure,
}

impl RandomiserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingInput => ErrorKind::MissingInput,
            Self::FileNotFound(_) => ErrorKind::FileNotFound,
            Self::NotReadable { .. } => ErrorKind::NotReadable,
            Self::WriteFailure { .. } => ErrorKind::WriteFailure,
            Self::InvalidSettings(_) | Self::InvalidSeed(_) => ErrorKind::InvalidSettings,
            Self::RomTooSmall { .. } | Self::Unexpected(_) => ErrorKind::UnexpectedFailure,
        }
    }
}

pub type Result<T> = std::result::Result<T, RandomiserError>;

/// Patched image plus a record of what changed.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub rom: Vec<u8>,
    pub abilities: Vec<AbilityPatch>,
    pub doors: Vec<DoorAssignment>,
    pub palette: Option<Palette>,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub seed: SeedChoice,
    pub output_path: PathBuf,
    pub spoiler_path: Option<PathBuf>,
    pub abilities_randomized: usize,
    pub doors_shuffled: usize,
    pub palette: Option<Palette>,
}

/// One past the highest byte the active passes will write.
fn required_len(settings: &RandomiserSettings, slots: &[usize]) -> usize {
    let mut end = 0usize;
    if settings.randomize_abilities {
        end = end.max(slots.iter().map(|&o| o + 1).max().unwrap_or(0));
    }
    if settings.shuffle_doors {
        let doors = DOOR_LINKS
            .iter()
            .flat_map(|l| [l.entrance, l.exit])
            .map(|base| base + DOOR_FIELD_OFFSET + 3)
            .max()
            .unwrap_or(0);
        end = end.max(doors);
    }
    if settings.palette != PaletteChoice::Default {
        end = end.max(COLOR_LOCATIONS.iter().map(|&o| o + 3).max().unwrap_or(0));
    }
    end
}

/// Apply every enabled pass to a copy of `rom`. Random draws happen in a fixed
/// order (abilities, doors, palette) from a single stream seeded by `seed`.
pub fn randomize_rom(
    rom: &[u8],
    settings: &RandomiserSettings,
    seed: &SeedChoice,
) -> Result<PatchOutcome> {
    settings.validate()?;

    let slots = ability_slots(settings.include_neutral_enemies);
    let required = required_len(settings, &slots);
    if rom.len() < required {
        return Err(RandomiserError::RomTooSmall {
            len: rom.len(),
            required,
        });
    }

    let mut rng = seed.rng();
    let mut patched = rom.to_vec();

    let abilities = if settings.randomize_abilities {
        let pool = ability_pool(settings.include_star_rod);
        apply_abilities(&mut patched, &slots, &pool, &mut rng)
    } else {
        Vec::new()
    };

    let doors = if settings.shuffle_doors {
        shuffle_doors(&mut patched, DOOR_LINKS, &mut rng)
    } else {
        Vec::new()
    };

    let palette = settings.palette.resolve(&mut rng);
    if let Some(palette) = palette {
        apply_palette(&mut patched, COLOR_LOCATIONS, palette);
    }

    if !settings.randomize_abilities && !settings.shuffle_doors && palette.is_none() {
        warn!("no randomisation options enabled; output will match the input");
    }

    Ok(PatchOutcome {
        rom: patched,
        abilities,
        doors,
        palette,
    })
}

/// Read, patch and write a ROM. Nothing is written unless every pass
/// succeeds.
pub fn run(settings: RandomiserSettings) -> Result<RunReport> {
    settings.validate()?;

    let seed = resolve_seed(settings.seed.as_deref())?;
    info!("Kirby's Adventure randomiser {} seed: {}", VERSION, seed.label());

    let rom = writer::read_rom(&settings.input_path)?;
    let outcome = randomize_rom(&rom, &settings, &seed)?;

    let output_path = writer::output_path(
        &settings.input_path,
        settings.output_dir.as_deref(),
        &seed.label(),
    )?;
    let spoiler_text = if settings.write_spoiler {
        Some(spoiler::render_spoiler(&settings, &seed, &outcome)?)
    } else {
        None
    };

    let spoiler_path = spoiler_text
        .as_ref()
        .map(|_| spoiler::spoiler_path(&output_path));

    let mut outputs = vec![(output_path.as_path(), outcome.rom.as_slice())];
    if let (Some(path), Some(text)) = (&spoiler_path, &spoiler_text) {
        outputs.push((path.as_path(), text.as_bytes()));
    }
    writer::write_outputs(&settings.input_path, &outputs)?;

    Ok(RunReport {
        seed,
        output_path,
        spoiler_path,
        abilities_randomized: outcome.abilities.len(),
        doors_shuffled: outcome.doors.len(),
        palette: outcome.palette,
    })
}
