use std::fmt;
use std::str::FromStr;

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tables::PALETTE_VALUES;
use crate::RandomiserError;

/// Replacement colours for Kirby. Discriminants index `PALETTE_VALUES`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Palette {
    Gray = 0,
    LightBlue,
    Blue,
    Purple,
    Red,
    Orange,
    Yellow,
    LightGreen,
    Green,
}

impl Palette {
    pub const ALL: [Palette; 9] = [
        Palette::Gray,
        Palette::LightBlue,
        Palette::Blue,
        Palette::Purple,
        Palette::Red,
        Palette::Orange,
        Palette::Yellow,
        Palette::LightGreen,
        Palette::Green,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Palette::Gray => "gray",
            Palette::LightBlue => "light-blue",
            Palette::Blue => "blue",
            Palette::Purple => "purple",
            Palette::Red => "red",
            Palette::Orange => "orange",
            Palette::Yellow => "yellow",
            Palette::LightGreen => "light-green",
            Palette::Green => "green",
        }
    }

    pub fn triple(self) -> [u8; 3] {
        PALETTE_VALUES[self as usize]
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How Kirby's palette is picked for a run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteChoice {
    /// Leave the vanilla palette alone.
    #[default]
    Default,
    Explicit(Palette),
    Random,
}

impl PaletteChoice {
    /// Resolve to a concrete palette. `Random` consumes exactly one draw.
    pub(crate) fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Option<Palette> {
        match self {
            PaletteChoice::Default => None,
            PaletteChoice::Explicit(palette) => Some(palette),
            PaletteChoice::Random => Some(Palette::ALL[rng.gen_range(0..Palette::ALL.len())]),
        }
    }
}

impl FromStr for PaletteChoice {
    type Err = RandomiserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "default" | "none" => return Ok(PaletteChoice::Default),
            "random" => return Ok(PaletteChoice::Random),
            "grey" => return Ok(PaletteChoice::Explicit(Palette::Gray)),
            _ => {}
        }

        Palette::ALL
            .iter()
            .find(|p| p.name() == key || p.name().replace('-', "") == key)
            .map(|&p| PaletteChoice::Explicit(p))
            .ok_or_else(|| {
                RandomiserError::InvalidSettings(format!(
                    "unknown palette '{s}'; expected default, random or one of: {}",
                    Palette::ALL.map(Palette::name).join(", ")
                ))
            })
    }
}

/// Write `palette` at every offset in `locations`. Returns the number of
/// triples written.
pub(crate) fn apply_palette(rom: &mut [u8], locations: &[usize], palette: Palette) -> usize {
    let triple = palette.triple();
    for &offset in locations {
        rom[offset..offset + 3].copy_from_slice(&triple);
        debug!("palette 0x{offset:05X} -> {:02X?}", triple);
    }
    info!("recoloured Kirby {} at {} locations", palette, locations.len());
    locations.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::COLOR_LOCATIONS;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn parses_names() {
        assert_eq!("default".parse::<PaletteChoice>().unwrap(), PaletteChoice::Default);
        assert_eq!("Random".parse::<PaletteChoice>().unwrap(), PaletteChoice::Random);
        assert_eq!(
            "light-blue".parse::<PaletteChoice>().unwrap(),
            PaletteChoice::Explicit(Palette::LightBlue)
        );
        assert_eq!(
            "light_green".parse::<PaletteChoice>().unwrap(),
            PaletteChoice::Explicit(Palette::LightGreen)
        );
        assert_eq!(
            "lightblue".parse::<PaletteChoice>().unwrap(),
            PaletteChoice::Explicit(Palette::LightBlue)
        );
        assert!("magenta".parse::<PaletteChoice>().is_err());
    }

    #[test]
    fn triples_follow_table_order() {
        assert_eq!(Palette::Gray.triple(), [0x20, 0x10, 0x00]);
        assert_eq!(Palette::Red.triple(), [0x25, 0x15, 0x0F]);
        assert_eq!(Palette::Green.triple(), [0x29, 0x19, 0x0F]);
    }

    #[test]
    fn default_resolves_to_nothing_without_drawing() {
        let mut a = StdRng::seed_from_u64(1);
        let mut b = StdRng::seed_from_u64(1);
        assert_eq!(PaletteChoice::Default.resolve(&mut a), None);
        assert_eq!(
            PaletteChoice::Explicit(Palette::Blue).resolve(&mut a),
            Some(Palette::Blue)
        );
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn random_resolves_to_a_table_entry() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let palette = PaletteChoice::Random.resolve(&mut rng).unwrap();
            assert!(Palette::ALL.contains(&palette));
        }
    }

    #[test]
    fn every_location_gets_the_same_triple() {
        let mut rom = vec![0u8; 0x80010];
        let written = apply_palette(&mut rom, COLOR_LOCATIONS, Palette::Purple);
        assert_eq!(written, COLOR_LOCATIONS.len());
        for &offset in COLOR_LOCATIONS {
            assert_eq!(rom[offset..offset + 3], [0x24, 0x14, 0x0F]);
        }
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let json = serde_json::to_string(&PaletteChoice::Explicit(Palette::LightBlue)).unwrap();
        assert_eq!(json, r#"{"explicit":"light-blue"}"#);
        let back: PaletteChoice = serde_json::from_str(r#""random""#).unwrap();
        assert_eq!(back, PaletteChoice::Random);
    }
}
