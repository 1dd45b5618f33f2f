use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{RandomiserError, Result};

/// Upper bound (inclusive) for auto-generated seeds.
pub const MAX_GENERATED_SEED: u64 = 999_999_999;

/// Where the seed for a run came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedChoice {
    /// Seed text typed by the user, kept verbatim for the output filename.
    User(String),
    Generated(u64),
}

impl SeedChoice {
    /// Text that goes into the output filename.
    pub fn label(&self) -> String {
        match self {
            Self::User(text) => text.clone(),
            Self::Generated(seed) => seed.to_string(),
        }
    }

    /// Numeric seed fed to the generator. Decimal text is used as-is,
    /// anything else is hashed.
    pub fn rng_seed(&self) -> u64 {
        match self {
            Self::User(text) => text.parse::<u64>().unwrap_or_else(|_| fnv1a(text)),
            Self::Generated(seed) => *seed,
        }
    }

    /// The single random stream for a run. Draw order is abilities, then
    /// doors, then the palette.
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.rng_seed())
    }
}

/// Resolve the user's seed text, generating one from system entropy when
/// nothing was supplied.
pub fn resolve_seed(input: Option<&str>) -> Result<SeedChoice> {
    resolve_seed_with(input, &mut rand::thread_rng())
}

pub(crate) fn resolve_seed_with<R: Rng + ?Sized>(
    input: Option<&str>,
    entropy: &mut R,
) -> Result<SeedChoice> {
    let text = input.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Ok(SeedChoice::Generated(entropy.gen_range(0..=MAX_GENERATED_SEED)));
    }

    if let Some(bad) = text
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(RandomiserError::InvalidSeed(format!(
            "seed '{text}' contains '{bad}'; only letters, digits, '_' and '-' are allowed"
        )));
    }

    Ok(SeedChoice::User(text.to_string()))
}

fn fnv1a(text: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xCBF2_9CE4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    text.bytes()
        .fold(OFFSET_BASIS, |hash, b| (hash ^ u64::from(b)).wrapping_mul(PRIME))
}
