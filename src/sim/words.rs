//! Word supply
//!
//! The simulation consumes words through this trait; where they come from
//! (bundled lists, a server-provided dictionary, another language pack) is
//! the host's business. Decks are shuffled, deduplicated, and consumed
//! back-to-front by the spawn director.

use rand::seq::{IndexedRandom, SliceRandom};
use rand_pcg::Pcg32;

/// Word used when the supply yields nothing, so spawning never stalls.
pub const FALLBACK_WORD: &str = "error";

pub trait WordSupply {
    /// A shuffled, deduplicated deck for the given level.
    fn words_for_level(&self, level: u32, rng: &mut Pcg32) -> Vec<String>;

    /// A long word for boss spawns (length above the boss threshold).
    fn boss_word(&self, rng: &mut Pcg32) -> String;
}

const WORDS_EASY: &[&str] = &[
    "cat", "dog", "sun", "map", "ice", "red", "key", "box", "fog", "sky",
    "ant", "cup", "pen", "owl", "jam", "web", "zip", "ray", "gem", "hat",
];

const WORDS_MEDIUM: &[&str] = &[
    "planet", "rocket", "signal", "cursor", "vector", "branch", "stream",
    "fabric", "copper", "timber", "sprint", "marble", "puzzle", "velvet",
    "anchor", "breeze", "canyon", "dragon", "ember", "falcon",
];

const WORDS_HARD: &[&str] = &[
    "algorithm", "satellite", "labyrinth", "nebulous", "hurricane",
    "momentum", "chemistry", "threshold", "wildfire", "telescope",
    "fragment", "symphony", "parallax", "velocity", "blizzard",
];

const WORDS_BOSS: &[&str] = &[
    "thunderstorm", "extraordinary", "kaleidoscope", "constellation",
    "metamorphosis", "unpredictable", "catastrophic", "electromagnetic",
    "incomprehensible", "revolutionary",
];

/// Bundled tiered word lists; the default supply.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinWords;

impl WordSupply for BuiltinWords {
    fn words_for_level(&self, level: u32, rng: &mut Pcg32) -> Vec<String> {
        let pool: Vec<&str> = match level {
            0..=3 => WORDS_EASY.to_vec(),
            4..=7 => WORDS_EASY.iter().chain(WORDS_MEDIUM).copied().collect(),
            _ => WORDS_MEDIUM.iter().chain(WORDS_HARD).copied().collect(),
        };

        let mut deck: Vec<String> = pool.iter().map(|w| w.to_string()).collect();
        deck.sort();
        deck.dedup();
        deck.shuffle(rng);
        deck
    }

    fn boss_word(&self, rng: &mut Pcg32) -> String {
        WORDS_BOSS
            .choose(rng)
            .copied()
            .unwrap_or(FALLBACK_WORD)
            .to_string()
    }
}

/// Supply that yields nothing; exercises the fallback path.
#[cfg(test)]
pub struct EmptySupply;

#[cfg(test)]
impl WordSupply for EmptySupply {
    fn words_for_level(&self, _level: u32, _rng: &mut Pcg32) -> Vec<String> {
        Vec::new()
    }

    fn boss_word(&self, _rng: &mut Pcg32) -> String {
        FALLBACK_WORD.to_string()
    }
}
