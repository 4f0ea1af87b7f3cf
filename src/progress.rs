//! Player progress: high score and unlocked levels
//!
//! Persisted to LocalStorage on wasm. Also hosts the score-reporting seam
//! for an optional external leaderboard backend.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEVEL;

/// Persistent progress across runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Progress {
    /// Best score across all runs
    pub high_score: u64,
    /// Highest level selectable from the level-select screen
    pub unlocked_level: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            unlocked_level: 1,
        }
    }
}

impl Progress {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "typefall_progress";

    /// Fold a finished run's score in. Returns true when it is a new best.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            return true;
        }
        false
    }

    /// Unlock the level after a cleared one.
    pub fn record_level_cleared(&mut self, level: u32) {
        let next = (level + 1).min(MAX_LEVEL);
        if next > self.unlocked_level {
            self.unlocked_level = next;
        }
    }

    /// Whether the level-select screen may offer this level.
    pub fn is_unlocked(&self, level: u32) -> bool {
        level >= 1 && level <= self.unlocked_level
    }

    /// Load progress from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(progress) = serde_json::from_str::<Progress>(&json) {
                    log::info!(
                        "Loaded progress: high score {}, level {} unlocked",
                        progress.high_score,
                        progress.unlocked_level
                    );
                    return progress;
                }
            }
        }

        log::info!("No saved progress, starting fresh");
        Self::default()
    }

    /// Save progress to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Progress saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

/// Seam for pushing results to an external leaderboard. The game only ever
/// calls through this trait; wiring a real backend is a host concern.
pub trait ScoreReporter {
    fn submit_score(&self, score: u64, max_multiplier: u32);
    fn submit_level_reached(&self, level: u32);
}

/// Default reporter: logs and discards.
pub struct NullReporter;

impl ScoreReporter for NullReporter {
    fn submit_score(&self, score: u64, max_multiplier: u32) {
        log::info!("Run finished: score {score}, best multiplier x{max_multiplier}");
    }

    fn submit_level_reached(&self, level: u32) {
        log::info!("Reached level {level}");
    }
}
