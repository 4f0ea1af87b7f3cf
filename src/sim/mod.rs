//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Variable timestep, clamped per frame
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host drives it through exactly three entry points: `tick` once per
//! frame, `handle_key` per accepted keystroke, and `drain_events` for the
//! frame's side effects.

pub mod entities;
pub mod input;
pub mod pool;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod words;

pub use entities::{Bullet, Enemy, EnemyId, Particle, Shape, Star};
pub use input::handle_key;
pub use pool::Pool;
pub use state::{CueKind, GameEvent, GameMode, GameState};
pub use tick::tick;
pub use words::{BuiltinWords, WordSupply};
