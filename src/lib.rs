//! Typefall - a falling-words typing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, targeting, scoring)
//! - `snapshot`: Per-frame renderable state for a drawing layer
//! - `audio`: Sound cue playback (Web Audio on wasm)
//! - `progress`: High score and unlocked-level persistence
//! - `settings`: User preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use progress::Progress;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Maximum simulation delta per frame (seconds). Bounds the effect of
    /// tab-backgrounding stalls so entities cannot tunnel past thresholds.
    pub const MAX_DT: f32 = 0.1;

    /// Player position offset from the bottom edge
    pub const PLAYER_Y_OFFSET: f32 = 50.0;
    /// Collision radius added to the enemy's own radius for loss detection
    pub const PLAYER_COLLISION_RADIUS: f32 = 20.0;

    /// Enemy defaults
    pub const ENEMY_BASE_SPEED: f32 = 40.0; // pixels per second
    pub const ENEMY_SPEED_INC_PER_LEVEL: f32 = 5.0;
    pub const ENEMY_RADIUS_BASE: f32 = 20.0;
    pub const ENEMY_RADIUS_BOSS: f32 = 40.0;
    /// Upward push applied per consumed letter
    pub const KNOCKBACK_DISTANCE: f32 = 15.0;

    /// Spawn pacing (milliseconds)
    pub const SPAWN_INTERVAL_BASE_MS: f32 = 2000.0;
    pub const SPAWN_INTERVAL_MIN_MS: f32 = 600.0;
    /// Horizontal margin kept clear at both arena edges when spawning
    pub const SPAWN_X_MARGIN: f32 = 100.0;
    /// Enemies enter from above the visible arena
    pub const SPAWN_Y: f32 = -50.0;

    /// Boss gating: eligible above this level, rolled per spawn attempt
    pub const BOSS_MIN_LEVEL: u32 = 5;
    pub const BOSS_CHANCE: f32 = 0.05;
    /// Words longer than this classify the enemy as a boss
    pub const BOSS_WORD_LEN: usize = 10;
    pub const BOSS_SPEED_FACTOR: f32 = 0.6;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 1200.0; // pixels per second
    pub const BULLET_TRAIL_LENGTH: usize = 5;

    /// Particle defaults
    pub const PARTICLE_LIFE_BASE: f32 = 1.0;
    pub const PARTICLE_DECAY_RATE: f32 = 2.0; // life units per second

    /// Background starfield
    pub const STAR_COUNT: usize = 100;
    pub const STAR_SPEED: f32 = 10.0;

    /// Scoring
    pub const SCORE_PER_CHAR: u64 = 10;
    pub const LEVEL_BONUS_PER_LEVEL: u64 = 1000;

    /// Level lifecycle
    pub const MAX_LEVEL: u32 = 20;
    /// Delay between the final kill and the level-complete transition
    pub const LEVEL_CLEAR_DELAY: f32 = 0.5;

    /// Explosion burst sizes
    pub const BURST_KILL: usize = 20;
    pub const BURST_KILL_BOSS: usize = 50;
    pub const BURST_PLAYER_DEATH: usize = 100;
}
