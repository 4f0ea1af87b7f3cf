//! Run/level state and core simulation types
//!
//! One owned context record, passed explicitly to every subsystem call.
//! No ambient globals; all randomness comes from the seeded RNG owned here.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entities::{Bullet, Enemy, EnemyId, Particle, Star};
use super::pool::Pool;
use super::words::{BuiltinWords, WordSupply};
use crate::consts::*;

/// Current screen / run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Main menu, before any run
    Start,
    /// Active gameplay
    Playing,
    /// Tick scheduling suspended; resume re-anchors the host clock
    Paused,
    /// Run ended by player collision
    GameOver,
    /// Level quota cleared, bonus awarded
    LevelComplete,
    /// Level-select menu branch
    LevelSelect,
}

/// Sound cue kinds the core triggers; synthesis is external
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueKind {
    Shoot,
    Explosion,
    Lock,
    ComboBreak,
}

/// Things that happened this frame, drained by the host for
/// presentation, audio, and persistence side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Cue(CueKind),
    ScoreChanged { score: u64 },
    MultiplierChanged { multiplier: u32 },
    LevelCompleted { level: u32, bonus: u64 },
    GameOver { score: u64, new_high_score: bool },
}

/// Complete game state
pub struct GameState {
    pub mode: GameMode,
    pub score: u64,
    /// Persists across runs; the host loads/saves it via `Progress`
    pub high_score: u64,
    pub level: u32,
    pub multiplier: u32,
    pub max_multiplier: u32,

    /// Spawn quota for the current level
    pub enemies_to_spawn: u32,
    pub enemies_spawned: u32,
    /// Elapsed milliseconds since the last spawn
    pub spawn_timer_ms: f32,

    /// Identity link into the active enemy set; liveness-checked before
    /// every dereference, never an owning reference
    pub target: Option<EnemyId>,
    /// Seconds until the deferred level-complete transition fires
    pub level_clear_timer: Option<f32>,

    pub player: Vec2,
    pub arena: Vec2,

    pub seed: u64,
    pub rng: Pcg32,

    pub words: Box<dyn WordSupply>,
    pub deck: Vec<String>,

    // Active sets own their entities; pools own only released instances
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub particles: Vec<Particle>,
    pub stars: Vec<Star>,

    pub bullet_pool: Pool<Bullet>,
    pub particle_pool: Pool<Particle>,

    pub events: Vec<GameEvent>,

    next_id: EnemyId,
}

impl GameState {
    pub fn new(arena_w: f32, arena_h: f32, seed: u64) -> Self {
        Self::with_words(arena_w, arena_h, seed, Box::new(BuiltinWords))
    }

    pub fn with_words(arena_w: f32, arena_h: f32, seed: u64, words: Box<dyn WordSupply>) -> Self {
        let arena = Vec2::new(arena_w, arena_h);
        let mut state = Self {
            mode: GameMode::Start,
            score: 0,
            high_score: 0,
            level: 1,
            multiplier: 1,
            max_multiplier: 1,
            enemies_to_spawn: 0,
            enemies_spawned: 0,
            spawn_timer_ms: 0.0,
            target: None,
            level_clear_timer: None,
            player: Vec2::new(arena.x / 2.0, arena.y - PLAYER_Y_OFFSET),
            arena,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            words,
            deck: Vec::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            particles: Vec::new(),
            stars: Vec::new(),
            bullet_pool: Pool::new(),
            particle_pool: Pool::new(),
            events: Vec::new(),
            next_id: 1,
        };

        state.bullet_pool.warm(32);
        state.particle_pool.warm(BURST_PLAYER_DEATH);
        state.init_stars();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EnemyId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Resize the arena; the player stays anchored near the bottom center.
    pub fn resize(&mut self, arena_w: f32, arena_h: f32) {
        self.arena = Vec2::new(arena_w, arena_h);
        self.player = Vec2::new(arena_w / 2.0, arena_h - PLAYER_Y_OFFSET);
        if self.stars.is_empty() {
            self.init_stars();
        }
    }

    pub fn init_stars(&mut self) {
        self.stars.clear();
        for _ in 0..STAR_COUNT {
            let mut star = Star::default();
            star.reset(self.arena, &mut self.rng);
            self.stars.push(star);
        }
    }

    /// Index of an active enemy by identity, if still alive.
    pub fn enemy_index(&self, id: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|e| e.id == id)
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn push_cue(&mut self, cue: CueKind) {
        self.events.push(GameEvent::Cue(cue));
    }

    /// Hand this frame's events to the host.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Scatter a particle burst at a position.
    pub fn burst(&mut self, pos: Vec2, count: usize, hue: f32) {
        for _ in 0..count {
            let mut p = self.particle_pool.acquire();
            p.reset(pos, hue, &mut self.rng);
            self.particles.push(p);
        }
    }

    /// Reset per-level state and repopulate the word deck for level `n`.
    pub fn start_level(&mut self, n: u32) {
        self.level = n.min(MAX_LEVEL);
        self.enemies_to_spawn = 10 + self.level * 5;
        self.enemies_spawned = 0;
        self.spawn_timer_ms = 0.0;
        self.level_clear_timer = None;
        self.enemies.clear();
        self.target = None;
        // In-flight bullets keep flying; they go stale and return to the
        // pool on the next tick.
        self.deck = self.words.words_for_level(self.level, &mut self.rng);
    }

    /// Begin a fresh run at the given level.
    pub fn start_run(&mut self, level: u32) {
        self.score = 0;
        self.multiplier = 1;
        self.max_multiplier = 1;
        self.start_level(level);
        if self.stars.is_empty() {
            self.init_stars();
        }
        self.mode = GameMode::Playing;
    }

    /// Advance after a completed level: next level, fresh multiplier.
    /// The multiplier reset here is silent; it is not a combo break.
    pub fn advance_level(&mut self) {
        let next = (self.level + 1).min(MAX_LEVEL);
        self.start_level(next);
        self.multiplier = 1;
        self.mode = GameMode::Playing;
    }

    /// Playing ⇄ Paused. The host stops requesting frames while paused and
    /// re-anchors its delta clock on resume.
    pub fn toggle_pause(&mut self) {
        self.mode = match self.mode {
            GameMode::Playing => GameMode::Paused,
            GameMode::Paused => GameMode::Playing,
            other => other,
        };
    }

    /// Terminal transition on player collision.
    pub fn game_over(&mut self) {
        let new_high_score = self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.mode = GameMode::GameOver;
        self.push_event(GameEvent::GameOver {
            score: self.score,
            new_high_score,
        });
    }

    /// Called at the moment of a kill: arm the deferred level-complete
    /// transition once the quota is spawned and the field is clear.
    pub fn check_level_clear(&mut self) {
        if self.mode == GameMode::Playing
            && self.enemies_spawned >= self.enemies_to_spawn
            && self.enemies.is_empty()
        {
            self.level_clear_timer = Some(LEVEL_CLEAR_DELAY);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_level_resets_quota_and_lock() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(1);
        assert_eq!(state.enemies_to_spawn, 15);

        state.target = Some(99);
        state.enemies_spawned = 3;
        state.spawn_timer_ms = 500.0;

        state.start_level(4);
        assert_eq!(state.level, 4);
        assert_eq!(state.enemies_to_spawn, 30);
        assert_eq!(state.enemies_spawned, 0);
        assert_eq!(state.spawn_timer_ms, 0.0);
        assert!(state.target.is_none());
        assert!(!state.deck.is_empty());
    }

    #[test]
    fn test_advance_level_caps_at_max() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(MAX_LEVEL);
        state.advance_level();
        assert_eq!(state.level, MAX_LEVEL);
    }

    #[test]
    fn test_game_over_updates_high_score_once() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(1);
        state.score = 500;
        state.high_score = 300;
        state.game_over();

        assert_eq!(state.mode, GameMode::GameOver);
        assert_eq!(state.high_score, 500);
        assert!(matches!(
            state.drain_events().last(),
            Some(GameEvent::GameOver { score: 500, new_high_score: true })
        ));

        // A worse later run leaves the high score alone
        state.start_run(1);
        state.score = 100;
        state.game_over();
        assert_eq!(state.high_score, 500);
    }

    #[test]
    fn test_toggle_pause_only_flips_gameplay_modes() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(1);
        state.toggle_pause();
        assert_eq!(state.mode, GameMode::Paused);
        state.toggle_pause();
        assert_eq!(state.mode, GameMode::Playing);

        state.mode = GameMode::GameOver;
        state.toggle_pause();
        assert_eq!(state.mode, GameMode::GameOver);
    }

    #[test]
    fn test_burst_pulls_from_pool() {
        let mut state = GameState::new(800.0, 600.0, 1);
        let free_before = state.particle_pool.free_len();
        state.burst(Vec2::new(10.0, 10.0), 5, 300.0);
        assert_eq!(state.particles.len(), 5);
        assert_eq!(state.particle_pool.free_len(), free_before - 5);
    }

    #[test]
    fn test_high_score_survives_run_reset() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.high_score = 9000;
        state.start_run(1);
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 9000);
    }
}
