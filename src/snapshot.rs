//! Renderable per-frame snapshot
//!
//! The drawing layer never reaches into `GameState`; it gets a flat, owned
//! copy of exactly what a frame needs. On wasm this serializes to JSON and
//! crosses into the canvas code once per frame.

use serde::Serialize;

use crate::sim::entities::Shape;
use crate::sim::{GameMode, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct EnemyView {
    pub word: String,
    pub remaining: String,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub hue: f32,
    pub angle: f32,
    pub shape: Shape,
    pub is_boss: bool,
    /// True for the enemy currently holding the target lock
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub x: f32,
    pub y: f32,
    pub trail: Vec<(f32, f32)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub hue: f32,
    /// Fades out with remaining life
    pub alpha: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StarView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub opacity: f32,
}

/// Everything a frame draws, in draw order
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub mode: &'static str,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    pub multiplier: u32,
    pub player_x: f32,
    pub player_y: f32,
    pub stars: Vec<StarView>,
    pub enemies: Vec<EnemyView>,
    pub bullets: Vec<BulletView>,
    pub particles: Vec<ParticleView>,
}

fn mode_name(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Start => "start",
        GameMode::Playing => "playing",
        GameMode::Paused => "paused",
        GameMode::GameOver => "game_over",
        GameMode::LevelComplete => "level_complete",
        GameMode::LevelSelect => "level_select",
    }
}

/// Copy the renderable subset of the state.
pub fn capture(state: &GameState) -> Snapshot {
    let stars = state
        .stars
        .iter()
        .map(|s| StarView {
            x: s.pos.x,
            y: s.pos.y,
            size: s.size,
            opacity: s.opacity,
        })
        .collect();

    let enemies = state
        .enemies
        .iter()
        .map(|e| EnemyView {
            word: e.full_word.clone(),
            remaining: e.remaining.clone(),
            x: e.pos.x,
            y: e.pos.y,
            radius: e.radius,
            hue: e.hue,
            angle: e.angle,
            shape: e.shape,
            is_boss: e.is_boss,
            locked: state.target == Some(e.id),
        })
        .collect();

    let bullets = state
        .bullets
        .iter()
        .map(|b| BulletView {
            x: b.pos.x,
            y: b.pos.y,
            trail: b.trail.iter().map(|p| (p.x, p.y)).collect(),
        })
        .collect();

    let particles = state
        .particles
        .iter()
        .map(|p| ParticleView {
            x: p.pos.x,
            y: p.pos.y,
            hue: p.hue,
            alpha: p.life.clamp(0.0, 1.0),
        })
        .collect();

    Snapshot {
        mode: mode_name(state.mode),
        score: state.score,
        high_score: state.high_score,
        level: state.level,
        multiplier: state.multiplier,
        player_x: state.player.x,
        player_y: state.player.y,
        stars,
        enemies,
        bullets,
        particles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Enemy;
    use crate::sim::handle_key;
    use glam::Vec2;

    #[test]
    fn test_capture_marks_locked_enemy() {
        let mut state = GameState::new(800.0, 600.0, 5);
        state.start_run(1);
        for (word, y) in [("cat", 100.0), ("dog", 200.0)] {
            let id = state.next_entity_id();
            let mut e = Enemy::spawn(id, word.to_string(), 1, 800.0, &mut state.rng);
            e.pos = Vec2::new(300.0, y);
            state.enemies.push(e);
        }
        handle_key(&mut state, 'd');

        let snap = capture(&state);
        assert_eq!(snap.enemies.len(), 2);
        let locked: Vec<_> = snap.enemies.iter().filter(|e| e.locked).collect();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].word, "dog");
        assert_eq!(locked[0].remaining, "og");
    }

    #[test]
    fn test_capture_serializes_to_json() {
        let mut state = GameState::new(800.0, 600.0, 5);
        state.start_run(1);
        let snap = capture(&state);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"mode\":\"playing\""));
        assert!(json.contains("\"level\":1"));
    }

    #[test]
    fn test_star_count_matches_state() {
        let state = GameState::new(800.0, 600.0, 5);
        let snap = capture(&state);
        assert_eq!(snap.stars.len(), state.stars.len());
        assert_eq!(snap.mode, "start");
    }
}
