//! Per-frame entity state holders
//!
//! Enemies are plain `Vec` members (a handful alive at once); bullets and
//! particles churn fast and are pooled. Every entity exposes `reset` for
//! (re)initialization and `update` for frame integration.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// Identity of an active enemy. Target locks and bullets hold this id and
/// look the enemy up each time, never an owning reference.
pub type EnemyId = u32;

/// Outline shape used by the drawing layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Circle,
    Hexagon,
    Triangle,
    Square,
}

/// A falling word the player must type
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: EnemyId,
    /// Immutable original word
    pub full_word: String,
    /// Suffix still required from input; source of truth for targeting.
    /// Always a suffix of `full_word`; the enemy is target-eligible iff
    /// this is non-empty.
    pub remaining: String,
    pub pos: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub is_boss: bool,
    // Visual-only
    pub shape: Shape,
    pub hue: f32,
    pub angle: f32,
    pub spin_speed: f32,
}

impl Enemy {
    pub fn spawn(id: EnemyId, word: String, level: u32, arena_w: f32, rng: &mut Pcg32) -> Self {
        let is_boss = word.chars().count() > BOSS_WORD_LEN;

        let base_speed = ENEMY_BASE_SPEED + level as f32 * ENEMY_SPEED_INC_PER_LEVEL;
        // 20% variance so enemies don't fall in a perfect line
        let mut speed = base_speed * rng.random_range(0.8..1.2);
        if is_boss {
            speed *= BOSS_SPEED_FACTOR;
        }

        let x = rng.random_range(SPAWN_X_MARGIN..(arena_w - SPAWN_X_MARGIN).max(SPAWN_X_MARGIN + 1.0));

        let shape = match rng.random_range(0..4u8) {
            0 => Shape::Circle,
            1 => Shape::Hexagon,
            2 => Shape::Triangle,
            _ => Shape::Square,
        };

        Self {
            id,
            remaining: word.clone(),
            full_word: word,
            pos: Vec2::new(x, SPAWN_Y),
            speed,
            radius: if is_boss { ENEMY_RADIUS_BOSS } else { ENEMY_RADIUS_BASE },
            is_boss,
            shape,
            hue: rng.random_range(300.0..360.0),
            angle: 0.0,
            spin_speed: rng.random_range(-1.0..1.0),
        }
    }

    /// Home toward the player position.
    pub fn update(&mut self, dt: f32, player: Vec2) {
        self.angle += self.spin_speed * dt;

        let delta = player - self.pos;
        let dist = delta.length();
        if dist > 0.0 {
            self.pos += delta / dist * self.speed * dt;
        }
    }

    /// Next character the player must type, if any.
    pub fn next_char(&self) -> Option<char> {
        self.remaining.chars().next()
    }

    /// Consume the leading character of `remaining` and apply knockback.
    /// Returns true when the word is fully typed.
    pub fn consume_char(&mut self) -> bool {
        if !self.remaining.is_empty() {
            self.remaining.remove(0);
            self.pos.y -= KNOCKBACK_DISTANCE;
        }
        self.remaining.is_empty()
    }
}

/// Pooled visual projectile aimed at an enemy by identity
#[derive(Debug, Clone, Default)]
pub struct Bullet {
    pub pos: Vec2,
    pub target: EnemyId,
    pub trail: Vec<Vec2>,
    pub dead: bool,
}

impl Bullet {
    /// Reinitialize a pooled instance.
    pub fn reset(&mut self, origin: Vec2, target: EnemyId) {
        self.pos = origin;
        self.target = target;
        self.trail.clear();
        self.dead = false;
    }

    /// Fly toward the target's current position. Marks itself dead when the
    /// target has left the active set or on arrival; the tick releases dead
    /// bullets back to the pool in the same frame.
    pub fn update(&mut self, dt: f32, enemies: &[Enemy]) {
        let Some(target) = enemies.iter().find(|e| e.id == self.target) else {
            self.dead = true;
            return;
        };

        self.trail.push(self.pos);
        if self.trail.len() > BULLET_TRAIL_LENGTH {
            self.trail.remove(0);
        }

        let delta = target.pos - self.pos;
        let dist = delta.length();
        let step = BULLET_SPEED * dt;
        if dist < step {
            self.pos = target.pos;
            self.dead = true;
        } else {
            self.pos += delta / dist * step;
        }
    }
}

/// Pooled time-decaying explosion fragment
#[derive(Debug, Clone, Default)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub hue: f32,
}

impl Particle {
    /// Reinitialize a pooled instance with a random scatter direction.
    pub fn reset(&mut self, pos: Vec2, hue: f32, rng: &mut Pcg32) {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(50.0..200.0);
        self.pos = pos;
        self.vel = Vec2::new(angle.cos(), angle.sin()) * speed;
        self.life = PARTICLE_LIFE_BASE;
        self.hue = hue;
    }

    pub fn update(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.life -= PARTICLE_DECAY_RATE * dt;
    }

    pub fn expired(&self) -> bool {
        self.life <= 0.0
    }
}

/// Background decoration with depth-based drift; no gameplay effect
#[derive(Debug, Clone, Default)]
pub struct Star {
    pub pos: Vec2,
    pub depth: f32,
    pub size: f32,
    pub opacity: f32,
}

impl Star {
    pub fn reset(&mut self, arena: Vec2, rng: &mut Pcg32) {
        self.pos = Vec2::new(rng.random_range(0.0..arena.x), rng.random_range(0.0..arena.y));
        self.depth = rng.random_range(0.5..2.5);
        self.size = rng.random_range(0.0..1.5);
        self.opacity = rng.random_range(0.3..0.8);
    }

    /// Drift down, wrapping to the top edge at a fresh x.
    pub fn update(&mut self, dt: f32, arena: Vec2, rng: &mut Pcg32) {
        self.pos.y += STAR_SPEED * self.depth * dt;
        if self.pos.y > arena.y {
            self.pos.y = 0.0;
            self.pos.x = rng.random_range(0.0..arena.x);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_enemy_boss_classification_by_word_length() {
        let mut r = rng();
        let short = Enemy::spawn(1, "cat".into(), 1, 800.0, &mut r);
        assert!(!short.is_boss);
        assert_eq!(short.radius, ENEMY_RADIUS_BASE);

        let long = Enemy::spawn(2, "thunderstorm".into(), 1, 800.0, &mut r);
        assert!(long.is_boss);
        assert_eq!(long.radius, ENEMY_RADIUS_BOSS);
    }

    #[test]
    fn test_enemy_speed_within_variance_band() {
        let mut r = rng();
        for i in 0..50 {
            let e = Enemy::spawn(i, "word".into(), 3, 800.0, &mut r);
            let base = ENEMY_BASE_SPEED + 3.0 * ENEMY_SPEED_INC_PER_LEVEL;
            assert!(e.speed >= base * 0.8 && e.speed <= base * 1.2);
        }
    }

    #[test]
    fn test_boss_speed_is_reduced() {
        let mut r = rng();
        for i in 0..50 {
            let e = Enemy::spawn(i, "extraordinary".into(), 6, 800.0, &mut r);
            let base = ENEMY_BASE_SPEED + 6.0 * ENEMY_SPEED_INC_PER_LEVEL;
            assert!(e.speed <= base * 1.2 * BOSS_SPEED_FACTOR);
        }
    }

    #[test]
    fn test_enemy_homes_toward_player() {
        let mut r = rng();
        let mut e = Enemy::spawn(1, "word".into(), 1, 800.0, &mut r);
        let player = Vec2::new(400.0, 550.0);
        let before = (player - e.pos).length();
        e.update(1.0, player);
        let after = (player - e.pos).length();
        assert!(after < before);
    }

    #[test]
    fn test_consume_char_knockback_and_completion() {
        let mut r = rng();
        let mut e = Enemy::spawn(1, "אב".into(), 1, 800.0, &mut r);
        let y0 = e.pos.y;

        assert!(!e.consume_char());
        assert_eq!(e.remaining, "ב");
        assert_eq!(e.pos.y, y0 - KNOCKBACK_DISTANCE);

        assert!(e.consume_char());
        assert!(e.remaining.is_empty());
    }

    #[test]
    fn test_bullet_dies_on_stale_target() {
        let mut b = Bullet::default();
        b.reset(Vec2::new(0.0, 0.0), 99);
        b.update(0.016, &[]);
        assert!(b.dead);
    }

    #[test]
    fn test_bullet_arrives_and_dies() {
        let mut r = rng();
        let mut e = Enemy::spawn(5, "word".into(), 1, 800.0, &mut r);
        e.pos = Vec2::new(100.0, 100.0);

        let mut b = Bullet::default();
        b.reset(Vec2::new(100.0, 110.0), 5);
        b.update(0.1, std::slice::from_ref(&e));
        assert!(b.dead);
        assert_eq!(b.pos, e.pos);
    }

    #[test]
    fn test_particle_decays_at_fixed_rate() {
        let mut r = rng();
        let mut p = Particle::default();
        p.reset(Vec2::ZERO, 300.0, &mut r);
        p.update(0.25);
        assert!((p.life - (PARTICLE_LIFE_BASE - 0.5)).abs() < 1e-6);
        assert!(!p.expired());
        p.update(0.25);
        assert!(p.expired());
    }

    #[test]
    fn test_star_wraps_to_top() {
        let arena = Vec2::new(800.0, 600.0);
        let mut r = rng();
        let mut s = Star::default();
        s.reset(arena, &mut r);
        s.pos.y = arena.y - 0.1;
        s.depth = 2.0;
        s.update(1.0, arena, &mut r);
        assert_eq!(s.pos.y, 0.0);
        assert!(s.pos.x >= 0.0 && s.pos.x <= arena.x);
    }
}
