//! Per-frame scheduling
//!
//! One tick per animation frame, variable timestep with a clamped delta.
//! Ordering within a tick is significant and fixed: background, spawning,
//! enemy movement + loss detection, bullets, particles, then the deferred
//! level-complete timer. Keystrokes are handled between ticks by
//! `input::handle_key`, never in here.

use super::spawn;
use super::state::{CueKind, GameEvent, GameMode, GameState};
use crate::consts::*;

/// Advance the simulation by one frame of `dt_ms` real milliseconds.
/// No-op unless the run is active.
pub fn tick(state: &mut GameState, dt_ms: f32) {
    if state.mode != GameMode::Playing {
        return;
    }

    // Clamp the integration step so a stalled tab can't tunnel entities
    // past collision thresholds in one jump.
    let dt = (dt_ms / 1000.0).min(MAX_DT);
    let dt_ms = dt * 1000.0;

    // 1. Background
    let arena = state.arena;
    {
        let GameState { stars, rng, .. } = state;
        for star in stars.iter_mut() {
            star.update(dt, arena, rng);
        }
    }

    // 2. Spawning
    spawn::update_spawner(state, dt_ms);

    // 3. Enemies: move, then check the loss condition
    let player = state.player;
    let mut collided = false;
    for enemy in state.enemies.iter_mut() {
        enemy.update(dt, player);
        if (player - enemy.pos).length() < enemy.radius + PLAYER_COLLISION_RADIUS {
            collided = true;
        }
    }
    if collided {
        state.push_cue(CueKind::Explosion);
        state.burst(player, BURST_PLAYER_DEATH, 0.0);
        state.game_over();
        return;
    }

    // 4. Bullets: stale or arrived bullets die and return to the pool
    //    this same frame
    for bullet in state.bullets.iter_mut() {
        bullet.update(dt, &state.enemies);
    }
    let mut i = 0;
    while i < state.bullets.len() {
        if state.bullets[i].dead {
            let bullet = state.bullets.remove(i);
            state.bullet_pool.release(bullet);
        } else {
            i += 1;
        }
    }

    // 5. Particles
    for particle in state.particles.iter_mut() {
        particle.update(dt);
    }
    let mut i = 0;
    while i < state.particles.len() {
        if state.particles[i].expired() {
            let particle = state.particles.remove(i);
            state.particle_pool.release(particle);
        } else {
            i += 1;
        }
    }

    // 6. Deferred level-complete transition, armed at the final kill
    if let Some(remaining) = state.level_clear_timer {
        let remaining = remaining - dt;
        if remaining <= 0.0 {
            state.level_clear_timer = None;
            finish_level(state);
        } else {
            state.level_clear_timer = Some(remaining);
        }
    }
}

/// Award the clear bonus and leave the run loop.
fn finish_level(state: &mut GameState) {
    let bonus = state.level as u64 * LEVEL_BONUS_PER_LEVEL;
    state.score += bonus;
    state.mode = GameMode::LevelComplete;
    state.push_event(GameEvent::ScoreChanged { score: state.score });
    state.push_event(GameEvent::LevelCompleted {
        level: state.level,
        bonus,
    });
    state.push_cue(CueKind::Lock);
}
