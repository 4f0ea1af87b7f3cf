//! Targeting and input resolution
//!
//! Runs once per accepted single-character keystroke, event-driven and
//! independent of the frame tick. At most one enemy holds the target lock;
//! while locked, every keystroke is judged against that enemy alone.

use super::score;
use super::state::{CueKind, GameEvent, GameMode, GameState};
use crate::consts::*;

/// Resolve one keystroke against the active enemy set.
pub fn handle_key(state: &mut GameState, ch: char) {
    if state.mode != GameMode::Playing {
        return;
    }

    // A lock whose target was destroyed by the collision system must be
    // cleared before it is dereferenced again.
    if let Some(id) = state.target {
        if state.enemy_index(id).is_none() {
            state.target = None;
        }
    }

    let hit = match state.target {
        Some(id) => state
            .enemy_index(id)
            .filter(|&i| state.enemies[i].next_char() == Some(ch)),
        None => {
            let candidate = acquire_target(state, ch);
            if let Some(i) = candidate {
                state.target = Some(state.enemies[i].id);
                state.push_cue(CueKind::Lock);
            }
            candidate
        }
    };

    match hit {
        Some(index) => apply_hit(state, index),
        None => score::reset_multiplier(state),
    }
}

/// Among enemies whose remaining text starts with `ch`, pick the one
/// closest to the player (greatest y; enemies fall toward increasing y).
/// Ties go to the first found.
fn acquire_target(state: &GameState, ch: char) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, enemy) in state.enemies.iter().enumerate() {
        if !enemy.remaining.starts_with(ch) {
            continue;
        }
        match best {
            Some(b) if enemy.pos.y <= state.enemies[b].pos.y => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Consume a letter from the hit enemy; resolve the kill when the word
/// empties. Score is awarded at the pre-increase multiplier.
fn apply_hit(state: &mut GameState, index: usize) {
    let origin = state.player;
    let target_id = state.enemies[index].id;

    let mut bullet = state.bullet_pool.acquire();
    bullet.reset(origin, target_id);
    state.bullets.push(bullet);
    state.push_cue(CueKind::Shoot);

    let killed = state.enemies[index].consume_char();
    if !killed {
        return;
    }

    let enemy = state.enemies.remove(index);
    let word_chars = enemy.full_word.chars().count();
    state.score += score::kill_score(word_chars, state.multiplier);
    state.push_event(GameEvent::ScoreChanged { score: state.score });
    score::increase_multiplier(state);

    let burst = if enemy.is_boss { BURST_KILL_BOSS } else { BURST_KILL };
    state.burst(enemy.pos, burst, 300.0);
    state.push_cue(CueKind::Explosion);

    state.target = None;
    state.check_level_clear();
}
