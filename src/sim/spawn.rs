//! Spawn director
//!
//! Decides when and what to spawn from the level quota, the per-level word
//! deck, and the boss roll. One enemy at most per interval; the interval
//! tightens with the level down to a floor.

use super::entities::Enemy;
use super::state::GameState;
use super::words::FALLBACK_WORD;
use crate::consts::*;
use rand::Rng;

/// Spawn interval for a level, in milliseconds.
pub fn spawn_interval_ms(level: u32) -> f32 {
    (SPAWN_INTERVAL_BASE_MS - level as f32 * 100.0).max(SPAWN_INTERVAL_MIN_MS)
}

/// Accumulate the frame delta and spawn when the interval elapses.
pub fn update_spawner(state: &mut GameState, dt_ms: f32) {
    state.spawn_timer_ms += dt_ms;
    if state.spawn_timer_ms > spawn_interval_ms(state.level) {
        spawn_enemy(state);
        state.spawn_timer_ms = 0.0;
    }
}

/// Spawn one enemy if the level quota allows it.
pub fn spawn_enemy(state: &mut GameState) {
    if state.enemies_spawned >= state.enemies_to_spawn {
        return;
    }

    let word = next_word(state);
    let id = state.next_entity_id();
    let enemy = Enemy::spawn(id, word, state.level, state.arena.x, &mut state.rng);
    state.enemies.push(enemy);
    state.enemies_spawned += 1;
}

/// Boss roll first (gated on level, independent per attempt), otherwise the
/// level deck, refilled on demand. Whatever path supplied the word, boss
/// classification happens later from its length alone.
fn next_word(state: &mut GameState) -> String {
    if state.level > BOSS_MIN_LEVEL && state.rng.random::<f32>() < BOSS_CHANCE {
        return state.words.boss_word(&mut state.rng);
    }

    if state.deck.is_empty() {
        state.deck = state.words.words_for_level(state.level, &mut state.rng);
    }
    state.deck.pop().unwrap_or_else(|| FALLBACK_WORD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GameMode;
    use crate::sim::words::EmptySupply;

    #[test]
    fn test_interval_tightens_to_floor() {
        assert_eq!(spawn_interval_ms(1), 1900.0);
        assert_eq!(spawn_interval_ms(10), 1000.0);
        // Floor at 600ms from level 14 on
        assert_eq!(spawn_interval_ms(14), 600.0);
        assert_eq!(spawn_interval_ms(20), 600.0);
    }

    #[test]
    fn test_quota_is_never_exceeded() {
        let mut state = GameState::new(800.0, 600.0, 3);
        state.start_run(1);
        assert_eq!(state.enemies_to_spawn, 15);

        for _ in 0..100 {
            spawn_enemy(&mut state);
        }
        assert_eq!(state.enemies_spawned, 15);
        assert_eq!(state.enemies.len(), 15);
    }

    #[test]
    fn test_timer_resets_after_spawn() {
        let mut state = GameState::new(800.0, 600.0, 3);
        state.start_run(1);

        update_spawner(&mut state, 1000.0);
        assert_eq!(state.enemies.len(), 0);
        assert_eq!(state.spawn_timer_ms, 1000.0);

        update_spawner(&mut state, 1000.0);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.spawn_timer_ms, 0.0);
    }

    #[test]
    fn test_deck_refills_when_exhausted() {
        let mut state = GameState::new(800.0, 600.0, 3);
        state.start_run(1);
        state.deck.clear();

        spawn_enemy(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_ne!(state.enemies[0].full_word, FALLBACK_WORD);
        // Refill left words behind for the next spawns
        assert!(!state.deck.is_empty());
    }

    #[test]
    fn test_dry_supply_falls_back_to_placeholder() {
        let mut state = GameState::with_words(800.0, 600.0, 3, Box::new(EmptySupply));
        state.start_run(1);
        assert!(state.deck.is_empty());

        spawn_enemy(&mut state);
        assert_eq!(state.enemies[0].full_word, FALLBACK_WORD);
        assert_eq!(state.mode, GameMode::Playing);
    }

    #[test]
    fn test_boss_roll_gated_below_threshold_level() {
        // At level 5 and below the boss path is never taken, so no word can
        // exceed the boss threshold with the builtin non-boss lists.
        let mut state = GameState::new(800.0, 600.0, 99);
        state.start_run(5);
        for _ in 0..35 {
            spawn_enemy(&mut state);
        }
        assert!(state.enemies.iter().all(|e| !e.is_boss));
    }

    #[test]
    fn test_boss_spawns_eventually_above_gate() {
        let mut state = GameState::new(800.0, 600.0, 7);
        state.start_run(6);
        state.enemies_to_spawn = 10_000;

        let mut saw_boss = false;
        for _ in 0..10_000 {
            spawn_enemy(&mut state);
            if state.enemies.last().is_some_and(|e| e.is_boss) {
                saw_boss = true;
                break;
            }
            state.enemies.clear();
        }
        assert!(saw_boss, "5% boss roll never hit in 10k attempts");
    }
}
