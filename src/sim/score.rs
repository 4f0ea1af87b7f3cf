//! Combo multiplier and kill scoring
//!
//! The multiplier is a streak counter: every completed word raises it by
//! one, any miss drops it back to 1. A kill is worth
//! `word length * 10 * multiplier`, using the multiplier that was active
//! for the whole word (the increase lands after the award).

use super::state::{CueKind, GameEvent, GameState};
use crate::consts::SCORE_PER_CHAR;

/// Points for a completed word at the current multiplier.
pub fn kill_score(word_chars: usize, multiplier: u32) -> u64 {
    word_chars as u64 * SCORE_PER_CHAR * multiplier as u64
}

/// Raise the streak by one, tracking the run's peak.
pub fn increase_multiplier(state: &mut GameState) {
    state.multiplier += 1;
    if state.multiplier > state.max_multiplier {
        state.max_multiplier = state.multiplier;
    }
    state.push_event(GameEvent::MultiplierChanged {
        multiplier: state.multiplier,
    });
}

/// Drop the streak to 1. The combo-break cue fires only when a streak was
/// actually lost; resetting an already-1 multiplier is a state no-op.
pub fn reset_multiplier(state: &mut GameState) {
    if state.multiplier > 1 {
        state.multiplier = 1;
        state.push_cue(CueKind::ComboBreak);
        state.push_event(GameEvent::MultiplierChanged { multiplier: 1 });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kill_score_formula() {
        assert_eq!(kill_score(3, 1), 30);
        assert_eq!(kill_score(5, 4), 200);
        assert_eq!(kill_score(12, 7), 840);
    }

    #[test]
    fn test_increase_tracks_max() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(1);
        for _ in 0..4 {
            increase_multiplier(&mut state);
        }
        assert_eq!(state.multiplier, 5);
        assert_eq!(state.max_multiplier, 5);

        reset_multiplier(&mut state);
        increase_multiplier(&mut state);
        assert_eq!(state.multiplier, 2);
        assert_eq!(state.max_multiplier, 5);
    }

    #[test]
    fn test_reset_cues_only_on_lost_streak() {
        let mut state = GameState::new(800.0, 600.0, 1);
        state.start_run(1);
        increase_multiplier(&mut state);
        increase_multiplier(&mut state);
        state.drain_events();

        reset_multiplier(&mut state);
        assert_eq!(state.multiplier, 1);
        assert!(state
            .drain_events()
            .contains(&GameEvent::Cue(CueKind::ComboBreak)));

        // Idempotent: no cue when already at 1
        reset_multiplier(&mut state);
        assert!(state.drain_events().is_empty());
    }
}
