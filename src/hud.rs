//! HUD and banner text
//!
//! Pure string builders consumed by whichever front end presents the match.
//! The headless driver logs them; a graphical front end would render them.

use crate::config::Config;
use crate::sim::{GameState, Phase};

/// Fixed instruction lines shown alongside the playfield
pub fn instructions(cfg: &Config) -> [String; 4] {
    [
        "Move: Arrow keys or WASD".to_string(),
        "Avoid the red circle (enemy).".to_string(),
        format!(
            "Collect coins (+1 each). Reach score {} to win before timer ends.",
            cfg.win_score
        ),
        "R to restart after game over. ESC to quit.".to_string(),
    ]
}

/// One-line score/time readout
pub fn status_line(state: &GameState) -> String {
    format!(
        "Score: {}   Time: {}",
        state.score,
        state.time_left_display()
    )
}

/// Banner for terminal phases, with the restart hint underneath
pub fn banner(phase: Phase) -> Option<(&'static str, &'static str)> {
    match phase {
        Phase::Playing => None,
        Phase::Lost => Some(("GAME OVER", "Press R to retry or ESC to quit")),
        Phase::Won => Some(("YOU WIN!", "Press R to play again or ESC to quit")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instructions_mention_win_score() {
        let cfg = Config::default();
        assert!(instructions(&cfg)[2].contains("20"));
    }

    #[test]
    fn test_status_line_clamps_negative_time() {
        let mut state = GameState::new(Config::default(), 1);
        state.time_left = -0.4;
        assert_eq!(status_line(&state), "Score: 0   Time: 0");
    }

    #[test]
    fn test_banner_only_for_terminal_phases() {
        assert!(banner(Phase::Playing).is_none());
        assert_eq!(banner(Phase::Lost).unwrap().0, "GAME OVER");
        assert_eq!(banner(Phase::Won).unwrap().0, "YOU WIN!");
    }
}
