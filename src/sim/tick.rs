//! Fixed timestep match update
//!
//! The frame order here is load-bearing: score is derived before this
//! frame's collections register, the adversary hit check runs after all
//! movement, and a frame where the avatar is hit and reaches the target
//! score at once resolves as a loss.

use std::cmp::Ordering;

use glam::Vec2;

use super::geom::rect_circle_overlap;
use super::state::{GameState, Phase};

/// Input snapshot for a single tick
///
/// The four direction flags are held-key states; the presentation layer maps
/// its physical keys (arrows, WASD, a gamepad) onto them. Quit never reaches
/// the sim - the driver owns process exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Edge-triggered; only honored from a terminal phase
    pub restart: bool,
    /// Demo mode: the sim steers the avatar itself
    pub autopilot: bool,
}

impl TickInput {
    /// Collapse held keys to signed axis intents; opposing keys cancel to 0
    pub fn axes(&self) -> (i8, i8) {
        let dx = self.right as i8 - self.left as i8;
        let dy = self.down as i8 - self.up as i8;
        (dx, dy)
    }

    /// Build an input holding the keys for the given intents
    pub fn from_axes(dx: i8, dy: i8) -> Self {
        Self {
            left: dx < 0,
            right: dx > 0,
            up: dy < 0,
            down: dy > 0,
            ..Self::default()
        }
    }
}

/// Advance the match by one fixed timestep
///
/// In a terminal phase only the restart signal is honored; while Playing the
/// eight update steps run in a fixed order every frame.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        Phase::Playing => {}
        Phase::Lost | Phase::Won => {
            if input.restart {
                state.restart();
            }
            return;
        }
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        *input
    };
    let cfg = state.config;

    // 1. Movement
    state.avatar.update(dt, input.axes(), &cfg);
    state.adversary.update(dt, &cfg);

    // 2. Timers
    state.elapsed_survival += dt;
    state.time_left -= dt;

    // 3. Score, derived before this frame's collections register: a pickup
    //    grabbed this frame pays out on the next one
    state.score = state.derived_score();

    // 4. Collection. Deliberately approximates the avatar with its
    //    inscribed half-width instead of a true rect-circle test.
    let center = state.avatar.rect.center();
    let reach = cfg.pickup_radius + cfg.avatar_size / 2.0;
    for pickup in &mut state.pickups {
        if !pickup.collected && pickup.pos.distance_squared(center) <= reach * reach {
            pickup.collected = true;
        }
    }

    // 5. Batch respawn once everything is collected
    if state.pickups.iter().all(|p| p.collected) {
        state.respawn_pickups();
    }

    // 6. An adversary hit ends the match immediately and outranks the win
    //    checks below on a simultaneous frame
    if rect_circle_overlap(&state.avatar.rect, state.adversary.pos, state.adversary.radius) {
        state.phase = Phase::Lost;
        return;
    }

    // 7./8. Countdown expiry, then the early score win
    if state.time_left <= 0.0 {
        state.phase = if state.score >= cfg.win_score {
            Phase::Won
        } else {
            Phase::Lost
        };
    } else if state.score >= cfg.win_score {
        state.phase = Phase::Won;
    }
}

/// Demo-mode steering: run from the adversary when it is close, otherwise
/// head for the nearest uncollected pickup. Emits only the same held-key
/// flags a player could produce.
fn autopilot(state: &GameState) -> TickInput {
    let center = state.avatar.rect.center();
    let from_adversary = center - state.adversary.pos;
    let danger = (state.adversary.radius + state.config.avatar_size) * 2.5;

    let target = if from_adversary.length() < danger {
        center + from_adversary
    } else {
        state
            .pickups
            .iter()
            .filter(|p| !p.collected)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(center)
                    .partial_cmp(&b.pos.distance_squared(center))
                    .unwrap_or(Ordering::Equal)
            })
            .map(|p| p.pos)
            .unwrap_or_else(|| {
                Vec2::new(state.config.field_width / 2.0, state.config.field_height / 2.0)
            })
    };

    let delta = target - center;
    // Small dead zone so the avatar does not jitter on top of its target
    let dead = 2.0;
    TickInput::from_axes(
        (delta.x > dead) as i8 - (delta.x < -dead) as i8,
        (delta.y > dead) as i8 - (delta.y < -dead) as i8,
    )
}
