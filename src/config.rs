//! Immutable gameplay configuration
//!
//! One struct instead of a pile of module-level constants: it is handed to
//! `GameState::new` once and never mutated afterwards, so every tunable that
//! is part of the observable contract lives here and can be overridden from
//! a JSON tuning file.

use serde::{Deserialize, Serialize};

/// Gameplay tunables. `Default` is the shipped contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playfield width in pixels
    pub field_width: f32,
    /// Playfield height in pixels
    pub field_height: f32,
    /// Avatar square edge length
    pub avatar_size: f32,
    /// Avatar speed in pixels per second
    pub avatar_speed: f32,
    /// Adversary circle radius
    pub adversary_radius: f32,
    /// Adversary speed in pixels per second; direction changes, magnitude never
    pub adversary_speed: f32,
    /// Pickup circle radius
    pub pickup_radius: f32,
    /// Pickups per batch
    pub pickup_count: usize,
    /// Inset margin pickups keep from the field edge
    pub pickup_margin: f32,
    /// Per-axis distance from the avatar spawn inside which pickups reroll
    pub spawn_exclusion: f32,
    /// Countdown length in seconds
    pub start_time: f32,
    /// Score required to win before the countdown ends
    pub win_score: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 800.0,
            field_height: 600.0,
            avatar_size: 40.0,
            avatar_speed: 300.0,
            adversary_radius: 25.0,
            adversary_speed: 180.0,
            pickup_radius: 7.0,
            pickup_count: 5,
            pickup_margin: 20.0,
            spawn_exclusion: 60.0,
            start_time: 45.0,
            win_score: 20,
        }
    }
}

impl Config {
    /// Reroll attempts per pickup before the deterministic fallback kicks in
    pub const SPAWN_RETRY_CAP: u32 = 1000;

    /// Parse a config from JSON. Missing fields keep their defaults, so
    /// partial tuning files work.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
