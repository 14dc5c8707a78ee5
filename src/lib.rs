//! Dodge Rush - a countdown dodge-and-collect arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, match state machine)
//! - `config`: Immutable gameplay configuration
//! - `hud`: Display-string helpers for whatever front end drives the sim
//!
//! Window creation, input polling and rendering are deliberately absent. A
//! presentation layer feeds `sim::tick` a per-frame input snapshot plus the
//! frame's elapsed time, then reads entity state back for drawing. The
//! shipped binary is a headless driver that does exactly that with logging
//! in place of a screen.

pub mod config;
pub mod hud;
pub mod sim;

pub use config::Config;

/// Fixed-cadence loop constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the frame governor)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will feed the accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
}
