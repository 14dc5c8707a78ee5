//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod geom;
pub mod state;
pub mod tick;

pub use geom::{Rect, clamp, rect_circle_overlap};
pub use state::{Adversary, Avatar, GameState, Phase, Pickup};
pub use tick::{TickInput, tick};
