//! Entities and match state
//!
//! Everything the renderer needs to draw a frame lives here. All spawning
//! goes through the session's seeded RNG so runs are reproducible.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::geom::{Rect, clamp};
use crate::config::Config;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Countdown running, entities live
    Playing,
    /// Hit by the adversary, or timed out short of the target score
    Lost,
    /// Reached the target score
    Won,
}

/// The player-controlled square
#[derive(Debug, Clone, Serialize)]
pub struct Avatar {
    pub rect: Rect,
}

impl Avatar {
    /// Spawn centered on the playfield
    pub fn new(cfg: &Config) -> Self {
        let center = Vec2::new(cfg.field_width / 2.0, cfg.field_height / 2.0);
        Self {
            rect: Rect::centered_at(center, cfg.avatar_size, cfg.avatar_size),
        }
    }

    /// Advance by one frame of held movement input
    ///
    /// `axes` are signed intents in {-1, 0, 1} per axis. Diagonals are
    /// scaled by 1/sqrt(2) so they are no faster than straight movement, and
    /// each axis delta is truncated toward zero (discrete pixel stepping).
    /// The rect is then clamped fully inside the field.
    pub fn update(&mut self, dt: f32, axes: (i8, i8), cfg: &Config) {
        let (mut dx, mut dy) = (axes.0 as f32, axes.1 as f32);
        if axes.0 != 0 && axes.1 != 0 {
            dx *= std::f32::consts::FRAC_1_SQRT_2;
            dy *= std::f32::consts::FRAC_1_SQRT_2;
        }

        self.rect.x += (dx * cfg.avatar_speed * dt).trunc();
        self.rect.y += (dy * cfg.avatar_speed * dt).trunc();

        self.rect.x = clamp(self.rect.x, 0.0, cfg.field_width - self.rect.w);
        self.rect.y = clamp(self.rect.y, 0.0, cfg.field_height - self.rect.h);
    }
}

/// The bouncing circle the avatar must avoid
#[derive(Debug, Clone, Serialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Adversary {
    /// Spawn at a random position, heading in a uniformly random direction
    pub fn new(cfg: &Config, rng: &mut Pcg32) -> Self {
        let r = cfg.adversary_radius;
        let x = rng.random_range(r as i32..=(cfg.field_width - r) as i32) as f32;
        let y = rng.random_range(r as i32..=(cfg.field_height - r) as i32) as f32;
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::new(angle.cos(), angle.sin()) * cfg.adversary_speed,
            radius: r,
        }
    }

    /// Integrate one step, reflecting elastically off the field walls
    ///
    /// Each axis clamps and flips independently, so a corner hit reverses
    /// both components in the same update. Speed magnitude never changes.
    pub fn update(&mut self, dt: f32, cfg: &Config) {
        self.pos += self.vel * dt;

        if self.pos.x <= self.radius {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.x >= cfg.field_width - self.radius {
            self.pos.x = cfg.field_width - self.radius;
            self.vel.x = -self.vel.x;
        }
        if self.pos.y <= self.radius {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
        }
        if self.pos.y >= cfg.field_height - self.radius {
            self.pos.y = cfg.field_height - self.radius;
            self.vel.y = -self.vel.y;
        }
    }
}

/// A collectible coin
#[derive(Debug, Clone, Serialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub collected: bool,
}

impl Pickup {
    pub fn new(cfg: &Config, rng: &mut Pcg32) -> Self {
        let mut pickup = Self {
            pos: Vec2::ZERO,
            collected: false,
        };
        pickup.respawn(cfg, rng);
        pickup
    }

    /// Reroll to a fresh position inside the margin and mark uncollected
    pub fn respawn(&mut self, cfg: &Config, rng: &mut Pcg32) {
        let m = cfg.pickup_margin;
        self.pos = Vec2::new(
            rng.random_range(m as i32..=(cfg.field_width - m) as i32) as f32,
            rng.random_range(m as i32..=(cfg.field_height - m) as i32) as f32,
        );
        self.collected = false;
    }
}

/// Complete match state
///
/// Owns every entity exclusively; `restart` reconstructs them wholesale.
/// The RNG is seeded once at construction so a session is a pure function
/// of (config, seed, input stream).
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    rng: Pcg32,
    pub config: Config,
    pub avatar: Avatar,
    pub adversary: Adversary,
    pub pickups: Vec<Pickup>,
    /// Seconds survived this match; score accrues 1 per whole second
    pub elapsed_survival: f32,
    /// Countdown remaining; may dip below zero on the final frame
    pub time_left: f32,
    /// Derived each frame: floor(elapsed_survival) + collected pickups
    pub score: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a fresh match from a config and seed
    pub fn new(config: Config, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let avatar = Avatar::new(&config);
        let adversary = Adversary::new(&config, &mut rng);
        let pickups = spawn_pickups(&config, &mut rng, avatar.rect.center());
        Self {
            seed,
            rng,
            config,
            avatar,
            adversary,
            pickups,
            elapsed_survival: 0.0,
            time_left: config.start_time,
            score: 0,
            phase: Phase::Playing,
        }
    }

    /// Full entity reconstruction: fresh avatar, adversary and pickups,
    /// timers and score reset, back to Playing. The session RNG keeps
    /// running, so a restarted run is still reproducible from the seed.
    pub fn restart(&mut self) {
        let cfg = self.config;
        self.avatar = Avatar::new(&cfg);
        self.adversary = Adversary::new(&cfg, &mut self.rng);
        self.pickups = spawn_pickups(&cfg, &mut self.rng, self.avatar.rect.center());
        self.elapsed_survival = 0.0;
        self.time_left = cfg.start_time;
        self.score = 0;
        self.phase = Phase::Playing;
    }

    /// Reroll the whole batch after a full clear. Unlike the initial spawn
    /// there is no avatar-exclusion check here.
    pub fn respawn_pickups(&mut self) {
        let cfg = self.config;
        for pickup in &mut self.pickups {
            pickup.respawn(&cfg, &mut self.rng);
        }
    }

    pub fn collected_count(&self) -> u32 {
        self.pickups.iter().filter(|p| p.collected).count() as u32
    }

    /// The score formula; `score` is always recomputed from this, never
    /// incremented, so it can be re-derived at any point
    pub fn derived_score(&self) -> u32 {
        self.elapsed_survival as u32 + self.collected_count()
    }

    /// Countdown for the HUD, clamped to zero
    pub fn time_left_display(&self) -> u32 {
        self.time_left.max(0.0) as u32
    }
}

/// Batch-spawn pickups, rerolling any that land on the avatar's spawn
///
/// The reroll is capped; a pickup that keeps landing inside the exclusion
/// box falls back to a fixed margin corner so spawning always terminates.
fn spawn_pickups(cfg: &Config, rng: &mut Pcg32, avatar_center: Vec2) -> Vec<Pickup> {
    (0..cfg.pickup_count)
        .map(|_| {
            let mut pickup = Pickup::new(cfg, rng);
            let mut attempts = 0;
            while too_close(pickup.pos, avatar_center, cfg.spawn_exclusion) {
                attempts += 1;
                if attempts > Config::SPAWN_RETRY_CAP {
                    pickup.pos = fallback_spawn(cfg, avatar_center);
                    break;
                }
                pickup.respawn(cfg, rng);
            }
            pickup
        })
        .collect()
}

/// Per-axis proximity test used for the spawn exclusion box
fn too_close(pos: Vec2, center: Vec2, limit: f32) -> bool {
    (pos.x - center.x).abs() < limit && (pos.y - center.y).abs() < limit
}

/// Margin corner away from the avatar, used once rerolls are exhausted
fn fallback_spawn(cfg: &Config, avatar_center: Vec2) -> Vec2 {
    let near = Vec2::new(cfg.pickup_margin, cfg.pickup_margin);
    if too_close(near, avatar_center, cfg.spawn_exclusion) {
        Vec2::new(
            cfg.field_width - cfg.pickup_margin,
            cfg.field_height - cfg.pickup_margin,
        )
    } else {
        near
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    #[test]
    fn test_avatar_spawns_centered() {
        let cfg = Config::default();
        let avatar = Avatar::new(&cfg);
        assert_eq!(avatar.rect.center(), Vec2::new(400.0, 300.0));
        assert_eq!(avatar.rect.w, 40.0);
        assert_eq!(avatar.rect.h, 40.0);
    }

    #[test]
    fn test_avatar_diagonal_not_faster() {
        let cfg = Config::default();
        let mut straight = Avatar::new(&cfg);
        let mut diagonal = Avatar::new(&cfg);
        // Big dt so truncation noise is negligible
        straight.update(1.0, (1, 0), &cfg);
        diagonal.update(1.0, (1, 1), &cfg);
        let straight_dist = straight.rect.x - 380.0;
        let moved = Vec2::new(diagonal.rect.x - 380.0, diagonal.rect.y - 280.0);
        assert!(moved.length() <= straight_dist + 1.0);
    }

    #[test]
    fn test_avatar_delta_truncates_toward_zero() {
        let cfg = Config::default();
        let mut avatar = Avatar::new(&cfg);
        // 300 px/s * (1/60) s / sqrt(2) = 3.53... -> steps 3 whole pixels
        avatar.update(SIM_DT, (1, 1), &cfg);
        assert_eq!(avatar.rect.x, 383.0);
        assert_eq!(avatar.rect.y, 283.0);
        // And mirrored for negative movement
        avatar.update(SIM_DT, (-1, -1), &cfg);
        assert_eq!(avatar.rect.x, 380.0);
        assert_eq!(avatar.rect.y, 280.0);
    }

    #[test]
    fn test_avatar_clamps_at_field_edge() {
        let cfg = Config::default();
        let mut avatar = Avatar::new(&cfg);
        for _ in 0..600 {
            avatar.update(SIM_DT, (1, 1), &cfg);
        }
        assert_eq!(avatar.rect.right(), cfg.field_width);
        assert_eq!(avatar.rect.bottom(), cfg.field_height);
    }

    #[test]
    fn test_adversary_corner_bounce_flips_both_axes() {
        let cfg = Config::default();
        let mut adversary = Adversary {
            pos: Vec2::new(26.0, 26.0),
            vel: Vec2::new(-180.0, -180.0),
            radius: cfg.adversary_radius,
        };
        adversary.update(SIM_DT, &cfg);
        assert_eq!(adversary.pos, Vec2::new(25.0, 25.0));
        assert!(adversary.vel.x > 0.0 && adversary.vel.y > 0.0);
    }

    #[test]
    fn test_initial_pickups_avoid_avatar_spawn() {
        let cfg = Config::default();
        for seed in 0..50u64 {
            let state = GameState::new(cfg, seed);
            let center = state.avatar.rect.center();
            for pickup in &state.pickups {
                assert!(
                    !too_close(pickup.pos, center, cfg.spawn_exclusion),
                    "seed {seed} spawned a pickup on the avatar"
                );
                assert!(!pickup.collected);
            }
        }
    }

    #[test]
    fn test_pickup_respawn_stays_in_margin() {
        let cfg = Config::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pickup = Pickup::new(&cfg, &mut rng);
        for _ in 0..200 {
            pickup.respawn(&cfg, &mut rng);
            assert!(pickup.pos.x >= cfg.pickup_margin);
            assert!(pickup.pos.x <= cfg.field_width - cfg.pickup_margin);
            assert!(pickup.pos.y >= cfg.pickup_margin);
            assert!(pickup.pos.y <= cfg.field_height - cfg.pickup_margin);
            assert!(!pickup.collected);
        }
    }

    #[test]
    fn test_fallback_spawn_is_outside_exclusion() {
        let cfg = Config::default();
        let center = Vec2::new(cfg.field_width / 2.0, cfg.field_height / 2.0);
        assert!(!too_close(fallback_spawn(&cfg, center), center, cfg.spawn_exclusion));
        // Avatar parked on the near corner pushes the fallback to the far one
        let corner = Vec2::new(cfg.pickup_margin, cfg.pickup_margin);
        assert!(!too_close(fallback_spawn(&cfg, corner), corner, cfg.spawn_exclusion));
    }

    proptest! {
        #[test]
        fn avatar_always_inside_field(seed in any::<u64>(), steps in 1usize..300) {
            let cfg = Config::default();
            let mut avatar = Avatar::new(&cfg);
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..steps {
                let axes = (rng.random_range(-1i8..=1), rng.random_range(-1i8..=1));
                avatar.update(SIM_DT, axes, &cfg);
                prop_assert!(avatar.rect.x >= 0.0);
                prop_assert!(avatar.rect.right() <= cfg.field_width);
                prop_assert!(avatar.rect.y >= 0.0);
                prop_assert!(avatar.rect.bottom() <= cfg.field_height);
            }
        }

        #[test]
        fn adversary_speed_and_containment_invariant(seed in any::<u64>(), steps in 1usize..600) {
            let cfg = Config::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut adversary = Adversary::new(&cfg, &mut rng);
            let speed = adversary.vel.length();
            prop_assert!((speed - cfg.adversary_speed).abs() < 1e-2);
            for _ in 0..steps {
                adversary.update(SIM_DT, &cfg);
                prop_assert!((adversary.vel.length() - speed).abs() < 1e-3);
                prop_assert!(adversary.pos.x >= adversary.radius);
                prop_assert!(adversary.pos.x <= cfg.field_width - adversary.radius);
                prop_assert!(adversary.pos.y >= adversary.radius);
                prop_assert!(adversary.pos.y <= cfg.field_height - adversary.radius);
            }
        }
    }
}
