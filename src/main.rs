//! Dodge Rush headless driver
//!
//! Runs the simulation at a fixed cadence with the built-in autopilot and
//! logs the HUD whenever it changes. A real front end replaces this loop:
//! it feeds key states in and draws entity state out after each update.
//!
//! Usage: `dodge-rush [config.json] [seed]`

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dodge_rush::Config;
use dodge_rush::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use dodge_rush::hud;
use dodge_rush::sim::{GameState, Phase, TickInput, tick};

fn load_config() -> Config {
    let Some(path) = std::env::args().nth(1) else {
        return Config::default();
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| Config::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(cfg) => {
            log::info!("Loaded config from {path}");
            cfg
        }
        Err(e) => {
            log::warn!("Ignoring config {path}: {e}");
            Config::default()
        }
    }
}

fn pick_seed() -> u64 {
    if let Some(seed) = std::env::args().nth(2).and_then(|s| s.parse().ok()) {
        return seed;
    }
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();

    let config = load_config();
    let seed = pick_seed();
    log::info!("Dodge Rush starting with seed {seed}");
    for line in hud::instructions(&config) {
        log::info!("{line}");
    }

    let mut state = GameState::new(config, seed);
    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    let frame = Duration::from_secs_f32(SIM_DT);
    let mut accumulator = 0.0f32;
    let mut last = Instant::now();
    let mut last_status = String::new();

    while state.phase == Phase::Playing {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(MAX_FRAME_DT);
        last = now;

        accumulator += dt;
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut state, &input, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        let status = hud::status_line(&state);
        if status != last_status {
            log::info!("{status}");
            last_status = status;
        }

        // Frame governor stand-in for vsync
        std::thread::sleep(frame);
    }

    if let Some((banner, hint)) = hud::banner(state.phase) {
        log::info!("{banner}");
        log::info!("{hint}");
    }
    match serde_json::to_string(&state) {
        Ok(json) => log::debug!("final state: {json}"),
        Err(e) => log::warn!("could not serialize final state: {e}"),
    }
}
