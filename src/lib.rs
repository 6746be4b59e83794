//! Coin Dash - a falling-coins arcade dodger
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `tuning`: Data-driven game balance and feature flags
//! - `highscores`: Session-local leaderboard
//! - `tui`: Terminal presentation layer

pub mod highscores;
pub mod sim;
pub mod tui;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::{Features, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Design-resolution arena; runtime dimensions scale relative to this
    pub const BASE_ARENA_WIDTH: f32 = 800.0;
    pub const BASE_ARENA_HEIGHT: f32 = 600.0;
    /// Smallest dimension a resize event may produce
    pub const MIN_ARENA_DIM: f32 = 1.0;

    /// Player defaults (design resolution)
    pub const PLAYER_SIZE: f32 = 50.0;
    /// Horizontal player speed, px/s
    pub const PLAYER_SPEED: f32 = 300.0;
    /// Gap between the player and the arena bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;

    /// Falling entity defaults (design resolution), speeds in px/s
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_BASE_SPEED: f32 = 180.0;
    pub const OBSTACLE_SIZE: f32 = 50.0;
    pub const OBSTACLE_BASE_SPEED: f32 = 240.0;
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 210.0;
}
