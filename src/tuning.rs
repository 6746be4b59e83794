//! Data-driven game balance
//!
//! Every knob that shapes a run lives here, so balance can be tweaked from
//! a JSON file without recompiling. The feature flags switch whole systems
//! on and off, which is also how the stripped-down game variants are
//! expressed: one simulation, several configurations.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Toggles for the optional gameplay systems.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Features {
    /// Multi-hit health with a post-hit invulnerability window. Off means
    /// any obstacle contact ends the run.
    pub health: bool,
    /// Coin-driven level progression and speed growth.
    pub leveling: bool,
    /// Falling power-ups and their timed effects.
    pub power_ups: bool,
}

impl Default for Features {
    fn default() -> Self {
        Self {
            health: true,
            leveling: true,
            power_ups: true,
        }
    }
}

/// Gameplay balance values. Durations count simulation ticks at 60 Hz.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_health: u32,
    /// Coins required to advance a level
    pub coins_per_level: u32,
    /// Geometric speed growth per level
    pub growth_factor: f32,
    /// Per-tick probability of dropping a power-up
    pub powerup_spawn_chance: f64,
    /// Post-hit invulnerability window, in ticks
    pub invuln_window_ticks: u32,
    /// Full flicker period during that window (~200 ms), in ticks
    pub flicker_period_ticks: u32,
    pub invincible_ticks: u32,
    pub double_points_ticks: u32,
    pub slow_obstacles_ticks: u32,
    /// Every Nth level grants one bonus health
    pub bonus_health_levels: u32,
    pub features: Features,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_health: 5,
            coins_per_level: 10,
            growth_factor: 1.1,
            powerup_spawn_chance: 0.002,
            invuln_window_ticks: 90,
            flicker_period_ticks: 12,
            invincible_ticks: 300,
            double_points_ticks: 480,
            slow_obstacles_ticks: 360,
            bonus_health_levels: 5,
            features: Features::default(),
        }
    }
}

impl Tuning {
    /// Health ceiling with the health toggle applied.
    pub fn effective_max_health(&self) -> u32 {
        if self.features.health {
            self.max_health.max(1)
        } else {
            1
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load from a JSON file, falling back to defaults on any problem.
    pub fn load_or_default(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| Self::from_json(&text).map_err(|e| e.to_string()));
        match parsed {
            Ok(tuning) => {
                log::info!("tuning loaded from {}", path.display());
                tuning
            }
            Err(err) => {
                log::warn!(
                    "tuning file {} unusable ({err}), using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
