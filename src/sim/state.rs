//! Game state and core simulation types
//!
//! Everything the simulation mutates lives here. The state is plain data
//! plus an owned seeded RNG, so a (state, input) pair fully determines the
//! next frame.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Terminal state; only a restart intent is honored
    GameOver,
}

/// Rectangular play area bounds, resizable at runtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(MIN_ARENA_DIM),
            height: height.max(MIN_ARENA_DIM),
        }
    }

    /// Vertical scale relative to the design resolution. Entity sizes and
    /// fall speeds are proportional to this.
    #[inline]
    pub fn size_scale(&self) -> f32 {
        self.height / BASE_ARENA_HEIGHT
    }

    /// Horizontal scale relative to the design resolution (player speed).
    #[inline]
    pub fn x_scale(&self) -> f32 {
        self.width / BASE_ARENA_WIDTH
    }
}

/// Shared body for everything that falls: position, size, fall speed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Faller {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Fall speed in px/s, positive downward
    pub speed: f32,
}

impl Faller {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Advance one step; returns true once the body has left the arena
    /// through the bottom edge.
    pub fn fall(&mut self, dt: f32, arena: Arena) -> bool {
        self.pos.y += self.speed * dt;
        self.pos.y > arena.height
    }

    /// Move to a fresh random spot just above the top edge.
    pub fn respawn_above(&mut self, rng: &mut Pcg32, arena: Arena) {
        self.pos.x = rng.random_range(0.0..(arena.width - self.size.x).max(1.0));
        self.pos.y = -self.size.y;
    }
}

/// A collectible coin
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coin {
    pub body: Faller,
}

/// A falling hazard
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub body: Faller,
}

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Obstacle contact is ignored for a while
    Invincible,
    /// Coin pickups award double points for a while
    DoublePoints,
    /// Restores one health immediately
    Health,
    /// Obstacles fall at half speed for a while
    SlowObstacles,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::Invincible,
        PowerUpKind::DoublePoints,
        PowerUpKind::Health,
        PowerUpKind::SlowObstacles,
    ];

    /// Effect duration in ticks; `None` marks an instantaneous effect that
    /// is applied and discarded on pickup.
    pub fn duration_ticks(&self, tuning: &Tuning) -> Option<u32> {
        match self {
            PowerUpKind::Invincible => Some(tuning.invincible_ticks),
            PowerUpKind::DoublePoints => Some(tuning.double_points_ticks),
            PowerUpKind::SlowObstacles => Some(tuning.slow_obstacles_ticks),
            PowerUpKind::Health => None,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Faller,
    pub kind: PowerUpKind,
}

/// Tick counters for the timed effects. Zero means inactive; collecting a
/// kind resets its counter to the full duration, so at most one instance
/// of each kind is ever in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub invincible_ticks: u32,
    pub double_points_ticks: u32,
    pub slow_obstacles_ticks: u32,
}

impl ActiveEffects {
    pub fn invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn double_points(&self) -> bool {
        self.double_points_ticks > 0
    }

    pub fn slow_obstacles(&self) -> bool {
        self.slow_obstacles_ticks > 0
    }

    /// (Re)start a timed effect at its full duration. Instantaneous kinds
    /// are ignored here.
    pub fn activate(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        let Some(duration) = kind.duration_ticks(tuning) else {
            return;
        };
        match kind {
            PowerUpKind::Invincible => self.invincible_ticks = duration,
            PowerUpKind::DoublePoints => self.double_points_ticks = duration,
            PowerUpKind::SlowObstacles => self.slow_obstacles_ticks = duration,
            PowerUpKind::Health => {}
        }
    }

    pub fn remaining_ticks(&self, kind: PowerUpKind) -> u32 {
        match kind {
            PowerUpKind::Invincible => self.invincible_ticks,
            PowerUpKind::DoublePoints => self.double_points_ticks,
            PowerUpKind::SlowObstacles => self.slow_obstacles_ticks,
            PowerUpKind::Health => 0,
        }
    }
}

/// The player's avatar, pinned near the arena bottom.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner; y only changes on resize
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal speed in px/s
    pub speed: f32,
    pub health: u32,
    /// Post-hit invulnerability window, ticks remaining
    pub invuln_ticks: u32,
}

impl Player {
    /// Fresh player centered at the bottom of the arena.
    pub fn spawn(arena: Arena, tuning: &Tuning) -> Self {
        let scale = arena.size_scale();
        let size = Vec2::splat(PLAYER_SIZE * scale);
        Self {
            pos: Vec2::new(
                (arena.width - size.x) / 2.0,
                arena.height - size.y - PLAYER_BOTTOM_MARGIN * scale,
            ),
            size,
            speed: PLAYER_SPEED * arena.x_scale(),
            health: tuning.effective_max_health(),
            invuln_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// True while obstacle contact is ignored (post-hit window or the
    /// Invincible effect).
    pub fn invulnerable(&self, effects: &ActiveEffects) -> bool {
        self.invuln_ticks > 0 || effects.invincible()
    }

    /// Flicker phase of the post-hit window. Visual only, no gameplay
    /// effect.
    pub fn flicker_hidden(&self, flicker_period_ticks: u32) -> bool {
        let half = (flicker_period_ticks / 2).max(1);
        self.invuln_ticks > 0 && (self.invuln_ticks / half) % 2 == 1
    }
}

/// Level progression and the level-derived entity speeds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LevelState {
    /// Current level, starts at 1
    pub level: u32,
    /// Coins collected toward the next level
    pub coins_this_level: u32,
    /// Current coin fall speed in px/s
    pub coin_speed: f32,
    /// Current obstacle fall speed in px/s (halved while slow-obstacles is
    /// active)
    pub obstacle_speed: f32,
}

impl LevelState {
    pub fn initial(arena: Arena, tuning: &Tuning) -> Self {
        Self {
            level: 1,
            coins_this_level: 0,
            coin_speed: baseline_speed(COIN_BASE_SPEED, 1, tuning.growth_factor, arena),
            obstacle_speed: baseline_speed(OBSTACLE_BASE_SPEED, 1, tuning.growth_factor, arena),
        }
    }
}

/// Coin population cap for a level.
pub fn coin_cap(level: u32) -> usize {
    (1 + level / 3).min(3) as usize
}

/// Obstacle population cap for a level.
pub fn obstacle_cap(level: u32) -> usize {
    (1 + level / 4).min(3) as usize
}

/// Level-derived baseline fall speed, before the slow-obstacles modifier.
pub fn baseline_speed(base: f32, level: u32, growth_factor: f32, arena: Arena) -> f32 {
    base * growth_factor.powi(level as i32 - 1) * arena.size_scale()
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub arena: Arena,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub tick_count: u64,
    pub score: u64,
    pub player: Player,
    pub level: LevelState,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with default tuning.
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self::with_tuning(seed, arena, Tuning::default())
    }

    /// Create a new game with explicit tuning.
    pub fn with_tuning(seed: u64, arena: Arena, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            arena,
            phase: GamePhase::Playing,
            tick_count: 0,
            score: 0,
            player: Player::spawn(arena, &tuning),
            level: LevelState::initial(arena, &tuning),
            coins: Vec::new(),
            obstacles: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.populate();
        state
    }

    /// Reinitialize for a fresh run. Arena dimensions and the RNG stream
    /// persist.
    pub fn restart(&mut self) {
        self.phase = GamePhase::Playing;
        self.tick_count = 0;
        self.score = 0;
        self.effects = ActiveEffects::default();
        self.player = Player::spawn(self.arena, &self.tuning);
        self.level = LevelState::initial(self.arena, &self.tuning);
        self.coins.clear();
        self.obstacles.clear();
        self.powerups.clear();
        self.populate();
    }

    /// Top up the coin and obstacle populations to the level-derived caps.
    /// Entities are only ever added here; falling off the bottom recycles
    /// them in place.
    pub fn populate(&mut self) {
        while self.coins.len() < coin_cap(self.level.level) {
            self.spawn_coin();
        }
        while self.obstacles.len() < obstacle_cap(self.level.level) {
            self.spawn_obstacle();
        }
    }

    pub fn spawn_coin(&mut self) {
        let size = Vec2::splat(COIN_SIZE * self.arena.size_scale());
        let pos = self.random_spawn_pos(size);
        let speed = self.level.coin_speed;
        self.coins.push(Coin {
            body: Faller { pos, size, speed },
        });
    }

    pub fn spawn_obstacle(&mut self) {
        let size = Vec2::splat(OBSTACLE_SIZE * self.arena.size_scale());
        let pos = self.random_spawn_pos(size);
        let speed = self.level.obstacle_speed;
        self.obstacles.push(Obstacle {
            body: Faller { pos, size, speed },
        });
    }

    /// Drop a power-up of the given kind just above the top edge.
    pub fn spawn_powerup(&mut self, kind: PowerUpKind) {
        let scale = self.arena.size_scale();
        let size = Vec2::splat(POWERUP_SIZE * scale);
        let x = self.rng.random_range(0.0..(self.arena.width - size.x).max(1.0));
        self.powerups.push(PowerUp {
            body: Faller {
                pos: Vec2::new(x, -size.y),
                size,
                speed: POWERUP_FALL_SPEED * scale,
            },
            kind,
        });
    }

    /// Scattered spawn position above the arena, so fresh populations do
    /// not arrive in lockstep.
    fn random_spawn_pos(&mut self, size: Vec2) -> Vec2 {
        let x = self.rng.random_range(0.0..(self.arena.width - size.x).max(1.0));
        let y = -self
            .rng
            .random_range(size.y..self.arena.height.max(size.y + 1.0));
        Vec2::new(x, y)
    }
}
