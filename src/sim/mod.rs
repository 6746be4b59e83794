//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use snapshot::{EffectStatus, EntityKind, EntityView, Snapshot};
pub use state::{
    ActiveEffects, Arena, Coin, Faller, GamePhase, GameState, LevelState, Obstacle, Player,
    PowerUp, PowerUpKind, coin_cap, obstacle_cap,
};
pub use tick::{TickInput, tick};
