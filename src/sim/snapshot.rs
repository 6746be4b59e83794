//! Read-only frame snapshot for the presentation layer
//!
//! The simulation never talks to a renderer directly; once per frame it is
//! condensed into a [`Snapshot`] of plain rectangles and HUD numbers.

use serde::Serialize;

use super::collision::Rect;
use super::state::{GamePhase, GameState, PowerUpKind};
use crate::consts::SIM_DT;

/// What a drawable entity is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum EntityKind {
    Coin,
    Obstacle,
    PowerUp(PowerUpKind),
}

/// One drawable rectangle.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EntityView {
    pub rect: Rect,
    pub kind: EntityKind,
}

/// Remaining duration of one active effect.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EffectStatus {
    pub kind: PowerUpKind,
    pub remaining_secs: f32,
}

/// Complete read-only view of one frame.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player: Rect,
    /// The player is in a hidden flicker phase of the post-hit window.
    /// Visual only.
    pub player_hidden: bool,
    pub invulnerable: bool,
    pub entities: Vec<EntityView>,
    pub score: u64,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub health_fraction: f32,
    /// Progress toward the next level in [0, 1].
    pub level_progress: f32,
    pub effects: Vec<EffectStatus>,
    pub game_over: bool,
}

impl Snapshot {
    /// Condense the current frame into view data.
    pub fn capture(state: &GameState) -> Self {
        let mut entities = Vec::with_capacity(
            state.coins.len() + state.obstacles.len() + state.powerups.len(),
        );
        for coin in &state.coins {
            entities.push(EntityView {
                rect: coin.body.rect(),
                kind: EntityKind::Coin,
            });
        }
        for obstacle in &state.obstacles {
            entities.push(EntityView {
                rect: obstacle.body.rect(),
                kind: EntityKind::Obstacle,
            });
        }
        for powerup in &state.powerups {
            entities.push(EntityView {
                rect: powerup.body.rect(),
                kind: EntityKind::PowerUp(powerup.kind),
            });
        }

        let effects = PowerUpKind::ALL
            .iter()
            .filter_map(|&kind| {
                let ticks = state.effects.remaining_ticks(kind);
                (ticks > 0).then(|| EffectStatus {
                    kind,
                    remaining_secs: ticks as f32 * SIM_DT,
                })
            })
            .collect();

        let max_health = state.tuning.effective_max_health();
        let level_progress = if state.tuning.features.leveling {
            (state.level.coins_this_level as f32
                / state.tuning.coins_per_level.max(1) as f32)
                .min(1.0)
        } else {
            0.0
        };

        Self {
            arena_width: state.arena.width,
            arena_height: state.arena.height,
            player: state.player.rect(),
            player_hidden: state
                .player
                .flicker_hidden(state.tuning.flicker_period_ticks),
            invulnerable: state.player.invulnerable(&state.effects),
            entities,
            score: state.score,
            level: state.level.level,
            health: state.player.health,
            max_health,
            health_fraction: state.player.health as f32 / max_health.max(1) as f32,
            level_progress,
            effects,
            game_over: state.phase == GamePhase::GameOver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{BASE_ARENA_HEIGHT, BASE_ARENA_WIDTH};
    use crate::sim::state::Arena;

    #[test]
    fn test_capture_counts_every_entity() {
        let mut state = GameState::new(3, Arena::new(BASE_ARENA_WIDTH, BASE_ARENA_HEIGHT));
        state.spawn_powerup(PowerUpKind::DoublePoints);

        let snap = Snapshot::capture(&state);
        assert_eq!(
            snap.entities.len(),
            state.coins.len() + state.obstacles.len() + 1
        );
        assert!(!snap.game_over);
        assert_eq!(snap.health, 5);
        assert_eq!(snap.health_fraction, 1.0);
        assert_eq!(snap.level_progress, 0.0);
    }

    #[test]
    fn test_capture_reports_active_effects_in_seconds() {
        let mut state = GameState::new(3, Arena::new(BASE_ARENA_WIDTH, BASE_ARENA_HEIGHT));
        state.effects.double_points_ticks = 120;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.effects.len(), 1);
        assert_eq!(snap.effects[0].kind, PowerUpKind::DoublePoints);
        assert!((snap.effects[0].remaining_secs - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_level_progress_tracks_the_counter() {
        let mut state = GameState::new(3, Arena::new(BASE_ARENA_WIDTH, BASE_ARENA_HEIGHT));
        state.level.coins_this_level = 5;

        let snap = Snapshot::capture(&state);
        assert_eq!(snap.level_progress, 0.5);
    }
}
