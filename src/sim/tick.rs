//! Fixed timestep simulation tick
//!
//! Advances the game deterministically, one frame at a time. The step
//! order is observable behavior: effects expire before anything moves,
//! coins settle before obstacles, and power-ups spawn, fall, and are
//! picked up last.

use rand::Rng;

use super::state::{
    Arena, Faller, GamePhase, GameState, PowerUpKind, baseline_speed,
};
use crate::consts::*;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move left (held)
    pub move_left: bool,
    /// Move right (held)
    pub move_right: bool,
    /// Restart (edge-triggered, honored only in the terminal phase)
    pub restart: bool,
    /// New arena dimensions from a resize or fullscreen toggle
    /// (edge-triggered)
    pub resize: Option<(f32, f32)>,
}

/// Advance the game state by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Arena changes apply in any phase; dimensions persist across game
    // over and restart.
    if let Some((width, height)) = input.resize {
        resize_arena(state, width, height);
    }

    if state.phase == GamePhase::GameOver {
        if input.restart {
            log::info!("restarting after game over (final score {})", state.score);
            state.restart();
        }
        return;
    }

    state.tick_count += 1;

    expire_effects(state);
    decay_invulnerability(state);
    move_player(state, input, dt);
    advance_coins(state, dt);
    advance_obstacles(state, dt);
    if state.phase == GamePhase::GameOver {
        // A lethal hit ends the frame; nothing else moves.
        return;
    }
    maybe_spawn_powerup(state);
    advance_powerups(state, dt);
    collect_powerups(state);
}

/// Count down the timed effects. Slow-obstacles reverts the obstacle speed
/// to the level-derived baseline the moment it expires.
fn expire_effects(state: &mut GameState) {
    let effects = &mut state.effects;
    effects.invincible_ticks = effects.invincible_ticks.saturating_sub(1);
    effects.double_points_ticks = effects.double_points_ticks.saturating_sub(1);

    if effects.slow_obstacles_ticks > 0 {
        effects.slow_obstacles_ticks -= 1;
        if effects.slow_obstacles_ticks == 0 {
            let baseline = obstacle_baseline(state);
            set_obstacle_speed(state, baseline);
        }
    }
}

fn decay_invulnerability(state: &mut GameState) {
    state.player.invuln_ticks = state.player.invuln_ticks.saturating_sub(1);
}

/// Apply held movement intents, clamped to the arena.
fn move_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let dir = (input.move_right as i32 - input.move_left as i32) as f32;
    let max_x = (state.arena.width - state.player.size.x).max(0.0);
    let player = &mut state.player;
    player.pos.x = (player.pos.x + dir * player.speed * dt).clamp(0.0, max_x);
}

/// Coins fall, recycle off the bottom, and score on player contact.
fn advance_coins(state: &mut GameState, dt: f32) {
    let arena = state.arena;
    for i in 0..state.coins.len() {
        if state.coins[i].body.fall(dt, arena) {
            state.coins[i].body.respawn_above(&mut state.rng, arena);
            continue;
        }
        if !state.coins[i].body.rect().intersects(&state.player.rect()) {
            continue;
        }

        let multiplier: u64 = if state.effects.double_points() { 2 } else { 1 };
        state.score += u64::from(state.level.level) * multiplier;
        state.level.coins_this_level += 1;
        state.coins[i].body.respawn_above(&mut state.rng, arena);
        advance_level_if_ready(state);
    }
}

/// Obstacles fall, recycle off the bottom, and hurt on player contact.
/// Contact while invulnerable is ignored entirely: no damage, no respawn.
fn advance_obstacles(state: &mut GameState, dt: f32) {
    let arena = state.arena;
    for i in 0..state.obstacles.len() {
        if state.obstacles[i].body.fall(dt, arena) {
            state.obstacles[i].body.respawn_above(&mut state.rng, arena);
            continue;
        }
        if !state.obstacles[i]
            .body
            .rect()
            .intersects(&state.player.rect())
        {
            continue;
        }
        if state.player.invulnerable(&state.effects) {
            continue;
        }

        state.player.health = state.player.health.saturating_sub(1);
        if state.player.health == 0 {
            state.phase = GamePhase::GameOver;
            log::info!(
                "game over at level {} with score {}",
                state.level.level,
                state.score
            );
            return;
        }

        // The fresh window plus the respawn prevent an immediate re-hit.
        state.player.invuln_ticks = state.tuning.invuln_window_ticks;
        state.obstacles[i].body.respawn_above(&mut state.rng, arena);
    }
}

/// Occasionally drop a power-up of a uniformly random kind.
fn maybe_spawn_powerup(state: &mut GameState) {
    if !state.tuning.features.power_ups {
        return;
    }
    let chance = state.tuning.powerup_spawn_chance.clamp(0.0, 1.0);
    if !state.rng.random_bool(chance) {
        return;
    }
    let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];
    state.spawn_powerup(kind);
}

/// Power-ups fall and are removed, not recycled, once off screen.
fn advance_powerups(state: &mut GameState, dt: f32) {
    let arena = state.arena;
    state.powerups.retain_mut(|p| !p.body.fall(dt, arena));
}

/// Pick up power-ups overlapping the player and apply them by kind.
fn collect_powerups(state: &mut GameState) {
    let player_rect = state.player.rect();
    let mut picked: Vec<PowerUpKind> = Vec::new();
    state.powerups.retain(|p| {
        if p.body.rect().intersects(&player_rect) {
            picked.push(p.kind);
            false
        } else {
            true
        }
    });

    for kind in picked {
        apply_powerup(state, kind);
    }
}

/// Timed kinds restart at their full duration, replacing any in-flight
/// instance; Health is instantaneous.
fn apply_powerup(state: &mut GameState, kind: PowerUpKind) {
    match kind {
        PowerUpKind::Health => {
            let max = state.tuning.effective_max_health();
            state.player.health = (state.player.health + 1).min(max);
        }
        PowerUpKind::SlowObstacles => {
            state.effects.activate(kind, &state.tuning);
            let halved = obstacle_baseline(state) * 0.5;
            set_obstacle_speed(state, halved);
        }
        PowerUpKind::Invincible | PowerUpKind::DoublePoints => {
            state.effects.activate(kind, &state.tuning);
        }
    }
    log::debug!("picked up {kind:?}");
}

/// Level-advance: fires when the per-level coin counter reaches its target.
fn advance_level_if_ready(state: &mut GameState) {
    if !state.tuning.features.leveling {
        return;
    }
    if state.level.coins_this_level < state.tuning.coins_per_level.max(1) {
        return;
    }

    state.level.level += 1;
    state.level.coins_this_level = 0;

    let coin_speed = coin_baseline(state);
    set_coin_speed(state, coin_speed);
    let slow = if state.effects.slow_obstacles() { 0.5 } else { 1.0 };
    let obstacle_speed = obstacle_baseline(state) * slow;
    set_obstacle_speed(state, obstacle_speed);

    state.populate();

    if state.level.level % state.tuning.bonus_health_levels.max(1) == 0 {
        let max = state.tuning.effective_max_health();
        if state.player.health < max {
            state.player.health += 1;
        }
    }

    log::info!(
        "level {} reached, coins {:.0} px/s, obstacles {:.0} px/s",
        state.level.level,
        state.level.coin_speed,
        state.level.obstacle_speed
    );
}

/// Level-derived coin baseline for the current arena.
fn coin_baseline(state: &GameState) -> f32 {
    baseline_speed(
        COIN_BASE_SPEED,
        state.level.level,
        state.tuning.growth_factor,
        state.arena,
    )
}

/// Level-derived obstacle baseline for the current arena, before the
/// slow-obstacles modifier.
fn obstacle_baseline(state: &GameState) -> f32 {
    baseline_speed(
        OBSTACLE_BASE_SPEED,
        state.level.level,
        state.tuning.growth_factor,
        state.arena,
    )
}

/// Update the stored coin speed and every live coin.
fn set_coin_speed(state: &mut GameState, speed: f32) {
    state.level.coin_speed = speed;
    for coin in &mut state.coins {
        coin.body.speed = speed;
    }
}

/// Update the stored obstacle speed and every live obstacle.
fn set_obstacle_speed(state: &mut GameState, speed: f32) {
    state.level.obstacle_speed = speed;
    for obstacle in &mut state.obstacles {
        obstacle.body.speed = speed;
    }
}

/// Rescale everything once per resize event. Sizes and fall speeds follow
/// the vertical ratio, player speed the horizontal ratio. Only the player
/// is clamped back into bounds; other entities are tolerated off screen
/// until their next natural respawn.
fn resize_arena(state: &mut GameState, width: f32, height: f32) {
    let old = state.arena;
    let new = Arena::new(width, height);
    if new.width == old.width && new.height == old.height {
        return;
    }
    let sx = new.width / old.width;
    let sy = new.height / old.height;
    state.arena = new;

    let player = &mut state.player;
    player.pos.x *= sx;
    player.size *= sy;
    player.speed *= sx;
    player.pos.y = new.height - player.size.y - PLAYER_BOTTOM_MARGIN * new.size_scale();
    player.pos.x = player.pos.x.clamp(0.0, (new.width - player.size.x).max(0.0));

    for coin in &mut state.coins {
        rescale_body(&mut coin.body, sx, sy);
    }
    for obstacle in &mut state.obstacles {
        rescale_body(&mut obstacle.body, sx, sy);
    }
    for powerup in &mut state.powerups {
        rescale_body(&mut powerup.body, sx, sy);
    }
    state.level.coin_speed *= sy;
    state.level.obstacle_speed *= sy;

    log::info!("arena resized to {:.0}x{:.0}", new.width, new.height);
}

fn rescale_body(body: &mut Faller, sx: f32, sy: f32) {
    body.pos.x *= sx;
    body.pos.y *= sy;
    body.size *= sy;
    body.speed *= sy;
}
