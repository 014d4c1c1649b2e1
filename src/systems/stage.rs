//! The round controller: life-cycle state machine, wave and frightened
//! timers, mode broadcasts, respawn sequencing and level progression.

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::resource::Resource;
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info};

use crate::constants::{tiles, timing};
use crate::error::GameError;
use crate::events::AudioEvent;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::systems::components::{
    AnimationPhase, DotCounter, FrightState, Ghost, GhostMode, GlobalMode, HouseState, Level, Movable, MovementState,
    PlayerControlled, PlayerLives, Position, WaveSchedule,
};

/// The round's life-cycle state. No agent simulation runs outside `Playing`.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStage {
    /// Pre-round freeze: agents posed on their start tiles, nothing moves.
    Ready { remaining_ticks: u32 },
    /// The main gameplay loop is active.
    Playing,
    /// The player was caught; all motion frozen for the capture animation.
    Dying { remaining_ticks: u32 },
    /// No lives remain.
    GameOver,
}

type PlayerQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Position,
        &'static mut Movable,
        &'static mut MovementState,
        &'static mut AnimationPhase,
    ),
    (With<PlayerControlled>, Without<Ghost>),
>;

type GhostQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Ghost,
        &'static mut Position,
        &'static mut Movable,
        &'static mut GhostMode,
        &'static mut HouseState,
    ),
    Without<PlayerControlled>,
>;

/// Advances the round timers and the life-cycle state machine.
#[allow(clippy::too_many_arguments)]
pub fn stage_system(
    mut stage: ResMut<GameStage>,
    mut schedule: ResMut<WaveSchedule>,
    mut global_mode: ResMut<GlobalMode>,
    mut fright: ResMut<FrightState>,
    mut dots: ResMut<DotCounter>,
    lives: Res<PlayerLives>,
    mut audio: EventWriter<AudioEvent>,
    mut players: PlayerQuery,
    mut ghosts: GhostQuery,
) {
    match *stage {
        GameStage::Ready { remaining_ticks } => {
            if remaining_ticks > 0 {
                *stage = GameStage::Ready {
                    remaining_ticks: remaining_ticks - 1,
                };
            } else {
                *stage = GameStage::Playing;
                audio.write(AudioEvent::SirenStart);
                debug!("Round started");
            }
        }
        GameStage::Playing => {
            if fright.active() {
                // The wave timer holds still for the whole frightened period.
                fright.remaining -= 1;
                if !fright.active() {
                    let restored = restore_frightened(&mut ghosts, *global_mode);
                    audio.write(AudioEvent::SirenStart);
                    debug!(restored, "Frightened period expired");
                }
            } else if let Some(new_mode) = schedule.tick() {
                *global_mode = new_mode;
                broadcast_mode(&mut ghosts, new_mode);
                debug!(mode = ?new_mode, "Wave advanced");
            }
        }
        GameStage::Dying { remaining_ticks } => {
            if remaining_ticks > 0 {
                *stage = GameStage::Dying {
                    remaining_ticks: remaining_ticks - 1,
                };
            } else if lives.0 > 0 {
                schedule.restart();
                *global_mode = schedule.current_mode();
                fright.remaining = 0;
                fright.combo = 0;
                dots.0 = 0;
                reset_actors(&mut players, &mut ghosts);
                *stage = GameStage::Ready {
                    remaining_ticks: timing::READY_TICKS,
                };
                info!(lives = lives.0, "Respawning");
            } else {
                *stage = GameStage::GameOver;
                info!("Game over");
            }
        }
        GameStage::GameOver => {}
    }
}

/// Detects level completion: the last pellet was consumed this tick.
#[allow(clippy::too_many_arguments)]
pub fn level_system(
    mut stage: ResMut<GameStage>,
    mut map: ResMut<Map>,
    mut level: ResMut<Level>,
    mut schedule: ResMut<WaveSchedule>,
    mut global_mode: ResMut<GlobalMode>,
    mut fright: ResMut<FrightState>,
    mut dots: ResMut<DotCounter>,
    mut audio: EventWriter<AudioEvent>,
    mut errors: EventWriter<GameError>,
    mut players: PlayerQuery,
    mut ghosts: GhostQuery,
) {
    if !matches!(*stage, GameStage::Playing) || map.pellets_remaining > 0 {
        return;
    }

    level.0 += 1;
    map.reset_pellets();

    match WaveSchedule::for_level(level.0) {
        Ok(new_schedule) => *schedule = new_schedule,
        Err(error) => {
            // Built-in schedules are always valid; keep the old one rather
            // than kill the session if that ever stops holding.
            errors.write(error);
            schedule.restart();
        }
    }
    *global_mode = schedule.current_mode();
    fright.remaining = 0;
    fright.combo = 0;
    dots.0 = 0;

    reset_actors(&mut players, &mut ghosts);
    audio.write(AudioEvent::SirenStop);
    *stage = GameStage::Ready {
        remaining_ticks: timing::READY_TICKS,
    };
    info!(level = level.0, "Level cleared");
}

/// Re-poses every agent on its canonical start tile with initial mode state.
fn reset_actors(players: &mut PlayerQuery, ghosts: &mut GhostQuery) {
    for (mut position, mut movable, mut state, mut animation) in players.iter_mut() {
        *position = Position::at_tile(tiles::PLAYER_START);
        movable.direction = Direction::Left;
        movable.requested = None;
        *state = MovementState::Moving;
        animation.0 = 0.0;
    }

    for (identity, mut position, mut movable, mut mode, mut house) in ghosts.iter_mut() {
        *position = Position::at_tile(identity.start_tile());
        movable.requested = None;
        house.dot_limit = identity.house_dot_limit();
        if identity.starts_housed() {
            *mode = GhostMode::House;
            movable.direction = Direction::Up;
        } else {
            *mode = GhostMode::Scatter;
            movable.direction = Direction::Left;
        }
    }
}

/// Applies a new global mode to every scatter/chase ghost, reversing each —
/// the reversal is the arcade tell that a wave flipped, and it happens
/// immediately, not at the next decision tile.
fn broadcast_mode(ghosts: &mut GhostQuery, mode: GlobalMode) {
    for (_, _, mut movable, mut ghost_mode, _) in ghosts.iter_mut() {
        if matches!(*ghost_mode, GhostMode::Scatter | GhostMode::Chase) {
            *ghost_mode = mode.into();
            movable.direction = movable.direction.opposite();
        }
    }
}

/// Returns still-frightened ghosts to the current global mode, with the same
/// immediate reversal as any other mode switch.
fn restore_frightened(ghosts: &mut GhostQuery, mode: GlobalMode) -> u32 {
    let mut restored = 0;
    for (_, _, mut movable, mut ghost_mode, _) in ghosts.iter_mut() {
        if matches!(*ghost_mode, GhostMode::Frightened) {
            *ghost_mode = mode.into();
            movable.direction = movable.direction.opposite();
            restored += 1;
        }
    }
    restored
}
