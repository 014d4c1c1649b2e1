//! Player agent movement: buffered turns, wall-blocked stops, instant reversal.

use bevy_ecs::query::With;
use bevy_ecs::system::{Query, Res};
use tracing::trace;

use crate::constants::speed;
use crate::map::builder::{Map, TraversalFlags};
use crate::systems::components::{AnimationPhase, Level, Movable, MovementState, PlayerControlled, Position};
use crate::systems::movement::{advance, apply_leftover};
use crate::systems::stage::GameStage;

pub fn player_system(
    map: Res<Map>,
    level: Res<Level>,
    stage: Res<GameStage>,
    mut players: Query<(&mut Position, &mut Movable, &mut MovementState, &mut AnimationPhase), With<PlayerControlled>>,
) {
    if !matches!(*stage, GameStage::Playing) {
        return;
    }

    for (mut position, mut movable, mut state, mut animation) in players.iter_mut() {
        movable.speed = speed::player(level.0);

        // Reversal requests skip the center-crossing wait entirely; turning
        // straight around must feel instantaneous.
        if *state == MovementState::Moving {
            if let Some(requested) = movable.requested {
                if requested == movable.direction.opposite() {
                    trace!(?requested, "Instant reversal");
                    movable.direction = requested;
                    movable.requested = None;
                }
            }
        }

        if *state == MovementState::Moving {
            let direction = movable.direction;
            if let Some(leftover) = advance(&mut position, direction, movable.speed) {
                let tile = position.tile();

                // Commit the buffered turn if it is open from this center.
                if let Some(requested) = movable.requested {
                    if requested != movable.direction && !map.is_blocked(tile + requested.as_ivec2(), TraversalFlags::PLAYER) {
                        movable.direction = requested;
                        movable.requested = None;
                    }
                }

                // A blocked heading halts exactly on the center; the leftover
                // distance is forfeited rather than spent inside a wall.
                if map.is_blocked(tile + movable.direction.as_ivec2(), TraversalFlags::PLAYER) {
                    *state = MovementState::Stopped;
                } else {
                    apply_leftover(&mut position, movable.direction, leftover);
                }
            }
            animation.0 += movable.speed;
        }

        // Start from standstill once the buffered direction opens up.
        if *state == MovementState::Stopped {
            if let Some(requested) = movable.requested {
                if !map.is_blocked(position.tile() + requested.as_ivec2(), TraversalFlags::PLAYER) {
                    movable.direction = requested;
                    movable.requested = None;
                    *state = MovementState::Moving;
                }
            }
        }
    }
}
