//! Ghost AI: the per-identity targeting table, intersection decisions with the
//! arcade tie-break, house release gating and speed modulation.

use bevy_ecs::entity::Entity;
use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use glam::IVec2;
use rand::seq::IndexedRandom;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::constants::{ghost, speed, tile_center, tiles};
use crate::error::GameError;
use crate::map::builder::{Map, TraversalFlags};
use crate::map::direction::{Direction, DIRECTIONS};
use crate::map::parser::MapTile;
use crate::rng::GameRng;
use crate::systems::components::{
    DotCounter, Ghost, GhostMode, GlobalMode, HouseState, Level, Movable, PlayerControlled, Position,
};
use crate::systems::movement::{advance, apply_leftover};
use crate::systems::stage::GameStage;

/// Computes a point `lead` tiles ahead of the player, reproducing the arcade
/// overflow bug: when the player faces up, the point is additionally offset
/// backward on both axes by the same amount.
pub fn ahead_with_overflow(player_tile: IVec2, facing: Direction, lead: i32) -> IVec2 {
    let mut point = player_tile + facing.as_ivec2() * lead;
    if facing == Direction::Up {
        point += IVec2::splat(-lead);
    }
    point
}

/// The tile a chasing ghost steers toward, per identity.
///
/// `blinky_tile` is Blinky's freshly-updated position this tick; Inky's flank
/// point is reflected through it.
pub fn chase_target(
    identity: Ghost,
    player_tile: IVec2,
    player_facing: Direction,
    own_tile: IVec2,
    blinky_tile: IVec2,
) -> IVec2 {
    match identity {
        Ghost::Blinky => player_tile,
        Ghost::Pinky => ahead_with_overflow(player_tile, player_facing, ghost::AMBUSH_LEAD),
        Ghost::Inky => {
            let pivot = ahead_with_overflow(player_tile, player_facing, ghost::FLANK_LEAD);
            pivot + (pivot - blinky_tile)
        }
        Ghost::Clyde => {
            let offset = own_tile - player_tile;
            if offset.length_squared() >= ghost::PROXIMITY_RADIUS_SQ {
                player_tile
            } else {
                identity.scatter_target()
            }
        }
    }
}

/// The tile a ghost steers toward in its current mode.
pub fn current_target(
    identity: Ghost,
    mode: GhostMode,
    player_tile: IVec2,
    player_facing: Direction,
    own_tile: IVec2,
    blinky_tile: IVec2,
) -> IVec2 {
    match mode {
        GhostMode::Eaten => tiles::HOUSE_ENTRANCE,
        GhostMode::Scatter => identity.scatter_target(),
        GhostMode::Chase => chase_target(identity, player_tile, player_facing, own_tile, blinky_tile),
        // Frightened and House don't steer toward anything.
        GhostMode::Frightened | GhostMode::House => own_tile,
    }
}

/// Enumerates the directions a ghost may take from a decision tile: never its
/// reverse, never into a wall, never into the house interior (unless eaten),
/// and never upward from the four anti-trap tiles while scattering or chasing.
pub fn candidate_directions(map: &Map, tile: IVec2, current: Direction, mode: GhostMode) -> SmallVec<[Direction; 3]> {
    let flags = match mode {
        GhostMode::Eaten => TraversalFlags::GHOST | TraversalFlags::EYES,
        _ => TraversalFlags::GHOST,
    };

    let mut candidates: SmallVec<[Direction; 3]> = SmallVec::new();
    for direction in DIRECTIONS {
        if direction == current.opposite() {
            continue;
        }
        if direction == Direction::Up
            && matches!(mode, GhostMode::Scatter | GhostMode::Chase)
            && tiles::NO_UP.contains(&tile)
        {
            continue;
        }
        if map.is_blocked(tile + direction.as_ivec2(), flags) {
            continue;
        }
        candidates.push(direction);
    }
    candidates
}

/// Picks the candidate minimizing squared Euclidean distance to the target.
///
/// Candidates arrive in `DIRECTIONS` priority order and only a strictly
/// smaller distance displaces the running best, which is exactly the arcade
/// Up > Left > Down > Right tie-break.
pub fn steer_toward(candidates: &[Direction], tile: IVec2, target: IVec2) -> Direction {
    debug_assert!(!candidates.is_empty());
    let mut best = candidates[0];
    let mut best_distance = i64::MAX;
    for &direction in candidates {
        let next = tile + direction.as_ivec2();
        let delta = next - target;
        let distance = (delta.x as i64).pow(2) + (delta.y as i64).pow(2);
        if distance < best_distance {
            best_distance = distance;
            best = direction;
        }
    }
    best
}

/// Speed for a ghost this tick. Eaten and frightened overrides come first,
/// then the tunnel crawl, then the cruise bonus over the level base.
pub fn ghost_speed(identity: Ghost, mode: GhostMode, level: u32, pellets_remaining: u32, on_tunnel: bool) -> f32 {
    match mode {
        GhostMode::Eaten => return speed::EATEN,
        GhostMode::Frightened => return speed::FRIGHTENED,
        _ => {}
    }
    if on_tunnel {
        return speed::TUNNEL;
    }

    let base = speed::ghost_base(level);
    if identity == Ghost::Blinky && mode == GhostMode::Chase {
        if pellets_remaining <= speed::ELROY_2_DOTS {
            return base * speed::ELROY_2;
        }
        if pellets_remaining <= speed::ELROY_1_DOTS {
            return base * speed::ELROY_1;
        }
    }
    base
}

#[allow(clippy::type_complexity)]
pub fn ghost_system(
    map: Res<Map>,
    level: Res<Level>,
    stage: Res<GameStage>,
    global_mode: Res<GlobalMode>,
    dots: Res<DotCounter>,
    mut rng: ResMut<GameRng>,
    players: Query<(&Position, &Movable), (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(Entity, &Ghost, &mut Position, &mut Movable, &mut GhostMode, &mut HouseState)>,
    mut errors: EventWriter<GameError>,
) {
    if !matches!(*stage, GameStage::Playing) {
        return;
    }

    let Ok((player_position, player_movable)) = players.single() else {
        errors.write(GameError::InvalidState("No single player entity".into()));
        return;
    };
    let player_tile = player_position.tile();
    let player_facing = player_movable.direction;

    // Fixed identity order: Inky reads Blinky's position after Blinky moved.
    let mut order: SmallVec<[(Entity, Ghost); 4]> = ghosts.iter().map(|(entity, ghost, ..)| (entity, *ghost)).collect();
    order.sort_by_key(|(_, ghost)| *ghost as u8);

    let mut blinky_tile = IVec2::ZERO;
    for (entity, identity) in order {
        let Ok((_, _, mut position, mut movable, mut mode, mut house)) = ghosts.get_mut(entity) else {
            continue;
        };

        if *mode == GhostMode::House {
            update_housed(
                identity,
                &mut position,
                &mut movable,
                &mut mode,
                &house,
                &dots,
                *global_mode,
            );
        } else {
            update_roaming(
                &map,
                identity,
                &mut position,
                &mut movable,
                &mut mode,
                &mut house,
                level.0,
                player_tile,
                player_facing,
                blinky_tile,
                &mut rng,
            );
        }

        if identity == Ghost::Blinky {
            blinky_tile = position.tile();
        }
    }
}

/// House behavior: bob vertically until released, then slide to the exit
/// column and rise out, adopting the global mode at the exit row.
fn update_housed(
    identity: Ghost,
    position: &mut Position,
    movable: &mut Movable,
    mode: &mut GhostMode,
    house: &HouseState,
    dots: &DotCounter,
    global_mode: GlobalMode,
) {
    if dots.0 >= house.dot_limit {
        let exit_x = tile_center(IVec2::new(tiles::HOUSE_EXIT_COL, 0)).x;
        if (position.pixel.x - exit_x).abs() > speed::HOUSE_EXIT {
            position.pixel.x += if position.pixel.x < exit_x {
                speed::HOUSE_EXIT
            } else {
                -speed::HOUSE_EXIT
            };
        } else {
            position.pixel.x = exit_x;
            position.pixel.y -= speed::HOUSE_EXIT;
            movable.direction = Direction::Up;

            let exit_y = tile_center(IVec2::new(0, tiles::HOUSE_EXIT_ROW)).y;
            if position.pixel.y <= exit_y {
                // Snap onto the exit tile center so the strict-crossing mover
                // takes over from an exactly aligned position.
                position.pixel.y = exit_y;
                *mode = global_mode.into();
                movable.direction = Direction::Left;
                debug!(ghost = ?identity, mode = ?*mode, "Ghost left the house");
            }
        }
        return;
    }

    // Not released yet: bob between the house bounds.
    let rest_y = tile_center(IVec2::new(0, tiles::HOUSE_CENTER_ROW)).y;
    if position.pixel.y < rest_y - 4.0 {
        movable.direction = Direction::Down;
    } else if position.pixel.y > rest_y + 4.0 {
        movable.direction = Direction::Up;
    }
    position.pixel.y += movable.direction.as_vec2().y * speed::HOUSE_BOB;
}

#[allow(clippy::too_many_arguments)]
fn update_roaming(
    map: &Map,
    identity: Ghost,
    position: &mut Position,
    movable: &mut Movable,
    mode: &mut GhostMode,
    house: &mut HouseState,
    level: u32,
    player_tile: IVec2,
    player_facing: Direction,
    blinky_tile: IVec2,
    rng: &mut GameRng,
) {
    let on_tunnel = map.is_tunnel(position.tile());
    movable.speed = ghost_speed(identity, *mode, level, map.pellets_remaining, on_tunnel);

    let Some(leftover) = advance(position, movable.direction, movable.speed) else {
        return;
    };

    // Decision point: the ghost sits exactly on a tile center.
    let tile = position.tile();

    if *mode == GhostMode::Eaten {
        if tile == tiles::HOUSE_ENTRANCE || map.cell(tile) == MapTile::Door {
            // Descend through the door rather than re-evaluating the target;
            // greedy steering would otherwise orbit the entrance forever.
            movable.direction = Direction::Down;
            apply_leftover(position, movable.direction, leftover);
            return;
        }
        if map.cell(tile) == MapTile::HouseInterior {
            // Home again: wait out the house with the threshold already
            // satisfied, so the next release check passes immediately.
            debug!(ghost = ?identity, "Eyes reached the house, re-entering");
            *mode = GhostMode::House;
            house.dot_limit = 0;
            movable.direction = Direction::Up;
            return;
        }
    }

    let candidates = candidate_directions(map, tile, movable.direction, *mode);
    let chosen = if candidates.is_empty() {
        // Unreachable on a validated board; reversing beats tunneling into a wall.
        trace!(ghost = ?identity, ?tile, "No candidate directions, forcing reversal");
        movable.direction.opposite()
    } else if *mode == GhostMode::Frightened {
        *candidates
            .choose(&mut rng.0)
            .expect("candidates is non-empty")
    } else {
        let target = current_target(identity, *mode, player_tile, player_facing, tile, blinky_tile);
        steer_toward(&candidates, tile, target)
    };

    movable.direction = chosen;
    apply_leftover(position, movable.direction, leftover);
}
