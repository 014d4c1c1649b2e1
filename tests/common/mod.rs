#![allow(dead_code)]

use bevy_ecs::entity::Entity;
use bevy_ecs::query::{With, Without};
use glam::IVec2;

use pacman_core::constants::BOARD_CELL_SIZE;
use pacman_core::game::{Game, GameConfig};
use pacman_core::map::builder::Map;
use pacman_core::map::direction::Direction;
use pacman_core::map::parser::MapTile;
use pacman_core::systems::components::{
    Ghost, GhostMode, Movable, MovementState, PlayerControlled, Position,
};
use pacman_core::systems::stage::GameStage;

pub fn new_game() -> Game {
    Game::new(GameConfig::default()).expect("standard board should build")
}

pub fn new_seeded(seed: u64) -> Game {
    Game::new(GameConfig {
        seed,
        ..GameConfig::default()
    })
    .expect("standard board should build")
}

/// Skips the READY freeze by forcing the round straight into play.
pub fn start_playing(game: &mut Game) {
    game.world.insert_resource(GameStage::Playing);
}

pub fn tick_n(game: &mut Game, n: u32) {
    for _ in 0..n {
        game.tick();
    }
}

pub fn player_entity(game: &mut Game) -> Entity {
    game.world
        .query_filtered::<Entity, With<PlayerControlled>>()
        .single(&game.world)
        .expect("one player")
}

/// Poses the player on a tile center, moving in the given direction.
pub fn set_player(game: &mut Game, tile: IVec2, direction: Direction) {
    let entity = player_entity(game);
    let mut entry = game.world.entity_mut(entity);

    *entry.get_mut::<Position>().unwrap() = Position::at_tile(tile);
    let mut movable = entry.get_mut::<Movable>().unwrap();
    movable.direction = direction;
    movable.requested = None;
    *entry.get_mut::<MovementState>().unwrap() = MovementState::Moving;
}

pub fn player_position(game: &mut Game) -> Position {
    let entity = player_entity(game);
    *game.world.entity(entity).get::<Position>().unwrap()
}

pub fn player_movable(game: &mut Game) -> Movable {
    let entity = player_entity(game);
    *game.world.entity(entity).get::<Movable>().unwrap()
}

pub fn player_movement_state(game: &mut Game) -> MovementState {
    let entity = player_entity(game);
    *game.world.entity(entity).get::<MovementState>().unwrap()
}

pub fn ghost_entity(game: &mut Game, identity: Ghost) -> Entity {
    game.world
        .query_filtered::<(Entity, &Ghost), Without<PlayerControlled>>()
        .iter(&game.world)
        .find(|(_, ghost)| **ghost == identity)
        .map(|(entity, _)| entity)
        .expect("all four ghosts exist")
}

/// Poses a ghost on a tile center with the given heading and mode.
pub fn set_ghost(game: &mut Game, identity: Ghost, tile: IVec2, direction: Direction, mode: GhostMode) {
    let entity = ghost_entity(game, identity);
    let mut entry = game.world.entity_mut(entity);

    *entry.get_mut::<Position>().unwrap() = Position::at_tile(tile);
    let mut movable = entry.get_mut::<Movable>().unwrap();
    movable.direction = direction;
    movable.requested = None;
    *entry.get_mut::<GhostMode>().unwrap() = mode;
}

pub fn ghost_position(game: &mut Game, identity: Ghost) -> Position {
    let entity = ghost_entity(game, identity);
    *game.world.entity(entity).get::<Position>().unwrap()
}

pub fn ghost_movable(game: &mut Game, identity: Ghost) -> Movable {
    let entity = ghost_entity(game, identity);
    *game.world.entity(entity).get::<Movable>().unwrap()
}

pub fn ghost_mode(game: &mut Game, identity: Ghost) -> GhostMode {
    let entity = ghost_entity(game, identity);
    *game.world.entity(entity).get::<GhostMode>().unwrap()
}

/// Parks every ghost far from the play area so a test can exercise the player
/// without interference.
pub fn park_ghosts(game: &mut Game) {
    for identity in [Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Clyde] {
        set_ghost(game, identity, IVec2::new(1, 1), Direction::Left, GhostMode::House);
        // A huge threshold keeps parked ghosts inert.
        let entity = ghost_entity(game, identity);
        game.world
            .entity_mut(entity)
            .get_mut::<pacman_core::systems::components::HouseState>()
            .unwrap()
            .dot_limit = u32::MAX;
    }
}

/// Consumes every pellet on the board except the listed tiles.
pub fn clear_pellets_except(game: &mut Game, keep: &[IVec2]) {
    let mut map = game.world.resource_mut::<Map>();
    for x in 0..BOARD_CELL_SIZE.x as i32 {
        for y in 0..BOARD_CELL_SIZE.y as i32 {
            let tile = IVec2::new(x, y);
            if keep.contains(&tile) {
                continue;
            }
            if matches!(map.cell(tile), MapTile::Pellet | MapTile::PowerPellet) {
                map.consume(tile);
            }
        }
    }
}
