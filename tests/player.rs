//! Player agent input-to-motion contract.

mod common;

use glam::IVec2;
use pretty_assertions::assert_eq;

use pacman_core::constants::tile_center;
use pacman_core::events::GameCommand;
use pacman_core::map::direction::Direction;
use pacman_core::systems::components::MovementState;

use common::{
    new_game, park_ghosts, player_movable, player_movement_state, player_position, set_player, start_playing, tick_n,
};

#[test]
fn buffered_turn_commits_at_the_first_open_center() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    // Moving left from the start tile; upward is walled at (13, 23) but open
    // one tile over at (12, 23).
    game.queue_command(GameCommand::MovePlayer(Direction::Up));
    tick_n(&mut game, 1);
    assert_eq!(player_movable(&mut game).requested, Some(Direction::Up));
    assert_eq!(player_movable(&mut game).direction, Direction::Left);

    // Walk until the turn commits: it must happen at the first center whose
    // upward neighbor is open, and not a tile before it.
    let mut committed_at = None;
    for _ in 0..120 {
        tick_n(&mut game, 1);
        if player_movable(&mut game).direction == Direction::Up {
            committed_at = Some(player_position(&mut game).tile());
            break;
        }
    }
    assert_eq!(committed_at, Some(IVec2::new(12, 23)));
    assert_eq!(player_movable(&mut game).requested, None);
}

#[test]
fn reversal_is_instantaneous_mid_tile() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    // Put the player mid-corridor, far from any center.
    set_player(&mut game, IVec2::new(10, 5), Direction::Left);
    tick_n(&mut game, 3);
    let x_before = player_position(&mut game).pixel.x;
    assert!(player_position(&mut game).pixel.distance(tile_center(IVec2::new(10, 5))) > 2.0);

    game.queue_command(GameCommand::MovePlayer(Direction::Right));
    tick_n(&mut game, 1);

    // Direction flipped and motion reversed on the very next tick.
    assert_eq!(player_movable(&mut game).direction, Direction::Right);
    assert!(player_position(&mut game).pixel.x > x_before);
    assert_eq!(player_movable(&mut game).requested, None);
}

#[test]
fn blocked_heading_halts_exactly_at_center() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    set_player(&mut game, IVec2::new(9, 23), Direction::Left);
    tick_n(&mut game, 120);

    assert_eq!(player_movement_state(&mut game), MovementState::Stopped);
    assert_eq!(player_position(&mut game).pixel, tile_center(IVec2::new(6, 23)));
    // Facing is retained while stopped.
    assert_eq!(player_movable(&mut game).direction, Direction::Left);
}

#[test]
fn stopped_player_starts_when_an_open_direction_is_buffered() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    set_player(&mut game, IVec2::new(9, 23), Direction::Left);
    tick_n(&mut game, 120);
    assert_eq!(player_movement_state(&mut game), MovementState::Stopped);

    // Down from (6, 23) is open.
    game.queue_command(GameCommand::MovePlayer(Direction::Down));
    tick_n(&mut game, 2);

    assert_eq!(player_movement_state(&mut game), MovementState::Moving);
    assert_eq!(player_movable(&mut game).direction, Direction::Down);
    assert!(player_position(&mut game).pixel.y > tile_center(IVec2::new(6, 23)).y);
}

#[test]
fn blocked_buffered_direction_stays_buffered() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    set_player(&mut game, IVec2::new(9, 23), Direction::Left);
    // Up is walled along this stretch; the request must neither commit nor
    // be discarded while blocked.
    game.queue_command(GameCommand::MovePlayer(Direction::Up));
    tick_n(&mut game, 10);

    assert_eq!(player_movable(&mut game).direction, Direction::Left);
    assert_eq!(player_movable(&mut game).requested, Some(Direction::Up));
}

#[test]
fn animation_phase_advances_only_while_moving() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    set_player(&mut game, IVec2::new(9, 23), Direction::Left);
    tick_n(&mut game, 5);

    let entity = common::player_entity(&mut game);
    let phase_moving = game
        .world
        .entity(entity)
        .get::<pacman_core::systems::components::AnimationPhase>()
        .unwrap()
        .0;
    assert!(phase_moving > 0.0);

    // Run to the wall and halt; the phase must freeze.
    tick_n(&mut game, 120);
    let phase_halted = game
        .world
        .entity(entity)
        .get::<pacman_core::systems::components::AnimationPhase>()
        .unwrap()
        .0;
    tick_n(&mut game, 10);
    let phase_later = game
        .world
        .entity(entity)
        .get::<pacman_core::systems::components::AnimationPhase>()
        .unwrap()
        .0;
    assert_eq!(phase_halted, phase_later);
}
