//! Presentation snapshot contract.

mod common;

use glam::IVec2;
use speculoos::prelude::*;

use pacman_core::constants::timing;
use pacman_core::map::direction::Direction;
use pacman_core::map::parser::MapTile;
use pacman_core::systems::components::{FrightState, Ghost, GhostMode};
use pacman_core::systems::stage::GameStage;

use common::{new_game, park_ghosts, set_ghost, set_player, start_playing, tick_n};

#[test]
fn initial_snapshot_describes_a_fresh_round() {
    let mut game = new_game();
    let snapshot = game.snapshot();

    assert_that!(snapshot.score).is_equal_to(0);
    assert_that!(snapshot.lives).is_equal_to(3);
    assert_that!(snapshot.level).is_equal_to(1);
    assert_that!(snapshot.pellets_remaining).is_equal_to(244);
    assert_that!(matches!(snapshot.stage, GameStage::Ready { .. })).is_true();

    assert_that!(snapshot.player.tile).is_equal_to(IVec2::new(13, 23));
    assert_that!(snapshot.player.alive).is_true();
    assert_that!(snapshot.player.animation).is_equal_to(0.0);

    // Ghosts arrive in identity order regardless of spawn internals.
    let identities: Vec<Ghost> = snapshot.ghosts.iter().map(|g| g.identity).collect();
    assert_that!(identities).is_equal_to(vec![Ghost::Blinky, Ghost::Pinky, Ghost::Inky, Ghost::Clyde]);
    assert_that!(snapshot.ghosts[0].mode).is_equal_to(GhostMode::Scatter);
    assert_that!(snapshot.ghosts[1].mode).is_equal_to(GhostMode::House);
}

#[test]
fn cell_grid_tracks_consumption() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    assert_that!(game.snapshot().cells[12][23]).is_equal_to(MapTile::Pellet);

    // Walk left over (12, 23) and watch the cell empty.
    tick_n(&mut game, 20);
    assert_that!(game.snapshot().cells[12][23]).is_equal_to(MapTile::Empty);
    // Walls are untouched.
    assert_that!(game.snapshot().cells[0][0]).is_equal_to(MapTile::Wall);
}

#[test]
fn frightened_ghosts_flash_only_in_the_warning_window() {
    let mut game = new_game();
    start_playing(&mut game);
    set_ghost(&mut game, Ghost::Blinky, IVec2::new(8, 5), Direction::Right, GhostMode::Frightened);

    game.world.insert_resource(FrightState {
        remaining: timing::FLASH_TICKS + 100,
        combo: 0,
    });
    tick_n(&mut game, 1);
    let snapshot = game.snapshot();
    assert_that!(snapshot.ghosts[0].mode).is_equal_to(GhostMode::Frightened);
    assert_that!(snapshot.ghosts[0].flashing).is_false();

    game.world.insert_resource(FrightState { remaining: 101, combo: 0 });
    tick_n(&mut game, 1);
    // remaining is now 100: inside the window, on the flash phase.
    assert_that!(game.snapshot().ghosts[0].flashing).is_true();
}

#[test]
fn player_reads_dead_during_the_dying_sequence() {
    let mut game = new_game();
    start_playing(&mut game);
    park_ghosts(&mut game);

    set_player(&mut game, IVec2::new(6, 23), Direction::Left);
    set_ghost(&mut game, Ghost::Blinky, IVec2::new(6, 23), Direction::Left, GhostMode::Chase);
    tick_n(&mut game, 1);

    let snapshot = game.snapshot();
    assert_that!(matches!(snapshot.stage, GameStage::Dying { .. })).is_true();
    assert_that!(snapshot.player.alive).is_false();
}
