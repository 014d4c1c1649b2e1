//! Read-only, tick-consistent views of the simulation for the presentation
//! layer.
//!
//! A snapshot is taken after a tick's collision resolution has completed, so
//! everything in it describes one coherent instant. The presentation layer
//! draws from it and never touches the world directly.

use bevy_ecs::query::{With, Without};
use bevy_ecs::world::World;
use glam::{IVec2, Vec2};
use smallvec::SmallVec;

use crate::constants::BOARD_CELL_SIZE;
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::map::parser::MapTile;
use crate::systems::components::{
    AnimationPhase, FrightState, Ghost, GhostMode, Level, Movable, MovementState, PlayerControlled, PlayerLives,
    Position, ScoreResource,
};
use crate::systems::stage::GameStage;

#[derive(Debug, Clone, Copy)]
pub struct PlayerSnapshot {
    pub pixel: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    pub moving: bool,
    /// False while the capture animation plays out (and after game over).
    pub alive: bool,
    /// Chomp-cycle phase, advanced by distance travelled.
    pub animation: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct GhostSnapshot {
    pub identity: Ghost,
    pub pixel: Vec2,
    pub tile: IVec2,
    pub direction: Direction,
    pub mode: GhostMode,
    /// Whether a frightened ghost is in the white flash phase of the
    /// end-of-period warning.
    pub flashing: bool,
}

/// Everything the presentation layer needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub stage: GameStage,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub pellets_remaining: u32,
    pub player: PlayerSnapshot,
    pub ghosts: SmallVec<[GhostSnapshot; 4]>,
    /// Current grid cell kinds, indexed `[x][y]`.
    pub cells: [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize],
}

/// Builds a snapshot from the world's current state.
pub fn capture(world: &mut World) -> FrameSnapshot {
    let fright = *world.resource::<FrightState>();
    let flashing = fright.flashing();
    let stage = *world.resource::<GameStage>();

    let mut players = world.query_filtered::<(&Position, &Movable, &MovementState, &AnimationPhase), (With<PlayerControlled>, Without<Ghost>)>();
    let (position, movable, state, animation) = players
        .single(world)
        .expect("simulation world always contains one player");
    let player = PlayerSnapshot {
        pixel: position.pixel,
        tile: position.tile(),
        direction: movable.direction,
        moving: *state == MovementState::Moving,
        alive: !matches!(stage, GameStage::Dying { .. } | GameStage::GameOver),
        animation: animation.0,
    };

    let mut ghost_query = world.query_filtered::<(&Ghost, &Position, &Movable, &GhostMode), Without<PlayerControlled>>();
    let mut ghosts: SmallVec<[GhostSnapshot; 4]> = ghost_query
        .iter(world)
        .map(|(identity, position, movable, mode)| GhostSnapshot {
            identity: *identity,
            pixel: position.pixel,
            tile: position.tile(),
            direction: movable.direction,
            mode: *mode,
            flashing: *mode == GhostMode::Frightened && flashing,
        })
        .collect();
    ghosts.sort_by_key(|snapshot| snapshot.identity as u8);

    FrameSnapshot {
        stage,
        score: world.resource::<ScoreResource>().0,
        lives: world.resource::<PlayerLives>().0,
        level: world.resource::<Level>().0,
        pellets_remaining: world.resource::<Map>().pellets_remaining,
        player,
        ghosts,
        cells: world.resource::<Map>().cells(),
    }
}
