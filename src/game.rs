//! The `Game` struct is the embedder's entry point: it owns the ECS world and
//! the fixed system schedule, and advances the simulation one tick at a time.

use bevy_ecs::bundle::Bundle;
use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::{schedule::Schedule, world::World};
use strum::IntoEnumIterator;

use crate::constants::{tiles, timing, RAW_BOARD};
use crate::error::{GameError, GameResult};
use crate::events::{AudioEvent, GameCommand, GameEvent};
use crate::map::builder::Map;
use crate::map::direction::Direction;
use crate::rng::GameRng;
use crate::snapshot::{self, FrameSnapshot};
use crate::systems::components::{
    AnimationPhase, AudioState, DotCounter, FrightState, Ghost, GhostMode, HouseState, Level, Movable, MovementState,
    PlayerControlled, PlayerLives, Position, ScoreResource, WaveSchedule,
};
use crate::systems::stage::GameStage;
use crate::systems::{collision, control, ghost, item, player, stage};

/// Startup parameters for a simulation run.
#[derive(Debug, Clone, Copy)]
pub struct GameConfig {
    /// Seed for the frightened-direction generator. Runs with equal seeds and
    /// equal input are identical.
    pub seed: u64,
    pub lives: u8,
    /// 1-based starting level.
    pub level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            lives: 3,
            level: 1,
        }
    }
}

#[derive(Bundle)]
struct PlayerBundle {
    player: PlayerControlled,
    position: Position,
    movable: Movable,
    movement_state: MovementState,
    animation: AnimationPhase,
}

#[derive(Bundle)]
struct GhostBundle {
    identity: Ghost,
    position: Position,
    movable: Movable,
    mode: GhostMode,
    house: HouseState,
}

/// The simulation: one ECS world plus the fixed tick schedule.
pub struct Game {
    pub world: World,
    schedule: Schedule,
}

impl Game {
    /// Builds a fresh simulation: board parsed and validated, wave schedule
    /// derived for the starting level, agents posed on their start tiles, and
    /// the round frozen in `Ready`.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let mut world = World::new();

        EventRegistry::register_event::<GameEvent>(&mut world);
        EventRegistry::register_event::<AudioEvent>(&mut world);
        EventRegistry::register_event::<GameError>(&mut world);

        let map = Map::parse(RAW_BOARD)?;
        let wave_schedule = WaveSchedule::for_level(config.level)?;

        world.insert_resource(wave_schedule.current_mode());
        world.insert_resource(wave_schedule);
        world.insert_resource(map);
        world.insert_resource(Level(config.level));
        world.insert_resource(PlayerLives(config.lives));
        world.insert_resource(ScoreResource::default());
        world.insert_resource(DotCounter::default());
        world.insert_resource(FrightState::default());
        world.insert_resource(AudioState::default());
        world.insert_resource(GameRng::seeded(config.seed));
        world.insert_resource(GameStage::Ready {
            remaining_ticks: timing::READY_TICKS,
        });

        world.spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position::at_tile(tiles::PLAYER_START),
            movable: Movable {
                direction: Direction::Left,
                requested: None,
                speed: 0.0,
            },
            movement_state: MovementState::Moving,
            animation: AnimationPhase::default(),
        });

        for identity in Ghost::iter() {
            world.spawn(GhostBundle {
                identity,
                position: Position::at_tile(identity.start_tile()),
                movable: Movable {
                    direction: if identity.starts_housed() {
                        Direction::Up
                    } else {
                        Direction::Left
                    },
                    requested: None,
                    speed: 0.0,
                },
                mode: if identity.starts_housed() {
                    GhostMode::House
                } else {
                    GhostMode::Scatter
                },
                house: HouseState {
                    dot_limit: identity.house_dot_limit(),
                },
            });
        }

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                control::control_system,
                stage::stage_system,
                player::player_system,
                ghost::ghost_system,
                item::item_system,
                collision::collision_system,
                stage::level_system,
            )
                .chain(),
        );

        Ok(Game { world, schedule })
    }

    /// Queues a command for the next tick.
    pub fn queue_command(&mut self, command: GameCommand) {
        self.world.send_event(GameEvent::from(command));
    }

    /// Advances the simulation by exactly one fixed time slice.
    pub fn tick(&mut self) {
        // Double-buffered event maintenance; no automatic event systems run
        // in this bare-world setup.
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();
        self.world.resource_mut::<Events<GameError>>().update();

        self.schedule.run(&mut self.world);
    }

    /// A tick-consistent view for the presentation layer, valid until the
    /// next call to [`Game::tick`].
    pub fn snapshot(&mut self) -> FrameSnapshot {
        snapshot::capture(&mut self.world)
    }

    /// Removes and returns the audio triggers fired since the last drain.
    /// Skipping this entirely is fine; stale events age out on their own.
    pub fn drain_audio(&mut self) -> Vec<AudioEvent> {
        self.world.resource_mut::<Events<AudioEvent>>().drain().collect()
    }

    /// Removes and returns runtime anomalies reported since the last drain.
    pub fn drain_errors(&mut self) -> Vec<GameError> {
        self.world.resource_mut::<Events<GameError>>().drain().collect()
    }

    pub fn score(&self) -> u32 {
        self.world.resource::<ScoreResource>().0
    }

    pub fn lives(&self) -> u8 {
        self.world.resource::<PlayerLives>().0
    }

    pub fn level(&self) -> u32 {
        self.world.resource::<Level>().0
    }

    pub fn stage(&self) -> GameStage {
        *self.world.resource::<GameStage>()
    }
}
