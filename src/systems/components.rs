//! Components and resources shared across the simulation systems.

use bevy_ecs::{component::Component, resource::Resource};
use glam::{IVec2, Vec2};
use strum_macros::{EnumCount, EnumIter};
use tracing::warn;

use crate::constants::{tile_center, tiles, BOARD_CELL_SIZE, CELL_SIZE};
use crate::error::{GameResult, ScheduleError};
use crate::map::direction::Direction;

/// A tag component for the entity controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// Continuous position in board units, paired with the derived tile.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub pixel: Vec2,
}

impl Position {
    /// Places an agent exactly on a tile center.
    pub fn at_tile(tile: IVec2) -> Self {
        Self {
            pixel: tile_center(tile),
        }
    }

    /// The tile whose center is nearest the continuous position.
    ///
    /// The column wraps modulo the board width (the tunnel); a row outside the
    /// board is a programming error, clamped defensively and logged rather
    /// than allowed to take the session down.
    pub fn tile(&self) -> IVec2 {
        let col = (self.pixel.x / CELL_SIZE as f32).floor() as i32;
        let mut row = (self.pixel.y / CELL_SIZE as f32).floor() as i32;

        if row < 0 || row >= BOARD_CELL_SIZE.y as i32 {
            warn!(row, x = self.pixel.x, y = self.pixel.y, "Derived row out of bounds, clamping");
            row = row.clamp(0, BOARD_CELL_SIZE.y as i32 - 1);
        }

        IVec2::new(col.rem_euclid(BOARD_CELL_SIZE.x as i32), row)
    }

    /// The center of the tile the agent currently occupies.
    pub fn current_center(&self) -> Vec2 {
        tile_center(self.tile())
    }
}

/// Heading and speed of a moving agent.
///
/// `direction` is the agent's facing and is retained while stopped (targeting
/// reads the player's facing even mid-halt). `requested` is the buffered turn,
/// consumed opportunistically at tile centers.
#[derive(Component, Debug, Clone, Copy)]
pub struct Movable {
    pub direction: Direction,
    pub requested: Option<Direction>,
    pub speed: f32,
}

/// Whether the player agent is currently in motion. Ghosts never stop.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementState {
    Moving,
    Stopped,
}

/// Animation phase for the player's chomp cycle, advanced by distance
/// travelled so the mouth speed tracks movement speed.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct AnimationPhase(pub f32);

/// The four ghost identities, in update (and spawn) order.
///
/// Later ghosts read earlier ghosts' freshly-updated state: Inky's flank
/// target is computed from Blinky's position after Blinky has moved.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Ghost {
    Blinky,
    Pinky,
    Inky,
    Clyde,
}

impl Ghost {
    /// The tile this ghost starts on (and returns to after being eaten).
    pub fn start_tile(&self) -> IVec2 {
        match self {
            Ghost::Blinky => tiles::HOUSE_ENTRANCE,
            Ghost::Pinky => IVec2::new(13, 14),
            Ghost::Inky => IVec2::new(11, 14),
            Ghost::Clyde => IVec2::new(15, 14),
        }
    }

    /// The fixed corner targeted while scattering. Deliberately outside the
    /// board so the ghost orbits the nearest reachable loop.
    pub fn scatter_target(&self) -> IVec2 {
        match self {
            Ghost::Blinky => IVec2::new(25, -3),
            Ghost::Pinky => IVec2::new(2, -3),
            Ghost::Inky => IVec2::new(27, 34),
            Ghost::Clyde => IVec2::new(0, 34),
        }
    }

    /// Pellets the shared dot counter must reach before this ghost may leave
    /// the house. Blinky starts outside; Pinky leaves unconditionally.
    pub fn house_dot_limit(&self) -> u32 {
        match self {
            Ghost::Blinky | Ghost::Pinky => 0,
            Ghost::Inky => 30,
            Ghost::Clyde => 60,
        }
    }

    /// Whether this ghost starts inside the house.
    pub fn starts_housed(&self) -> bool {
        !matches!(self, Ghost::Blinky)
    }
}

/// The global alternating mode broadcast to ghosts not otherwise occupied.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalMode {
    Scatter,
    Chase,
}

/// Per-ghost behavior mode. Exactly one is active at a time.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostMode {
    /// Bobbing inside the house, waiting on the dot counter.
    House,
    Scatter,
    Chase,
    /// Vulnerable; reverts to the global mode on timer expiry.
    Frightened,
    /// Racing home as eyes; reverts to House on arrival.
    Eaten,
}

impl From<GlobalMode> for GhostMode {
    fn from(mode: GlobalMode) -> Self {
        match mode {
            GlobalMode::Scatter => GhostMode::Scatter,
            GlobalMode::Chase => GhostMode::Chase,
        }
    }
}

/// House-release bookkeeping for one ghost.
#[derive(Component, Debug, Clone, Copy)]
pub struct HouseState {
    /// Shared-counter threshold for leaving the house. Preset to zero when a
    /// ghost re-enters after being eaten, so it leaves again immediately.
    pub dot_limit: u32,
}

#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ScoreResource(pub u32);

#[derive(Resource, Debug, Clone, Copy)]
pub struct PlayerLives(pub u8);

impl Default for PlayerLives {
    fn default() -> Self {
        Self(3)
    }
}

/// Current 1-based level.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Level(pub u32);

impl Default for Level {
    fn default() -> Self {
        Self(1)
    }
}

/// The shared dot counter gating house releases. Incremented on every pellet
/// eaten, reset at level start and after a life is lost.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DotCounter(pub u32);

/// Frightened-period state: the countdown and the capture combo.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct FrightState {
    /// Ticks until frightened ghosts revert. Zero when inactive.
    pub remaining: u32,
    /// Successive captures this frightened period; each doubles the award.
    pub combo: u32,
}

impl FrightState {
    pub fn active(&self) -> bool {
        self.remaining > 0
    }

    /// Whether frightened ghosts are currently rendered in the white flash
    /// phase of the end-of-period warning.
    pub fn flashing(&self) -> bool {
        use crate::constants::timing::{FLASH_PERIOD, FLASH_TICKS};
        self.remaining > 0 && self.remaining < FLASH_TICKS && (self.remaining / FLASH_PERIOD) % 2 == 0
    }
}

/// Alternation state for the two-tone pellet sound.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct AudioState {
    pub waka_variant: u8,
}

/// One step of the scatter/chase alternation. `None` duration means the mode
/// holds for the rest of the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveEntry {
    pub duration_ticks: Option<u32>,
    pub mode: GlobalMode,
}

/// The level-scoped scatter/chase schedule.
///
/// The timer only advances while no ghost is frightened. The final entry must
/// be unbounded; that is validated when the schedule is built, not mid-round.
#[derive(Resource, Debug, Clone)]
pub struct WaveSchedule {
    entries: Vec<WaveEntry>,
    index: usize,
    timer_ticks: u32,
}

impl WaveSchedule {
    pub fn new(entries: Vec<WaveEntry>) -> GameResult<Self> {
        match entries.last() {
            None => return Err(ScheduleError::Empty.into()),
            Some(last) if last.duration_ticks.is_some() => {
                return Err(ScheduleError::BoundedFinalEntry.into());
            }
            Some(_) => {}
        }
        Ok(Self {
            entries,
            index: 0,
            timer_ticks: 0,
        })
    }

    /// The schedule for a given 1-based level. Waves shorten with level and
    /// disappear entirely at level 5: permanent chase.
    pub fn for_level(level: u32) -> GameResult<Self> {
        use GlobalMode::{Chase, Scatter};

        let seconds = |s: u32| Some(s * 60);
        let entries = match level {
            1 => vec![
                WaveEntry { duration_ticks: seconds(7), mode: Scatter },
                WaveEntry { duration_ticks: seconds(20), mode: Chase },
                WaveEntry { duration_ticks: seconds(7), mode: Scatter },
                WaveEntry { duration_ticks: seconds(20), mode: Chase },
                WaveEntry { duration_ticks: seconds(5), mode: Scatter },
                WaveEntry { duration_ticks: seconds(20), mode: Chase },
                WaveEntry { duration_ticks: seconds(5), mode: Scatter },
                WaveEntry { duration_ticks: None, mode: Chase },
            ],
            2..=4 => vec![
                WaveEntry { duration_ticks: seconds(7), mode: Scatter },
                WaveEntry { duration_ticks: seconds(20), mode: Chase },
                WaveEntry { duration_ticks: seconds(7), mode: Scatter },
                WaveEntry { duration_ticks: seconds(20), mode: Chase },
                WaveEntry { duration_ticks: seconds(5), mode: Scatter },
                WaveEntry { duration_ticks: None, mode: Chase },
            ],
            _ => vec![WaveEntry { duration_ticks: None, mode: Chase }],
        };

        Self::new(entries)
    }

    pub fn current_mode(&self) -> GlobalMode {
        self.entries[self.index].mode
    }

    /// Advances the wave timer by one tick. Returns the new mode when the
    /// current wave just expired.
    pub fn tick(&mut self) -> Option<GlobalMode> {
        let Some(duration) = self.entries[self.index].duration_ticks else {
            return None;
        };

        self.timer_ticks += 1;
        if self.timer_ticks < duration {
            return None;
        }

        self.timer_ticks = 0;
        self.index = (self.index + 1).min(self.entries.len() - 1);
        Some(self.current_mode())
    }

    pub fn restart(&mut self) {
        self.index = 0;
        self.timer_ticks = 0;
    }
}
