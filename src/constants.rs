//! This module contains all the constants used in the simulation.

use std::time::Duration;

use glam::{IVec2, UVec2};

/// The duration of one simulation tick (60 Hz).
pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each cell, in board units.
pub const CELL_SIZE: u32 = 16;
/// The size of the game board, in cells.
pub const BOARD_CELL_SIZE: UVec2 = UVec2::new(28, 31);
/// The size of the game board, in board units.
pub const BOARD_PIXEL_SIZE: UVec2 = UVec2::new(BOARD_CELL_SIZE.x * CELL_SIZE, BOARD_CELL_SIZE.y * CELL_SIZE);

/// The row that wraps horizontally.
pub const TUNNEL_ROW: i32 = 14;
/// How far past the board edge a coordinate may travel before it is wrapped
/// to the opposite side.
pub const TUNNEL_WRAP_MARGIN: f32 = 8.0;

/// The raw layout of the game board, as a 2D array of characters.
///
/// `#` wall, `+` ghost house wall, `=` house door, `H` house interior,
/// `T` tunnel, `.` pellet, `o` power pellet, space empty.
pub const RAW_BOARD: [&str; BOARD_CELL_SIZE.y as usize] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "     #.##### ## #####.#     ",
    "     #.##          ##.#     ",
    "     #.## +++==+++ ##.#     ",
    "######.## +HHHHHH+ ##.######",
    "TTTTTT.   +HHHHHH+   .TTTTTT",
    "######.## +HHHHHH+ ##.######",
    "     #.## ++++++++ ##.#     ",
    "     #.##          ##.#     ",
    "     #.## ######## ##.#     ",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

/// Movement speeds, in board units per tick.
pub mod speed {
    /// Player speed for a given 1-based level. Unaffected by frightened state.
    pub fn player(level: u32) -> f32 {
        match level {
            1 => 1.60,
            2..=4 => 1.70,
            _ => 1.80,
        }
    }

    /// Ghost base speed for a given 1-based level.
    pub fn ghost_base(level: u32) -> f32 {
        match level {
            1 => 1.40,
            2..=4 => 1.50,
            _ => 1.60,
        }
    }

    /// Frightened ghosts crawl.
    pub const FRIGHTENED: f32 = 1.00;
    /// Eaten ghosts race home as bare eyes.
    pub const EATEN: f32 = 3.50;
    /// Any ghost on a tunnel tile.
    pub const TUNNEL: f32 = 0.80;

    /// Cruise bonus multiplier once `ELROY_1_DOTS` or fewer pellets remain.
    pub const ELROY_1: f32 = 1.05;
    /// Cruise bonus multiplier once `ELROY_2_DOTS` or fewer pellets remain.
    /// Supersedes the first tier rather than stacking with it.
    pub const ELROY_2: f32 = 1.10;
    pub const ELROY_1_DOTS: u32 = 20;
    pub const ELROY_2_DOTS: u32 = 10;

    /// Vertical bobbing inside the house.
    pub const HOUSE_BOB: f32 = 0.5;
    /// Sliding toward the exit column and rising out of the house.
    pub const HOUSE_EXIT: f32 = 1.0;
}

/// Fixed tick counts for the round controller.
pub mod timing {
    /// "READY!" freeze before play starts.
    pub const READY_TICKS: u32 = 120;
    /// Capture animation freeze after the player is caught.
    pub const DYING_TICKS: u32 = 90;

    /// Frightened duration for a given 1-based level.
    pub fn frightened_ticks(level: u32) -> u32 {
        match level {
            1 => 360,
            2 => 300,
            3 => 240,
            4 => 180,
            _ => 120,
        }
    }

    /// Frightened ghosts flash white during this final stretch.
    pub const FLASH_TICKS: u32 = 120;
    /// Flash alternation period while in the final stretch.
    pub const FLASH_PERIOD: u32 = 10;
}

/// Score values.
pub mod points {
    pub const PELLET: u32 = 10;
    pub const POWER_PELLET: u32 = 50;
    /// First capture in a frightened period; doubles with each combo step.
    pub const GHOST_BASE: u32 = 200;
}

/// Fixed tiles the ghost AI keys off.
pub mod tiles {
    use glam::IVec2;

    /// The player's start tile.
    pub const PLAYER_START: IVec2 = IVec2::new(13, 23);

    /// The tile directly above the house door; eaten ghosts navigate here.
    pub const HOUSE_ENTRANCE: IVec2 = IVec2::new(13, 11);
    /// The column ghosts line up on to leave the house.
    pub const HOUSE_EXIT_COL: i32 = 13;
    /// The row at which a leaving ghost joins the maze proper.
    pub const HOUSE_EXIT_ROW: i32 = 11;
    /// The center row of the house interior, around which housed ghosts bob.
    pub const HOUSE_CENTER_ROW: i32 = 14;

    /// Tiles where Scatter/Chase ghosts may not choose to move upward.
    pub const NO_UP: [IVec2; 4] = [
        IVec2::new(12, 11),
        IVec2::new(15, 11),
        IVec2::new(12, 23),
        IVec2::new(15, 23),
    ];
}

/// Gameplay tuning for the ghost AI.
pub mod ghost {
    /// Tiles the ambush ghost leads the player by.
    pub const AMBUSH_LEAD: i32 = 4;
    /// Tiles the flank ghost's pivot point leads the player by.
    pub const FLANK_LEAD: i32 = 2;
    /// Squared tile distance under which the proximity ghost retreats to its
    /// scatter corner.
    pub const PROXIMITY_RADIUS_SQ: i32 = 64;
}

/// Player/ghost contact is resolved when their continuous positions are
/// closer than this, in board units.
pub const CONTACT_RADIUS: f32 = 10.0;

/// Returns the center of a tile in board units.
pub fn tile_center(tile: IVec2) -> glam::Vec2 {
    glam::Vec2::new(
        tile.x as f32 * CELL_SIZE as f32 + CELL_SIZE as f32 / 2.0,
        tile.y as f32 * CELL_SIZE as f32 + CELL_SIZE as f32 / 2.0,
    )
}
