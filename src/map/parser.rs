//! Board parsing functionality for converting raw layouts into structured data.

use glam::IVec2;

use crate::constants::BOARD_CELL_SIZE;
use crate::error::ParseError;

/// An enum representing the different kinds of cells on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapTile {
    /// An open cell with nothing in it.
    Empty,
    /// A maze wall.
    Wall,
    /// A wall belonging to the ghost house.
    HouseWall,
    /// A regular pellet.
    Pellet,
    /// A power pellet.
    PowerPellet,
    /// The inside of the ghost house.
    HouseInterior,
    /// A cell on the wrapping tunnel stretch.
    Tunnel,
    /// The ghost house door, passable only to eyes returning home.
    Door,
}

/// Represents the parsed data from a raw board layout.
#[derive(Debug)]
pub struct ParsedBoard {
    /// The parsed cell layout, indexed `[x][y]`.
    pub tiles: [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize],
    /// The positions of the two house door cells.
    pub house_door: [IVec2; 2],
    /// The number of pellets and power pellets on the board.
    pub pellet_count: u32,
}

/// Parses a single character into a map tile.
pub fn parse_character(c: char) -> Result<MapTile, ParseError> {
    match c {
        '#' => Ok(MapTile::Wall),
        '+' => Ok(MapTile::HouseWall),
        '.' => Ok(MapTile::Pellet),
        'o' => Ok(MapTile::PowerPellet),
        ' ' => Ok(MapTile::Empty),
        'T' => Ok(MapTile::Tunnel),
        'H' => Ok(MapTile::HouseInterior),
        '=' => Ok(MapTile::Door),
        _ => Err(ParseError::UnknownCharacter(c)),
    }
}

/// Parses a raw board layout into structured data.
///
/// # Errors
///
/// Returns an error if a row has the wrong length, the board contains unknown
/// characters, or the house door is not exactly two cells.
pub fn parse_board(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> Result<ParsedBoard, ParseError> {
    let mut tiles = [[MapTile::Empty; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize];
    let mut doors: Vec<IVec2> = Vec::new();
    let mut pellet_count = 0u32;

    for (y, line) in raw_board.iter().enumerate() {
        if line.chars().count() != BOARD_CELL_SIZE.x as usize {
            return Err(ParseError::BadRowLength {
                row: y,
                len: line.chars().count(),
                expected: BOARD_CELL_SIZE.x as usize,
            });
        }

        for (x, character) in line.chars().enumerate() {
            let tile = parse_character(character)?;

            match tile {
                MapTile::Door => doors.push(IVec2::new(x as i32, y as i32)),
                MapTile::Pellet | MapTile::PowerPellet => pellet_count += 1,
                _ => {}
            }

            tiles[x][y] = tile;
        }
    }

    if doors.len() != 2 {
        return Err(ParseError::InvalidHouseDoorCount(doors.len()));
    }

    Ok(ParsedBoard {
        tiles,
        house_door: [doors[0], doors[1]],
        pellet_count,
    })
}
