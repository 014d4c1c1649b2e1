//! The queryable board: solidity, tunnel and consumable-cell state.

use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use glam::IVec2;
use tracing::debug;

use crate::constants::{points, BOARD_CELL_SIZE, TUNNEL_ROW};
use crate::error::{GameResult, MapError};
use crate::map::direction::DIRECTIONS;
use crate::map::parser::{parse_board, MapTile, ParsedBoard};

bitflags! {
    /// Which kinds of agents may enter a cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct TraversalFlags: u8 {
        const PLAYER = 1 << 0;
        const GHOST = 1 << 1;
        /// Eaten ghosts returning home; the only agents the door admits.
        const EYES = 1 << 2;
    }
}

type TileGrid = [[MapTile; BOARD_CELL_SIZE.y as usize]; BOARD_CELL_SIZE.x as usize];

/// The game board: a fixed tile grid whose pellet cells empty out as the
/// player eats them, restored wholesale on level clear.
#[derive(Debug, Resource)]
pub struct Map {
    tiles: TileGrid,
    /// The grid as parsed, used to restore pellets between levels.
    pristine: TileGrid,
    pub house_door: [IVec2; 2],
    /// Pellets + power pellets on a fresh board.
    pub pellets_total: u32,
    /// Pellets + power pellets still on the board.
    pub pellets_remaining: u32,
}

impl Map {
    /// Parses and validates a raw board layout.
    ///
    /// # Errors
    ///
    /// Returns a parse error for malformed layouts, or a `MapError` if some
    /// traversable cell has no traversable neighbor (which would strand an
    /// agent with zero candidate directions at runtime).
    pub fn parse(raw_board: [&str; BOARD_CELL_SIZE.y as usize]) -> GameResult<Self> {
        let ParsedBoard {
            tiles,
            house_door,
            pellet_count,
        } = parse_board(raw_board)?;

        let map = Self {
            tiles,
            pristine: tiles,
            house_door,
            pellets_total: pellet_count,
            pellets_remaining: pellet_count,
        };
        map.validate()?;

        debug!(pellets = pellet_count, "Board parsed");
        Ok(map)
    }

    /// Checks that no ghost-traversable cell is a candidate-direction dead
    /// end, so the runtime decision logic can never come up empty.
    fn validate(&self) -> GameResult<()> {
        for x in 0..BOARD_CELL_SIZE.x as i32 {
            for y in 0..BOARD_CELL_SIZE.y as i32 {
                let tile = IVec2::new(x, y);
                if self.is_blocked(tile, TraversalFlags::GHOST) {
                    continue;
                }
                let open = DIRECTIONS
                    .iter()
                    .any(|dir| !self.is_blocked(tile + dir.as_ivec2(), TraversalFlags::GHOST | TraversalFlags::EYES));
                if !open {
                    return Err(MapError::DeadCell(tile).into());
                }
            }
        }
        Ok(())
    }

    /// Returns the cell kind at a tile.
    ///
    /// The column index wraps modulo the board width (meaningful only on the
    /// tunnel row; elsewhere the border walls make wrapped columns
    /// unreachable). Rows outside the board are reported as `Empty`, modeling
    /// the open space beside the tunnel mouths.
    pub fn cell(&self, tile: IVec2) -> MapTile {
        if tile.y < 0 || tile.y >= BOARD_CELL_SIZE.y as i32 {
            return MapTile::Empty;
        }
        let x = tile.x.rem_euclid(BOARD_CELL_SIZE.x as i32);
        self.tiles[x as usize][tile.y as usize]
    }

    /// Which agents may enter a cell.
    pub fn allowed(&self, tile: IVec2) -> TraversalFlags {
        match self.cell(tile) {
            MapTile::Wall | MapTile::HouseWall => TraversalFlags::empty(),
            MapTile::Door => TraversalFlags::EYES,
            MapTile::HouseInterior => TraversalFlags::EYES,
            _ => TraversalFlags::all(),
        }
    }

    /// Whether a cell is solid masonry (ordinary or house wall).
    pub fn is_wall(&self, tile: IVec2) -> bool {
        matches!(self.cell(tile), MapTile::Wall | MapTile::HouseWall)
    }

    /// Whether a cell blocks an agent carrying the given traversal flags.
    pub fn is_blocked(&self, tile: IVec2, flags: TraversalFlags) -> bool {
        !self.allowed(tile).intersects(flags)
    }

    /// Whether a cell is on the wrapping tunnel stretch.
    pub fn is_tunnel(&self, tile: IVec2) -> bool {
        self.cell(tile) == MapTile::Tunnel
    }

    /// Whether a row wraps horizontally.
    pub fn is_tunnel_row(&self, row: i32) -> bool {
        row == TUNNEL_ROW
    }

    /// Consumes the pellet at a tile, if any, returning the points awarded and
    /// whether it was a power pellet.
    pub fn consume(&mut self, tile: IVec2) -> Option<(u32, bool)> {
        if tile.y < 0 || tile.y >= BOARD_CELL_SIZE.y as i32 {
            return None;
        }
        let x = tile.x.rem_euclid(BOARD_CELL_SIZE.x as i32) as usize;
        let y = tile.y as usize;

        let result = match self.tiles[x][y] {
            MapTile::Pellet => Some((points::PELLET, false)),
            MapTile::PowerPellet => Some((points::POWER_PELLET, true)),
            _ => None,
        };

        if result.is_some() {
            self.tiles[x][y] = MapTile::Empty;
            self.pellets_remaining -= 1;
        }
        result
    }

    /// Restores every consumed pellet, for the start of a new level.
    pub fn reset_pellets(&mut self) {
        self.tiles = self.pristine;
        self.pellets_remaining = self.pellets_total;
        debug!(pellets = self.pellets_total, "Pellet grid restored");
    }

    /// A copy of the current grid, for the presentation layer.
    pub fn cells(&self) -> TileGrid {
        self.tiles
    }
}
