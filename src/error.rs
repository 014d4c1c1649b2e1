//! Centralized error types for the simulation core.
//!
//! Load-time problems (malformed board, malformed wave schedule) are fatal and
//! surface through `GameResult`. Runtime anomalies are forwarded as `GameError`
//! ECS events so an interactive session is never torn down over a one-tick
//! glitch.

use bevy_ecs::event::Event;
use glam::IVec2;

/// Main error type for the simulation.
#[derive(thiserror::Error, Debug, Event)]
pub enum GameError {
    #[error("Board parsing error: {0}")]
    Parse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Wave schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for board parsing operations.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("Unknown character in board: {0:?}")]
    UnknownCharacter(char),

    #[error("Board row {row} has {len} cells, expected {expected}")]
    BadRowLength { row: usize, len: usize, expected: usize },

    #[error("House door must have exactly 2 positions, found {0}")]
    InvalidHouseDoorCount(usize),
}

/// Errors related to maze integrity, detected once at load time.
#[derive(thiserror::Error, Debug)]
pub enum MapError {
    #[error("Traversable cell ({}, {}) has no traversable neighbor", .0.x, .0.y)]
    DeadCell(IVec2),
}

/// Errors in the scatter/chase wave schedule data.
#[derive(thiserror::Error, Debug)]
pub enum ScheduleError {
    #[error("Wave schedule is empty")]
    Empty,

    #[error("Wave schedule must end with an unbounded entry")]
    BoundedFinalEntry,
}

/// Result type for simulation operations.
pub type GameResult<T> = Result<T, GameError>;
