//! Pac-Man simulation core.
//!
//! A deterministic, fixed-timestep implementation of the arcade maze-chase
//! rules: sub-pixel movement synchronized to the tile grid, the four-ghost
//! behavior state machine with its historical targeting quirks, and the round
//! controller. Rendering, audio playback and input polling live outside this
//! crate; the engine exposes per-tick snapshots and fires named audio events.

pub mod constants;
pub mod error;
pub mod events;
pub mod game;
pub mod map;
pub mod rng;
pub mod snapshot;
pub mod systems;
