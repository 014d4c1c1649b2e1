//! Events crossing the engine boundary: input commands in, audio triggers out.

use bevy_ecs::event::Event;

use crate::map::direction::Direction;

/// Commands the embedder may queue into the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// Buffer a requested direction for the player agent. At most the latest
    /// request is held; it is consumed opportunistically at tile centers.
    MovePlayer(Direction),
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Command(GameCommand),
}

impl From<GameCommand> for GameEvent {
    fn from(command: GameCommand) -> Self {
        GameEvent::Command(command)
    }
}

/// Discrete triggers for the (external) audio layer, fired on the tick their
/// condition becomes true. They carry no parameters beyond identity; an absent
/// consumer simply never drains them.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Pellet eaten. The variant alternates 0/1 with each pellet for the
    /// classic two-tone chomp.
    Waka { variant: u8 },
    /// Power pellet eaten.
    PowerPellet,
    /// A frightened ghost was captured.
    GhostEaten,
    /// The player was caught.
    PlayerDeath,
    /// Background siren should start looping.
    SirenStart,
    /// Background siren should stop.
    SirenStop,
}
