//! Intake of buffered input commands.

use bevy_ecs::event::EventReader;
use bevy_ecs::query::With;
use bevy_ecs::system::Query;
use tracing::trace;

use crate::events::{GameCommand, GameEvent};
use crate::systems::components::{Movable, PlayerControlled};

/// Applies queued commands to the player agent.
///
/// Runs every tick regardless of round state so a direction buffered during
/// the READY freeze takes effect the instant play starts.
pub fn control_system(mut events: EventReader<GameEvent>, mut players: Query<&mut Movable, With<PlayerControlled>>) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::MovePlayer(direction) => {
                for mut movable in players.iter_mut() {
                    trace!(?direction, "Player direction buffered");
                    movable.requested = Some(*direction);
                }
            }
        }
    }
}
