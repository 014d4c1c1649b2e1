//! Pellet consumption: scoring, the shared dot counter, and power-pellet
//! frighten broadcasts.

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, trace};

use crate::constants::timing;
use crate::events::AudioEvent;
use crate::map::builder::Map;
use crate::systems::components::{
    AudioState, DotCounter, FrightState, Ghost, GhostMode, Level, Movable, PlayerControlled, Position, ScoreResource,
};
use crate::systems::stage::GameStage;

/// Consumes whatever pellet sits on the player's tile.
///
/// Consumption is a tile-occupancy test, not a distance test: the cell the
/// player's continuous position derives to is the cell that empties.
#[allow(clippy::type_complexity)]
pub fn item_system(
    stage: Res<GameStage>,
    level: Res<Level>,
    mut map: ResMut<Map>,
    mut score: ResMut<ScoreResource>,
    mut dots: ResMut<DotCounter>,
    mut fright: ResMut<FrightState>,
    mut audio_state: ResMut<AudioState>,
    mut audio: EventWriter<AudioEvent>,
    players: Query<&Position, (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(&Ghost, &mut GhostMode, &mut Movable), Without<PlayerControlled>>,
) {
    if !matches!(*stage, GameStage::Playing) {
        return;
    }

    for position in players.iter() {
        let tile = position.tile();
        let Some((points, was_power_pellet)) = map.consume(tile) else {
            continue;
        };

        score.0 += points;
        dots.0 += 1;
        trace!(?tile, points, remaining = map.pellets_remaining, "Pellet consumed");

        if was_power_pellet {
            fright.remaining = timing::frightened_ticks(level.0);
            fright.combo = 0;
            audio.write(AudioEvent::PowerPellet);
            audio.write(AudioEvent::SirenStop);

            let mut frightened_count = 0;
            for (_, mut mode, mut movable) in ghosts.iter_mut() {
                if matches!(*mode, GhostMode::House | GhostMode::Eaten) {
                    continue;
                }
                *mode = GhostMode::Frightened;
                movable.direction = movable.direction.opposite();
                frightened_count += 1;
            }
            debug!(
                duration_ticks = fright.remaining,
                frightened_count, "Power pellet consumed, ghosts frightened"
            );
        } else {
            audio.write(AudioEvent::Waka {
                variant: audio_state.waka_variant,
            });
            audio_state.waka_variant = 1 - audio_state.waka_variant;
        }
    }
}
