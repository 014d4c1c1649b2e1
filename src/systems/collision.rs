//! Player/ghost contact resolution.

use bevy_ecs::event::EventWriter;
use bevy_ecs::query::{With, Without};
use bevy_ecs::system::{Query, Res, ResMut};
use tracing::{debug, info};

use crate::constants::{points, timing, CONTACT_RADIUS};
use crate::events::AudioEvent;
use crate::systems::components::{FrightState, Ghost, GhostMode, PlayerControlled, PlayerLives, Position, ScoreResource};
use crate::systems::stage::GameStage;

/// Resolves proximity contacts between the player and each ghost.
///
/// A frightened ghost is eaten, with the award doubling for each successive
/// capture in the same frightened period. A scatter/chase ghost costs a life
/// and freezes the round into the dying sequence. Eaten and housed ghosts
/// pass through harmlessly.
#[allow(clippy::type_complexity)]
pub fn collision_system(
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    mut fright: ResMut<FrightState>,
    mut lives: ResMut<PlayerLives>,
    mut audio: EventWriter<AudioEvent>,
    players: Query<&Position, (With<PlayerControlled>, Without<Ghost>)>,
    mut ghosts: Query<(&Ghost, &Position, &mut GhostMode), Without<PlayerControlled>>,
) {
    if !matches!(*stage, GameStage::Playing) {
        return;
    }

    let Ok(player_position) = players.single() else {
        return;
    };

    for (identity, ghost_position, mut mode) in ghosts.iter_mut() {
        if player_position.pixel.distance(ghost_position.pixel) >= CONTACT_RADIUS {
            continue;
        }

        match *mode {
            GhostMode::Frightened => {
                let award = points::GHOST_BASE << fright.combo;
                *mode = GhostMode::Eaten;
                score.0 += award;
                fright.combo += 1;
                audio.write(AudioEvent::GhostEaten);
                debug!(ghost = ?identity, award, combo = fright.combo, "Ghost captured");
            }
            GhostMode::Eaten | GhostMode::House => {}
            GhostMode::Scatter | GhostMode::Chase => {
                lives.0 = lives.0.saturating_sub(1);
                *stage = GameStage::Dying {
                    remaining_ticks: timing::DYING_TICKS,
                };
                audio.write(AudioEvent::PlayerDeath);
                audio.write(AudioEvent::SirenStop);
                info!(ghost = ?identity, lives = lives.0, "Player caught");
                break;
            }
        }
    }
}
