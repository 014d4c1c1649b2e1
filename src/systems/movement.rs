//! The shared kinematic primitive: sub-tile advance with overshoot carry-over.
//!
//! Agents move in continuous board units but decide at tile centers. Center
//! arrival is detected by a strict ordering comparison of the pre- and
//! post-advance coordinate against the center along the movement axis, never
//! by a closeness threshold. On a crossing the agent snaps to the exact
//! center, and the distance it overshot by is carried over into the (possibly
//! new) direction. This is what keeps cell-to-cell timing consistent at any
//! speed; replacing it with stop-at-center-then-resume logic makes movement
//! look quantized.

use glam::Vec2;

use crate::constants::{tile_center, BOARD_PIXEL_SIZE, TUNNEL_WRAP_MARGIN};
use crate::map::direction::Direction;
use crate::systems::components::Position;

/// Advances a position by `direction * speed`, wrapping through the tunnel.
///
/// Returns `Some(leftover)` when the advance crossed the center of the tile
/// the agent started the tick on: the position has been snapped to that
/// center, and `leftover` is the distance past it still owed. The caller
/// resolves its decision (turn, continue, or halt) and then re-applies the
/// leftover with [`apply_leftover`].
pub fn advance(position: &mut Position, direction: Direction, speed: f32) -> Option<f32> {
    let old = position.pixel;
    let center = tile_center(position.tile());

    position.pixel += direction.as_vec2() * speed;
    wrap_tunnel(&mut position.pixel);
    let new = position.pixel;

    let crossed = match direction {
        Direction::Right => old.x <= center.x && new.x > center.x,
        Direction::Left => old.x >= center.x && new.x < center.x,
        Direction::Down => old.y <= center.y && new.y > center.y,
        Direction::Up => old.y >= center.y && new.y < center.y,
    };

    if crossed {
        let leftover = (new.x - center.x).abs() + (new.y - center.y).abs();
        position.pixel = center;
        Some(leftover)
    } else {
        None
    }
}

/// Re-applies the distance overshot past a center in the agent's settled
/// direction.
pub fn apply_leftover(position: &mut Position, direction: Direction, leftover: f32) {
    position.pixel += direction.as_vec2() * leftover;
    wrap_tunnel(&mut position.pixel);
}

/// Reflects a coordinate that has left the board through the tunnel to the
/// opposite edge, preserving its sub-tile offset.
pub fn wrap_tunnel(pixel: &mut Vec2) {
    let width = BOARD_PIXEL_SIZE.x as f32;
    if pixel.x < -TUNNEL_WRAP_MARGIN {
        pixel.x += width;
    } else if pixel.x > width + TUNNEL_WRAP_MARGIN {
        pixel.x -= width;
    }
}

/// Whether a position sits exactly on the center of its tile.
pub fn at_center(position: &Position) -> bool {
    position.pixel == tile_center(position.tile())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec2;

    #[test]
    fn test_advance_without_crossing() {
        let mut pos = Position::at_tile(IVec2::new(5, 5));
        pos.pixel.x -= 6.0; // 6 units left of center

        let crossed = advance(&mut pos, Direction::Right, 2.0);
        assert_eq!(crossed, None);
        assert_eq!(pos.pixel, Vec2::new(5.0 * 16.0 + 4.0, 5.0 * 16.0 + 8.0));
    }

    #[test]
    fn test_advance_crossing_returns_overshoot() {
        let mut pos = Position::at_tile(IVec2::new(5, 5));
        pos.pixel.x -= 1.0;

        let crossed = advance(&mut pos, Direction::Right, 2.5);
        assert_eq!(crossed, Some(1.5));
        // Snapped exactly to the center.
        assert_eq!(pos.pixel, tile_center(IVec2::new(5, 5)));
    }

    #[test]
    fn test_crossing_is_strict_not_threshold() {
        // Landing exactly on the center does not count as crossing it; only a
        // strictly greater coordinate does.
        let mut pos = Position::at_tile(IVec2::new(5, 5));
        pos.pixel.x -= 2.0;

        assert_eq!(advance(&mut pos, Direction::Right, 2.0), None);
        assert!(at_center(&pos));
    }

    #[test]
    fn test_carry_over_preserves_distance() {
        // Two ticks at speed 1.5 starting 1 unit before the center must land
        // the agent exactly 2 units past it, regardless of the snap.
        let mut pos = Position::at_tile(IVec2::new(5, 5));
        pos.pixel.y -= 1.0;

        let first = advance(&mut pos, Direction::Down, 1.5);
        assert_eq!(first, Some(0.5));
        apply_leftover(&mut pos, Direction::Down, first.unwrap());

        let second = advance(&mut pos, Direction::Down, 1.5);
        assert_eq!(second, None);
        assert_eq!(pos.pixel.y, 5.0 * 16.0 + 8.0 + 2.0);
    }

    #[test]
    fn test_carry_over_turns_corner() {
        let mut pos = Position::at_tile(IVec2::new(5, 5));
        pos.pixel.x -= 1.0;

        let leftover = advance(&mut pos, Direction::Right, 3.0).unwrap();
        apply_leftover(&mut pos, Direction::Up, leftover);

        let center = tile_center(IVec2::new(5, 5));
        assert_eq!(pos.pixel, Vec2::new(center.x, center.y - 2.0));
    }

    #[test]
    fn test_tunnel_wrap_left_preserves_offset() {
        let mut pixel = Vec2::new(-8.5, 232.0);
        wrap_tunnel(&mut pixel);
        assert_eq!(pixel, Vec2::new(448.0 - 8.5, 232.0));
    }

    #[test]
    fn test_tunnel_wrap_right_preserves_offset() {
        let mut pixel = Vec2::new(448.0 + 8.5, 232.0);
        wrap_tunnel(&mut pixel);
        assert_eq!(pixel, Vec2::new(8.5, 232.0));
    }

    #[test]
    fn test_tunnel_wrap_within_margin_is_identity() {
        let mut pixel = Vec2::new(-TUNNEL_WRAP_MARGIN, 232.0);
        wrap_tunnel(&mut pixel);
        assert_eq!(pixel, Vec2::new(-TUNNEL_WRAP_MARGIN, 232.0));

        let mut pixel = Vec2::new(3.0, 232.0);
        wrap_tunnel(&mut pixel);
        assert_eq!(pixel, Vec2::new(3.0, 232.0));
    }

    #[test]
    fn test_wrap_keeps_direction_and_speed_consistent() {
        // An agent driven left through the wrap advances the same total
        // distance per tick as one in open corridor.
        let mut pos = Position {
            pixel: Vec2::new(2.0, 14.0 * 16.0 + 8.0),
        };
        let speeds = [1.6f32; 10];
        let mut travelled = 0.0;
        for speed in speeds {
            if let Some(leftover) = advance(&mut pos, Direction::Left, speed) {
                apply_leftover(&mut pos, Direction::Left, leftover);
            }
            travelled += speed;
        }
        // 2.0 - 16.0 = -14.0, which wraps to 434.0.
        assert!((pos.pixel.x - (448.0 + 2.0 - travelled)).abs() < 1e-4);
    }
}
