//! Collision detection
//!
//! Axis-aligned checks only: the ball against the side walls and the top of the paddle.

use super::state::{Ball, Paddle};

/// Keep the ball between the side walls, reflecting horizontal velocity.
///
/// Returns true if a wall was hit.
pub fn bounce_off_walls(ball: &mut Ball, viewport_width: f32) -> bool {
    if ball.left() < 0.0 {
        ball.pos.x = ball.radius;
        ball.vel.x = -ball.vel.x;
        true
    } else if ball.right() > viewport_width {
        ball.pos.x = viewport_width - ball.radius;
        ball.vel.x = -ball.vel.x;
        true
    } else {
        false
    }
}

/// Check if the falling ball is on (or past) the paddle's top surface.
///
/// There is no lower bound on the depth: a fast ball that passed the paddle top
/// within one step still counts as long as it overlaps horizontally and falls.
pub fn paddle_contact(ball: &Ball, paddle: &Paddle) -> bool {
    let within_x = ball.right() > paddle.x && ball.left() < paddle.right();
    within_x && ball.bottom() >= paddle.top() && ball.vel.y > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::BALL_RADIUS;
    use crate::sim::state::{DeviceClass, Viewport};
    use glam::Vec2;
    use proptest::prelude::*;

    fn ball_at(x: f32, y: f32, vx: f32, vy: f32) -> Ball {
        Ball {
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            radius: BALL_RADIUS,
            gravity: 0.8,
            bounced_last_frame: false,
        }
    }

    fn paddle() -> Paddle {
        // 800x600 pointer paddle: x=344, y=510, w=112
        Paddle::new(Viewport::new(800.0, 600.0), DeviceClass::Pointer)
    }

    #[test]
    fn test_left_wall() {
        let mut ball = ball_at(5.0, 100.0, -6.0, 0.0);
        assert!(bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.pos.x, BALL_RADIUS);
        assert_eq!(ball.vel.x, 6.0);
    }

    #[test]
    fn test_right_wall() {
        let mut ball = ball_at(795.0, 100.0, 4.0, 0.0);
        assert!(bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.pos.x, 800.0 - BALL_RADIUS);
        assert_eq!(ball.vel.x, -4.0);
    }

    #[test]
    fn test_no_wall() {
        let mut ball = ball_at(400.0, 100.0, 4.0, 0.0);
        assert!(!bounce_off_walls(&mut ball, 800.0));
        assert_eq!(ball.vel.x, 4.0);
    }

    #[test]
    fn test_paddle_contact_on_surface() {
        let p = paddle();
        let ball = ball_at(400.0, p.top() - BALL_RADIUS, 0.0, 5.0);
        assert!(paddle_contact(&ball, &p));
    }

    #[test]
    fn test_paddle_contact_requires_falling() {
        let p = paddle();
        let ball = ball_at(400.0, p.top(), 0.0, -5.0);
        assert!(!paddle_contact(&ball, &p));
    }

    #[test]
    fn test_paddle_contact_requires_overlap() {
        let p = paddle();
        // Just past the right edge
        let ball = ball_at(p.right() + BALL_RADIUS, p.top(), 0.0, 5.0);
        assert!(!paddle_contact(&ball, &p));
        // Grazing the left edge
        let ball = ball_at(p.x - BALL_RADIUS + 0.5, p.top(), 0.0, 5.0);
        assert!(paddle_contact(&ball, &p));
    }

    #[test]
    fn test_paddle_contact_tunnelled_ball_still_hits() {
        let p = paddle();
        let ball = ball_at(400.0, p.top() + 60.0, 0.0, 40.0);
        assert!(paddle_contact(&ball, &p));
    }

    #[test]
    fn test_paddle_contact_above_surface() {
        let p = paddle();
        let ball = ball_at(400.0, p.top() - BALL_RADIUS - 1.0, 0.0, 5.0);
        assert!(!paddle_contact(&ball, &p));
    }

    proptest! {
        #[test]
        fn prop_walls_keep_ball_inside(x in -100.0f32..900.0, vx in -20.0f32..20.0) {
            let mut ball = ball_at(x, 100.0, vx, 0.0);
            let hit = bounce_off_walls(&mut ball, 800.0);
            prop_assert!(ball.left() >= 0.0 - 1e-3);
            prop_assert!(ball.right() <= 800.0 + 1e-3);
            if hit {
                prop_assert_eq!(ball.vel.x, -vx);
            } else {
                prop_assert_eq!(ball.vel.x, vx);
            }
        }
    }
}
