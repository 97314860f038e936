//! Scene assembly
//!
//! Turns a `Session` into one triangle list, back to front: stars, grid, sun,
//! then (while playing) ball, paddle and hit rings.

use glam::Vec2;

use super::shapes::{circle, line, ring, rounded_rect};
use super::vertex::{Vertex, colors, white};
use crate::consts::*;
use crate::sim::{Backdrop, GamePhase, Session, SunPulse, Viewport};

const STAR_SEGMENTS: u32 = 8;
const SUN_SEGMENTS: u32 = 64;
const BALL_SEGMENTS: u32 = 32;
const RING_SEGMENTS: u32 = 32;
const CORNER_SEGMENTS: u32 = 6;

/// Build the full frame
pub fn build_scene(session: &Session) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(8192);
    push_backdrop(&mut vertices, session.viewport, &session.backdrop);
    if session.phase == GamePhase::Playing {
        push_gameplay(&mut vertices, session);
    }
    vertices
}

fn push_backdrop(vertices: &mut Vec<Vertex>, viewport: Viewport, backdrop: &Backdrop) {
    for star in &backdrop.stars.stars {
        vertices.extend(circle(star.pos, star.size / 2.0, white(star.alpha), STAR_SEGMENTS));
    }
    push_grid(vertices, viewport);
    push_sun(vertices, viewport, &backdrop.sun);
}

/// Perspective floor: horizontal lines below the horizon plus rays fanning out
/// from it toward the bottom edge
fn push_grid(vertices: &mut Vec<Vertex>, viewport: Viewport) {
    let Viewport { width, height } = viewport;
    let horizon = height / 2.0;
    let color = white(GRID_ALPHA);

    let mut y = horizon;
    while y < height {
        vertices.extend(line(Vec2::new(0.0, y), Vec2::new(width, y), 1.0, color));
        y += GRID_SPACING;
    }

    let mut x = 0.0;
    while x <= width {
        let bottom_x = width / 2.0 + (x - width / 2.0) * 2.0;
        vertices.extend(line(
            Vec2::new(x, horizon),
            Vec2::new(bottom_x, height),
            1.0,
            color,
        ));
        x += GRID_SPACING;
    }
}

/// Three concentric glow layers
fn push_sun(vertices: &mut Vec<Vertex>, viewport: Viewport, sun: &SunPulse) {
    let center = viewport.center() - Vec2::new(0.0, viewport.height * SUN_LIFT_FRACTION);
    let size = sun.size();
    for (scale, color) in [
        (1.5, colors::SUN_OUTER),
        (1.0, colors::SUN_MIDDLE),
        (0.7, colors::SUN_CORE),
    ] {
        vertices.extend(circle(center, size * scale / 2.0, color, SUN_SEGMENTS));
    }
}

fn push_gameplay(vertices: &mut Vec<Vertex>, session: &Session) {
    let ball = &session.ball;
    vertices.extend(circle(ball.pos, ball.radius, colors::BALL, BALL_SEGMENTS));

    // Outline straddles the paddle edge like a centered stroke
    let paddle = &session.paddle;
    let origin = Vec2::new(paddle.x, paddle.y);
    let size = Vec2::new(paddle.width, paddle.height);
    let half_stroke = Vec2::splat(PADDLE_OUTLINE / 2.0);
    vertices.extend(rounded_rect(
        origin - half_stroke,
        size + half_stroke * 2.0,
        PADDLE_CORNER_RADIUS + PADDLE_OUTLINE / 2.0,
        colors::PADDLE_OUTLINE,
        CORNER_SEGMENTS,
    ));
    vertices.extend(rounded_rect(
        origin + half_stroke,
        (size - half_stroke * 2.0).max(Vec2::ZERO),
        PADDLE_CORNER_RADIUS - PADDLE_OUTLINE / 2.0,
        colors::PADDLE,
        CORNER_SEGMENTS,
    ));

    let half_ring = EFFECT_STROKE / 2.0;
    for effect in &session.effects {
        vertices.extend(ring(
            effect.center,
            effect.radius - half_ring,
            effect.radius + half_ring,
            white(effect.alpha),
            RING_SEGMENTS,
        ));
    }
}
