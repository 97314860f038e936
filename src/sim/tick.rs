//! Simulation step
//!
//! Advances the session by one fixed step. The backdrop always animates; the
//! rest depends on the phase.

use glam::Vec2;

use super::collision::{bounce_off_walls, paddle_contact};
use super::effects::{HitEffect, advance_effects};
use super::state::{GameEvent, GamePhase, Session};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS, SIM_STEP_MS};

/// Input sampled for a single step
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Active pointer x (first touch, else mouse) in CSS pixels
    pub pointer_x: f32,
}

/// Advance the session by one step at clock time `now` (ms)
pub fn tick(session: &mut Session, input: &TickInput, now: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();
    session.backdrop.update();

    match session.phase {
        GamePhase::StartMenu { auto_start_at } => {
            if now > auto_start_at {
                events.push(session.start_game());
            }
        }
        GamePhase::Playing => step_playing(session, input, now, &mut events),
        GamePhase::GameOver { restart_at } => {
            if now > restart_at {
                events.push(session.return_to_menu(now));
            }
        }
    }

    events
}

fn step_playing(session: &mut Session, input: &TickInput, now: f64, events: &mut Vec<GameEvent>) {
    let level = session.level();
    let viewport = session.viewport;
    let Session {
        ball,
        paddle,
        score,
        effects,
        rng,
        ..
    } = session;

    ball.integrate();
    bounce_off_walls(ball, viewport.width);

    // Age existing rings first so a new one is drawn once at its starting size
    advance_effects(effects);

    // Paddle is tested at its previous-step position, before it follows the pointer
    if paddle_contact(ball, paddle) {
        if ball.rebound(paddle.top(), level, rng) {
            *score += 1;
            let at = Vec2::new(ball.pos.x, ball.bottom());
            effects.push(HitEffect::new(at));
            log::debug!("Bounce #{} at level {}", score, level);
            events.push(GameEvent::Bounce { at, score: *score });
        }
    } else {
        ball.clear_contact();
    }

    if paddle.track(input.pointer_x, viewport.width) {
        events.push(GameEvent::PaddleMoved);
    }

    if ball.top() > viewport.height {
        events.push(session.finish_round(now));
    }
}

/// Pointer x that keeps the paddle centered under the ball (demo/headless play)
pub fn autopilot_target(session: &Session) -> f32 {
    session.ball.pos.x
}

/// Fixed-timestep accumulator fed with display-frame timestamps (ms)
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f64,
    last_time: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of simulation steps owed at `now`.
    ///
    /// The first frame runs one step. Long gaps are clamped to `MAX_FRAME_MS`
    /// and at most `MAX_SUBSTEPS` are returned; leftover time is dropped.
    pub fn advance(&mut self, now: f64) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_MS),
            None => SIM_STEP_MS,
        };
        self.last_time = Some(now);
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= SIM_STEP_MS && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_STEP_MS;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_STEP_MS);
        }
        steps
    }

    /// Forget accumulated time (after a reset)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
