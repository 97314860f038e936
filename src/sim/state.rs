//! Game state and core simulation types
//!
//! The whole session is one owned value: the frame driver holds a `Session`
//! and mutates it through `tick`, `activate` and `resize`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::HitEffect;
use super::starfield::Backdrop;
use crate::consts::*;
use crate::highscores::HighScore;

/// Drawable area in CSS pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Input device class, decided once per session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    /// Phones and tablets - gets a wider paddle
    Touch,
    /// Mouse/trackpad
    #[default]
    Pointer,
}

impl DeviceClass {
    /// Paddle width as a fraction of the viewport width
    pub fn paddle_width_fraction(&self) -> f32 {
        match self {
            DeviceClass::Touch => PADDLE_WIDTH_TOUCH,
            DeviceClass::Pointer => PADDLE_WIDTH_POINTER,
        }
    }
}

/// Pick one value uniformly from a fixed set
fn pick(rng: &mut Pcg32, choices: &[f32]) -> f32 {
    choices[rng.random_range(0..choices.len())]
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub gravity: f32,
    /// Set while the ball is resting on the paddle so a contact scores once
    pub bounced_last_frame: bool,
}

impl Ball {
    /// Fresh ball at the top center with a random sideways drift
    pub fn serve(viewport: Viewport, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(viewport.width / 2.0, BALL_SPAWN_Y),
            vel: Vec2::new(pick(rng, &SERVE_SPEEDS), 0.0),
            radius: BALL_RADIUS,
            gravity: BALL_GRAVITY,
            bounced_last_frame: false,
        }
    }

    /// Apply gravity, then move by velocity
    pub fn integrate(&mut self) {
        self.vel.y += self.gravity;
        self.pos += self.vel;
    }

    pub fn top(&self) -> f32 {
        self.pos.y - self.radius
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }

    pub fn left(&self) -> f32 {
        self.pos.x - self.radius
    }

    pub fn right(&self) -> f32 {
        self.pos.x + self.radius
    }

    /// Rest the ball on `surface_y` and launch it back up.
    ///
    /// Returns true when this is the first step of the contact (a scoring bounce).
    pub fn rebound(&mut self, surface_y: f32, level: u32, rng: &mut Pcg32) -> bool {
        let level = level as f32;
        self.pos.y = surface_y - self.radius;
        self.vel.y = -REBOUND_SPEED - level * REBOUND_PER_LEVEL;
        self.vel.x = pick(rng, &BOUNCE_SPEEDS) * (1.0 + level * HORIZONTAL_GAIN_PER_LEVEL);

        let first_contact = !self.bounced_last_frame;
        self.bounced_last_frame = true;
        first_contact
    }

    /// Contact ended (or never happened) this step
    pub fn clear_contact(&mut self) {
        self.bounced_last_frame = false;
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Left edge on the previous step
    pub last_x: f32,
}

impl Paddle {
    pub fn new(viewport: Viewport, device: DeviceClass) -> Self {
        let width = viewport.width * device.paddle_width_fraction();
        let x = viewport.width / 2.0 - width / 2.0;
        Self {
            x,
            y: viewport.height * PADDLE_Y_FRACTION,
            width,
            height: PADDLE_HEIGHT,
            last_x: x,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Center the paddle under the pointer, kept inside the viewport.
    ///
    /// Returns true when the paddle moved far enough to cue the move sound.
    pub fn track(&mut self, pointer_x: f32, viewport_width: f32) -> bool {
        let max_x = (viewport_width - self.width).max(0.0);
        let target = pointer_x - self.width / 2.0;
        // NaN pointer coordinates pin to the left edge
        let new_x = if target.is_nan() { 0.0 } else { target.clamp(0.0, max_x) };
        let moved = (new_x - self.x).abs() > PADDLE_MOVE_THRESHOLD;
        self.last_x = self.x;
        self.x = new_x;
        moved
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GamePhase {
    /// Title overlay; starts on its own at `auto_start_at` (ms)
    StartMenu { auto_start_at: f64 },
    /// Active gameplay
    Playing,
    /// Final score overlay; returns to the menu at `restart_at` (ms)
    GameOver { restart_at: f64 },
}

/// Things that happened during a step or an activation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A fresh round began
    GameStarted,
    /// Scoring bounce on the paddle
    Bounce { at: Vec2, score: u32 },
    /// Paddle moved past the cue threshold
    PaddleMoved,
    /// Ball left the screen
    GameOver {
        score: u32,
        high_score: u32,
        new_record: bool,
    },
    /// Back on the title overlay
    ReturnedToMenu,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct Session {
    pub viewport: Viewport,
    pub device: DeviceClass,
    pub phase: GamePhase,
    pub ball: Ball,
    pub paddle: Paddle,
    pub score: u32,
    pub high_score: HighScore,
    /// Live hit rings, oldest first
    pub effects: Vec<HitEffect>,
    pub backdrop: Backdrop,
    pub(crate) rng: Pcg32,
}

impl Session {
    /// New session on the start menu, auto-starting `MENU_AUTO_START_MS` after `now`
    pub fn new(viewport: Viewport, device: DeviceClass, seed: u64, now: f64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let backdrop = Backdrop::new(viewport, &mut rng);
        let ball = Ball::serve(viewport, &mut rng);
        Self {
            viewport,
            device,
            phase: GamePhase::StartMenu {
                auto_start_at: now + MENU_AUTO_START_MS,
            },
            ball,
            paddle: Paddle::new(viewport, device),
            score: 0,
            high_score: HighScore::new(),
            effects: Vec::new(),
            backdrop,
            rng,
        }
    }

    /// Difficulty level derived from the score
    pub fn level(&self) -> u32 {
        self.score / SCORE_PER_LEVEL
    }

    /// Fresh ball and paddle, score zeroed, effects cleared
    pub fn reset_round(&mut self) {
        self.ball = Ball::serve(self.viewport, &mut self.rng);
        self.paddle = Paddle::new(self.viewport, self.device);
        self.score = 0;
        self.effects.clear();
    }

    /// Enter `Playing` with a fresh round
    pub fn start_game(&mut self) -> GameEvent {
        self.reset_round();
        self.phase = GamePhase::Playing;
        log::info!("Game started");
        GameEvent::GameStarted
    }

    /// Enter `StartMenu`, re-arming the auto-start deadline
    pub fn return_to_menu(&mut self, now: f64) -> GameEvent {
        self.phase = GamePhase::StartMenu {
            auto_start_at: now + MENU_AUTO_START_MS,
        };
        log::info!("Returned to menu");
        GameEvent::ReturnedToMenu
    }

    /// Enter `GameOver`, recording the high score and arming the restart deadline
    pub fn finish_round(&mut self, now: f64) -> GameEvent {
        let new_record = self.high_score.record(self.score);
        self.phase = GamePhase::GameOver {
            restart_at: now + RESTART_DELAY_MS,
        };
        log::info!(
            "Game over: score {} (best {}{})",
            self.score,
            self.high_score.best(),
            if new_record { ", new record" } else { "" }
        );
        GameEvent::GameOver {
            score: self.score,
            high_score: self.high_score.best(),
            new_record,
        }
    }

    /// Pointer-down / touch-start
    pub fn activate(&mut self, now: f64) -> Vec<GameEvent> {
        match self.phase {
            GamePhase::StartMenu { .. } => vec![self.start_game()],
            GamePhase::GameOver { .. } => vec![self.return_to_menu(now)],
            GamePhase::Playing => Vec::new(),
        }
    }

    /// Viewport changed: rebuild the star field and reset the round.
    ///
    /// The menu keeps its deadline; any other phase restarts play.
    pub fn resize(&mut self, viewport: Viewport) {
        log::info!("Resized to {}x{}", viewport.width, viewport.height);
        self.viewport = viewport;
        self.backdrop = Backdrop::new(viewport, &mut self.rng);
        match self.phase {
            GamePhase::StartMenu { .. } => self.reset_round(),
            GamePhase::Playing | GamePhase::GameOver { .. } => {
                self.start_game();
            }
        }
    }
}
