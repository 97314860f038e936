//! Retro Bounce - a synthwave ball-bounce arcade game
//!
//! Core modules:
//! - `sim`: Pure simulation (ball, paddle, effects, star field, state machine)
//! - `audio`: Synthesized tone cues and the background arpeggio
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: DOM overlay model (menu, score, game over)
//! - `platform`: Browser input and device detection helpers

pub mod audio;
pub mod highscores;
pub mod hud;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
///
/// Velocities and accelerations are per simulation step.
pub mod consts {
    /// Fixed simulation step (60 Hz)
    pub const SIM_STEP_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame gap the accumulator will absorb (ms)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_GRAVITY: f32 = 0.8;
    pub const BALL_SPAWN_Y: f32 = 50.0;
    /// Horizontal speeds a fresh ball may start with
    pub const SERVE_SPEEDS: [f32; 2] = [-6.0, 6.0];
    /// Horizontal speeds picked on each paddle bounce (before level scaling)
    pub const BOUNCE_SPEEDS: [f32; 4] = [-6.0, -4.0, 4.0, 6.0];
    /// Upward speed after a bounce at level 0
    pub const REBOUND_SPEED: f32 = 35.0;
    /// Extra upward speed per level
    pub const REBOUND_PER_LEVEL: f32 = 1.2;
    /// Horizontal speed multiplier gained per level
    pub const HORIZONTAL_GAIN_PER_LEVEL: f32 = 0.05;
    /// Points per level
    pub const SCORE_PER_LEVEL: u32 = 2;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Paddle top as a fraction of viewport height
    pub const PADDLE_Y_FRACTION: f32 = 0.85;
    pub const PADDLE_WIDTH_TOUCH: f32 = 0.3;
    pub const PADDLE_WIDTH_POINTER: f32 = 0.14;
    pub const PADDLE_CORNER_RADIUS: f32 = 20.0;
    pub const PADDLE_OUTLINE: f32 = 5.0;
    /// Paddle travel per step that triggers the move cue
    pub const PADDLE_MOVE_THRESHOLD: f32 = 2.0;

    /// State machine delays (ms)
    pub const MENU_AUTO_START_MS: f64 = 5000.0;
    pub const RESTART_DELAY_MS: f64 = 5000.0;

    /// Hit effect ring
    pub const EFFECT_START_ALPHA: f32 = 255.0;
    pub const EFFECT_GROWTH: f32 = 4.0;
    pub const EFFECT_FADE: f32 = 15.0;
    pub const EFFECT_STROKE: f32 = 2.0;

    /// Backdrop
    pub const STAR_COUNT: usize = 80;
    pub const STAR_MIN_ALPHA: f32 = 100.0;
    pub const STAR_MAX_ALPHA: f32 = 255.0;
    pub const GRID_SPACING: f32 = 40.0;
    pub const GRID_ALPHA: f32 = 40.0;
    pub const SUN_BASE_SIZE: f32 = 280.0;
    pub const SUN_PULSE_LIMIT: f32 = 10.0;
    pub const SUN_PULSE_STEP: f32 = 0.1;
    /// Sun center height above the horizon, as a fraction of viewport height
    pub const SUN_LIFT_FRACTION: f32 = 0.12;

    /// Background arpeggio
    pub const MUSIC_STEP_MS: f64 = 300.0;
    pub const MUSIC_NOTES: [f32; 5] = [220.0, 330.0, 440.0, 550.0, 660.0];
    pub const MUSIC_AMPLITUDE: f32 = 0.05;
}
