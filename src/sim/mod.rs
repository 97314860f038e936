//! Simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Seeded RNG only
//! - Time comes in as an absolute millisecond clock
//! - No rendering, audio or DOM dependencies

pub mod collision;
pub mod effects;
pub mod starfield;
pub mod state;
pub mod tick;

pub use collision::{bounce_off_walls, paddle_contact};
pub use effects::{HitEffect, advance_effects};
pub use starfield::{Backdrop, Star, StarField, SunPulse};
pub use state::{Ball, DeviceClass, GameEvent, GamePhase, Paddle, Session, Viewport};
pub use tick::{FixedStep, TickInput, autopilot_target, tick};
