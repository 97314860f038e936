//! HUD and overlay text
//!
//! Text is drawn by DOM elements layered over the canvas. `HudView` decides
//! what they show; on wasm it writes itself into the page.

use crate::sim::{GamePhase, Session};

pub const MENU_PROMPT: &str = "Tap or Click to Start";
pub const GAME_OVER_TITLE: &str = "Game Over";

/// Which overlay is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Menu,
    Playing,
    GameOver,
}

/// Snapshot of everything the overlays display
#[derive(Debug, Clone, PartialEq)]
pub struct HudView {
    pub overlay: Overlay,
    pub score: u32,
    pub high_score: u32,
    /// None hides the counter
    pub fps: Option<u32>,
}

impl HudView {
    pub fn from_session(session: &Session, fps: Option<u32>) -> Self {
        let overlay = match session.phase {
            GamePhase::StartMenu { .. } => Overlay::Menu,
            GamePhase::Playing => Overlay::Playing,
            GamePhase::GameOver { .. } => Overlay::GameOver,
        };
        Self {
            overlay,
            score: session.score,
            high_score: session.high_score.best(),
            fps,
        }
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_text(&self) -> String {
        format!("High Score: {}", self.high_score)
    }

    /// Write the view into the page's overlay elements (missing ones are skipped)
    #[cfg(target_arch = "wasm32")]
    pub fn apply(&self, document: &web_sys::Document) {
        let show = |id: &str, visible: bool| {
            if let Some(el) = document.get_element_by_id(id) {
                let _ = el.class_list().toggle_with_force("hidden", !visible);
            }
        };
        let text = |id: &str, value: &str| {
            if let Some(el) = document.get_element_by_id(id) {
                if el.text_content().as_deref() != Some(value) {
                    el.set_text_content(Some(value));
                }
            }
        };

        show("menu", self.overlay == Overlay::Menu);
        show("hud", self.overlay == Overlay::Playing);
        show("game-over", self.overlay == Overlay::GameOver);

        match self.overlay {
            Overlay::Menu => text("menu-prompt", MENU_PROMPT),
            Overlay::Playing => {
                text("hud-score", &self.score_text());
                text("hud-high-score", &self.high_score_text());
            }
            Overlay::GameOver => {
                text("game-over-title", GAME_OVER_TITLE);
                text("final-score", &self.score_text());
                text("final-high-score", &self.high_score_text());
            }
        }

        show("hud-fps", self.fps.is_some());
        if let Some(fps) = self.fps {
            text("hud-fps", &format!("{} FPS", fps));
        }
    }
}

/// Rolling frames-per-second over the last 60 frames
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Record a frame timestamp (ms) and return the current estimate
    pub fn record(&mut self, time: f64) -> u32 {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one we will overwrite next
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59_000.0 / elapsed).round() as u32;
            }
        }
        self.fps
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }
}
