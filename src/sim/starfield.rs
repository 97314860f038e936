//! Decorative backdrop state: twinkling stars and the pulsing sun
//!
//! None of this feeds back into gameplay.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Viewport;
use crate::consts::*;

/// Random value in `[low, high)`, or `low` when the range is empty
fn range(rng: &mut Pcg32, low: f32, high: f32) -> f32 {
    if high > low {
        rng.random_range(low..high)
    } else {
        low
    }
}

/// A single twinkling star
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Diameter in pixels
    pub size: f32,
    /// Fraction of full brightness gained or lost per step
    pub twinkle: f32,
    /// 0-255
    pub alpha: f32,
    /// +1 brightening, -1 dimming
    pub direction: f32,
}

impl Star {
    /// Random star in the upper half of the viewport
    pub fn random(viewport: Viewport, rng: &mut Pcg32) -> Self {
        Self {
            pos: Vec2::new(
                range(rng, 0.0, viewport.width),
                range(rng, 0.0, viewport.height / 2.0),
            ),
            size: range(rng, 1.0, 3.0),
            twinkle: range(rng, 0.005, 0.015),
            alpha: range(rng, STAR_MIN_ALPHA, STAR_MAX_ALPHA),
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
        }
    }

    /// Step brightness, turning around once it leaves the band
    pub fn update(&mut self) {
        self.alpha += self.direction * self.twinkle * 255.0;
        if self.alpha > STAR_MAX_ALPHA || self.alpha < STAR_MIN_ALPHA {
            self.direction = -self.direction;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StarField {
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn new(viewport: Viewport, count: usize, rng: &mut Pcg32) -> Self {
        Self {
            stars: (0..count).map(|_| Star::random(viewport, rng)).collect(),
        }
    }

    pub fn update(&mut self) {
        for star in &mut self.stars {
            star.update();
        }
    }
}

/// Ping-pong value driving the sun's size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunPulse {
    pub value: f32,
    pub direction: f32,
}

impl Default for SunPulse {
    fn default() -> Self {
        Self {
            value: 0.0,
            direction: 1.0,
        }
    }
}

impl SunPulse {
    pub fn update(&mut self) {
        self.value += SUN_PULSE_STEP * self.direction;
        if self.value > SUN_PULSE_LIMIT || self.value < -SUN_PULSE_LIMIT {
            self.direction = -self.direction;
        }
    }

    /// Diameter of the middle glow layer
    pub fn size(&self) -> f32 {
        SUN_BASE_SIZE + self.value * 2.0
    }
}

/// Everything drawn behind the gameplay layer
#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    pub stars: StarField,
    pub sun: SunPulse,
}

impl Backdrop {
    pub fn new(viewport: Viewport, rng: &mut Pcg32) -> Self {
        Self {
            stars: StarField::new(viewport, STAR_COUNT, rng),
            sun: SunPulse::default(),
        }
    }

    pub fn update(&mut self) {
        self.stars.update();
        self.sun.update();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_stars_in_upper_half() {
        let mut rng = Pcg32::seed_from_u64(42);
        let vp = Viewport::new(640.0, 480.0);
        let field = StarField::new(vp, STAR_COUNT, &mut rng);
        assert_eq!(field.stars.len(), STAR_COUNT);
        for star in &field.stars {
            assert!(star.pos.x >= 0.0 && star.pos.x < 640.0);
            assert!(star.pos.y >= 0.0 && star.pos.y < 240.0);
            assert!((1.0..3.0).contains(&star.size));
            assert!((STAR_MIN_ALPHA..STAR_MAX_ALPHA).contains(&star.alpha));
        }
    }

    #[test]
    fn test_empty_viewport_does_not_panic() {
        let mut rng = Pcg32::seed_from_u64(1);
        let field = StarField::new(Viewport::new(0.0, 0.0), 3, &mut rng);
        assert!(field.stars.iter().all(|s| s.pos == Vec2::ZERO));
    }

    #[test]
    fn test_star_turns_around_at_bounds() {
        let mut star = Star {
            pos: Vec2::ZERO,
            size: 2.0,
            twinkle: 0.01,
            alpha: 254.0,
            direction: 1.0,
        };
        star.update();
        assert!(star.alpha > STAR_MAX_ALPHA);
        assert_eq!(star.direction, -1.0);
        star.update();
        assert!(star.alpha < STAR_MAX_ALPHA);

        star.alpha = 101.0;
        star.update();
        assert_eq!(star.direction, 1.0);
    }

    #[test]
    fn test_stars_are_independent() {
        let mut rng = Pcg32::seed_from_u64(9);
        let mut field = StarField::new(Viewport::new(100.0, 100.0), 2, &mut rng);
        let second_before = field.stars[1];
        field.stars[0].update();
        assert_eq!(field.stars[1], second_before);
    }

    #[test]
    fn test_sun_pulse_stays_bounded() {
        let mut sun = SunPulse::default();
        for _ in 0..1000 {
            sun.update();
            assert!(sun.value.abs() <= SUN_PULSE_LIMIT + SUN_PULSE_STEP * 1.5);
        }
        assert!(sun.size() > SUN_BASE_SIZE - 25.0 && sun.size() < SUN_BASE_SIZE + 25.0);
    }
}
