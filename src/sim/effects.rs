//! Hit effects - expanding rings spawned on scoring bounces

use glam::Vec2;

use crate::consts::{EFFECT_FADE, EFFECT_GROWTH, EFFECT_START_ALPHA};

/// A fading ring anchored at a bounce contact point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitEffect {
    pub center: Vec2,
    pub radius: f32,
    /// 0-255
    pub alpha: f32,
}

impl HitEffect {
    pub fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: 0.0,
            alpha: EFFECT_START_ALPHA,
        }
    }

    /// Grow and fade one step. Returns false once the ring is spent.
    pub fn advance(&mut self) -> bool {
        self.radius += EFFECT_GROWTH;
        self.alpha -= EFFECT_FADE;
        self.alpha > 0.0
    }
}

/// Advance every ring and drop the finished ones, keeping insertion order
pub fn advance_effects(effects: &mut Vec<HitEffect>) {
    effects.retain_mut(HitEffect::advance);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_lifetime() {
        let mut effects = vec![HitEffect::new(Vec2::new(10.0, 20.0))];
        let expected_steps = (EFFECT_START_ALPHA / EFFECT_FADE).ceil() as usize;
        assert_eq!(expected_steps, 17);

        let mut last_radius = 0.0;
        for step in 1..expected_steps {
            advance_effects(&mut effects);
            assert_eq!(effects.len(), 1, "removed early at step {step}");
            assert_eq!(effects[0].radius, last_radius + EFFECT_GROWTH);
            last_radius = effects[0].radius;
        }
        advance_effects(&mut effects);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_removal_does_not_skip_neighbors() {
        let mut old = HitEffect::new(Vec2::ZERO);
        old.alpha = EFFECT_FADE; // expires next step
        let mut effects = vec![
            old,
            HitEffect::new(Vec2::new(1.0, 0.0)),
            old,
            HitEffect::new(Vec2::new(2.0, 0.0)),
        ];
        advance_effects(&mut effects);
        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0].center.x, 1.0);
        assert_eq!(effects[1].center.x, 2.0);
        assert!(effects.iter().all(|e| e.radius == EFFECT_GROWTH));
    }
}
