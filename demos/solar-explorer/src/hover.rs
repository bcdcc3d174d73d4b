/// Hover slow-motion: while the pointer rests on a planet the whole system
/// slows down so the planet is easy to click.

use helio_engine::SimClock;

pub const HOVER_SPEED_FACTOR: f32 = 0.1;
pub const NORMAL_SPEED_FACTOR: f32 = 1.0;

/// Tracks the hovered body and drives the clock's speed factor.
///
/// Last writer wins: entering a new body while another is hovered simply
/// retargets; there is no hover stack.
#[derive(Debug, Clone)]
pub struct HoverModulator {
    hovered: Option<usize>,
    slow_factor: f32,
    normal_factor: f32,
}

impl HoverModulator {
    pub fn new(slow_factor: f32, normal_factor: f32) -> Self {
        Self {
            hovered: None,
            slow_factor,
            normal_factor,
        }
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Pointer entered `body`.
    pub fn enter(&mut self, body: usize, clock: &mut SimClock) {
        self.hovered = Some(body);
        clock.set_speed_factor(self.slow_factor);
    }

    /// Pointer left whatever it was hovering.
    pub fn exit(&mut self, clock: &mut SimClock) {
        if self.hovered.take().is_some() {
            clock.set_speed_factor(self.normal_factor);
        }
    }

    /// Feed the latest hit-test result; emits enter/exit on transitions.
    /// Returns true when the hovered body changed.
    pub fn observe(&mut self, hit: Option<usize>, clock: &mut SimClock) -> bool {
        if hit == self.hovered {
            return false;
        }
        match hit {
            Some(body) => self.enter(body, clock),
            None => self.exit(clock),
        }
        true
    }
}

impl Default for HoverModulator {
    fn default() -> Self {
        Self::new(HOVER_SPEED_FACTOR, NORMAL_SPEED_FACTOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_then_exit_restores_normal_speed() {
        let mut clock = SimClock::new();
        let mut hover = HoverModulator::default();
        hover.enter(2, &mut clock);
        assert_eq!(clock.speed_factor(), HOVER_SPEED_FACTOR);
        hover.exit(&mut clock);
        assert_eq!(clock.speed_factor(), 1.0);
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn moving_between_bodies_keeps_slow_motion() {
        let mut clock = SimClock::new();
        let mut hover = HoverModulator::default();
        assert!(hover.observe(Some(1), &mut clock));
        assert!(hover.observe(Some(4), &mut clock));
        assert_eq!(hover.hovered(), Some(4));
        assert_eq!(clock.speed_factor(), HOVER_SPEED_FACTOR);
        assert!(!hover.observe(Some(4), &mut clock));
        assert!(hover.observe(None, &mut clock));
        assert_eq!(clock.speed_factor(), NORMAL_SPEED_FACTOR);
    }

    #[test]
    fn exit_without_hover_leaves_factor_alone() {
        let mut clock = SimClock::new();
        clock.set_speed_factor(0.5);
        let mut hover = HoverModulator::default();
        hover.exit(&mut clock);
        assert_eq!(clock.speed_factor(), 0.5);
    }

    #[test]
    fn slowed_clock_advances_a_tenth() {
        let mut clock = SimClock::new();
        let mut hover = HoverModulator::default();
        hover.enter(0, &mut clock);
        clock.advance(1.0);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }
}
