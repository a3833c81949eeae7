//! PRISM motion scaling for tracked controllers
//!
//! PRISM (Polygonal Resistance Input Scaling Model) maps how far a hand moved
//! since the previous tick to a gain applied to that displacement:
//!
//! | per-tick distance         | gain                         |
//! |---------------------------|------------------------------|
//! | `d < 0.00065`             | 0 (jitter is dropped)        |
//! | `0.00065 <= d < 0.0015`   | lerp 0.75 -> 1.0             |
//! | `0.0015 <= d < 0.003`     | 1.0                          |
//! | `d >= 0.003`              | 1.05                         |
//!
//! The filtered controller drifts away from the real hand while gains differ
//! from 1.0; [`MotionScaler::reset`] snaps it back.

use chisel_math::{lerp, Vec3};

/// A value for each of the two hands
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandPair<T> {
    /// The pointing hand
    pub primary: T,
    /// The hand the pointing ray is aimed through
    pub secondary: T,
}

impl<T> HandPair<T> {
    pub fn new(primary: T, secondary: T) -> Self {
        Self { primary, secondary }
    }

    /// Apply `f` to both values
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> HandPair<U> {
        HandPair {
            primary: f(self.primary),
            secondary: f(self.secondary),
        }
    }
}

/// Per-hand filter memory
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandMotion {
    /// Raw tracked hand position seen on the previous tick
    pub last_hand: Vec3,
    /// Filtered controller position produced on the previous tick
    pub last_controller: Vec3,
}

impl HandMotion {
    /// State with the controller sitting exactly on the hand
    pub fn anchored(hand: Vec3) -> Self {
        Self {
            last_hand: hand,
            last_controller: hand,
        }
    }
}

/// Filter memory for both hands
pub type MotionState = HandPair<HandMotion>;

impl HandPair<HandMotion> {
    /// Both controllers anchored to their hands
    pub fn anchored(hands: HandPair<Vec3>) -> Self {
        hands.map(HandMotion::anchored)
    }

    /// Filtered controller positions from the last tick
    pub fn controllers(&self) -> HandPair<Vec3> {
        HandPair::new(self.primary.last_controller, self.secondary.last_controller)
    }
}

/// Piecewise distance-to-gain curve
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrismCurve {
    /// Below this per-tick distance motion is dropped entirely
    pub noise_floor: f32,
    /// End of the blend band (gain reaches 1.0 here)
    pub blend_end: f32,
    /// End of the unscaled band
    pub pass_through_end: f32,
    /// Gain at the bottom of the blend band
    pub blend_start_gain: f32,
    /// Gain at and above `pass_through_end`
    pub fast_gain: f32,
}

impl Default for PrismCurve {
    fn default() -> Self {
        Self {
            noise_floor: 0.00065,
            blend_end: 0.0015,
            pass_through_end: 0.003,
            blend_start_gain: 0.75,
            fast_gain: 1.05,
        }
    }
}

impl PrismCurve {
    /// Gain for a per-tick travel distance
    pub fn scale_for(&self, distance: f32) -> f32 {
        if !distance.is_finite() || distance < self.noise_floor {
            0.0
        } else if distance < self.blend_end {
            let t = (distance - self.noise_floor) / (self.blend_end - self.noise_floor);
            lerp(self.blend_start_gain, 1.0, t)
        } else if distance < self.pass_through_end {
            1.0
        } else {
            self.fast_gain
        }
    }

    /// Check the band edges are ordered
    pub fn is_valid(&self) -> bool {
        self.noise_floor >= 0.0
            && self.noise_floor < self.blend_end
            && self.blend_end <= self.pass_through_end
    }
}

/// Applies a [`PrismCurve`] to hand motion
#[derive(Clone, Copy, Debug, Default)]
pub struct MotionScaler {
    pub curve: PrismCurve,
}

impl MotionScaler {
    pub fn new(curve: PrismCurve) -> Self {
        Self { curve }
    }

    /// Advance one hand by one tick and return the new controller position
    ///
    /// Non-finite tracking samples are skipped; the controller holds still.
    pub fn step_hand(&self, motion: &mut HandMotion, hand: Vec3) -> Vec3 {
        if !hand.is_finite() {
            return motion.last_controller;
        }
        let travel = hand - motion.last_hand;
        let scale = self.curve.scale_for(travel.length());
        let controller = motion.last_controller + travel * scale;

        motion.last_controller = controller;
        motion.last_hand = hand;
        controller
    }

    /// Advance both hands by one tick
    pub fn step(&self, state: &mut MotionState, hands: HandPair<Vec3>) -> HandPair<Vec3> {
        HandPair::new(
            self.step_hand(&mut state.primary, hands.primary),
            self.step_hand(&mut state.secondary, hands.secondary),
        )
    }

    /// Snap both controllers onto their hands, discarding accumulated drift
    pub fn reset(&self, state: &mut MotionState, hands: HandPair<Vec3>) -> HandPair<Vec3> {
        *state = MotionState::anchored(hands);
        hands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPS
    }

    #[test]
    fn test_below_noise_floor_suppressed() {
        let curve = PrismCurve::default();
        for d in [0.0, 0.0001, 0.0003, 0.00064] {
            assert_eq!(curve.scale_for(d), 0.0, "distance {}", d);
        }
    }

    #[test]
    fn test_fast_motion_gain() {
        let curve = PrismCurve::default();
        for d in [0.003, 0.004, 0.05, 3.0] {
            assert_eq!(curve.scale_for(d), 1.05, "distance {}", d);
        }
    }

    #[test]
    fn test_blend_band_boundaries() {
        let curve = PrismCurve::default();
        assert_eq!(curve.scale_for(0.00065), 0.75);
        assert_eq!(curve.scale_for(0.0015), 1.0);
        // Midpoint of the band is midway between the gains
        let mid = curve.scale_for((0.00065 + 0.0015) / 2.0);
        assert!((mid - 0.875).abs() < 1e-4);
        // Approaching the top of the band from below is continuous
        assert!((curve.scale_for(0.0014999) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_pass_through_band_is_flat() {
        let curve = PrismCurve::default();
        for d in [0.0015, 0.002, 0.0029] {
            assert_eq!(curve.scale_for(d), 1.0, "distance {}", d);
        }
    }

    #[test]
    fn test_non_finite_distance_suppressed() {
        let curve = PrismCurve::default();
        assert_eq!(curve.scale_for(f32::NAN), 0.0);
        assert_eq!(curve.scale_for(f32::INFINITY), 0.0);
    }

    #[test]
    fn test_curve_validity() {
        assert!(PrismCurve::default().is_valid());
        let bad = PrismCurve {
            blend_end: 0.0001,
            ..PrismCurve::default()
        };
        assert!(!bad.is_valid());
    }

    #[test]
    fn test_jitter_leaves_controller_still() {
        let scaler = MotionScaler::default();
        let start = Vec3::new(0.1, 1.2, 0.3);
        let mut motion = HandMotion::anchored(start);
        let hand = start + Vec3::new(0.0003, 0.0, 0.0);
        let controller = scaler.step_hand(&mut motion, hand);
        assert_eq!(controller, start);
        assert_eq!(motion.last_hand, hand);
        assert_eq!(motion.last_controller, start);
    }

    #[test]
    fn test_pass_through_moves_exactly() {
        let scaler = MotionScaler::default();
        let mut motion = HandMotion::anchored(Vec3::ZERO);
        let travel = Vec3::new(0.002, 0.0, 0.0);
        let controller = scaler.step_hand(&mut motion, travel);
        assert!(approx(controller, travel));
    }

    #[test]
    fn test_fast_motion_overshoots() {
        let scaler = MotionScaler::default();
        let mut motion = HandMotion::anchored(Vec3::ZERO);
        let controller = scaler.step_hand(&mut motion, Vec3::new(0.0, 0.1, 0.0));
        assert!(approx(controller, Vec3::new(0.0, 0.105, 0.0)));
    }

    #[test]
    fn test_slow_drift_accumulates_offset() {
        let scaler = MotionScaler::default();
        let mut motion = HandMotion::anchored(Vec3::ZERO);
        let mut hand = Vec3::ZERO;
        for _ in 0..10 {
            hand += Vec3::new(0.0005, 0.0, 0.0);
            scaler.step_hand(&mut motion, hand);
        }
        // The hand moved 5mm but every step was under the noise floor
        assert_eq!(motion.last_controller, Vec3::ZERO);
        assert!(approx(motion.last_hand, Vec3::new(0.005, 0.0, 0.0)));
    }

    #[test]
    fn test_hands_are_independent() {
        let scaler = MotionScaler::default();
        let mut state = MotionState::anchored(HandPair::new(Vec3::ZERO, Vec3::Z));
        let hands = HandPair::new(Vec3::new(0.0001, 0.0, 0.0), Vec3::Z + Vec3::new(0.01, 0.0, 0.0));
        let out = scaler.step(&mut state, hands);
        assert_eq!(out.primary, Vec3::ZERO);
        assert!(approx(out.secondary, Vec3::Z + Vec3::new(0.0105, 0.0, 0.0)));
        assert_eq!(state.controllers(), out);
    }

    #[test]
    fn test_reset_snaps_and_is_idempotent() {
        let scaler = MotionScaler::default();
        let mut state = MotionState::anchored(HandPair::new(Vec3::ZERO, Vec3::ZERO));
        scaler.step(&mut state, HandPair::new(Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.5)));

        let hands = HandPair::new(Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 0.0, 0.5));
        let once = scaler.reset(&mut state, hands);
        let after_once = state;
        let twice = scaler.reset(&mut state, hands);

        assert_eq!(once, hands);
        assert_eq!(once, twice);
        assert_eq!(after_once, state);
        assert_eq!(state.primary, HandMotion::anchored(hands.primary));
    }

    #[test]
    fn test_nan_sample_skipped() {
        let scaler = MotionScaler::default();
        let mut motion = HandMotion::anchored(Vec3::ONE);
        let out = scaler.step_hand(&mut motion, Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(out, Vec3::ONE);
        assert_eq!(motion, HandMotion::anchored(Vec3::ONE));
    }
}
