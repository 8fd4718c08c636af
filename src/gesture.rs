//! Gesture recognition: derived, smoothed signals from raw landmark frames.
//!
//! [`GestureSignal`] is written by the detection callback (whenever a
//! result arrives, at whatever cadence) and read by the render loop. Hand
//! loss leaves every field at its last value: the cloud keeps doing
//! whatever it was doing rather than snapping to defaults.
//!
//! The one discrete event is the shape switch: an open hand with thumb and
//! index spread wide, rate-limited by a cooldown. Qualifying gestures
//! inside the cooldown window are dropped, not queued.

use crate::landmarks::{HandFrame, INDEX_TIP, MIDDLE_MCP, THUMB_TIP};
use crate::shapes::Shape;
use std::time::{Duration, Instant};

/// Tuning for the gesture mapping.
///
/// The anchor landmark and X-mirroring are configuration rather than
/// hardcode: index 9 (middle-finger MCP) with mirrored X matches a
/// front-facing camera, but other deployments may want the wrist or an
/// unmirrored feed.
#[derive(Debug, Clone, Copy)]
pub struct GestureConfig {
    /// Landmark index used as the hand's position anchor.
    pub anchor: usize,
    /// Mirror the anchor's x so moving right moves the cloud right when
    /// the camera faces the user.
    pub mirror_x: bool,
    /// Minimum time between accepted shape switches.
    pub cooldown: Duration,
    /// Thumb-index distances below this read as a fully closed pinch.
    pub pinch_deadzone: f32,
    /// Slope from distance to raw pinch strength.
    pub pinch_gain: f32,
    /// Exponential smoothing rate per update (frame-rate dependent by
    /// design; the detector's cadence is the filter's clock).
    pub pinch_smoothing: f32,
    /// Thumb-index distance an open hand must exceed to switch shapes.
    pub switch_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            anchor: MIDDLE_MCP,
            mirror_x: true,
            cooldown: Duration::from_millis(1500),
            pinch_deadzone: 0.02,
            pinch_gain: 4.0,
            pinch_smoothing: 0.2,
            switch_distance: 0.15,
        }
    }
}

/// Smoothed gesture state, one instance per cloud.
pub struct GestureSignal {
    config: GestureConfig,
    pinch_strength: f32,
    hand_x: f32,
    hand_y: f32,
    open_hand: bool,
    shape_index: usize,
    last_switch: Option<Instant>,
}

impl GestureSignal {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            pinch_strength: 0.0,
            hand_x: 0.5,
            hand_y: 0.5,
            open_hand: false,
            shape_index: 0,
            last_switch: None,
        }
    }

    /// Smoothed thumb-index spread in [0,1].
    #[inline]
    pub fn pinch_strength(&self) -> f32 {
        self.pinch_strength
    }

    /// Anchor x in [0,1], mirrored per config. 0.5 until a hand is seen.
    #[inline]
    pub fn hand_x(&self) -> f32 {
        self.hand_x
    }

    /// Anchor y in [0,1]. 0.5 until a hand is seen.
    #[inline]
    pub fn hand_y(&self) -> f32 {
        self.hand_y
    }

    /// Whether the last processed frame showed an open hand.
    #[inline]
    pub fn open_hand(&self) -> bool {
        self.open_hand
    }

    /// Index of the active shape in [`Shape::CYCLE`].
    #[inline]
    pub fn shape_index(&self) -> usize {
        self.shape_index
    }

    /// The active shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        Shape::CYCLE[self.shape_index]
    }

    /// Consume one detection result.
    ///
    /// `None` (no hand visible) changes nothing. Otherwise the continuous
    /// signals update, and if the frame qualifies as a shape switch
    /// (open hand, thumb-index spread past the threshold, cooldown
    /// elapsed) the cycle advances and the newly selected [`Shape`] is
    /// returned for the caller to retarget with.
    pub fn update(&mut self, frame: Option<&HandFrame>, now: Instant) -> Option<Shape> {
        let frame = frame?;

        let anchor = frame.landmark(self.config.anchor);
        self.hand_x = if self.config.mirror_x {
            1.0 - anchor.x
        } else {
            anchor.x
        };
        self.hand_y = anchor.y;

        let distance = frame
            .landmark(THUMB_TIP)
            .distance(frame.landmark(INDEX_TIP));
        let raw = ((distance - self.config.pinch_deadzone) * self.config.pinch_gain)
            .clamp(0.0, 1.0);
        self.pinch_strength += (raw - self.pinch_strength) * self.config.pinch_smoothing;

        self.open_hand = frame.is_open_hand();

        let cooled = match self.last_switch {
            None => true,
            Some(last) => now.duration_since(last) > self.config.cooldown,
        };
        if self.open_hand && distance > self.config.switch_distance && cooled {
            self.shape_index = (self.shape_index + 1) % Shape::CYCLE.len();
            self.last_switch = Some(now);
            return Some(self.shape());
        }
        None
    }
}

impl Default for GestureSignal {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::{Landmark, FINGER_JOINTS};

    /// A synthetic frame: anchor at (x,y), thumb and index tips `spread`
    /// apart, fingers extended or curled.
    fn frame(x: f32, y: f32, spread: f32, open: bool) -> HandFrame {
        let mut landmarks = [Landmark::new(x, y, 0.0); 21];
        landmarks[THUMB_TIP] = Landmark::new(x - spread / 2.0, y, 0.0);
        landmarks[INDEX_TIP] = Landmark::new(x + spread / 2.0, y, 0.0);
        for &(tip, pip) in &FINGER_JOINTS {
            landmarks[pip].y = y - 0.04;
            landmarks[tip].y = if open { y - 0.12 } else { y + 0.02 };
        }
        HandFrame { landmarks }
    }

    #[test]
    fn test_no_hand_is_sticky() {
        let mut signal = GestureSignal::default();
        let t0 = Instant::now();
        signal.update(Some(&frame(0.8, 0.3, 0.3, false)), t0);
        let (x, y, pinch) = (signal.hand_x(), signal.hand_y(), signal.pinch_strength());

        assert_eq!(signal.update(None, t0), None);
        assert_eq!(signal.hand_x(), x);
        assert_eq!(signal.hand_y(), y);
        assert_eq!(signal.pinch_strength(), pinch);
    }

    #[test]
    fn test_anchor_mirroring() {
        let mut signal = GestureSignal::default();
        signal.update(Some(&frame(0.8, 0.3, 0.05, false)), Instant::now());
        assert!((signal.hand_x() - 0.2).abs() < 1e-6);
        assert!((signal.hand_y() - 0.3).abs() < 1e-6);

        let mut unmirrored = GestureSignal::new(GestureConfig {
            mirror_x: false,
            ..GestureConfig::default()
        });
        unmirrored.update(Some(&frame(0.8, 0.3, 0.05, false)), Instant::now());
        assert!((unmirrored.hand_x() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_smoothing_geometric() {
        let mut signal = GestureSignal::default();
        let t0 = Instant::now();
        // spread 0.3 -> raw = clamp((0.3 - 0.02) * 4) = 1
        let f = frame(0.5, 0.5, 0.3, false);

        for k in 1..=20u32 {
            signal.update(Some(&f), t0);
            let expected = 1.0 - 0.8f32.powi(k as i32);
            assert!(
                (signal.pinch_strength() - expected).abs() < 1e-4,
                "k={k}: {} vs {}",
                signal.pinch_strength(),
                expected
            );
        }
    }

    #[test]
    fn test_switch_cooldown_window() {
        let mut signal = GestureSignal::default();
        let t0 = Instant::now();
        let f = frame(0.5, 0.5, 0.2, true);

        // first qualifying gesture fires immediately
        assert_eq!(signal.update(Some(&f), t0), Some(Shape::Heart));
        assert_eq!(signal.shape_index(), 1);

        // 1400 ms later: inside the cooldown, silently dropped
        assert_eq!(
            signal.update(Some(&f), t0 + Duration::from_millis(1400)),
            None
        );
        assert_eq!(signal.shape_index(), 1);

        // 1600 ms later: fires and advances by exactly one
        assert_eq!(
            signal.update(Some(&f), t0 + Duration::from_millis(1600)),
            Some(Shape::Saturn)
        );
        assert_eq!(signal.shape_index(), 2);
    }

    #[test]
    fn test_switch_requires_spread_and_open_hand() {
        let mut signal = GestureSignal::default();
        let t0 = Instant::now();

        // open but not spread enough
        assert_eq!(signal.update(Some(&frame(0.5, 0.5, 0.05, true)), t0), None);
        // spread but closed
        assert_eq!(signal.update(Some(&frame(0.5, 0.5, 0.2, false)), t0), None);
        assert_eq!(signal.shape_index(), 0);
    }

    #[test]
    fn test_full_cycle_returns_to_sphere() {
        let mut signal = GestureSignal::default();
        let t0 = Instant::now();
        let f = frame(0.5, 0.5, 0.2, true);

        assert_eq!(signal.shape(), Shape::Sphere);
        for i in 1..=5u64 {
            let fired = signal.update(Some(&f), t0 + Duration::from_millis(i * 2000));
            assert!(fired.is_some());
        }
        assert_eq!(signal.shape(), Shape::Sphere);
    }
}
