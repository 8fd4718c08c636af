//! Simulated hand source for running without a detector.
//!
//! [`SimHand`] synthesizes 21-landmark frames from desktop input, standing
//! in for the camera + hand-tracking pipeline: the cursor steers the hand,
//! the left mouse button closes the pinch, and holding Space extends the
//! fingers into the open-hand pose that switches shapes. Frames satisfy
//! the same contract a real detector does, so the rest of the pipeline
//! can't tell the difference.

use crate::landmarks::{HandFrame, Landmark, INDEX_TIP, MIDDLE_MCP, THUMB_TIP, WRIST};

/// Thumb-index gap of a relaxed (un-pinched) simulated hand. Wide enough
/// that an open hand immediately qualifies for a shape switch.
const RELAXED_GAP: f32 = 0.2;

/// Per-frame easing applied to the gap so pinches close smoothly instead
/// of snapping.
const GAP_EASE: f32 = 0.25;

/// Column offsets of the four non-thumb fingers relative to the palm.
const FINGER_COLUMNS: [f32; 4] = [-0.045, -0.015, 0.015, 0.045];

/// Synthesizes hand frames from cursor/button/key state.
pub struct SimHand {
    cursor: Option<(f32, f32)>,
    pinching: bool,
    open: bool,
    gap: f32,
}

impl SimHand {
    pub fn new() -> Self {
        Self {
            cursor: None,
            pinching: false,
            open: false,
            gap: RELAXED_GAP,
        }
    }

    /// Update the simulated hand's position, in window-normalized [0,1]
    /// coordinates.
    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = Some((x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)));
    }

    /// Left mouse button: held closes the thumb-index pinch.
    pub fn set_pinching(&mut self, pinching: bool) {
        self.pinching = pinching;
    }

    /// Space: held extends all four fingers (the shape-switch pose).
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Produce the next frame, or `None` while the cursor has never
    /// entered the window (a detector that sees no hand).
    pub fn frame(&mut self) -> Option<HandFrame> {
        let (cx, cy) = self.cursor?;

        // An open hand can't pinch; extended fingers force the gap wide.
        let target_gap = if self.pinching && !self.open {
            0.0
        } else {
            RELAXED_GAP
        };
        self.gap += (target_gap - self.gap) * GAP_EASE;

        // The camera mirrors the scene, so place the hand at the mirrored
        // x; the gesture layer's default mirroring maps it back onto the
        // cursor.
        let mx = 1.0 - cx;

        let mut landmarks = [Landmark::new(mx, cy, 0.0); 21];
        landmarks[WRIST] = Landmark::new(mx, cy + 0.12, 0.0);

        let lift = if self.open { 0.12 } else { -0.02 };
        for (finger, dx) in FINGER_COLUMNS.iter().enumerate() {
            let base = 5 + finger * 4; // MCP of this finger
            landmarks[base] = Landmark::new(mx + dx, cy - 0.02, 0.0);
            landmarks[base + 1] = Landmark::new(mx + dx, cy - 0.04, 0.0); // PIP
            landmarks[base + 2] = Landmark::new(mx + dx, cy - 0.04 - lift / 2.0, 0.0); // DIP
            landmarks[base + 3] = Landmark::new(mx + dx, cy - 0.04 - lift, 0.0); // TIP
        }

        // The anchor the gesture layer reads tracks the cursor exactly.
        landmarks[MIDDLE_MCP] = Landmark::new(mx, cy, 0.0);

        // Thumb: a chain from the wrist ending `gap` away from the index
        // tip, so the measured pinch distance is exactly the eased gap.
        let index_tip = landmarks[INDEX_TIP];
        let thumb_tip = Landmark::new(index_tip.x + self.gap, index_tip.y, 0.0);
        for joint in 1..=3 {
            let t = joint as f32 / 4.0;
            landmarks[joint] = Landmark::new(
                landmarks[WRIST].x + (thumb_tip.x - landmarks[WRIST].x) * t,
                landmarks[WRIST].y + (thumb_tip.y - landmarks[WRIST].y) * t,
                0.0,
            );
        }
        landmarks[THUMB_TIP] = thumb_tip;

        Some(HandFrame { landmarks })
    }
}

impl Default for SimHand {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_cursor_no_hand() {
        let mut sim = SimHand::new();
        assert!(sim.frame().is_none());
    }

    #[test]
    fn test_open_hand_pose_qualifies_for_switch() {
        let mut sim = SimHand::new();
        sim.set_cursor(0.5, 0.5);
        sim.set_open(true);
        let frame = sim.frame().unwrap();

        assert!(frame.is_open_hand());
        let spread = frame
            .landmark(THUMB_TIP)
            .distance(frame.landmark(INDEX_TIP));
        assert!(spread > 0.15);
    }

    #[test]
    fn test_curled_hand_is_closed() {
        let mut sim = SimHand::new();
        sim.set_cursor(0.5, 0.5);
        let frame = sim.frame().unwrap();
        assert!(!frame.is_open_hand());
    }

    #[test]
    fn test_pinch_eases_closed() {
        let mut sim = SimHand::new();
        sim.set_cursor(0.5, 0.5);
        sim.set_pinching(true);

        let mut last = RELAXED_GAP;
        for _ in 0..30 {
            let frame = sim.frame().unwrap();
            let gap = frame
                .landmark(THUMB_TIP)
                .distance(frame.landmark(INDEX_TIP));
            assert!(gap <= last + 1e-6);
            last = gap;
        }
        assert!(last < 0.01);
    }

    #[test]
    fn test_anchor_is_mirrored_cursor() {
        let mut sim = SimHand::new();
        sim.set_cursor(0.8, 0.3);
        let frame = sim.frame().unwrap();
        assert!((frame.landmark(MIDDLE_MCP).x - 0.2).abs() < 1e-6);
        assert!((frame.landmark(MIDDLE_MCP).y - 0.3).abs() < 1e-6);
    }
}
