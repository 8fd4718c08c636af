//! The morph controller: gesture-to-parameter mapping and per-frame
//! orchestration.
//!
//! [`MorphController`] owns the [`GestureSignal`], the [`ParticleField`],
//! the frame clock, and the cloud's rotation state. Two entry points feed
//! it, both on the same thread:
//!
//! - [`ingest`](MorphController::ingest), the detection callback, called
//!   whenever the hand tracker produces a result (irregular cadence,
//!   interleaved arbitrarily with rendering);
//! - [`frame`](MorphController::frame), the render callback, called
//!   exactly once per rendered frame.
//!
//! Ordering across the two is unspecified and doesn't matter: `ingest`
//! only writes the gesture signal (and retargets on a switch), `frame`
//! only reads it.

use crate::field::{ParticleField, StepParams, WOBBLE};
use crate::gesture::{GestureConfig, GestureSignal};
use crate::landmarks::HandFrame;
use crate::shapes::Shape;
use crate::time::Time;
use std::time::Instant;

/// Default particle count, chosen for a dense cloud that still steps
/// comfortably on one core.
pub const PARTICLE_COUNT: usize = 8000;

/// Constant yaw drift per frame, always present even with a centered hand.
const YAW_DRIFT: f32 = 0.005;

/// Builder for [`MorphController`]. Construction performs the initial
/// retarget to the first catalog shape, so a built controller is
/// immediately renderable.
pub struct MorphBuilder {
    particle_count: usize,
    seed: Option<u64>,
    gesture: GestureConfig,
    wobble: f32,
    on_shape_label: Option<Box<dyn FnMut(&str)>>,
}

impl MorphBuilder {
    /// Set the number of particles (default 8000).
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Seed the field's generator for reproducible scatter and retargets.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the gesture tuning.
    pub fn with_gesture_config(mut self, config: GestureConfig) -> Self {
        self.gesture = config;
        self
    }

    /// Override the oscillation amplitude (0 disables secondary motion).
    pub fn with_wobble(mut self, wobble: f32) -> Self {
        self.wobble = wobble;
        self
    }

    /// Register the shape-name notification, fired with the capitalized
    /// display name on every retarget, including the initial one.
    pub fn with_shape_label<F: FnMut(&str) + 'static>(mut self, callback: F) -> Self {
        self.on_shape_label = Some(Box::new(callback));
        self
    }

    /// Build the controller and retarget to the first catalog shape.
    pub fn build(self) -> MorphController {
        let field = match self.seed {
            Some(seed) => ParticleField::seeded(self.particle_count, seed),
            None => ParticleField::new(self.particle_count),
        };

        let mut controller = MorphController {
            field,
            signal: GestureSignal::new(self.gesture),
            time: Time::new(),
            yaw: 0.0,
            tilt: 0.0,
            wobble: self.wobble,
            on_shape_label: self.on_shape_label,
        };
        let initial = controller.signal.shape();
        controller.retarget(initial);
        controller
    }
}

impl Default for MorphBuilder {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
            gesture: GestureConfig::default(),
            wobble: WOBBLE,
            on_shape_label: None,
        }
    }
}

/// Orchestrates one morphing cloud.
pub struct MorphController {
    field: ParticleField,
    signal: GestureSignal,
    time: Time,
    yaw: f32,
    tilt: f32,
    wobble: f32,
    on_shape_label: Option<Box<dyn FnMut(&str)>>,
}

impl MorphController {
    pub fn builder() -> MorphBuilder {
        MorphBuilder::default()
    }

    /// Detection-callback entry point: consume one tracker result.
    ///
    /// `None` means no hand was visible; the gesture signal keeps its last
    /// values. A qualifying open-hand gesture retargets the field and
    /// fires the shape-label notification before returning.
    pub fn ingest(&mut self, frame: Option<&HandFrame>) {
        self.ingest_at(frame, Instant::now());
    }

    /// Explicit-clock variant of [`ingest`](Self::ingest) for tests and
    /// headless hosts.
    pub fn ingest_at(&mut self, frame: Option<&HandFrame>, now: Instant) {
        if let Some(shape) = self.signal.update(frame, now) {
            self.retarget(shape);
        }
    }

    /// Render-callback entry point: advance the cloud one frame.
    ///
    /// Reads the gesture signal's current values, derives the frame
    /// parameters, integrates rotation, and steps the field. Call exactly
    /// once per rendered frame, after which [`positions`](Self::positions)
    /// and [`colors`](Self::colors) hold the frame's vertex data.
    pub fn frame(&mut self) {
        let (time, _delta) = self.time.update();

        let expansion = 0.5 + self.signal.pinch_strength() * 1.5;
        let spin = (self.signal.hand_x() - 0.5) * 2.0;
        self.yaw += YAW_DRIFT + spin * 0.02;
        self.tilt = (self.signal.hand_y() - 0.5) * 0.5;

        let base_hue = (time * 0.1 + self.signal.hand_x()) % 1.0;

        self.field.step(StepParams {
            time,
            expansion,
            base_hue,
            wobble: self.wobble,
        });
    }

    fn retarget(&mut self, shape: Shape) {
        self.field.retarget(shape);
        if let Some(callback) = &mut self.on_shape_label {
            callback(shape.label());
        }
    }

    /// Rendered positions, three `f32` per particle.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        self.field.positions()
    }

    /// RGB colors, three `f32` per particle.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        self.field.colors()
    }

    /// Change counter for the vertex arrays; see [`ParticleField::version`].
    #[inline]
    pub fn version(&self) -> u64 {
        self.field.version()
    }

    /// Number of particles.
    #[inline]
    pub fn len(&self) -> usize {
        self.field.len()
    }

    /// True if the cloud holds no particles.
    pub fn is_empty(&self) -> bool {
        self.field.is_empty()
    }

    /// Cloud orientation as `(yaw, tilt)` radians. Yaw accumulates drift
    /// plus the hand-x term; tilt tracks hand-y absolutely.
    #[inline]
    pub fn rotation(&self) -> (f32, f32) {
        (self.yaw, self.tilt)
    }

    /// The active shape.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.signal.shape()
    }

    /// Smoothed pinch strength in [0,1].
    #[inline]
    pub fn pinch_strength(&self) -> f32 {
        self.signal.pinch_strength()
    }

    /// Pin the frame clock's delta for deterministic stepping.
    pub fn set_fixed_delta(&mut self, delta: Option<f32>) {
        self.time.set_fixed_delta(delta);
    }
}
