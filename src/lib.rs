//! # morphcloud
//!
//! A hand-gesture-driven morphing particle cloud: 8000 points continuously
//! easing between parametric shapes, with motion, color, and shape
//! selection steered by live hand-pose signals.
//!
//! ## Quick Start
//!
//! ```ignore
//! use morphcloud::prelude::*;
//!
//! let mut cloud = MorphController::builder()
//!     .with_shape_label(|name| println!("now showing: {name}"))
//!     .build();
//!
//! // Detection callback (whenever the tracker produces a result):
//! cloud.ingest(HandFrame::from_flat(&landmark_data).as_ref());
//!
//! // Render callback (once per frame):
//! cloud.frame();
//! upload(cloud.positions(), cloud.colors()); // when cloud.version() advanced
//! ```
//!
//! ## Core Concepts
//!
//! ### Shapes
//!
//! [`Shape`] is the fixed catalog of target distributions: sphere, heart,
//! saturn, flower, fireworks. Each is a pure sampler; a retarget draws one
//! fresh point per particle.
//!
//! ### The field
//!
//! [`ParticleField`] owns three flat `f32` arrays (position, target, color;
//! three components per particle). `retarget` rewrites targets wholesale;
//! `step` eases positions toward `target * expansion`, adds a coupled
//! cross-axis wobble, and recolors from a radially offset hue.
//!
//! ### Gestures
//!
//! [`GestureSignal`] turns a 21-landmark [`HandFrame`] into smoothed
//! parameters: pinch strength (thumb-index spread) drives expansion, the
//! hand anchor drives rotation and hue, and an open hand with spread
//! fingers (rate-limited by a cooldown) cycles to the next shape. No
//! hand means every signal holds its last value.
//!
//! ### The controller
//!
//! [`MorphController`] ties the above together behind two entry points:
//! `ingest` for detection results and `frame` for the render loop. Both
//! run on one thread; their relative order is unspecified and harmless.
//!
//! The demo binary adds a wgpu point-sprite renderer and a simulated hand
//! (cursor + mouse button + Space) so the full pipeline runs without a
//! camera.

pub mod controller;
pub mod error;
pub mod field;
pub mod gesture;
pub mod gpu;
pub mod landmarks;
pub mod shapes;
pub mod simulate;
pub mod time;
pub mod window;

pub use controller::{MorphBuilder, MorphController, PARTICLE_COUNT};
pub use error::GpuError;
pub use field::{ParticleField, StepParams, WOBBLE};
pub use gesture::{GestureConfig, GestureSignal};
pub use glam::{Vec2, Vec3};
pub use landmarks::{HandFrame, Landmark};
pub use shapes::Shape;

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::controller::{MorphBuilder, MorphController};
    pub use crate::field::{ParticleField, StepParams};
    pub use crate::gesture::{GestureConfig, GestureSignal};
    pub use crate::landmarks::{HandFrame, Landmark};
    pub use crate::shapes::Shape;
    pub use crate::simulate::SimHand;
    pub use crate::time::Time;
    pub use crate::{Vec2, Vec3};
}
