//! Particle state: positions, targets, colors, and the per-frame morph.
//!
//! [`ParticleField`] owns three flat parallel arrays of `f32` (three
//! components per particle): the rendered position, the target the particle
//! eases toward, and its RGB color. A renderer consumes
//! [`positions`](ParticleField::positions) and
//! [`colors`](ParticleField::colors) directly as vertex data, re-uploading
//! whenever [`version`](ParticleField::version) advances.
//!
//! Only [`retarget`](ParticleField::retarget) writes targets; only
//! [`step`](ParticleField::step) writes positions and colors. Stepping
//! converges positions toward `target * expansion` up to the oscillation
//! noise floor, never exactly.

use crate::shapes::Shape;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Frame-global parameters for one [`ParticleField::step`] call.
///
/// These are owned by the caller (the controller), not the field: the field
/// holds per-particle state only.
#[derive(Debug, Clone, Copy)]
pub struct StepParams {
    /// Elapsed animation time in seconds.
    pub time: f32,
    /// Target scale factor; positions ease toward `target * expansion`.
    pub expansion: f32,
    /// Frame-shared hue base; per-particle hue offsets by radial distance.
    pub base_hue: f32,
    /// Oscillation amplitude. `0.02` for the standard wobble, `0.0`
    /// disables secondary motion entirely (the noise-free test hook).
    pub wobble: f32,
}

/// The wobble amplitude used by the live animation.
pub const WOBBLE: f32 = 0.02;

/// A fixed-size cloud of particles morphing toward a target shape.
pub struct ParticleField {
    positions: Vec<f32>,
    targets: Vec<f32>,
    colors: Vec<f32>,
    rng: SmallRng,
    version: u64,
}

impl ParticleField {
    /// Create a field of `count` particles scattered through a ±25 cube,
    /// with targets equal to positions and colors all white.
    pub fn new(count: usize) -> Self {
        Self::with_rng(count, SmallRng::from_entropy())
    }

    /// Reproducible constructor: same seed, same scatter and same
    /// subsequent retarget draws.
    pub fn seeded(count: usize, seed: u64) -> Self {
        Self::with_rng(count, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(count: usize, mut rng: SmallRng) -> Self {
        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count * 3 {
            positions.push((rng.gen::<f32>() - 0.5) * 50.0);
        }
        let targets = positions.clone();
        let colors = vec![1.0; count * 3];

        Self {
            positions,
            targets,
            colors,
            rng,
            version: 0,
        }
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    /// True if the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Rendered positions, three `f32` per particle.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Current targets, three `f32` per particle.
    #[inline]
    pub fn targets(&self) -> &[f32] {
        &self.targets
    }

    /// RGB colors in [0,1], three `f32` per particle.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Monotonic change counter. Both `step` and `retarget` advance it;
    /// a renderer re-uploads vertex buffers when the value it last
    /// uploaded differs.
    #[inline]
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Overwrite every particle's target with a fresh draw from `shape`.
    ///
    /// Positions and colors are untouched; the next `step` calls begin
    /// easing toward the new targets. Runs in O(len), no suspension.
    pub fn retarget(&mut self, shape: Shape) {
        for i in 0..self.len() {
            let p = shape.sample(&mut self.rng);
            self.targets[i * 3] = p.x;
            self.targets[i * 3 + 1] = p.y;
            self.targets[i * 3 + 2] = p.z;
        }
        self.version += 1;
    }

    /// Advance every particle one frame.
    ///
    /// Each particle eases toward `target * expansion` at its own rate in
    /// [0.03, 0.05), drawn fresh per frame so particles sharing a target
    /// visibly desynchronize. A coupled cross-axis oscillation then nudges
    /// x and y using the already-updated values (the order matters), and
    /// the color is recomputed from HSL with a radial hue offset.
    pub fn step(&mut self, params: StepParams) {
        for i in 0..self.len() {
            let ix = i * 3;
            let iy = ix + 1;
            let iz = ix + 2;

            let rate = self.rng.gen_range(0.03..0.05);
            self.positions[ix] +=
                (self.targets[ix] * params.expansion - self.positions[ix]) * rate;
            self.positions[iy] +=
                (self.targets[iy] * params.expansion - self.positions[iy]) * rate;
            self.positions[iz] +=
                (self.targets[iz] * params.expansion - self.positions[iz]) * rate;

            self.positions[ix] += (params.time + self.positions[iy]).sin() * params.wobble;
            self.positions[iy] += (params.time + self.positions[ix]).cos() * params.wobble;

            let x = self.positions[ix];
            let y = self.positions[iy];
            let dist = (x * x + y * y).sqrt();
            let hue = (params.base_hue + dist * 0.02) % 1.0;
            let [r, g, b] = hsl_to_rgb(hue, 0.8, 0.6);
            self.colors[ix] = r;
            self.colors[iy] = g;
            self.colors[iz] = b;
        }
        self.version += 1;
    }
}

/// Convert HSL to RGB. Hue wraps; saturation and lightness are clamped by
/// construction at the call sites.
fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_channel(p, q, h + 1.0 / 3.0),
        hue_channel(p, q, h),
        hue_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: StepParams = StepParams {
        time: 1.0,
        expansion: 1.0,
        base_hue: 0.0,
        wobble: WOBBLE,
    };

    #[test]
    fn test_initial_state() {
        let field = ParticleField::seeded(100, 1);
        assert_eq!(field.len(), 100);
        assert_eq!(field.positions().len(), 300);
        assert_eq!(field.positions(), field.targets());
        assert!(field.colors().iter().all(|&c| c == 1.0));
        assert!(field.positions().iter().all(|&p| p.abs() <= 25.0));
    }

    #[test]
    fn test_step_never_mutates_targets() {
        let mut field = ParticleField::seeded(200, 2);
        field.retarget(Shape::Heart);
        let targets = field.targets().to_vec();

        for _ in 0..10 {
            field.step(PARAMS);
        }
        assert_eq!(field.targets(), &targets[..]);
    }

    #[test]
    fn test_retarget_never_mutates_positions_or_colors() {
        let mut field = ParticleField::seeded(200, 3);
        field.step(PARAMS);
        let positions = field.positions().to_vec();
        let colors = field.colors().to_vec();

        field.retarget(Shape::Flower);
        assert_eq!(field.positions(), &positions[..]);
        assert_eq!(field.colors(), &colors[..]);
    }

    #[test]
    fn test_convergence_with_wobble_disabled() {
        let mut field = ParticleField::seeded(500, 4);
        field.retarget(Shape::Sphere);

        let quiet = StepParams {
            wobble: 0.0,
            ..PARAMS
        };
        let error = |f: &ParticleField| -> f32 {
            f.positions()
                .iter()
                .zip(f.targets())
                .map(|(p, t)| (p - t).abs())
                .sum()
        };

        let initial = error(&field);
        let mut prev = initial;
        for _ in 0..50 {
            field.step(quiet);
            let next = error(&field);
            assert!(next <= prev);
            prev = next;
        }
        // 50 frames at >= 3% per frame shrinks the gap substantially
        assert!(prev < initial * 0.5);
    }

    #[test]
    fn test_version_advances() {
        let mut field = ParticleField::seeded(10, 5);
        let v0 = field.version();
        field.retarget(Shape::Saturn);
        assert_eq!(field.version(), v0 + 1);
        field.step(PARAMS);
        assert_eq!(field.version(), v0 + 2);
    }

    #[test]
    fn test_seeded_reproducibility() {
        let mut a = ParticleField::seeded(300, 42);
        let mut b = ParticleField::seeded(300, 42);
        assert_eq!(a.positions(), b.positions());

        a.retarget(Shape::Fireworks);
        b.retarget(Shape::Fireworks);
        assert_eq!(a.targets(), b.targets());
    }

    #[test]
    fn test_colors_stay_in_range() {
        let mut field = ParticleField::seeded(200, 6);
        field.retarget(Shape::Heart);
        for frame in 0..20 {
            field.step(StepParams {
                time: frame as f32 / 60.0,
                expansion: 1.7,
                base_hue: 0.9,
                wobble: WOBBLE,
            });
        }
        assert!(field.colors().iter().all(|&c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn test_hsl_red() {
        let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((r - 1.0).abs() < 1e-3);
        assert!(g < 1e-3);
        assert!(b < 1e-3);
    }

    #[test]
    fn test_hsl_achromatic() {
        let [r, g, b] = hsl_to_rgb(0.3, 0.0, 0.5);
        assert_eq!([r, g, b], [0.5, 0.5, 0.5]);
    }
}
