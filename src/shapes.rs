//! The shape catalog: parametric target-point generators.
//!
//! Each [`Shape`] is a pure sampler mapping fresh randomness to a point in
//! the shape's distribution. Samplers are stateless and independent per
//! call, so a retarget simply draws once per particle.
//!
//! The catalog order is fixed; [`Shape::CYCLE`] defines the sequence the
//! open-hand gesture steps through.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::TAU;

/// A named target distribution for the particle cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Hollow sphere of radius 10.
    Sphere,
    /// Parametric heart curve swept with a thin z-jitter.
    Heart,
    /// Sphere of radius 6 plus a flat ring between radius 12 and 18.
    Saturn,
    /// Four-petal polar rose.
    Flower,
    /// Radial burst, denser toward the center.
    Fireworks,
}

impl Shape {
    /// Catalog in cycle order. The shape-switch gesture advances through
    /// this array and wraps.
    pub const CYCLE: [Shape; 5] = [
        Shape::Sphere,
        Shape::Heart,
        Shape::Saturn,
        Shape::Flower,
        Shape::Fireworks,
    ];

    /// Capitalized display name, as shown to the user on a switch.
    pub fn label(self) -> &'static str {
        match self {
            Shape::Sphere => "Sphere",
            Shape::Heart => "Heart",
            Shape::Saturn => "Saturn",
            Shape::Flower => "Flower",
            Shape::Fireworks => "Fireworks",
        }
    }

    /// Draw one point from this shape's distribution.
    ///
    /// The generator is caller-supplied so tests can seed it; nothing about
    /// a draw depends on prior calls.
    pub fn sample<R: Rng>(self, rng: &mut R) -> Vec3 {
        match self {
            Shape::Sphere => on_sphere(rng, 10.0),

            Shape::Heart => {
                let t = rng.gen_range(0.0..TAU);
                let x = 16.0 * t.sin().powi(3);
                let y = 13.0 * t.cos()
                    - 5.0 * (2.0 * t).cos()
                    - 2.0 * (3.0 * t).cos()
                    - (4.0 * t).cos();
                Vec3::new(x * 0.6, y * 0.6, rng.gen_range(-5.0..5.0))
            }

            Shape::Saturn => {
                if rng.gen::<f32>() < 0.6 {
                    on_sphere(rng, 6.0)
                } else {
                    let theta = rng.gen_range(0.0..TAU);
                    let r = rng.gen_range(12.0..18.0);
                    Vec3::new(
                        r * theta.cos(),
                        rng.gen_range(-0.5..0.5),
                        r * theta.sin(),
                    )
                }
            }

            Shape::Flower => {
                let theta = rng.gen_range(0.0..TAU);
                let r = 10.0 * (4.0 * theta).cos();
                Vec3::new(
                    r * theta.cos(),
                    r * theta.sin(),
                    rng.gen_range(-2.5..2.5),
                )
            }

            Shape::Fireworks => on_sphere(rng, 1.0) * rng.gen_range(0.0..20.0),
        }
    }
}

/// Uniform point on a sphere surface.
///
/// Inverse-cosine latitude sampling so points don't cluster at the poles.
fn on_sphere<R: Rng>(rng: &mut R, radius: f32) -> Vec3 {
    let theta = rng.gen_range(0.0..TAU);
    let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x5eed)
    }

    #[test]
    fn test_all_shapes_finite() {
        let mut rng = rng();
        for shape in Shape::CYCLE {
            for _ in 0..1000 {
                let p = shape.sample(&mut rng);
                assert!(p.is_finite(), "{:?} produced {:?}", shape, p);
            }
        }
    }

    #[test]
    fn test_sphere_radius() {
        let mut rng = rng();
        for _ in 0..10_000 {
            let p = Shape::Sphere.sample(&mut rng);
            assert!((p.length() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_heart_envelope() {
        let mut rng = rng();
        for _ in 0..1000 {
            let p = Shape::Heart.sample(&mut rng);
            // x = 16 sin^3 t scaled by 0.6; z-jitter is unscaled
            assert!(p.x.abs() <= 16.0 * 0.6 + 1e-3);
            assert!(p.z.abs() <= 5.0);
        }
    }

    #[test]
    fn test_saturn_body_or_ring() {
        let mut rng = rng();
        let mut saw_body = false;
        let mut saw_ring = false;
        for _ in 0..1000 {
            let p = Shape::Saturn.sample(&mut rng);
            let ring_r = (p.x * p.x + p.z * p.z).sqrt();
            if (p.length() - 6.0).abs() < 1e-3 {
                saw_body = true;
            } else {
                assert!((12.0..18.0).contains(&ring_r), "ring radius {}", ring_r);
                assert!(p.y.abs() <= 0.5);
                saw_ring = true;
            }
        }
        assert!(saw_body && saw_ring);
    }

    #[test]
    fn test_flower_envelope() {
        let mut rng = rng();
        for _ in 0..1000 {
            let p = Shape::Flower.sample(&mut rng);
            let petal_r = (p.x * p.x + p.y * p.y).sqrt();
            assert!(petal_r <= 10.0 + 1e-3);
            assert!(p.z.abs() <= 2.5);
        }
    }

    #[test]
    fn test_fireworks_envelope() {
        let mut rng = rng();
        for _ in 0..1000 {
            let p = Shape::Fireworks.sample(&mut rng);
            assert!(p.length() < 20.0);
        }
    }

    #[test]
    fn test_cycle_order_and_labels() {
        let labels: Vec<_> = Shape::CYCLE.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            ["Sphere", "Heart", "Saturn", "Flower", "Fireworks"]
        );
    }
}
