//! Path tracing integrator.
//!
//! Estimates the radiance arriving along a ray by following scatter
//! events through the scene until the ray escapes to the sky, is
//! absorbed, or runs out of bounces.

use glint_math::{Interval, Ray};
use rand::RngCore;

use crate::material::Color;
use crate::scene::Scene;

/// Minimum hit distance; keeps scattered rays from re-hitting their origin.
pub const SELF_INTERSECTION_EPSILON: f32 = 0.001;

/// Far limit of every scene query.
pub const MAX_DISTANCE: f32 = f32::MAX;

/// Vertical sky gradient returned for rays that hit nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Background {
    /// Color looking straight down
    pub horizon: Color,
    /// Color looking straight up
    pub sky: Color,
}

impl Default for Background {
    fn default() -> Self {
        Self {
            horizon: Color::new(1.0, 1.0, 1.0),
            sky: Color::new(0.3, 0.74, 1.0),
        }
    }
}

impl Background {
    /// Color seen along an escaping ray.
    ///
    /// Blends from `horizon` to `sky` by `(direction.y + 1) / 2`.
    pub fn color(&self, ray: &Ray) -> Color {
        let t = (ray.direction().y + 1.0) * 0.5;
        self.horizon.lerp(self.sky, t)
    }
}

/// Monte Carlo path tracer with a hard bounce limit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathTracer {
    /// Number of scatter events allowed before a path returns black
    pub max_depth: u32,
    pub background: Background,
}

impl PathTracer {
    pub fn new(max_depth: u32, background: Background) -> Self {
        Self { max_depth, background }
    }

    /// Compute the color seen by a ray that has already bounced `depth` times.
    ///
    /// A hit at `depth >= max_depth` returns black, as does an absorbed
    /// ray. Misses return the background attenuated by every scatter on
    /// the way. The bounce loop keeps stack usage flat for any depth.
    pub fn trace(&self, scene: &Scene, ray: &Ray, depth: u32, rng: &mut dyn RngCore) -> Color {
        let ray_t = Interval::new(SELF_INTERSECTION_EPSILON, MAX_DISTANCE);
        let mut throughput = Color::ONE;
        let mut ray = *ray;
        let mut depth = depth;

        loop {
            let Some((object, rec)) = scene.trace(&ray, ray_t) else {
                return self.background.color(&ray) * throughput;
            };

            if depth >= self.max_depth {
                return Color::ZERO;
            }

            let scattered = scene
                .material(object.material)
                .and_then(|material| material.scatter(&ray, &rec, rng));

            match scattered {
                Some(scatter) => {
                    throughput *= scatter.attenuation;
                    ray = scatter.ray;
                    depth += 1;
                }
                // Ray was absorbed
                None => return Color::ZERO,
            }
        }
    }
}

impl Default for PathTracer {
    fn default() -> Self {
        Self::new(10, Background::default())
    }
}
