//! Glint Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for spheres and planes with diffuse,
//! metallic and glass surfaces.
//!
//! Data flows from the [`Renderer`] driver through [`Camera::get_ray`]
//! and [`PathTracer::trace`] into [`Scene::trace`], with
//! [`Material::scatter`] producing the next ray at every hit.

mod camera;
mod error;
mod geometry;
mod integrator;
mod material;
mod renderer;
mod sampling;
mod scene;
mod session;

pub use camera::Camera;
pub use error::{RenderError, RenderResult, SceneError};
pub use geometry::{Geometry, HitRecord, Plane, Sphere};
pub use integrator::{Background, PathTracer, MAX_DISTANCE, SELF_INTERSECTION_EPSILON};
pub use material::{Color, Dielectric, Lambertian, Material, Metal, Scatter};
pub use renderer::{color_to_rgba, gamma_correct, PixelBuffer, RenderSettings, Renderer, Rgba};
pub use sampling::{gen_f32, random_in_unit_disk, random_in_unit_sphere, row_rng};
pub use scene::{GeometryId, MaterialId, ObjectId, Scene, SceneObject};
pub use session::Session;

/// Re-export Vec3 and common math types from glint_math
pub use glint_math::{Interval, Ray, Vec3};
