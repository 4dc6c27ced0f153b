//! Camera for ray generation.

use glint_math::{Ray, Vec3};
use rand::RngCore;

use crate::sampling::random_in_unit_disk;

/// Parameters that shape the view frustum and lens.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Perspective {
    vfov: f32, // Vertical field of view in degrees
    aspect: f32,
    aperture: f32,
    focus_dist: f32, // Distance from camera to plane of perfect focus
}

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Orientation {
    look_from: Vec3,
    look_at: Vec3,
    vup: Vec3,
}

/// Basis and focal-plane rectangle derived from perspective and orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3, // unit right axis
    vertical: Vec3,   // unit up axis
    width: f32,
    height: f32,
    lens_radius: f32,
}

impl Frame {
    fn derive(perspective: &Perspective, orientation: &Orientation) -> Self {
        let theta = perspective.vfov.to_radians();
        let half_height = (theta / 2.0).tan() * perspective.focus_dist;
        let half_width = perspective.aspect * half_height;

        // Calculate camera basis vectors
        let direction = (orientation.look_at - orientation.look_from).normalize_or_zero();
        let horizontal = direction.cross(orientation.vup).normalize_or_zero();
        let vertical = horizontal.cross(direction).normalize_or_zero();

        let width = 2.0 * half_width;
        let height = 2.0 * half_height;
        let lower_left = orientation.look_from + perspective.focus_dist * direction
            - (width * horizontal + height * vertical) * 0.5;

        Self {
            origin: orientation.look_from,
            lower_left,
            horizontal,
            vertical,
            width,
            height,
            lens_radius: perspective.aperture / 2.0,
        }
    }
}

/// Thin-lens camera mapping image-plane coordinates to world-space rays.
///
/// Every setter recomputes the whole derived frame before returning, so
/// the basis always matches the last parameters set.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    perspective: Perspective,
    orientation: Orientation,
    frame: Frame,
}

impl Camera {
    /// Create a camera at `look_from` aimed at `look_at`.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect`: image width over height
    /// - `aperture`: lens diameter, 0 for a pinhole
    /// - `focus_dist`: distance to the plane in perfect focus
    pub fn new(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect: f32,
        aperture: f32,
        focus_dist: f32,
    ) -> Self {
        let perspective = Perspective {
            vfov,
            aspect,
            aperture,
            focus_dist,
        };
        let orientation = Orientation {
            look_from,
            look_at,
            vup,
        };
        Self {
            perspective,
            orientation,
            frame: Frame::derive(&perspective, &orientation),
        }
    }

    /// Change field of view, aspect ratio and lens settings.
    pub fn set_perspective(&mut self, vfov: f32, aspect: f32, aperture: f32, focus_dist: f32) {
        self.perspective = Perspective {
            vfov,
            aspect,
            aperture,
            focus_dist,
        };
        self.update();
    }

    /// Re-aim the camera.
    pub fn look_at(&mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) {
        self.orientation = Orientation {
            look_from,
            look_at,
            vup,
        };
        self.update();
    }

    /// Builder form of [`Camera::set_perspective`].
    pub fn with_perspective(mut self, vfov: f32, aspect: f32, aperture: f32, focus_dist: f32) -> Self {
        self.set_perspective(vfov, aspect, aperture, focus_dist);
        self
    }

    /// Builder form of [`Camera::look_at`].
    pub fn with_position(mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) -> Self {
        self.look_at(look_from, look_at, vup);
        self
    }

    fn update(&mut self) {
        self.frame = Frame::derive(&self.perspective, &self.orientation);
        log::debug!(
            "Camera at {:?} looking at {:?}, fov {:.1}, aperture {:.3}",
            self.orientation.look_from,
            self.orientation.look_at,
            self.perspective.vfov,
            self.perspective.aperture
        );
    }

    pub fn position(&self) -> Vec3 {
        self.orientation.look_from
    }

    pub fn target(&self) -> Vec3 {
        self.orientation.look_at
    }

    pub fn vfov(&self) -> f32 {
        self.perspective.vfov
    }

    pub fn aspect(&self) -> f32 {
        self.perspective.aspect
    }

    pub fn lens_radius(&self) -> f32 {
        self.frame.lens_radius
    }

    pub fn focus_dist(&self) -> f32 {
        self.perspective.focus_dist
    }

    /// Generate a ray through image-plane coordinates `(u, v)`.
    ///
    /// `u` runs left to right and `v` bottom to top, both in [0, 1]. With
    /// a non-zero aperture the origin is jittered across the lens disk.
    pub fn get_ray(&self, u: f32, v: f32, rng: &mut dyn RngCore) -> Ray {
        let frame = &self.frame;
        let from = if frame.lens_radius > 0.0 {
            let rnd = random_in_unit_disk(rng) * frame.lens_radius;
            frame.origin + frame.horizontal * rnd.x + frame.vertical * rnd.y
        } else {
            frame.origin
        };

        let to = frame.lower_left + frame.horizontal * frame.width * u + frame.vertical * frame.height * v;
        Ray::towards(from, to - from)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y, 45.0, 1.33, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f32 = 1e-5;

    fn square_camera() -> Camera {
        Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = square_camera();
        let mut rng = StdRng::seed_from_u64(42);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::ZERO);
        assert!((ray.direction() - Vec3::NEG_Z).length() < EPS);
    }

    #[test]
    fn test_corner_rays_span_field_of_view() {
        let camera = square_camera();
        let mut rng = StdRng::seed_from_u64(42);

        // 90 degree fov at focus distance 1 puts the corners at (+-1, +-1, -1)
        let top_left = camera.get_ray(0.0, 1.0, &mut rng);
        assert!((top_left.direction() - Vec3::new(-1.0, 1.0, -1.0).normalize()).length() < EPS);

        let bottom_right = camera.get_ray(1.0, 0.0, &mut rng);
        assert!((bottom_right.direction() - Vec3::new(1.0, -1.0, -1.0).normalize()).length() < EPS);
    }

    #[test]
    fn test_aperture_jitters_origin_but_keeps_focus() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 60.0, 1.0, 0.5, 4.0);
        let mut rng = StdRng::seed_from_u64(3);

        let focus_point = Vec3::new(0.0, 0.0, -4.0);
        for _ in 0..100 {
            let ray = camera.get_ray(0.5, 0.5, &mut rng);
            assert!(ray.origin().length() < 0.25 + EPS);
            assert!(ray.origin().z.abs() < EPS);
            // All rays through the image center converge on the focal plane
            let t = -4.0 / ray.direction().z;
            assert!((ray.at(t) - focus_point).length() < 1e-4);
        }
    }

    #[test]
    fn test_look_at_recomputes_basis() {
        let mut camera = square_camera();
        camera.look_at(Vec3::new(5.0, 0.0, 0.0), Vec3::ZERO, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        let ray = camera.get_ray(0.5, 0.5, &mut rng);
        assert_eq!(ray.origin(), Vec3::new(5.0, 0.0, 0.0));
        assert!((ray.direction() - Vec3::NEG_X).length() < EPS);
        assert_eq!(camera.position(), Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_set_perspective_recomputes_extent() {
        let mut camera = square_camera();
        let mut rng = StdRng::seed_from_u64(1);
        let wide = camera.get_ray(1.0, 0.5, &mut rng).direction();

        camera.set_perspective(30.0, 1.0, 0.0, 1.0);
        let narrow = camera.get_ray(1.0, 0.5, &mut rng).direction();

        assert!(narrow.x < wide.x);
        assert_eq!(camera.vfov(), 30.0);
        assert_eq!(camera, square_camera().with_perspective(30.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn test_aspect_widens_horizontal_extent() {
        let camera = Camera::new(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y, 90.0, 2.0, 0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let right = camera.get_ray(1.0, 0.5, &mut rng);
        assert!((right.direction() - Vec3::new(2.0, 0.0, -1.0).normalize()).length() < EPS);
    }
}
