//! Geometric primitives and ray intersection.

use glint_math::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
///
/// Produced by an intersection test and consumed right away by the
/// material scatter call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal (outward for spheres, against the ray for planes)
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f32,
}

/// A sphere given by its center and radius.
///
/// A negative radius is accepted and turns the normals inward, which is
/// handy for hollow glass shells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Intersect the ray with the sphere on the open interval `ray_t`.
    ///
    /// Tangent rays (zero discriminant) count as misses.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        Some(HitRecord {
            p,
            normal: (p - self.center) / self.radius,
            t: root,
        })
    }
}

/// An infinite plane: every point `p` with `normal · p = offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    normal: Vec3,
    offset: f32,
}

impl Plane {
    /// Create a new plane. The normal is normalized here; a zero normal
    /// gives a plane that nothing hits.
    pub fn new(normal: Vec3, offset: f32) -> Self {
        Self {
            normal: normal.normalize_or_zero(),
            offset,
        }
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Intersect the ray with the plane on the open interval `ray_t`.
    ///
    /// The returned normal faces against the incoming ray, so both sides
    /// of the plane behave like a front face.
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = self.normal.dot(ray.direction());
        if denom == 0.0 {
            return None;
        }

        let t = (self.offset - self.normal.dot(ray.origin())) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let normal = if denom > 0.0 { -self.normal } else { self.normal };
        Some(HitRecord {
            p: ray.at(t),
            normal,
            t,
        })
    }
}

/// Closed set of primitive shapes a scene can hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere(Sphere),
    Plane(Plane),
}

impl Geometry {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Geometry::Sphere(Sphere::new(center, radius))
    }

    pub fn plane(normal: Vec3, offset: f32) -> Self {
        Geometry::Plane(Plane::new(normal, offset))
    }

    /// Test if a ray hits this shape strictly inside `ray_t`.
    #[inline]
    pub fn intersect(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        match self {
            Geometry::Sphere(sphere) => sphere.intersect(ray, ray_t),
            Geometry::Plane(plane) => plane.intersect(ray, ray_t),
        }
    }
}

impl From<Sphere> for Geometry {
    fn from(sphere: Sphere) -> Self {
        Geometry::Sphere(sphere)
    }
}

impl From<Plane> for Geometry {
    fn from(plane: Plane) -> Self {
        Geometry::Plane(plane)
    }
}
