//! Surface scattering models.

use glint_math::{Ray, Vec3};
use rand::RngCore;

use crate::geometry::HitRecord;
use crate::sampling::{gen_f32, random_in_unit_sphere};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    /// Per-channel multiplier applied to light arriving along `ray`
    pub attenuation: Color,
    /// The outgoing ray, with a unit direction
    pub ray: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    /// Never absorbs.
    pub fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
        let direction = (rec.normal + random_in_unit_sphere(rng))
            .try_normalize()
            // Catch degenerate scatter direction
            .unwrap_or(rec.normal);

        Scatter {
            attenuation: self.albedo,
            ray: Ray::new(rec.p, direction),
        }
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Largest accepted roughness.
    pub const MAX_FUZZ: f32 = 0.5;

    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, clamped to [0, 0.5]
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, Self::MAX_FUZZ),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        // The mirror direction only leaves the surface if the ray came from the front
        if ray_in.direction().dot(rec.normal) >= 0.0 {
            return None;
        }

        let reflected = reflect(ray_in.direction(), rec.normal);
        let direction = if self.fuzz > 0.0 {
            (reflected + self.fuzz * random_in_unit_sphere(rng)).normalize_or_zero()
        } else {
            reflected.normalize_or_zero()
        };

        Some(Scatter {
            attenuation: self.albedo,
            ray: Ray::new(rec.p, direction),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.33 = water, 1.5 = glass)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    /// Always scatters; glass does not absorb.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Scatter {
        let direction = ray_in.direction();
        let ddn = direction.dot(rec.normal);

        // Leaving the medium when travelling along the outward normal
        let (normal, ratio, cosine) = if ddn > 0.0 {
            let cosine = (1.0 - self.ior * self.ior * (1.0 - ddn * ddn)).sqrt();
            (-rec.normal, self.ior, cosine)
        } else {
            (rec.normal, 1.0 / self.ior, -ddn)
        };

        let refracted = refract(direction, normal, ratio);
        let reflect_prob = match refracted {
            Some(_) => Self::reflectance(cosine, self.ior),
            // Total internal reflection
            None => 1.0,
        };

        // One uniform per event, drawn even under total internal reflection
        let choice = gen_f32(rng);
        let outgoing = match refracted {
            Some(refracted) if choice >= reflect_prob => refracted,
            _ => reflect(direction, rec.normal),
        };

        Scatter {
            attenuation: Color::ONE,
            ray: Ray::new(rec.p, outgoing.normalize_or_zero()),
        }
    }
}

/// Closed set of surface responses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Material {
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian(Lambertian::new(albedo))
    }

    pub fn metal(albedo: Color, fuzz: f32) -> Self {
        Material::Metal(Metal::new(albedo, fuzz))
    }

    pub fn dielectric(ior: f32) -> Self {
        Material::Dielectric(Dielectric::new(ior))
    }

    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and scattered ray, or None if the ray is
    /// absorbed.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Lambertian(m) => Some(m.scatter(rec, rng)),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => Some(m.scatter(ray_in, rec, rng)),
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

/// Reflect a vector about a normal.
#[inline]
pub(crate) fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit vector through a surface whose normal faces against it.
///
/// Returns None when Snell's law has no solution.
#[inline]
pub(crate) fn refract(v: Vec3, n: Vec3, ratio: f32) -> Option<Vec3> {
    let cos_theta = v.dot(n);
    let d = 1.0 - ratio * ratio * (1.0 - cos_theta * cos_theta);
    if d > 0.0 {
        Some(ratio * v - (cos_theta * ratio + d.sqrt()) * n)
    } else {
        None
    }
}
