//! Random sampling helpers.
//!
//! There is no global generator: every function takes the caller's RNG,
//! and the driver hands each image row its own seeded generator.

use glint_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Draw a uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Uniform float in [-1, 1).
#[inline]
fn gen_signed(rng: &mut dyn RngCore) -> f32 {
    gen_f32(rng) * 2.0 - 1.0
}

/// Sample a point strictly inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_signed(rng), gen_signed(rng), gen_signed(rng));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sample a point strictly inside the unit disk on the XY plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(gen_signed(rng), gen_signed(rng), 0.0);
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Build the generator for one image row.
///
/// Seeding per row keeps renders reproducible for a given seed no matter
/// how rows are distributed across workers.
pub fn row_rng(seed: u64, row: u32) -> StdRng {
    // SplitMix64 finalizer so neighbouring rows get unrelated streams
    let mut z = seed ^ (u64::from(row).wrapping_add(1)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    StdRng::seed_from_u64(z ^ (z >> 31))
}
