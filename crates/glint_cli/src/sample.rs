//! Built-in demo scene: a row of spheres on a large ground ball.

use glint_math::Vec3;
use glint_renderer::{Color, Material, Session, Sphere};

/// Default output file for the sample render.
pub const OUTPUT: &str = "output.png";

/// Output size and quality of the sample render.
pub fn configure(session: &mut Session) {
    session.set_size(640, 480);
    session.set_samples(64);
    session.set_max_depth(10);
}

/// Populate `session` with the sample spheres and a camera matching its
/// current image size.
pub fn populate(session: &mut Session) {
    session.clear();

    // Ground with a thin water shell on top
    session.add_object(
        Sphere::new(Vec3::new(0.0, -1000.0, -1.0), 999.5),
        Material::lambertian(Color::new(0.5, 0.5, 0.5)),
    );
    session.add_object(Sphere::new(Vec3::new(0.0, -1000.0, -1.0), 999.8), Material::dielectric(1.33));

    session.add_object(
        Sphere::new(Vec3::new(-1.6, 0.0, -1.0), 0.5),
        Material::lambertian(Color::new(0.5, 0.5, 0.9)),
    );
    session.add_object(
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5),
        Material::metal(Color::new(0.85, 0.64, 0.12), 0.5),
    );
    session.add_object(
        Sphere::new(Vec3::new(1.6, 0.0, -1.0), 0.5),
        Material::metal(Color::new(0.7, 0.7, 0.7), 0.8),
    );
    session.add_object(
        Sphere::new(Vec3::new(-1.2, 0.0, 0.5), 0.5),
        Material::metal(Color::new(0.9, 0.9, 0.9), 0.0),
    );

    let from = Vec3::new(4.0, 1.0, 2.0);
    let to = Vec3::new(0.0, 0.0, -1.0);
    let aspect = session.image_aspect();
    session.set_perspective(45.0, aspect, 0.2, (to - from).length());
    session.look_at(from, to, Vec3::Y);
}
