//! Scene construction API for front ends.
//!
//! A `Session` bundles the scene, camera and renderer that a scene
//! description manipulates, and renders straight to an image file.

use std::path::Path;

use glint_math::Vec3;

use crate::error::RenderResult;
use crate::geometry::Geometry;
use crate::material::Material;
use crate::renderer::{PixelBuffer, RenderSettings, Renderer};
use crate::scene::{ObjectId, Scene};
use crate::Camera;

#[derive(Debug, Clone, Default)]
pub struct Session {
    scene: Scene,
    camera: Camera,
    renderer: Renderer,
}

impl Session {
    /// 640x480 at 64 spp and depth 10, camera at (0, 0, 1) facing the origin.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: RenderSettings) -> Self {
        Self {
            renderer: Renderer::new(settings),
            ..Self::default()
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Add a geometry + material pair.
    pub fn add_object(&mut self, geometry: impl Into<Geometry>, material: impl Into<Material>) -> ObjectId {
        self.scene.insert(geometry, material)
    }

    /// Remove every object from the scene.
    pub fn clear(&mut self) {
        self.scene.clear();
    }

    pub fn set_perspective(&mut self, vfov: f32, aspect: f32, aperture: f32, focus_dist: f32) {
        self.camera.set_perspective(vfov, aspect, aperture, focus_dist);
    }

    pub fn look_at(&mut self, look_from: Vec3, look_at: Vec3, vup: Vec3) {
        self.camera.look_at(look_from, look_at, vup);
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.renderer.set_size(width, height);
    }

    /// Width over height of the output image, 1 for an empty image.
    pub fn image_aspect(&self) -> f32 {
        let settings = self.renderer.settings();
        if settings.height > 0 {
            settings.width as f32 / settings.height as f32
        } else {
            1.0
        }
    }

    pub fn set_samples(&mut self, samples_per_pixel: u32) {
        self.renderer.set_samples(samples_per_pixel);
    }

    pub fn set_max_depth(&mut self, max_depth: u32) {
        self.renderer.set_max_depth(max_depth);
    }

    /// Render the current scene through the current camera.
    pub fn render(&mut self) -> RenderResult<&PixelBuffer> {
        self.renderer.render(&self.scene, &self.camera)
    }

    /// Render and write the image to `path`.
    ///
    /// A failed write is reported to the caller; the rendered buffer
    /// stays available through [`Renderer::image`].
    pub fn render_to_file(&mut self, path: impl AsRef<Path>) -> RenderResult<()> {
        self.render()?.save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, RenderError, Sphere};

    #[test]
    fn test_session_defaults() {
        let session = Session::new();
        let settings = session.renderer().settings();
        assert_eq!((settings.width, settings.height), (640, 480));
        assert_eq!(settings.samples_per_pixel, 64);
        assert_eq!(settings.max_depth, 10);
        assert_eq!(session.camera().position(), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(session.camera().vfov(), 45.0);
    }

    #[test]
    fn test_session_builds_and_clears_scene() {
        let mut session = Session::new();
        session.add_object(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5), Material::lambertian(Color::ONE));
        session.add_object(Geometry::plane(Vec3::Y, -0.5), Material::metal(Color::ONE, 0.1));
        assert_eq!(session.scene().len(), 2);

        session.clear();
        assert!(session.scene().is_empty());
    }

    #[test]
    fn test_session_render_uses_configured_size() {
        let mut session = Session::new();
        session.set_size(12, 9);
        session.set_samples(1);
        session.set_max_depth(2);
        session.set_perspective(60.0, 12.0 / 9.0, 0.0, 1.0);
        session.look_at(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO, Vec3::Y);
        session.add_object(Sphere::new(Vec3::ZERO, 0.5), Material::dielectric(1.5));

        let image = session.render().unwrap();
        assert_eq!((image.width(), image.height()), (12, 9));
    }

    #[test]
    fn test_image_aspect_follows_size() {
        let mut session = Session::new();
        assert!((session.image_aspect() - 4.0 / 3.0).abs() < 1e-6);

        session.set_size(480, 270);
        assert!((session.image_aspect() - 16.0 / 9.0).abs() < 1e-6);

        session.set_size(10, 0);
        assert_eq!(session.image_aspect(), 1.0);
    }

    #[test]
    fn test_render_to_file_reports_bad_path() {
        let mut session = Session::new();
        session.set_size(4, 4);
        session.set_samples(1);

        let path = std::env::temp_dir().join("glint-missing-dir").join("nested").join("out.png");
        match session.render_to_file(&path) {
            Err(RenderError::Image { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected image error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_to_file_writes_image() {
        let mut session = Session::new();
        session.set_size(6, 4);
        session.set_samples(1);

        let path = std::env::temp_dir().join(format!("glint-session-{}.png", std::process::id()));
        session.render_to_file(&path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
