//! JSON scene descriptions.
//!
//! A description mirrors the session API: output size and quality, one
//! camera, and a list of geometry + material pairs.
//!
//! ```json
//! {
//!   "size": [320, 240],
//!   "samples": 16,
//!   "max_depth": 8,
//!   "camera": { "from": [0, 0, 1], "to": [0, 0, 0], "fov": 45 },
//!   "objects": [
//!     { "geometry": { "type": "sphere", "center": [0, 0, -1], "radius": 0.5 },
//!       "material": { "type": "metal", "albedo": [0.8, 0.8, 0.8], "fuzz": 0.1 } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glint_math::Vec3;
use glint_renderer::{Camera, Color, Geometry, Material, Session};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub size: Option<[u32; 2]>,
    #[serde(default)]
    pub samples: Option<u32>,
    #[serde(default)]
    pub max_depth: Option<u32>,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub camera: Option<CameraDescription>,
    #[serde(default)]
    pub objects: Vec<ObjectDescription>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    pub from: [f32; 3],
    pub to: [f32; 3],
    #[serde(default = "default_up")]
    pub up: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default)]
    pub aspect: Option<f32>,
    #[serde(default)]
    pub aperture: f32,
    /// Defaults to the distance between `from` and `to`
    #[serde(default)]
    pub focus_distance: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ObjectDescription {
    pub geometry: GeometryDescription,
    pub material: MaterialDescription,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GeometryDescription {
    Sphere { center: [f32; 3], radius: f32 },
    Plane { normal: [f32; 3], offset: f32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MaterialDescription {
    Lambertian {
        albedo: [f32; 3],
    },
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },
    Dielectric {
        ior: f32,
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f32 {
    45.0
}

impl From<&GeometryDescription> for Geometry {
    fn from(description: &GeometryDescription) -> Self {
        match *description {
            GeometryDescription::Sphere { center, radius } => Geometry::sphere(Vec3::from(center), radius),
            GeometryDescription::Plane { normal, offset } => Geometry::plane(Vec3::from(normal), offset),
        }
    }
}

impl From<&MaterialDescription> for Material {
    fn from(description: &MaterialDescription) -> Self {
        match *description {
            MaterialDescription::Lambertian { albedo } => Material::lambertian(Color::from(albedo)),
            MaterialDescription::Metal { albedo, fuzz } => Material::metal(Color::from(albedo), fuzz),
            MaterialDescription::Dielectric { ior } => Material::dielectric(ior),
        }
    }
}

impl CameraDescription {
    /// Build the camera; `image_aspect` fills in a missing aspect ratio.
    pub fn to_camera(&self, image_aspect: f32) -> Camera {
        let from = Vec3::from(self.from);
        let to = Vec3::from(self.to);
        let focus_distance = self.focus_distance.unwrap_or_else(|| (to - from).length());
        Camera::new(
            from,
            to,
            Vec3::from(self.up),
            self.fov,
            self.aspect.unwrap_or(image_aspect),
            self.aperture,
            focus_distance,
        )
    }
}

impl SceneDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid scene description")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).with_context(|| format!("Failed to read scene {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("Failed to parse scene {}", path.display()))
    }

    /// Output size and quality.
    pub fn apply_settings(&self, session: &mut Session) {
        if let Some([width, height]) = self.size {
            session.set_size(width, height);
        }
        if let Some(samples) = self.samples {
            session.set_samples(samples);
        }
        if let Some(max_depth) = self.max_depth {
            session.set_max_depth(max_depth);
        }
    }

    /// Camera and objects. A camera without an explicit aspect takes the
    /// session's image size at this point, so size changes go first.
    pub fn apply_scene(&self, session: &mut Session) {
        if let Some(camera) = &self.camera {
            session.set_camera(camera.to_camera(session.image_aspect()));
        }

        session.clear();
        for object in &self.objects {
            session.add_object(Geometry::from(&object.geometry), Material::from(&object.material));
        }
        log::info!("Loaded scene with {} objects", self.objects.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "size": [320, 160],
        "samples": 8,
        "max_depth": 4,
        "output": "out.png",
        "camera": { "from": [0, 0, 4], "to": [0, 0, 0], "aperture": 0.1 },
        "objects": [
            { "geometry": { "type": "sphere", "center": [0, 0, -1], "radius": 0.5 },
              "material": { "type": "lambertian", "albedo": [0.5, 0.5, 0.9] } },
            { "geometry": { "type": "plane", "normal": [0, 1, 0], "offset": -0.5 },
              "material": { "type": "metal", "albedo": [0.9, 0.9, 0.9] } },
            { "geometry": { "type": "sphere", "center": [1, 0, -1], "radius": -0.45 },
              "material": { "type": "dielectric", "ior": 1.5 } }
        ]
    }"#;

    #[test]
    fn test_parse_full_description() {
        let description = SceneDescription::from_json(SCENE).unwrap();

        assert_eq!(description.size, Some([320, 160]));
        assert_eq!(description.output.as_deref(), Some("out.png"));
        assert_eq!(description.objects.len(), 3);
        assert_eq!(
            description.objects[1].material,
            MaterialDescription::Metal {
                albedo: [0.9, 0.9, 0.9],
                fuzz: 0.0
            }
        );

        let camera = description.camera.as_ref().unwrap();
        assert_eq!(camera.up, [0.0, 1.0, 0.0]);
        assert_eq!(camera.fov, 45.0);
    }

    #[test]
    fn test_apply_configures_session() {
        let description = SceneDescription::from_json(SCENE).unwrap();
        let mut session = Session::new();
        description.apply_settings(&mut session);
        description.apply_scene(&mut session);

        let settings = session.renderer().settings();
        assert_eq!((settings.width, settings.height), (320, 160));
        assert_eq!(settings.samples_per_pixel, 8);
        assert_eq!(settings.max_depth, 4);
        assert_eq!(session.scene().len(), 3);

        let camera = session.camera();
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 4.0));
        // Aspect follows the image, focus follows the target distance
        assert_eq!(camera.aspect(), 2.0);
        assert_eq!(camera.focus_dist(), 4.0);
        assert!((camera.lens_radius() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_camera_aspect_follows_size_set_before_scene() {
        let description = SceneDescription::from_json(SCENE).unwrap();
        let mut session = Session::new();
        description.apply_settings(&mut session);
        session.set_size(320, 320);
        description.apply_scene(&mut session);

        assert_eq!(session.camera().aspect(), 1.0);
    }

    #[test]
    fn test_explicit_aspect_is_kept() {
        let json = r#"{ "size": [100, 50], "camera": { "from": [0, 0, 1], "to": [0, 0, 0], "aspect": 1.5 } }"#;
        let description = SceneDescription::from_json(json).unwrap();
        let mut session = Session::new();
        description.apply_settings(&mut session);
        description.apply_scene(&mut session);

        assert_eq!(session.camera().aspect(), 1.5);
    }

    #[test]
    fn test_minimal_description_keeps_defaults() {
        let description = SceneDescription::from_json("{}").unwrap();
        let mut session = Session::new();
        description.apply_settings(&mut session);
        description.apply_scene(&mut session);

        assert_eq!(session.renderer().settings().width, 640);
        assert!(session.scene().is_empty());
    }

    #[test]
    fn test_unknown_material_is_rejected() {
        let json = r#"{ "objects": [ { "geometry": { "type": "sphere", "center": [0, 0, 0], "radius": 1 },
                                       "material": { "type": "emissive", "color": [1, 1, 1] } } ] }"#;
        assert!(SceneDescription::from_json(json).is_err());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = SceneDescription::load("/nonexistent/scene.json").unwrap_err();
        assert!(err.to_string().contains("Failed to read scene"));
    }
}
