//! Scene storage and nearest-hit queries.
//!
//! The scene owns its geometry and materials in arenas and objects refer
//! to them through typed handles, so an object can never outlive the
//! shape or material it points at.

use std::sync::atomic::{AtomicU64, Ordering};

use glint_math::{Interval, Ray};

use crate::error::SceneError;
use crate::geometry::{Geometry, HitRecord};
use crate::material::Material;

/// Source of arena stamps; every scene and every `clear` takes a fresh one.
static NEXT_STAMP: AtomicU64 = AtomicU64::new(1);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a geometry stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeometryId {
    index: usize,
    stamp: u64,
}

/// Handle to a material stored in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId {
    index: usize,
    stamp: u64,
}

/// Handle to an object (geometry + material pair) in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

impl GeometryId {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl MaterialId {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A renderable object: one geometry paired with one material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneObject {
    pub geometry: GeometryId,
    pub material: MaterialId,
}

/// Unordered collection of objects queried by nearest hit.
///
/// Intersection is a linear scan; there is no acceleration structure.
/// Handles carry the stamp of the arenas that issued them, so handles
/// from another scene or from before a [`Scene::clear`] are rejected.
#[derive(Debug, Clone)]
pub struct Scene {
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
    objects: Vec<SceneObject>,
    stamp: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            geometries: Vec::new(),
            materials: Vec::new(),
            objects: Vec::new(),
            stamp: next_stamp(),
        }
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a geometry and return its handle.
    pub fn add_geometry(&mut self, geometry: impl Into<Geometry>) -> GeometryId {
        self.geometries.push(geometry.into());
        GeometryId {
            index: self.geometries.len() - 1,
            stamp: self.stamp,
        }
    }

    /// Store a material and return its handle.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId {
            index: self.materials.len() - 1,
            stamp: self.stamp,
        }
    }

    /// Register an object pairing previously stored geometry and material.
    ///
    /// Both handles may be shared by several objects.
    pub fn add_object(&mut self, geometry: GeometryId, material: MaterialId) -> Result<ObjectId, SceneError> {
        let Some(shape) = self.geometry(geometry) else {
            return Err(SceneError::UnknownGeometry(geometry.index));
        };
        let Some(surface) = self.material(material) else {
            return Err(SceneError::UnknownMaterial(material.index));
        };

        log::debug!("Added object {} ({:?} with {:?})", self.objects.len(), shape, surface);
        self.objects.push(SceneObject { geometry, material });
        Ok(ObjectId(self.objects.len() - 1))
    }

    /// Store a geometry and material and register them as one object.
    pub fn insert(&mut self, geometry: impl Into<Geometry>, material: impl Into<Material>) -> ObjectId {
        let geometry = self.add_geometry(geometry);
        let material = self.add_material(material);
        log::debug!(
            "Added object {} ({:?} with {:?})",
            self.objects.len(),
            self.geometries[geometry.index],
            self.materials[material.index]
        );
        self.objects.push(SceneObject { geometry, material });
        ObjectId(self.objects.len() - 1)
    }

    /// Remove all objects, geometry and materials.
    ///
    /// Handles issued before the call are rejected afterwards.
    pub fn clear(&mut self) {
        log::debug!("Clearing scene with {} objects", self.objects.len());
        self.objects.clear();
        self.geometries.clear();
        self.materials.clear();
        self.stamp = next_stamp();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All registered objects in registration order.
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        if id.stamp != self.stamp {
            return None;
        }
        self.geometries.get(id.index)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        if id.stamp != self.stamp {
            return None;
        }
        self.materials.get(id.index)
    }

    /// Find the nearest object hit by `ray` strictly inside `ray_t`.
    ///
    /// Each object is tested on `(ray_t.min, closest_so_far)`, so a later
    /// object must be strictly closer to replace the current best. On
    /// exactly equal distances the earliest registered object wins.
    pub fn trace(&self, ray: &Ray, ray_t: Interval) -> Option<(&SceneObject, HitRecord)> {
        let mut closest: Option<(&SceneObject, HitRecord)> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            let geometry = &self.geometries[object.geometry.index];
            if let Some(rec) = geometry.intersect(ray, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some((object, rec));
            }
        }

        closest
    }
}
