//! Flat scene storage
//!
//! Objects are never removed, so slotmap iteration order is insertion order.

use crate::foundation::math::Transform;
use crate::scene::SceneObject;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of an object in a [`Scene`]
    pub struct MeshId;
}

/// Everything the renderer draws, in insertion order
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<MeshId, SceneObject>,
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object and return its key
    pub fn add(&mut self, object: SceneObject) -> MeshId {
        let id = self.objects.insert(object);
        log::trace!("Scene object {:?} added ({} total)", id, self.objects.len());
        id
    }

    /// Look up an object
    pub fn get(&self, id: MeshId) -> Option<&SceneObject> {
        self.objects.get(id)
    }

    /// Look up an object mutably
    pub fn get_mut(&mut self, id: MeshId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id)
    }

    /// Replace an object's transform. Returns false for an unknown key.
    pub fn set_transform(&mut self, id: MeshId, transform: Transform) -> bool {
        match self.objects.get_mut(id) {
            Some(object) => {
                object.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene has no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate objects in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &SceneObject)> {
        self.objects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::{MeshShape, SurfaceMaterial};

    fn sphere(x: f32) -> SceneObject {
        SceneObject::new(
            MeshShape::Sphere { radius: 0.5, segments: 20 },
            SurfaceMaterial::default(),
            Transform::from_position(Vec3::new(x, 0.0, 0.0)),
        )
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut scene = Scene::new();
        let ids: Vec<MeshId> = (0..5).map(|i| scene.add(sphere(i as f32))).collect();

        let iterated: Vec<MeshId> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(iterated, ids);
        assert_eq!(scene.len(), 5);
    }

    #[test]
    fn test_set_transform() {
        let mut scene = Scene::new();
        let id = scene.add(sphere(0.0));
        let moved = Transform::from_position(Vec3::new(1.0, 2.0, 3.0));

        assert!(scene.set_transform(id, moved));
        assert_eq!(scene.get(id).map(|object| object.transform), Some(moved));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let mut other = Scene::new();
        other.add(sphere(0.0));
        let foreign = other.add(sphere(1.0));

        let mut scene = Scene::new();
        scene.add(sphere(0.0));
        assert!(scene.get(foreign).is_none());
        assert!(!scene.set_transform(foreign, Transform::identity()));
    }
}
