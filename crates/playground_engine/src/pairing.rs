//! Mesh and body pairings
//!
//! Each dynamic object lives twice: as a [`SceneObject`](crate::scene::SceneObject)
//! the renderer draws and as a rigid body the physics world moves. A pairing
//! records both keys so the body's pose can be copied onto the mesh once per
//! frame. Pairings are only ever appended.

use crate::foundation::math::Transform;
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::scene::{MeshId, Scene};

/// What kind of object a pairing holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    /// Sphere
    Sphere,
    /// Box
    Box,
}

/// A mesh and the body that drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectPairing {
    /// Shape family
    pub kind: ObjectKind,
    /// Scene key
    pub mesh: MeshId,
    /// Physics key
    pub body: BodyHandle,
}

/// Append-only list of pairings
#[derive(Debug, Default, Clone)]
pub struct PairingSet {
    pairings: Vec<ObjectPairing>,
}

impl PairingSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pairing
    pub fn push(&mut self, pairing: ObjectPairing) {
        self.pairings.push(pairing);
    }

    /// Number of pairings
    pub fn len(&self) -> usize {
        self.pairings.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.pairings.is_empty()
    }

    /// Iterate in creation order
    pub fn iter(&self) -> impl Iterator<Item = &ObjectPairing> {
        self.pairings.iter()
    }

    /// Pairing driven by `body`
    pub fn find_by_body(&self, body: BodyHandle) -> Option<&ObjectPairing> {
        self.pairings.iter().find(|pairing| pairing.body == body)
    }

    /// Number of pairings of one kind
    pub fn count_of(&self, kind: ObjectKind) -> usize {
        self.pairings.iter().filter(|pairing| pairing.kind == kind).count()
    }
}

/// Copy every paired body's position and orientation onto its mesh.
///
/// Scale is left alone. Returns the number of meshes updated.
pub fn sync_transforms(world: &PhysicsWorld, scene: &mut Scene, pairings: &PairingSet) -> usize {
    let mut updated = 0;
    for pairing in pairings.iter() {
        let Some(pose) = world.body_transform(pairing.body) else {
            log::warn!("Pairing {:?} refers to a missing body", pairing);
            continue;
        };
        let Some(object) = scene.get_mut(pairing.mesh) else {
            log::warn!("Pairing {:?} refers to a missing mesh", pairing);
            continue;
        };
        object.transform = Transform {
            position: pose.position,
            rotation: pose.rotation,
            scale: object.transform.scale,
        };
        updated += 1;
    }
    updated
}
