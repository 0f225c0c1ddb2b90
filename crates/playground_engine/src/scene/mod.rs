//! Scene management
//!
//! The scene is the renderable half of the playground: the floor plus one
//! object per physics body. It knows nothing about physics; the
//! [`crate::pairing`] module links the two.

mod bounds;
mod object;
mod scene_graph;

pub use bounds::Aabb;
pub use object::{MeshShape, SceneObject, SurfaceMaterial};
pub use scene_graph::{MeshId, Scene};
