//! Renderable scene objects
//!
//! A scene object is renderer-agnostic: a shape, a surface description and a
//! transform. The renderer builds its GPU meshes from [`MeshShape`] using
//! unit primitives (unit sphere, cube spanning -1..1, square spanning -1..1
//! in its XY plane) scaled by [`MeshShape::unit_scale`].

use crate::foundation::math::{Transform, Vec3};
use crate::scene::Aabb;

/// Geometry of a scene object
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    /// UV sphere
    Sphere {
        /// Radius
        radius: f32,
        /// Width and height segments
        segments: u32,
    },
    /// Box with full edge lengths
    Cuboid {
        /// Extent along x
        width: f32,
        /// Extent along y
        height: f32,
        /// Extent along z
        depth: f32,
    },
    /// Flat rectangle lying in its local XY plane, facing +Z
    Plane {
        /// Extent along local x
        width: f32,
        /// Extent along local y
        depth: f32,
    },
}

impl MeshShape {
    /// Scale turning the renderer's unit primitive into this shape
    pub fn unit_scale(&self) -> Vec3 {
        match *self {
            Self::Sphere { radius, .. } => Vec3::new(radius, radius, radius),
            Self::Cuboid { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            Self::Plane { width, depth } => Vec3::new(width * 0.5, depth * 0.5, 1.0),
        }
    }

    /// Half extents in the shape's local frame
    pub fn bounding_half_extents(&self) -> Vec3 {
        match *self {
            Self::Sphere { radius, .. } => Vec3::new(radius, radius, radius),
            Self::Cuboid { width, height, depth } => Vec3::new(width, height, depth) * 0.5,
            Self::Plane { width, depth } => Vec3::new(width * 0.5, depth * 0.5, 0.0),
        }
    }
}

/// PBR surface parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMaterial {
    /// Base color (RGB, 0-255)
    pub color: [u8; 3],
    /// Metalness
    pub metalness: f32,
    /// Roughness
    pub roughness: f32,
    /// Lit by the environment map when one is loaded; otherwise flat ambient light
    pub environment_mapped: bool,
}

impl Default for SurfaceMaterial {
    fn default() -> Self {
        Self {
            color: [0xff, 0xff, 0xff],
            metalness: 0.3,
            roughness: 0.4,
            environment_mapped: true,
        }
    }
}

/// Something the renderer draws
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Geometry
    pub shape: MeshShape,
    /// Surface
    pub material: SurfaceMaterial,
    /// Position and orientation; scale stays at one, size lives in `shape`
    pub transform: Transform,
    /// Rendered into the shadow map
    pub cast_shadow: bool,
    /// Marks surfaces meant to show shadows (the floor). The three-d
    /// renderer has no per-object switch for this and shadows every model,
    /// so the flag is informational only.
    pub receive_shadow: bool,
}

impl SceneObject {
    /// Object at `transform` that casts shadows
    pub fn new(shape: MeshShape, material: SurfaceMaterial, transform: Transform) -> Self {
        Self {
            shape,
            material,
            transform,
            cast_shadow: true,
            receive_shadow: false,
        }
    }

    /// Builder-style toggle for shadow flags
    pub fn with_shadows(mut self, cast: bool, receive: bool) -> Self {
        self.cast_shadow = cast;
        self.receive_shadow = receive;
        self
    }

    /// World-space bounds
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_transformed(self.shape.bounding_half_extents(), &self.transform)
    }
}
