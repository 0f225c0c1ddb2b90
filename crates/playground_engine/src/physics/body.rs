//! Rigid body descriptors

use crate::foundation::math::{utils, Quat, Vec3};
use crate::physics::PhysicsError;
use rapier3d::prelude::{ColliderBuilder, RigidBodyHandle};

/// Handle to a body living in a [`crate::physics::PhysicsWorld`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub(crate) RigidBodyHandle);

/// Collision shape of a dynamic body
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Sphere with the given radius
    Sphere {
        /// Radius
        radius: f32,
    },
    /// Box given by half extents along x, y and z
    Cuboid {
        /// Half of the edge lengths
        half_extents: Vec3,
    },
}

impl BodyShape {
    /// Box from full edge lengths
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid {
            half_extents: Vec3::new(width * 0.5, height * 0.5, depth * 0.5),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), PhysicsError> {
        let ok = match self {
            Self::Sphere { radius } => radius.is_finite() && *radius > 0.0,
            Self::Cuboid { half_extents } => {
                utils::all_finite(half_extents.as_slice()) && half_extents.min() > 0.0
            }
        };
        if ok {
            Ok(())
        } else {
            Err(PhysicsError::InvalidBody(format!("degenerate shape {self:?}")))
        }
    }

    pub(crate) fn collider_builder(&self) -> ColliderBuilder {
        match *self {
            Self::Sphere { radius } => ColliderBuilder::ball(radius),
            Self::Cuboid { half_extents } => {
                ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            }
        }
    }
}

/// Everything needed to insert a dynamic body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Collision shape
    pub shape: BodyShape,
    /// Mass in kilograms
    pub mass: f32,
    /// Initial center position
    pub position: Vec3,
    /// Initial orientation
    pub rotation: Quat,
}

impl BodyDesc {
    /// Unrotated body at `position`
    pub fn new(shape: BodyShape, mass: f32, position: Vec3) -> Self {
        Self {
            shape,
            mass,
            position,
            rotation: Quat::identity(),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), PhysicsError> {
        self.shape.validate()?;
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(PhysicsError::InvalidBody(format!("mass must be positive, got {}", self.mass)));
        }
        if !utils::all_finite(self.position.as_slice()) {
            return Err(PhysicsError::InvalidBody("position is not finite".to_string()));
        }
        Ok(())
    }
}
