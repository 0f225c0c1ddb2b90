//! Contact material shared by every collider

use rapier3d::prelude::{CoefficientCombineRule, ColliderBuilder};

/// Friction and restitution applied to a contact.
///
/// Every collider in the world, floor included, carries the same material
/// and combines with the average rule, so each contact resolves with exactly
/// these coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactMaterial {
    /// Coulomb friction coefficient
    pub friction: f32,
    /// Bounciness, 0 = no bounce, 1 = perfectly elastic
    pub restitution: f32,
}

impl Default for ContactMaterial {
    fn default() -> Self {
        Self {
            friction: 0.1,
            restitution: 0.7,
        }
    }
}

impl ContactMaterial {
    /// Create a material
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self { friction, restitution }
    }

    /// Apply this material to a collider builder
    pub(crate) fn apply(&self, builder: ColliderBuilder) -> ColliderBuilder {
        builder
            .friction(self.friction)
            .restitution(self.restitution)
            .friction_combine_rule(CoefficientCombineRule::Average)
            .restitution_combine_rule(CoefficientCombineRule::Average)
    }
}
