//! Impact detection
//!
//! Rapier reports a collision event when two colliders start touching. At
//! that moment the solver has not yet resolved the contact, so the bodies'
//! velocities still describe the approach. The closing speed along the
//! contact normal is what drives the hit sound.

use crate::foundation::math::Vec3;
use crate::physics::BodyHandle;
use rapier3d::prelude::*;
use std::sync::Mutex;

/// A new contact between two bodies
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// First body of the pair
    pub body1: BodyHandle,
    /// Second body of the pair
    pub body2: BodyHandle,
    /// Closing speed along the contact normal (m/s, never negative)
    pub speed: f32,
    /// World-space contact point
    pub point: Vec3,
}

impl Impact {
    /// Whether `body` is one of the two bodies
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body1 == body || self.body2 == body
    }
}

/// Rapier event handler that records impacts during a step.
///
/// Rapier requires handlers to be `Send + Sync`; the mutex is never contended.
#[derive(Debug, Default)]
pub(crate) struct ImpactCollector {
    impacts: Mutex<Vec<Impact>>,
}

impl ImpactCollector {
    /// Take everything recorded since the last drain
    pub(crate) fn drain(&self) -> Vec<Impact> {
        match self.impacts.lock() {
            Ok(mut impacts) => std::mem::take(&mut *impacts),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn record(&self, impact: Impact) {
        match self.impacts.lock() {
            Ok(mut impacts) => impacts.push(impact),
            Err(poisoned) => poisoned.into_inner().push(impact),
        }
    }
}

impl EventHandler for ImpactCollector {
    fn handle_collision_event(
        &self,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        if !event.started() {
            return;
        }
        let Some(pair) = contact_pair else {
            return;
        };
        if let Some(impact) = measure_impact(bodies, colliders, pair) {
            log::trace!("Impact {:?} <-> {:?} at {:.2} m/s", impact.body1, impact.body2, impact.speed);
            self.record(impact);
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Closing speed of a contact pair at its deepest point
fn measure_impact(bodies: &RigidBodySet, colliders: &ColliderSet, pair: &ContactPair) -> Option<Impact> {
    let collider1 = colliders.get(pair.collider1)?;
    let collider2 = colliders.get(pair.collider2)?;
    let handle1 = collider1.parent()?;
    let handle2 = collider2.parent()?;
    let body1 = bodies.get(handle1)?;
    let body2 = bodies.get(handle2)?;

    let manifold = pair.manifolds.iter().find(|manifold| !manifold.points.is_empty())?;
    let contact = manifold
        .points
        .iter()
        .min_by(|a, b| a.dist.total_cmp(&b.dist))?;

    let point = collider1.position() * contact.local_p1;
    let normal = collider1.position() * manifold.local_n1;
    let relative = body1.velocity_at_point(&point) - body2.velocity_at_point(&point);

    Some(Impact {
        body1: BodyHandle(handle1),
        body2: BodyHandle(handle2),
        speed: relative.dot(&normal).abs(),
        point: point.coords,
    })
}
