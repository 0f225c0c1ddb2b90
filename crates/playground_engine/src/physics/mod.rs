//! Rigid-body simulation
//!
//! A thin layer over rapier: gravity, one shared contact material, a static
//! floor plane, dynamic spheres and boxes, and a fixed-timestep stepper that
//! reports contacts as they begin.

pub mod body;
pub mod contact;
pub mod material;
pub mod world;

pub use body::{BodyDesc, BodyHandle, BodyShape};
pub use contact::Impact;
pub use material::ContactMaterial;
pub use world::{PhysicsWorld, StepReport};

use thiserror::Error;

/// Physics errors
#[derive(Error, Debug)]
pub enum PhysicsError {
    /// A body description was rejected before insertion
    #[error("Invalid body: {0}")]
    InvalidBody(String),
}
