//! # Playground Engine
//!
//! A physics playground: spheres and boxes drop onto a floor, bounce with
//! restitution 0.7, and settle. A debug panel spawns more of them and a
//! collision sound plays on hard impacts.
//!
//! ## Layout
//!
//! - [`physics`]: rapier world with a static floor and fixed-step stepping
//! - [`scene`]: renderable objects, independent of any GPU API
//! - [`pairing`]: mesh/body pairs and the per-frame transform copy
//! - [`playground`]: the owning context tying the above together
//! - [`render`]: orbit camera math and the three-d renderer
//! - [`audio`], [`assets`], [`ui`]: hit sound, file loading, debug panel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use playground_engine::prelude::*;
//!
//! struct Demo;
//!
//! impl Application for Demo {
//!     fn initialize(&mut self, playground: &mut Playground) -> Result<(), AppError> {
//!         playground.create_sphere(0.5, Vec3::new(0.0, 3.0, 0.0))?;
//!         Ok(())
//!     }
//!
//!     fn on_debug_action(&mut self, playground: &mut Playground, action: DebugAction) -> Result<(), AppError> {
//!         playground.apply(action, &mut rand::thread_rng())?;
//!         Ok(())
//!     }
//!
//!     fn cleanup(&mut self, _playground: &mut Playground) {}
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     Engine::run(PlaygroundConfig::default(), Demo)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

pub mod assets;
pub mod audio;
pub mod config;
pub mod core;
pub mod foundation;
pub mod pairing;
pub mod physics;
pub mod playground;
pub mod render;
pub mod scene;
pub mod ui;

mod application;
mod engine;

pub use application::{AppError, Application};
pub use engine::{Engine, EngineError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::Config,
        core::{InitialObject, PlaygroundConfig},
        foundation::math::{Transform, Vec3},
        pairing::{ObjectKind, ObjectPairing},
        physics::PhysicsError,
        playground::{FrameReport, Playground},
        ui::DebugAction,
        AppError, Application, Engine, EngineError,
    };
}
