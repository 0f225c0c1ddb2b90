//! Application trait and lifecycle management

use crate::engine::EngineError;
use crate::physics::PhysicsError;
use crate::playground::Playground;
use crate::ui::DebugAction;
use thiserror::Error;

/// Application lifecycle trait
///
/// Implement this trait to decide what the playground starts with and how
/// debug-panel actions are handled. The engine owns the window and the frame
/// loop and hands the [`Playground`] to each hook.
pub trait Application {
    /// Called once before the first frame. Create the initial objects here.
    fn initialize(&mut self, playground: &mut Playground) -> Result<(), AppError>;

    /// Called every frame after physics has stepped
    ///
    /// # Arguments
    /// * `playground` - The simulation, already advanced to this frame
    /// * `delta_time` - Time since last frame in seconds
    fn update(&mut self, playground: &mut Playground, delta_time: f32) -> Result<(), AppError> {
        let _ = (playground, delta_time);
        Ok(())
    }

    /// Called for every debug-panel button press, before physics steps
    fn on_debug_action(&mut self, playground: &mut Playground, action: DebugAction) -> Result<(), AppError>;

    /// Called once when the loop exits
    fn cleanup(&mut self, playground: &mut Playground);
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// An object could not be created
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Custom application error
    #[error("Application error: {0}")]
    Custom(String),
}
