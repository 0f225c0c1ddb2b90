//! Collision audio
//!
//! A backend trait over the platform audio library plus the hit sound that
//! reacts to hard impacts.

pub mod backend;
mod hit_sound;

pub use backend::{AudioBackend, SoundHandle};
pub use hit_sound::HitSound;

#[cfg(test)]
pub(crate) use hit_sound::tests::RecordingBackend;

use thiserror::Error;

/// Audio errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// Playback attempted before `initialize`
    #[error("Audio backend not initialized")]
    BackendNotInitialized,

    /// No output device or the device refused the stream
    #[error("Audio backend initialization failed: {0}")]
    BackendInitFailed(String),

    /// Decoding or sink creation failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// The handle does not name an active sound
    #[error("Invalid sound handle")]
    InvalidHandle,
}
