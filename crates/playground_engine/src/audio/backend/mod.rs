//! Audio backend abstraction
//!
//! The playground only needs fire-and-forget clips with per-voice volume,
//! but keeps the full control surface so tests can substitute a recording
//! backend for the real device.

pub mod rodio_backend;

pub use rodio_backend::RodioBackend;

use crate::audio::AudioError;
use std::path::Path;

/// Identifies one playing voice. Ids increase monotonically per backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SoundHandle(pub u32);

/// Audio backend trait for platform abstraction
///
/// Not `Send + Sync`: the backend lives on the frame thread.
pub trait AudioBackend {
    /// Open the output device. Calling twice is a no-op.
    fn initialize(&mut self) -> Result<(), AudioError>;

    /// Stop everything and release the device
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Forget voices that finished playing
    fn update(&mut self);

    /// Stop all playing sounds
    fn stop_all(&mut self);

    /// Play encoded audio (WAV, OGG, MP3 or FLAC bytes)
    fn play_sound(&mut self, data: &[u8]) -> Result<SoundHandle, AudioError>;

    /// Play an audio file
    fn play_sound_from_path(&mut self, path: &Path) -> Result<SoundHandle, AudioError>;

    /// Pause a playing sound
    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Resume a paused sound
    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Stop a sound. Unknown handles are ignored.
    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError>;

    /// Set volume of a sound (1.0 = unchanged)
    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError>;

    /// Get volume of a sound
    fn get_volume(&self, handle: SoundHandle) -> Result<f32, AudioError>;

    /// Whether a sound is audible right now (not paused, not finished)
    fn is_playing(&self, handle: SoundHandle) -> bool;
}

/// Open the default output device
pub fn create_backend() -> Result<Box<dyn AudioBackend>, AudioError> {
    let mut backend = Box::new(RodioBackend::new());
    backend.initialize()?;
    Ok(backend)
}
