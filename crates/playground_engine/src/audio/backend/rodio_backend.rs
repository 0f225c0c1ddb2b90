//! Rodio audio backend
//!
//! One rodio `Sink` per voice. Sinks are dropped by [`AudioBackend::update`]
//! once they run dry, so a burst of collisions does not pile up sinks.

use super::{AudioBackend, SoundHandle};
use crate::audio::AudioError;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::Path;

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Must outlive every sink
    _output_stream: Option<OutputStream>,
    stream_handle: Option<OutputStreamHandle>,
    voices: HashMap<SoundHandle, Sink>,
    next_id: u32,
}

impl RodioBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            voices: HashMap::new(),
            next_id: 0,
        }
    }

    /// Number of voices still tracked
    pub fn voice_count(&self) -> usize {
        self.voices.len()
    }

    fn next_handle(&mut self) -> SoundHandle {
        let handle = SoundHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        handle
    }

    fn start(&mut self, source: Box<dyn Source<Item = i16> + Send>) -> Result<SoundHandle, AudioError> {
        let stream_handle = self.stream_handle.as_ref().ok_or(AudioError::BackendNotInitialized)?;
        let sink = Sink::try_new(stream_handle)
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to create sink: {}", e)))?;
        sink.append(source);

        let handle = self.next_handle();
        self.voices.insert(handle, sink);
        Ok(handle)
    }

    fn voice(&self, handle: SoundHandle) -> Result<&Sink, AudioError> {
        self.voices.get(&handle).ok_or(AudioError::InvalidHandle)
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self) -> Result<(), AudioError> {
        if self.is_initialized() {
            return Ok(());
        }

        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInitFailed(format!("Failed to open audio output: {}", e)))?;
        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);

        log::info!("Rodio audio backend initialized");
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.is_initialized() {
            return;
        }
        self.stop_all();
        self.stream_handle = None;
        self._output_stream = None;
        log::info!("Rodio audio backend shut down");
    }

    fn is_initialized(&self) -> bool {
        self.stream_handle.is_some()
    }

    fn update(&mut self) {
        self.voices.retain(|_, sink| !sink.empty());
    }

    fn stop_all(&mut self) {
        for (_, sink) in self.voices.drain() {
            sink.stop();
        }
    }

    fn play_sound(&mut self, data: &[u8]) -> Result<SoundHandle, AudioError> {
        if !self.is_initialized() {
            return Err(AudioError::BackendNotInitialized);
        }
        let source = Decoder::new(Cursor::new(data.to_vec()))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
        self.start(Box::new(source))
    }

    fn play_sound_from_path(&mut self, path: &Path) -> Result<SoundHandle, AudioError> {
        if !self.is_initialized() {
            return Err(AudioError::BackendNotInitialized);
        }
        let file = File::open(path).map_err(|e| {
            AudioError::PlaybackFailed(format!("Failed to open {}: {}", path.display(), e))
        })?;
        let source = Decoder::new(BufReader::new(file))
            .map_err(|e| AudioError::PlaybackFailed(format!("Failed to decode audio: {}", e)))?;
        self.start(Box::new(source))
    }

    fn pause(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voice(handle)?.pause();
        Ok(())
    }

    fn resume(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        self.voice(handle)?.play();
        Ok(())
    }

    fn stop(&mut self, handle: SoundHandle) -> Result<(), AudioError> {
        if let Some(sink) = self.voices.remove(&handle) {
            sink.stop();
        }
        Ok(())
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) -> Result<(), AudioError> {
        self.voice(handle)?.set_volume(volume);
        Ok(())
    }

    fn get_volume(&self, handle: SoundHandle) -> Result<f32, AudioError> {
        Ok(self.voice(handle)?.volume())
    }

    fn is_playing(&self, handle: SoundHandle) -> bool {
        self.voices
            .get(&handle)
            .is_some_and(|sink| !sink.is_paused() && !sink.empty())
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Tests that need a device return early when none is available (CI).

    #[test]
    fn test_initialize_and_shutdown() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());

        if backend.initialize().is_ok() {
            assert!(backend.is_initialized());
            assert!(backend.initialize().is_ok());
            backend.shutdown();
            assert!(!backend.is_initialized());
        }
    }

    #[test]
    fn test_handles_increase() {
        let mut backend = RodioBackend::new();
        let first = backend.next_handle();
        let second = backend.next_handle();
        assert!(second > first);
    }

    #[test]
    fn test_playback_without_initialization() {
        let mut backend = RodioBackend::new();
        assert!(matches!(backend.play_sound(&[0u8; 64]), Err(AudioError::BackendNotInitialized)));
        assert!(matches!(
            backend.play_sound_from_path(Path::new("missing.mp3")),
            Err(AudioError::BackendNotInitialized)
        ));
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let mut backend = RodioBackend::new();
        if backend.initialize().is_ok() {
            assert!(matches!(backend.play_sound(&[0u8; 64]), Err(AudioError::PlaybackFailed(_))));
            assert_eq!(backend.voice_count(), 0);
        }
    }

    #[test]
    fn test_unknown_handle() {
        let mut backend = RodioBackend::new();
        let unknown = SoundHandle(999);
        assert!(matches!(backend.pause(unknown), Err(AudioError::InvalidHandle)));
        assert!(matches!(backend.set_volume(unknown, 0.5), Err(AudioError::InvalidHandle)));
        assert!(matches!(backend.get_volume(unknown), Err(AudioError::InvalidHandle)));
        assert!(backend.stop(unknown).is_ok());
        assert!(!backend.is_playing(unknown));
    }

    #[test]
    fn test_update_drops_finished_voices() {
        let mut backend = RodioBackend::new();
        if backend.initialize().is_ok() {
            let handle = backend.next_handle();
            if let Some(stream_handle) = &backend.stream_handle {
                if let Ok(sink) = Sink::try_new(stream_handle) {
                    sink.stop();
                    backend.voices.insert(handle, sink);
                }
            }
            backend.update();
            assert_eq!(backend.voice_count(), 0);
        }
    }
}
