//! Impact sound
//!
//! A single voice: every hit that is hard enough cuts off the previous one
//! and starts the clip again from the beginning at a random volume.

use crate::audio::{AudioBackend, AudioError, SoundHandle};
use crate::core::AudioConfig;
use rand::Rng;
use std::sync::Arc;

/// Plays the collision clip for impacts above a speed threshold
#[derive(Debug, Clone)]
pub struct HitSound {
    clip: Arc<[u8]>,
    threshold: f32,
    min_volume: f32,
    max_volume: f32,
    current: Option<SoundHandle>,
}

impl HitSound {
    /// Wrap encoded clip bytes with the configured threshold and volume range
    pub fn new(clip: impl Into<Arc<[u8]>>, config: &AudioConfig) -> Self {
        Self {
            clip: clip.into(),
            threshold: config.impact_threshold,
            min_volume: config.min_volume,
            max_volume: config.max_volume.max(config.min_volume),
            current: None,
        }
    }

    /// Impacts must be strictly faster than this to play
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Voice started by the last accepted impact
    pub fn current(&self) -> Option<SoundHandle> {
        self.current
    }

    /// React to an impact of `speed` m/s.
    ///
    /// Returns the new voice, or `None` when the impact was too soft.
    pub fn on_impact<R: Rng + ?Sized>(
        &mut self,
        speed: f32,
        backend: &mut dyn AudioBackend,
        rng: &mut R,
    ) -> Result<Option<SoundHandle>, AudioError> {
        if speed.is_nan() || speed <= self.threshold {
            return Ok(None);
        }

        if let Some(previous) = self.current.take() {
            backend.stop(previous)?;
        }

        let handle = backend.play_sound(&self.clip)?;
        let volume = rng.gen_range(self.min_volume..=self.max_volume);
        backend.set_volume(handle, volume)?;
        self.current = Some(handle);

        log::debug!("Hit sound {:?} at {:.2} m/s, volume {:.2}", handle, speed, volume);
        Ok(Some(handle))
    }
}
