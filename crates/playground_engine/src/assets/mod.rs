//! Asset loading
//!
//! Only two kinds of files are read: the cube-map faces behind the
//! environment lighting and the collision sound clip. Both are optional at
//! runtime; callers log a failed load and carry on without the feature.

mod environment_map;
mod image_loader;

pub use environment_map::{EnvironmentMap, EnvironmentMapFaces, FACE_NAMES};
pub use image_loader::ImageData;

use std::path::Path;
use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// IO error during asset loading
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Read an encoded sound clip into memory.
///
/// Decoding happens later in the audio backend; an empty file is rejected
/// here so a broken asset shows up at startup instead of on the first hit.
pub fn load_sound_clip(path: impl AsRef<Path>) -> Result<Vec<u8>, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::NotFound(path.display().to_string()));
    }
    let bytes = std::fs::read(path)?;
    if bytes.is_empty() {
        return Err(AssetError::InvalidData(format!("{} is empty", path.display())));
    }
    log::info!("Loaded sound clip {} ({} bytes)", path.display(), bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sound_clip() {
        let path = std::env::temp_dir().join(format!("playground_clip_{}.mp3", std::process::id()));
        std::fs::write(&path, [0xff, 0xfb, 0x90, 0x00]).expect("write clip");

        let bytes = load_sound_clip(&path).expect("read clip");
        let _ = std::fs::remove_file(&path);
        assert_eq!(bytes, vec![0xff, 0xfb, 0x90, 0x00]);
    }

    #[test]
    fn test_empty_and_missing_clips() {
        let path = std::env::temp_dir().join(format!("playground_empty_{}.mp3", std::process::id()));
        std::fs::write(&path, b"").expect("write clip");
        let empty = load_sound_clip(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(empty, Err(AssetError::InvalidData(_))));
        assert!(matches!(load_sound_clip("no/such/hit.mp3"), Err(AssetError::NotFound(_))));
    }
}
