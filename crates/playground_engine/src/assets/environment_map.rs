//! Cube-map environment textures
//!
//! Six square faces stored as `px.png`, `nx.png`, `py.png`, `ny.png`,
//! `pz.png` and `nz.png` in one directory.

use crate::assets::{AssetError, ImageData};
use std::path::{Path, PathBuf};

/// Face file stems in cube-map order: +X, -X, +Y, -Y, +Z, -Z
pub const FACE_NAMES: [&str; 6] = ["px", "nx", "py", "ny", "pz", "nz"];

/// Paths of the six faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentMapFaces {
    /// Face paths in [`FACE_NAMES`] order
    pub paths: [PathBuf; 6],
}

impl EnvironmentMapFaces {
    /// `<dir>/px.png` through `<dir>/nz.png`
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            paths: FACE_NAMES.map(|name| dir.join(format!("{name}.png"))),
        }
    }

    /// Decode every face; all must share one size
    pub fn load(&self) -> Result<EnvironmentMap, AssetError> {
        let mut faces = Vec::with_capacity(6);
        for path in &self.paths {
            faces.push(ImageData::from_file(path)?);
        }

        let (width, height) = (faces[0].width, faces[0].height);
        if let Some(odd) = faces.iter().position(|face| face.width != width || face.height != height) {
            return Err(AssetError::InvalidData(format!(
                "cube face {} is {}x{}, expected {}x{}",
                FACE_NAMES[odd], faces[odd].width, faces[odd].height, width, height
            )));
        }

        let faces: [ImageData; 6] = faces
            .try_into()
            .map_err(|_| AssetError::InvalidData("expected six cube faces".to_string()))?;
        log::info!("Environment map loaded ({}x{} per face)", width, height);
        Ok(EnvironmentMap { faces })
    }
}

/// Decoded cube map
#[derive(Debug, Clone)]
pub struct EnvironmentMap {
    /// Faces in [`FACE_NAMES`] order
    pub faces: [ImageData; 6],
}

impl EnvironmentMap {
    /// Edge length of each face
    pub fn face_size(&self) -> (u32, u32) {
        (self.faces[0].width, self.faces[0].height)
    }

    /// Face by stem name (`"px"`, `"nz"`, ...)
    pub fn face(&self, name: &str) -> Option<&ImageData> {
        FACE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .map(|index| &self.faces[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_faces(dir: &Path, size_of: impl Fn(usize) -> u32) {
        std::fs::create_dir_all(dir).expect("create dir");
        for (index, name) in FACE_NAMES.iter().enumerate() {
            let size = size_of(index);
            let shade = (index * 40) as u8;
            image::RgbaImage::from_pixel(size, size, image::Rgba([shade, shade, shade, 255]))
                .save(dir.join(format!("{name}.png")))
                .expect("write face");
        }
    }

    fn scratch_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("playground_envmap_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_face_paths_follow_cube_order() {
        let faces = EnvironmentMapFaces::from_dir("maps/0");
        assert_eq!(faces.paths[0], Path::new("maps/0/px.png"));
        assert_eq!(faces.paths[3], Path::new("maps/0/ny.png"));
        assert_eq!(faces.paths[5], Path::new("maps/0/nz.png"));
    }

    #[test]
    fn test_load_keeps_order() {
        let dir = scratch_dir("ok");
        write_faces(&dir, |_| 4);

        let map = EnvironmentMapFaces::from_dir(&dir).load().expect("load");
        let _ = std::fs::remove_dir_all(&dir);

        assert_eq!(map.face_size(), (4, 4));
        assert_eq!(map.face("px").map(|face| face.data[0]), Some(0));
        assert_eq!(map.face("nz").map(|face| face.data[0]), Some(200));
        assert!(map.face("up").is_none());
    }

    #[test]
    fn test_mismatched_face_is_rejected() {
        let dir = scratch_dir("mismatch");
        write_faces(&dir, |index| if index == 2 { 8 } else { 4 });

        let result = EnvironmentMapFaces::from_dir(&dir).load();
        let _ = std::fs::remove_dir_all(&dir);
        assert!(matches!(result, Err(AssetError::InvalidData(message)) if message.contains("py")));
    }

    #[test]
    fn test_missing_directory() {
        let result = EnvironmentMapFaces::from_dir(scratch_dir("missing")).load();
        assert!(matches!(result, Err(AssetError::NotFound(_))));
    }
}
