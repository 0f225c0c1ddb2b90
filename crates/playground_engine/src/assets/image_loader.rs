//! Image decoding for cube-map faces

use crate::assets::AssetError;
use std::path::Path;

/// Decoded RGBA8 pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Row-major RGBA bytes
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file, converting it to RGBA8
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }

        let decoded = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let image = Self::from_rgba(decoded.to_rgba8());
        log::debug!("Loaded image {}x{} from {}", image.width, image.height, path.display());
        Ok(image)
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|e| AssetError::InvalidData(format!("Failed to decode image: {}", e)))?;
        Ok(Self::from_rgba(decoded.to_rgba8()))
    }

    /// Single-color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixels = width as usize * height as usize;
        Self {
            data: color.repeat(pixels),
            width,
            height,
        }
    }

    fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        Self {
            data: rgba.into_raw(),
            width,
            height,
        }
    }

    /// Pixels as `[r, g, b, a]` quads
    pub fn pixels(&self) -> Vec<[u8; 4]> {
        self.data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let image = ImageData::solid_color(4, 2, [255, 0, 0, 255]);
        assert_eq!(image.data.len(), 4 * 2 * 4);
        assert_eq!(image.pixels().len(), 8);
        assert!(image.pixels().iter().all(|px| *px == [255, 0, 0, 255]));
    }

    #[test]
    fn test_png_bytes_decode() {
        let source = image::RgbaImage::from_pixel(3, 5, image::Rgba([10, 20, 30, 255]));
        let mut encoded = std::io::Cursor::new(Vec::new());
        source
            .write_to(&mut encoded, image::ImageFormat::Png)
            .expect("encode png");

        let image = ImageData::from_bytes(encoded.get_ref()).expect("decode png");
        assert_eq!((image.width, image.height), (3, 5));
        assert_eq!(image.pixels()[0], [10, 20, 30, 255]);
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(matches!(ImageData::from_bytes(&[1, 2, 3]), Err(AssetError::InvalidData(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ImageData::from_file("does/not/exist.png"),
            Err(AssetError::NotFound(_))
        ));
    }
}
