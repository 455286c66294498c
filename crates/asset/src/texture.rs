//! Ground texture loading: any decodable image becomes tightly packed RGBA8.

use std::path::Path;

use image::ImageError;

use crate::error::{AssetError, AssetResult};

/// Texture data in CPU-friendly format before GPU upload.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl TextureData {
    pub const BYTES_PER_PIXEL: u32 = 4;

    /// Create a new RGBA8 texture with given dimensions.
    pub fn new_rgba8(width: u32, height: u32, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            (width * height * Self::BYTES_PER_PIXEL) as usize,
            "Data size doesn't match RGBA8 format"
        );
        Self { data, width, height }
    }

    /// Load and decode an image file.
    pub fn load<P: AsRef<Path>>(path: P) -> AssetResult<Self> {
        let path = path.as_ref();
        log::info!("Loading texture from {:?}", path);

        let img = image::open(path).map_err(|e| match e {
            ImageError::IoError(source) => AssetError::Resource {
                path: path.to_path_buf(),
                source,
            },
            source => AssetError::Image {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = rgba.into_raw();

        log::info!("Loaded texture {}x{} with {} bytes", width, height, data.len());

        Ok(Self::new_rgba8(width, height, data))
    }

    /// Bytes in one row of pixels.
    #[inline]
    pub fn row_bytes(&self) -> u32 {
        self.width * Self::BYTES_PER_PIXEL
    }

    /// Check if the texture data is valid.
    pub fn is_valid(&self) -> bool {
        let expected_size = (self.row_bytes() * self.height) as usize;
        self.data.len() == expected_size && self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_dimensions() {
        let tex = TextureData::new_rgba8(2, 3, vec![0; 24]);
        assert_eq!(tex.row_bytes(), 8);
        assert!(tex.is_valid());
    }

    #[test]
    #[should_panic(expected = "Data size")]
    fn rejects_short_buffer() {
        TextureData::new_rgba8(2, 2, vec![0; 4]);
    }

    #[test]
    fn loads_shipped_ground_texture() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/textures/grass_top.png");
        let tex = TextureData::load(path).expect("decode png");
        assert_eq!((tex.width, tex.height), (16, 16));
        assert!(tex.is_valid());
    }

    #[test]
    fn missing_file_is_a_resource_error() {
        let err = TextureData::load("no/such/grass.png").expect_err("fail");
        assert!(matches!(err, AssetError::Resource { .. }));
    }
}
