//! Decoded RGB rasters.

use std::io::Cursor;

use image::{ImageFormat, RgbImage};

/// An image decoded into 8-bit RGB.
///
/// Whatever the source format (grayscale, palette, RGBA...), the raster is
/// converted to three channels on construction, so classifiers never see
/// anything else.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    raster: RgbImage,
}

impl DecodedImage {
    /// Decode raw bytes, guessing the format from the content.
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let dynamic = image::load_from_memory(bytes)?;
        Ok(Self {
            raster: dynamic.to_rgb8(),
        })
    }

    /// Wrap an existing RGB raster.
    pub fn from_rgb(raster: RgbImage) -> Self {
        Self { raster }
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    pub fn raster(&self) -> &RgbImage {
        &self.raster
    }

    /// Re-encode as PNG (lossless, so scorers see exactly these pixels).
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());
        self.raster.write_to(&mut buffer, ImageFormat::Png)?;
        Ok(buffer.into_inner())
    }
}
