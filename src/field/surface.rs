use image::RgbaImage;

use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// Owned straight-alpha RGBA8 raster the generator writes into.
#[derive(Debug)]
pub struct Surface {
    pixels: RgbaImage,
}

impl Surface {
    /// Allocate a zeroed surface, reporting allocation failure as a configuration error.
    pub fn acquire(size: PixelSize) -> GlassmapResult<Self> {
        let len = size
            .pixel_count()
            .checked_mul(4)
            .ok_or_else(|| GlassmapError::configuration("surface buffer size overflow"))?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len).map_err(|e| {
            GlassmapError::configuration(format!(
                "acquire {}x{} surface: {e}",
                size.width, size.height
            ))
        })?;
        buf.resize(len, 0u8);

        let pixels = RgbaImage::from_raw(size.width, size.height, buf).ok_or_else(|| {
            GlassmapError::configuration("surface buffer does not match its dimensions")
        })?;
        Ok(Self { pixels })
    }

    pub fn size(&self) -> PixelSize {
        let (width, height) = self.pixels.dimensions();
        PixelSize { width, height }
    }

    pub(crate) fn put(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        self.pixels.put_pixel(x, y, image::Rgba(rgba));
    }

    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }
}
