use crate::foundation::error::{GlassmapError, GlassmapResult};

pub use kurbo::{Size, Vec2};

/// Raster dimensions in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelSize {
    pub width: u32,
    pub height: u32,
}

impl PixelSize {
    /// Largest side accepted for a backing surface.
    pub const MAX_SIDE: u32 = 16_384;

    pub fn new(width: u32, height: u32) -> GlassmapResult<Self> {
        if width == 0 || height == 0 {
            return Err(GlassmapError::configuration(format!(
                "width and height must be > 0 (got {width}x{height})"
            )));
        }
        Ok(Self { width, height })
    }

    /// Measured element size (fractional CSS pixels) to whole pixels, at least 1 per side.
    pub fn from_css(size: Size) -> Self {
        fn side(v: f64) -> u32 {
            v.floor().max(1.0) as u32
        }
        Self {
            width: side(size.width),
            height: side(size.height),
        }
    }

    /// Multiply both sides by `factor`, rejecting results no surface can hold.
    pub fn scaled(self, factor: u32) -> GlassmapResult<Self> {
        if factor == 0 {
            return Err(GlassmapError::configuration("oversampling must be >= 1"));
        }
        let w = self.width.checked_mul(factor);
        let h = self.height.checked_mul(factor);
        match (w, h) {
            (Some(w), Some(h)) if w <= Self::MAX_SIDE && h <= Self::MAX_SIDE => Ok(Self {
                width: w,
                height: h,
            }),
            _ => Err(GlassmapError::configuration(format!(
                "surface too large: {}x{} at {factor}x oversampling (max {m}x{m})",
                self.width,
                self.height,
                m = Self::MAX_SIDE
            ))),
        }
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }
}
