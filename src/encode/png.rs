use std::path::Path;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ExtendedColorType, ImageEncoder, RgbaImage, codecs::png::PngEncoder};

use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// Prefix of every data URI produced by [`EncodedDisplacementImage::data_uri`].
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// PNG-encoded displacement map.
///
/// Red carries horizontal displacement, green and blue both carry vertical displacement
/// and alpha is opaque, so filters may select either R/G or R/B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedDisplacementImage {
    size: PixelSize,
    png: Vec<u8>,
}

impl EncodedDisplacementImage {
    /// Encode an RGBA8 raster as PNG.
    pub fn from_rgba(img: &RgbaImage) -> GlassmapResult<Self> {
        let (width, height) = img.dimensions();
        Ok(Self {
            size: PixelSize { width, height },
            png: encode_png_rgba8(img)?,
        })
    }

    /// Wrap existing PNG bytes, reading their dimensions.
    pub fn from_png_bytes(png: Vec<u8>) -> GlassmapResult<Self> {
        let img = decode_png_rgba8(&png)?;
        let (width, height) = img.dimensions();
        Ok(Self {
            size: PixelSize { width, height },
            png,
        })
    }

    /// Parse a `data:image/png;base64,` URI.
    pub fn decode_data_uri(uri: &str) -> GlassmapResult<Self> {
        let payload = uri.strip_prefix(PNG_DATA_URI_PREFIX).ok_or_else(|| {
            GlassmapError::configuration("expected a data:image/png;base64 URI")
        })?;
        let png = STANDARD
            .decode(payload.trim())
            .context("decode data URI base64 payload")?;
        Self::from_png_bytes(png)
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn png_bytes(&self) -> &[u8] {
        &self.png
    }

    pub fn into_png_bytes(self) -> Vec<u8> {
        self.png
    }

    /// Embed the PNG as a data URI, ready for `href`/`url()` consumers.
    pub fn data_uri(&self) -> String {
        png_data_uri(&self.png)
    }

    /// Decode back to straight RGBA8 for pixel inspection.
    pub fn to_rgba8(&self) -> GlassmapResult<RgbaImage> {
        decode_png_rgba8(&self.png)
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> GlassmapResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(path, &self.png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Encode straight RGBA8 pixels as a PNG byte stream.
pub fn encode_png_rgba8(img: &RgbaImage) -> GlassmapResult<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf)
        .write_image(img.as_raw(), width, height, ExtendedColorType::Rgba8)
        .context("encode png")?;
    Ok(buf)
}

pub fn decode_png_rgba8(png: &[u8]) -> GlassmapResult<RgbaImage> {
    let img = image::load_from_memory_with_format(png, image::ImageFormat::Png)
        .context("decode png from memory")?;
    Ok(img.to_rgba8())
}

pub fn png_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut uri);
    uri
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
