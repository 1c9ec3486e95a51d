//! glassmap generates displacement maps for "liquid glass" refraction effects.
//!
//! A map is a pure function of a [`ShapeConfig`]: every oversampled pixel is warped
//! towards the lens center by a rounded-rectangle SDF eased through two smooth-steps,
//! the resulting vectors are normalized, faded to zero at the border and encoded as
//! RGBA (red = dx, green = blue = dy). The encoded PNG is handed out as a data URI so a
//! CSS/SVG filter chain can consume it directly.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`ShapeConfig`] directly, or [`EffectOptions::shape_config`] from the
//!    user-facing effect settings
//! 2. **Generate**: [`DisplacementGenerator::generate`] -> [`EncodedDisplacementImage`]
//! 3. **Filter**: [`FilterParams`] + [`filter_markup`] build the SVG refraction chain
//! 4. **Preview** (optional): [`render_preview`] rasterizes a backdrop through that chain
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: the same config always yields byte-identical output.
//! - **Owned surface**: each generator owns its raster; `dispose` or drop releases it.
#![forbid(unsafe_code)]

mod effect;
mod encode;
mod field;
mod foundation;
mod preview;

pub use effect::filter::{ColorMatrix, FilterParams};
pub use effect::options::EffectOptions;
pub use effect::svg::{filter_markup, preview_document};
pub use encode::png::{
    EncodedDisplacementImage, PNG_DATA_URI_PREFIX, decode_png_rgba8, encode_png_rgba8,
    png_data_uri,
};
pub use field::ease::smooth_step;
pub use field::generator::{
    DisplacementField, DisplacementGenerator, edge_factor, encode_channel,
    generate_displacement_map,
};
pub use field::sdf::rounded_rect_sdf;
pub use field::shape::{ShapeConfig, ShapeParams};
pub use field::surface::Surface;
pub use foundation::core::{PixelSize, Size, Vec2};
pub use foundation::error::{GlassmapError, GlassmapResult};
pub use preview::{preview_effect, render_preview};
