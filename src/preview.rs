use anyhow::Context;
use image::RgbaImage;

use crate::effect::filter::FilterParams;
use crate::effect::options::EffectOptions;
use crate::effect::svg::preview_document;
use crate::encode::png::{EncodedDisplacementImage, encode_png_rgba8, png_data_uri};
use crate::field::generator::generate_displacement_map;
use crate::foundation::core::{PixelSize, Size};
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// Rasterize `backdrop` through the refraction filter driven by `map`.
///
/// The backdrop is stretched over the `size` element, matching how a page paints a
/// full-bleed background behind the glass. Output is straight-alpha RGBA8 of `size`.
#[tracing::instrument(skip(backdrop, map, params), fields(width = size.width, height = size.height))]
pub fn render_preview(
    backdrop: &RgbaImage,
    map: &EncodedDisplacementImage,
    params: &FilterParams,
    size: PixelSize,
) -> GlassmapResult<RgbaImage> {
    let backdrop_href = png_data_uri(&encode_png_rgba8(backdrop)?);
    let doc = preview_document(&backdrop_href, &map.data_uri(), size, params)?;

    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_str(&doc, &opts).context("parse preview svg tree")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| GlassmapError::configuration("failed to allocate preview pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(bytes = doc.len(), "rendered preview document");

    let mut out = RgbaImage::new(size.width, size.height);
    for (dst, px) in out.pixels_mut().zip(pixmap.pixels()) {
        let c = px.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

/// Generate the map for `options` at `element` size and render the preview in one go.
pub fn preview_effect(
    backdrop: &RgbaImage,
    options: &EffectOptions,
    intensity: f64,
    element: Size,
) -> GlassmapResult<RgbaImage> {
    let config = options.shape_config(element);
    let params = FilterParams::new(options, intensity)?;
    let map = generate_displacement_map(config)?;
    let size = PixelSize::new(config.width, config.height)?;
    render_preview(backdrop, &map, &params, size)
}
