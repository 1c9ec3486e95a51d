use std::fmt::Write as _;

use crate::effect::filter::{ColorMatrix, FilterParams, join_values};
use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassmapError, GlassmapResult};

fn check_id(id: &str) -> GlassmapResult<()> {
    let ok = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !ok {
        return Err(GlassmapError::configuration(format!(
            "filter id must be non-empty ASCII alphanumerics, '-' or '_' (got {id:?})"
        )));
    }
    Ok(())
}

fn check_href(href: &str) -> GlassmapResult<()> {
    if href.contains(['"', '<', '>', '&']) {
        return Err(GlassmapError::configuration(
            "image href must not contain XML special characters",
        ));
    }
    Ok(())
}

/// SVG `<filter>` that refracts `SourceGraphic` through the displacement map at `map_href`.
///
/// The element is `size` CSS pixels; the map is stretched over that region regardless of
/// its oversampled resolution. The chain splits the source into three displaced copies
/// (one per color channel, for chromatic aberration), recombines them, blurs the result
/// and keeps it only where the edge mask is set; the untouched source fills the center.
pub fn filter_markup(
    id: &str,
    map_href: &str,
    size: PixelSize,
    params: &FilterParams,
) -> GlassmapResult<String> {
    check_id(id)?;
    check_href(map_href)?;
    let (w, h) = (size.width, size.height);

    let mut s = String::new();
    // Writing into a String never fails.
    let _ = write!(
        s,
        r#"<filter id="{id}" filterUnits="userSpaceOnUse" primitiveUnits="userSpaceOnUse" x="0" y="0" width="{w}" height="{h}" color-interpolation-filters="sRGB">"#
    );
    let _ = write!(
        s,
        r#"<feImage x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none" xlink:href="{map_href}" result="DISPLACEMENT_MAP"/>"#
    );
    let _ = write!(
        s,
        r#"<feColorMatrix in="DISPLACEMENT_MAP" type="matrix" values="{}" result="EDGE_INTENSITY"/>"#,
        params.edge_intensity.to_svg_values()
    );
    let _ = write!(
        s,
        r#"<feComponentTransfer in="EDGE_INTENSITY" result="EDGE_MASK"><feFuncA type="discrete" tableValues="{}"/></feComponentTransfer>"#,
        join_values(&params.edge_mask_table)
    );
    s.push_str(r#"<feOffset in="SourceGraphic" dx="0" dy="0" result="CENTER_ORIGINAL"/>"#);

    let passes = [
        ("RED", params.red_scale, 0usize),
        ("GREEN", params.green_scale, 1),
        ("BLUE", params.blue_scale, 2),
    ];
    for (name, scale, channel) in passes {
        let _ = write!(
            s,
            r#"<feDisplacementMap in="SourceGraphic" in2="DISPLACEMENT_MAP" scale="{scale}" xChannelSelector="R" yChannelSelector="B" result="{name}_DISPLACED"/>"#
        );
        let _ = write!(
            s,
            r#"<feColorMatrix in="{name}_DISPLACED" type="matrix" values="{}" result="{name}_CHANNEL"/>"#,
            ColorMatrix::isolate(channel).to_svg_values()
        );
    }

    s.push_str(
        r#"<feBlend in="GREEN_CHANNEL" in2="BLUE_CHANNEL" mode="screen" result="GB_COMBINED"/>"#,
    );
    s.push_str(
        r#"<feBlend in="RED_CHANNEL" in2="GB_COMBINED" mode="screen" result="RGB_COMBINED"/>"#,
    );
    let _ = write!(
        s,
        r#"<feGaussianBlur in="RGB_COMBINED" stdDeviation="{}" result="ABERRATED_BLURRED"/>"#,
        params.blur
    );
    s.push_str(
        r#"<feComposite in="ABERRATED_BLURRED" in2="EDGE_MASK" operator="in" result="EDGE_ABERRATION"/>"#,
    );
    s.push_str(
        r#"<feComponentTransfer in="EDGE_MASK" result="INVERTED_MASK"><feFuncA type="table" tableValues="1 0"/></feComponentTransfer>"#,
    );
    s.push_str(
        r#"<feComposite in="CENTER_ORIGINAL" in2="INVERTED_MASK" operator="in" result="CENTER_CLEAN"/>"#,
    );
    s.push_str(
        r#"<feComposite in="EDGE_ABERRATION" in2="CENTER_CLEAN" operator="over" result="REFRACTED"/>"#,
    );
    let _ = write!(
        s,
        r#"<feColorMatrix in="REFRACTED" type="matrix" values="{}"/>"#,
        params.surface_enhancement.to_svg_values()
    );
    s.push_str("</filter>");
    Ok(s)
}

/// Standalone SVG document drawing `backdrop_href` through the refraction filter.
pub fn preview_document(
    backdrop_href: &str,
    map_href: &str,
    size: PixelSize,
    params: &FilterParams,
) -> GlassmapResult<String> {
    const FILTER_ID: &str = "glass";
    check_href(backdrop_href)?;
    let filter = filter_markup(FILTER_ID, map_href, size, params)?;
    let (w, h) = (size.width, size.height);
    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}"><defs>{filter}</defs><image x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="none" xlink:href="{backdrop_href}" filter="url(#{FILTER_ID})"/></svg>"#
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/effect/svg.rs"]
mod tests;
