use crate::effect::options::EffectOptions;
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// 4x5 row-major `feColorMatrix` values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorMatrix(pub [f64; 20]);

impl ColorMatrix {
    pub const IDENTITY: Self = Self([
        1.0, 0.0, 0.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0, //
    ]);

    /// Keep one color channel (0 = R, 1 = G, 2 = B) and alpha, zero the rest.
    pub fn isolate(channel: usize) -> Self {
        let mut m = [0.0; 20];
        m[channel * 5 + channel] = 1.0;
        m[18] = 1.0;
        Self(m)
    }

    /// Space-separated values as expected by the SVG `values` attribute.
    pub fn to_svg_values(&self) -> String {
        join_values(&self.0)
    }
}

pub(crate) fn join_values(vs: &[f64]) -> String {
    vs.iter()
        .map(|v| format!("{v}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Numbers for the refraction filter chain derived from [`EffectOptions`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterParams {
    /// `feDisplacementMap` scale for the red pass (slightly stronger).
    pub red_scale: f64,
    pub green_scale: f64,
    /// `feDisplacementMap` scale for the blue pass (slightly weaker).
    pub blue_scale: f64,
    /// Gaussian blur applied to the recombined aberration layer.
    pub blur: f64,
    /// Discrete alpha table turning edge intensity into a mask.
    pub edge_mask_table: Vec<f64>,
    /// Scaled channel sum of the map, written to every channel including alpha.
    pub edge_intensity: ColorMatrix,
    pub surface_enhancement: ColorMatrix,
}

impl FilterParams {
    /// Derive filter numbers for the given effect strength in `[0, 1]`.
    pub fn new(options: &EffectOptions, intensity: f64) -> GlassmapResult<Self> {
        if !intensity.is_finite() || !(0.0..=1.0).contains(&intensity) {
            return Err(GlassmapError::configuration(format!(
                "intensity must be within [0, 1] (got {intensity})"
            )));
        }

        let base = options.displacement_scale * options.displacement_curvature * intensity;
        let aberration = options.aberration_intensity * 0.01;
        let blur = (options.glass_blur * 0.02 * options.refraction_depth * intensity).max(0.12);

        // Alpha carries the intensity so the mask table can threshold it.
        let e = 0.3 * options.surface_reflection;
        let edge_intensity = ColorMatrix([
            e, e, e, 0.0, 0.0, //
            e, e, e, 0.0, 0.0, //
            e, e, e, 0.0, 0.0, //
            e, e, e, 0.0, 0.0, //
        ]);

        let c = 1.0 + (options.glass_saturation - 180.0) / 300.0;
        let lift = (1.0 + options.surface_reflection * 0.2) * 0.1;
        let surface_enhancement = ColorMatrix([
            c, 0.0, 0.0, 0.0, lift, //
            0.0, c, 0.0, 0.0, lift, //
            0.0, 0.0, c, 0.0, lift, //
            0.0, 0.0, 0.0, 1.0, 0.0, //
        ]);

        Ok(Self {
            red_scale: base * (1.0 + aberration),
            green_scale: base,
            blue_scale: base * (1.0 - aberration),
            blur,
            edge_mask_table: vec![0.0, 0.1, 1.0],
            edge_intensity,
            surface_enhancement,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/filter.rs"]
mod tests;
