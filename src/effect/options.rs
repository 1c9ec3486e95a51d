use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::field::shape::{ShapeConfig, ShapeParams};
use crate::foundation::core::Size;
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// User-tunable glass effect settings that drive the map and its filter chain.
///
/// JSON keys are camelCase. Besides the flat keys, loading accepts nested
/// `distortion: { start, end, offset }` and `scaling: { start, end }` blocks and the
/// legacy `surfaceCurvature` alias; see [`EffectOptions::from_reader`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectOptions {
    pub displacement_scale: f64,
    pub aberration_intensity: f64,
    pub displacement_curvature: f64,

    pub glass_blur: f64,
    pub glass_saturation: f64,
    pub refraction_depth: f64,
    pub surface_reflection: f64,

    pub shader_corner_radius: f64,
    pub shader_distortion_start: f64,
    pub shader_distortion_end: f64,
    pub shader_distortion_offset: f64,
    pub shader_scaling_start: f64,
    pub shader_scaling_end: f64,
}

impl Default for EffectOptions {
    fn default() -> Self {
        Self {
            displacement_scale: 65.0,
            aberration_intensity: 2.8,
            displacement_curvature: 1.8,

            glass_blur: 25.0,
            glass_saturation: 185.0,
            refraction_depth: 2.0,
            surface_reflection: 0.45,

            shader_corner_radius: 0.2,
            shader_distortion_start: 0.3,
            shader_distortion_end: 0.2,
            shader_distortion_offset: 0.15,
            shader_scaling_start: 0.0,
            shader_scaling_end: 1.0,
        }
    }
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct EffectOptionsDef {
    #[serde(flatten)]
    base: EffectOptions,
    surface_curvature: Option<f64>,
    distortion: Option<DistortionDef>,
    scaling: Option<ScalingDef>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct DistortionDef {
    start: Option<f64>,
    end: Option<f64>,
    offset: Option<f64>,
}

#[derive(Debug, Default, serde::Deserialize)]
struct ScalingDef {
    start: Option<f64>,
    end: Option<f64>,
}

impl EffectOptionsDef {
    fn resolve(self) -> EffectOptions {
        let mut o = self.base;
        if let Some(v) = self.surface_curvature {
            o.displacement_curvature = v;
        }
        if let Some(d) = self.distortion {
            o.shader_distortion_start = d.start.unwrap_or(o.shader_distortion_start);
            o.shader_distortion_end = d.end.unwrap_or(o.shader_distortion_end);
            o.shader_distortion_offset = d.offset.unwrap_or(o.shader_distortion_offset);
        }
        if let Some(s) = self.scaling {
            o.shader_scaling_start = s.start.unwrap_or(o.shader_scaling_start);
            o.shader_scaling_end = s.end.unwrap_or(o.shader_scaling_end);
        }
        o
    }
}

impl EffectOptions {
    /// Parse options from a JSON reader, applying nested blocks and aliases over the flat keys.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlassmapResult<Self> {
        let def: EffectOptionsDef = serde_json::from_reader(r)
            .map_err(|e| GlassmapError::serde(format!("parse effect options JSON: {e}")))?;
        Ok(def.resolve())
    }

    pub fn from_json_str(s: &str) -> GlassmapResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlassmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlassmapError::configuration(format!(
                "open effect options JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Generator config for an element of the given measured size.
    ///
    /// Only the corner radius and the distortion/scaling thresholds come from the options;
    /// the remaining lens parameters keep their defaults.
    pub fn shape_config(&self, element: Size) -> ShapeConfig {
        ShapeConfig::for_element(element).with_params(ShapeParams {
            corner_radius: self.shader_corner_radius,
            distortion_start: self.shader_distortion_start,
            distortion_end: self.shader_distortion_end,
            distortion_offset: self.shader_distortion_offset,
            scaling_start: self.shader_scaling_start,
            scaling_end: self.shader_scaling_end,
            ..ShapeParams::default()
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/options.rs"]
mod tests;
