use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::field::ease::smooth_step;
use crate::field::sdf::rounded_rect_sdf;
use crate::foundation::core::{PixelSize, Size, Vec2};
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// Lens shape and distortion thresholds, in unit-square coordinates unless noted.
///
/// Every field has a default, so JSON configs only need the values they change.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShapeParams {
    /// Corner rounding of the lens rectangle.
    pub corner_radius: f64,
    /// Half width of the inner (undistorted) rectangle.
    #[serde(alias = "rectWidth")]
    pub inner_half_width: f64,
    /// Half height of the inner (undistorted) rectangle.
    #[serde(alias = "rectHeight")]
    pub inner_half_height: f64,
    /// Supersampling factor applied to both axes.
    pub oversampling: u32,
    /// SDF value (after offset) where the distortion ease starts.
    pub distortion_start: f64,
    /// SDF value (after offset) where the distortion ease ends.
    pub distortion_end: f64,
    /// Shift applied to the SDF before the distortion ease.
    pub distortion_offset: f64,
    /// Lower threshold of the scaling ease, fed by the distortion output.
    pub scaling_start: f64,
    /// Upper threshold of the scaling ease.
    pub scaling_end: f64,
    /// Horizontal shift of the lens center from 0.5.
    pub center_offset_x: f64,
    /// Vertical shift of the lens center from 0.5.
    pub center_offset_y: f64,
    /// Width of the border fade, in oversampled pixels.
    pub edge_softness: f64,
}

impl Default for ShapeParams {
    fn default() -> Self {
        Self {
            corner_radius: 0.2,
            inner_half_width: 0.0,
            inner_half_height: 0.0,
            oversampling: 2,
            distortion_start: 0.3,
            distortion_end: 0.0,
            distortion_offset: 0.15,
            scaling_start: 0.0,
            scaling_end: 1.0,
            center_offset_x: 0.0,
            center_offset_y: 0.0,
            edge_softness: 2.0,
        }
    }
}

impl ShapeParams {
    pub fn center(&self) -> Vec2 {
        Vec2::new(0.5 + self.center_offset_x, 0.5 + self.center_offset_y)
    }

    /// Map a unit-square sample position to the position it should read from.
    ///
    /// The distortion ease runs on the offset SDF and its output drives the scaling
    /// ease; the two stages are not interchangeable.
    pub fn warp(&self, uv: Vec2) -> Vec2 {
        let center = self.center();
        let local = uv - center;
        let half = Vec2::new(self.inner_half_width, self.inner_half_height);
        let distance = rounded_rect_sdf(local, half, self.corner_radius);
        let displacement = smooth_step(
            self.distortion_start,
            self.distortion_end,
            distance - self.distortion_offset,
        );
        let scale = smooth_step(self.scaling_start, self.scaling_end, displacement);
        local * scale + center
    }

    fn validate(&self) -> GlassmapResult<()> {
        let floats = [
            ("cornerRadius", self.corner_radius),
            ("innerHalfWidth", self.inner_half_width),
            ("innerHalfHeight", self.inner_half_height),
            ("distortionStart", self.distortion_start),
            ("distortionEnd", self.distortion_end),
            ("distortionOffset", self.distortion_offset),
            ("scalingStart", self.scaling_start),
            ("scalingEnd", self.scaling_end),
            ("centerOffsetX", self.center_offset_x),
            ("centerOffsetY", self.center_offset_y),
            ("edgeSoftness", self.edge_softness),
        ];
        for (name, v) in floats {
            if !v.is_finite() {
                return Err(GlassmapError::configuration(format!(
                    "{name} must be finite (got {v})"
                )));
            }
        }
        if self.oversampling == 0 {
            return Err(GlassmapError::configuration("oversampling must be >= 1"));
        }
        if self.edge_softness < 0.0 {
            return Err(GlassmapError::configuration(format!(
                "edgeSoftness must be >= 0 (got {})",
                self.edge_softness
            )));
        }
        Ok(())
    }
}

/// Target region plus lens parameters for one displacement map.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ShapeConfig {
    /// Output width in pixels, before oversampling.
    pub width: u32,
    /// Output height in pixels, before oversampling.
    pub height: u32,
    #[serde(flatten)]
    pub params: ShapeParams,
}

impl ShapeConfig {
    /// Config with default lens parameters. Sizes are checked when a generator is built.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            params: ShapeParams::default(),
        }
    }

    /// Config for a measured element; fractional sizes are floored to at least 1px.
    pub fn for_element(size: Size) -> Self {
        let px = PixelSize::from_css(size);
        Self::new(px.width, px.height)
    }

    pub fn with_params(mut self, params: ShapeParams) -> Self {
        self.params = params;
        self
    }

    /// Validate the config and return the oversampled surface size.
    pub fn surface_size(&self) -> GlassmapResult<PixelSize> {
        self.params.validate()?;
        PixelSize::new(self.width, self.height)?.scaled(self.params.oversampling)
    }

    /// Parse a config from a JSON reader.
    ///
    /// Malformed JSON is a `Serde` error; a width or height that is not a positive
    /// `u32` is a `Configuration` error.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlassmapResult<Self> {
        let def: ShapeConfigDef = serde_json::from_reader(r)
            .map_err(|e| GlassmapError::serde(format!("parse shape config JSON: {e}")))?;
        Ok(Self {
            width: side("width", def.width)?,
            height: side("height", def.height)?,
            params: def.params,
        })
    }

    pub fn from_json_str(s: &str) -> GlassmapResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlassmapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlassmapError::configuration(format!(
                "open shape config JSON '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[derive(serde::Deserialize)]
struct ShapeConfigDef {
    width: i64,
    height: i64,
    #[serde(flatten)]
    params: ShapeParams,
}

fn side(name: &str, v: i64) -> GlassmapResult<u32> {
    match u32::try_from(v) {
        Ok(px) if px > 0 => Ok(px),
        _ => Err(GlassmapError::configuration(format!(
            "{name} must be a positive pixel count (got {v})"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/field/shape.rs"]
mod tests;
