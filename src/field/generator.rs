use crate::encode::png::EncodedDisplacementImage;
use crate::field::shape::{ShapeConfig, ShapeParams};
use crate::field::surface::Surface;
use crate::foundation::core::{PixelSize, Vec2};
use crate::foundation::error::{GlassmapError, GlassmapResult};

/// Raw per-pixel displacement vectors at oversampled resolution.
#[derive(Clone, Debug)]
pub struct DisplacementField {
    size: PixelSize,
    vectors: Vec<Vec2>,
    max_scale: f64,
}

impl DisplacementField {
    /// Evaluate the lens warp for every pixel of a `size` raster.
    pub fn compute(params: &ShapeParams, size: PixelSize) -> Self {
        let w = f64::from(size.width);
        let h = f64::from(size.height);
        let mut vectors = Vec::with_capacity(size.pixel_count());
        let mut max_abs = 0.0f64;

        for y in 0..size.height {
            for x in 0..size.width {
                let (fx, fy) = (f64::from(x), f64::from(y));
                let src = params.warp(Vec2::new(fx / w, fy / h));
                let d = Vec2::new(saturate(src.x * w - fx), saturate(src.y * h - fy));
                max_abs = max_abs.max(d.x.abs()).max(d.y.abs());
                vectors.push(d);
            }
        }

        let max_scale = if max_abs > 0.0 { max_abs.max(1.0) } else { 1.0 };
        Self {
            size,
            vectors,
            max_scale,
        }
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Normalization divisor: the largest absolute component, never below 1.
    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn get(&self, x: u32, y: u32) -> Vec2 {
        self.vectors[(y as usize) * (self.size.width as usize) + (x as usize)]
    }

    pub fn vectors(&self) -> &[Vec2] {
        &self.vectors
    }

    fn write_encoded(&self, edge_softness: f64, surface: &mut Surface) {
        for y in 0..self.size.height {
            for x in 0..self.size.width {
                let d = self.get(x, y) * edge_factor(x, y, self.size, edge_softness);
                let r = encode_channel(d.x, self.max_scale);
                let g = encode_channel(d.y, self.max_scale);
                surface.put(x, y, [r, g, g, 255]);
            }
        }
    }
}

fn saturate(v: f64) -> f64 {
    v.clamp(f64::MIN, f64::MAX)
}

/// Border fade in [0, 1]: 0 on the outermost pixels, 1 once `softness` pixels in.
///
/// A softness of exactly 0 is a hard edge that only zeroes the border itself; a
/// negative softness fades every pixel to 0.
pub fn edge_factor(x: u32, y: u32, size: PixelSize, softness: f64) -> f64 {
    let right = size.width - x - 1;
    let bottom = size.height - y - 1;
    let d = x.min(y).min(right).min(bottom);
    if softness == 0.0 {
        return if d == 0 { 0.0 } else { 1.0 };
    }
    (f64::from(d) / softness).clamp(0.0, 1.0)
}

/// Map a displacement component to a byte around the 127.5 midpoint.
pub fn encode_channel(v: f64, max_scale: f64) -> u8 {
    ((v / max_scale + 0.5).clamp(0.0, 1.0) * 255.0).round_ties_even() as u8
}

/// Displacement map generator bound to one [`ShapeConfig`] and one backing surface.
///
/// Lifecycle: `new` acquires the surface, `generate` may run any number of times, and
/// `dispose` (or drop) releases it.
#[derive(Debug)]
pub struct DisplacementGenerator {
    config: ShapeConfig,
    size: PixelSize,
    surface: Option<Surface>,
}

impl DisplacementGenerator {
    #[tracing::instrument]
    pub fn new(config: ShapeConfig) -> GlassmapResult<Self> {
        let size = config.surface_size()?;
        let surface = Surface::acquire(size)?;
        tracing::debug!(
            width = size.width,
            height = size.height,
            "acquired displacement surface"
        );
        Ok(Self {
            config,
            size,
            surface: Some(surface),
        })
    }

    pub fn config(&self) -> &ShapeConfig {
        &self.config
    }

    /// Oversampled output size.
    pub fn surface_size(&self) -> PixelSize {
        self.size
    }

    pub fn is_disposed(&self) -> bool {
        self.surface.is_none()
    }

    /// Raw field pass only, without attenuation or encoding.
    pub fn field(&self) -> GlassmapResult<DisplacementField> {
        if self.surface.is_none() {
            return Err(GlassmapError::UseAfterDispose);
        }
        Ok(DisplacementField::compute(&self.config.params, self.size))
    }

    /// Compute, normalize and encode the map. Identical configs give identical bytes.
    #[tracing::instrument(skip(self), fields(width = self.size.width, height = self.size.height))]
    pub fn generate(&mut self) -> GlassmapResult<EncodedDisplacementImage> {
        let surface = self
            .surface
            .as_mut()
            .ok_or(GlassmapError::UseAfterDispose)?;

        let field = DisplacementField::compute(&self.config.params, self.size);
        tracing::debug!(max_scale = field.max_scale(), "computed raw displacement field");

        field.write_encoded(self.config.params.edge_softness, surface);
        EncodedDisplacementImage::from_rgba(surface.image())
    }

    /// Release the backing surface. Later `generate`/`field` calls fail.
    pub fn dispose(&mut self) {
        if self.surface.take().is_some() {
            tracing::debug!("released displacement surface");
        }
    }
}

/// Build a generator, produce one map and release the surface.
pub fn generate_displacement_map(config: ShapeConfig) -> GlassmapResult<EncodedDisplacementImage> {
    let mut generator = DisplacementGenerator::new(config)?;
    let out = generator.generate();
    generator.dispose();
    out
}

#[cfg(test)]
#[path = "../../tests/unit/field/generator.rs"]
mod tests;
