use crate::foundation::core::Vec2;

/// Signed distance from `p` to a rounded rectangle centered at the origin.
///
/// `half_extents` are the rectangle's half width/height and `radius` rounds its corners.
/// Negative inside, positive outside.
pub fn rounded_rect_sdf(p: Vec2, half_extents: Vec2, radius: f64) -> f64 {
    let qx = p.x.abs() - half_extents.x + radius;
    let qy = p.y.abs() - half_extents.y + radius;
    let outside = (qx.max(0.0).powi(2) + qy.max(0.0).powi(2)).sqrt();
    qx.max(qy).min(0.0) + outside - radius
}

#[cfg(test)]
#[path = "../../tests/unit/field/sdf.rs"]
mod tests;
