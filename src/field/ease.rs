/// Cubic Hermite ease of `x` across the window `[a, b]`.
///
/// `a > b` is allowed and runs the ease backwards. A zero-width window (`a == b`)
/// degrades to a hard step: `0.0` below `a`, `1.0` at or above it.
pub fn smooth_step(a: f64, b: f64, x: f64) -> f64 {
    let span = b - a;
    if span == 0.0 {
        return if x < a { 0.0 } else { 1.0 };
    }
    let t = (x - a) / span;
    if t.is_nan() {
        // inf / inf: only the sign of the ratio is meaningful.
        return if (x - a).signum() == span.signum() { 1.0 } else { 0.0 };
    }
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "../../tests/unit/field/ease.rs"]
mod tests;
