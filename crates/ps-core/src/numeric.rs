/// Floating point type used throughout the workbench
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// Round to a fixed number of decimal places.
///
/// Values too large to scale are returned unchanged; at that magnitude they
/// carry no fractional digits anyway.
pub fn round_to(v: Real, decimals: u32) -> Real {
    let scale = 10f64.powi(decimals as i32);
    let scaled = v * scale;
    if !scaled.is_finite() {
        return v;
    }
    scaled.round() / scale
}

/// Format with a fixed number of decimal places.
///
/// Values are rounded half away from zero first, so `0.625` at two places
/// reads `0.63` rather than whatever the binary expansion would give.
pub fn format_fixed(v: Real, decimals: u32) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    format!("{:.*}", decimals as usize, round_to(v, decimals))
}
