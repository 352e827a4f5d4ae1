use crate::unit::atomic::{AtomicUnit, EXP_EPSILON};
use crate::unit::expression::UnitExpression;

/// True when converting between `source` and `target` requires an affine
/// transform rather than a multiplicative ratio: both are a single
/// first-power unit of the same dimension and at least one carries an
/// affine offset (temperature scales).
pub fn is_affine_conversion(source: &UnitExpression, target: &UnitExpression) -> bool {
    match (source.single(), target.single()) {
        (Some(s), Some(t)) => {
            s.dimension == t.dimension
                && (s.offset.is_some() || t.offset.is_some())
                && (s.exp - 1.0).abs() < EXP_EPSILON
                && (t.exp - 1.0).abs() < EXP_EPSILON
        }
        _ => false,
    }
}

/// Scale and shift for the affine pair: a value `v` in `source` becomes
/// `v * scale + shift` in `target`. Derived by passing through the
/// dimension base: `base = v * m_s + o_s`, `v' = (base - o_t) / m_t`.
pub fn affine_coefficients(source: &AtomicUnit, target: &AtomicUnit) -> (f64, f64) {
    let source_offset = source.offset.unwrap_or(0.0);
    let target_offset = target.offset.unwrap_or(0.0);
    let scale = source.magnitude / target.magnitude;
    let shift = (source_offset - target_offset) / target.magnitude;
    (scale, shift)
}
