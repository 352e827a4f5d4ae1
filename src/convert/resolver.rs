use crate::convert::affine::{affine_coefficients, is_affine_conversion};
use crate::error::UnitError;
use crate::quantity::Quantity;
use crate::unit::expression::UnitExpression;
use lazy_static::lazy_static;

lazy_static! {
    /// The substance-per-mass bridging unit. A conversion left with a
    /// residual mass/substance imbalance can be completed by a caller-supplied
    /// quantity in these units (or any dimensionally equivalent ones).
    static ref BRIDGE_UNITS: UnitExpression =
        UnitExpression::parse("g/mol").expect("bridge units must parse");
}

/// The numeric transform taking a value from one unit expression to another.
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Pure multiplicative ratio.
    Linear(f64),
    /// Scale and shift, for temperature-like conversions.
    Affine { scale: f64, shift: f64 },
}

impl Transform {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            Transform::Linear(factor) => value * factor,
            Transform::Affine { scale, shift } => value * scale + shift,
        }
    }
}

/// Resolve the transform converting values in `source` units into `target`
/// units.
///
/// Affine families (temperature scales) get a direct scale-and-shift
/// transform; affine conversions do not compose as ratios. Everything else
/// goes through the ratio `target / source`: an empty ratio is factor 1, a
/// dimensionally cancelling ratio yields a pure numeric factor, and a
/// residual imbalance is probed against the substance-per-mass bridge unit.
/// A bridge hit on the multiply side uses the reciprocal of the supplied
/// bridge quantity; a hit on the divide side uses it directly. A required
/// but absent bridge is an error, as is a ratio neither path can cancel.
pub fn resolve(
    source: &UnitExpression,
    target: &UnitExpression,
    bridge: Option<&Quantity>,
) -> Result<Transform, UnitError> {
    if is_affine_conversion(source, target) {
        // Both sides are single units; is_affine_conversion checked.
        if let (Some(s), Some(t)) = (source.single(), target.single()) {
            let (scale, shift) = affine_coefficients(s, t);
            return Ok(Transform::Affine { scale, shift });
        }
    }

    let ratio = target.divide(source);
    if ratio.is_unitless() {
        return Ok(Transform::Linear(1.0));
    }

    let mut factor = 1.0;
    let mut residual = ratio;

    if !residual.dimensions_cancel() {
        if residual.multiply(&BRIDGE_UNITS).dimensions_cancel() {
            let bridge = require_bridge(bridge, source, target)?;
            // The reciprocal participates in the factor.
            factor /= bridge.value();
            residual = residual.divide(&bridge.units().invert());
        } else if residual.divide(&BRIDGE_UNITS).dimensions_cancel() {
            let bridge = require_bridge(bridge, source, target)?;
            factor *= bridge.value();
            residual = residual.divide(bridge.units());
        } else {
            return Err(UnitError::IncompatibleUnits {
                from: source.to_string(),
                to: target.to_string(),
            });
        }
    }

    // The residual cancels dimensionally; each member contributes its
    // magnitude relative to the dimension base, inverted per its exponent.
    for u in residual.units() {
        factor *= u.magnitude.powf(-u.exp);
    }

    Ok(Transform::Linear(factor))
}

fn require_bridge<'a>(
    bridge: Option<&'a Quantity>,
    source: &UnitExpression,
    target: &UnitExpression,
) -> Result<&'a Quantity, UnitError> {
    bridge.ok_or_else(|| {
        UnitError::MissingBridgeQuantity(format!(
            "converting ({}) to ({})",
            source, target
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(text: &str) -> UnitExpression {
        UnitExpression::parse(text).unwrap()
    }

    fn linear_factor(source: &str, target: &str) -> f64 {
        match resolve(&units(source), &units(target), None).unwrap() {
            Transform::Linear(f) => f,
            other => panic!("expected linear transform, got {:?}", other),
        }
    }

    #[test]
    fn test_identical_units_are_factor_one() {
        assert_eq!(linear_factor("kg", "kg"), 1.0);
        assert_eq!(linear_factor("kg*m/s^2", "kg m s^-2"), 1.0);
    }

    #[test]
    fn test_same_dimension_scaling() {
        assert!((linear_factor("km", "m") - 1000.0).abs() < 1e-9);
        assert!((linear_factor("m", "km") - 0.001).abs() < 1e-12);
        assert!((linear_factor("g", "kg") - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_compound_scaling() {
        // 1 km/h = 1000/3600 m/s
        let factor = linear_factor("km/h", "m/s");
        assert!((factor - 1000.0 / 3600.0).abs() < 1e-9);
    }

    #[test]
    fn test_squared_units() {
        assert!((linear_factor("m^2", "km^2") - 1e-6).abs() < 1e-18);
    }

    #[test]
    fn test_mixed_system_scaling() {
        assert!((linear_factor("ft", "m") - 0.3048).abs() < 1e-12);
        assert!((linear_factor("lb", "kg") - 0.45359237).abs() < 1e-9);
    }

    #[test]
    fn test_incompatible_units() {
        match resolve(&units("kg"), &units("s"), None) {
            Err(UnitError::IncompatibleUnits { from, to }) => {
                assert_eq!(from, "kg");
                assert_eq!(to, "s");
            }
            other => panic!("expected IncompatibleUnits, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_bridge() {
        match resolve(&units("mol"), &units("g"), None) {
            Err(UnitError::MissingBridgeQuantity(_)) => {}
            other => panic!("expected MissingBridgeQuantity, got {:?}", other),
        }
    }

    #[test]
    fn test_bridge_divide_side() {
        // mol -> g with molar mass 18 g/mol: the bridge participates directly.
        let molar_mass = Quantity::new(18.0, "g/mol").unwrap();
        let transform = resolve(&units("mol"), &units("g"), Some(&molar_mass)).unwrap();
        assert_eq!(transform.apply(100.0), 1800.0);
    }

    #[test]
    fn test_bridge_multiply_side() {
        // g -> mol: the reciprocal of the bridge participates.
        let molar_mass = Quantity::new(18.0, "g/mol").unwrap();
        let transform = resolve(&units("g"), &units("mol"), Some(&molar_mass)).unwrap();
        match transform {
            Transform::Linear(f) => assert!((f - 1.0 / 18.0).abs() < 1e-12),
            other => panic!("expected linear transform, got {:?}", other),
        }
    }

    #[test]
    fn test_bridge_with_residual_scaling() {
        // kg -> mol with molar mass 18 g/mol: 1 kg = 1000/18 mol.
        let molar_mass = Quantity::new(18.0, "g/mol").unwrap();
        let transform = resolve(&units("kg"), &units("mol"), Some(&molar_mass)).unwrap();
        assert!((transform.apply(1.0) - 1000.0 / 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_affine_path_celsius_to_fahrenheit() {
        let transform = resolve(&units("°C"), &units("°F"), None).unwrap();
        assert!(matches!(transform, Transform::Affine { .. }));
        assert!((transform.apply(0.0) - 32.0).abs() < 1e-9);
        assert!((transform.apply(100.0) - 212.0).abs() < 1e-9);
    }

    #[test]
    fn test_affine_path_fahrenheit_to_kelvin() {
        let transform = resolve(&units("°F"), &units("K"), None).unwrap();
        assert!((transform.apply(32.0) - 273.15).abs() < 1e-9);
    }

    #[test]
    fn test_transform_is_exact_round_trip() {
        let forward = resolve(&units("mi"), &units("km"), None).unwrap();
        let back = resolve(&units("km"), &units("mi"), None).unwrap();
        let there_and_back = back.apply(forward.apply(26.2));
        assert!((there_and_back - 26.2).abs() < 1e-9);
    }
}
