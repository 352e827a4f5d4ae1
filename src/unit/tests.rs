#[cfg(test)]
mod tests {
    use super::super::expression::UnitExpression;
    use super::super::registry::atomic;

    fn units(text: &str) -> UnitExpression {
        UnitExpression::parse(text).unwrap()
    }

    #[test]
    fn test_multiplication_is_commutative() {
        let a = units("kg*m/s^2");
        let b = units("s^2/m");
        assert_eq!(a.multiply(&b), b.multiply(&a));
    }

    #[test]
    fn test_multiplication_is_associative() {
        let a = units("kg*m");
        let b = units("s^-2");
        let c = units("mol/K");
        assert_eq!(a.multiply(&b).multiply(&c), a.multiply(&b.multiply(&c)));
    }

    #[test]
    fn test_divide_by_self_is_unitless() {
        for text in ["kg", "kg*m/s^2", "mol^2/K^0.5", "m"] {
            let a = units(text);
            assert!(a.divide(&a).is_unitless(), "{} / {} kept units", a, a);
        }
    }

    #[test]
    fn test_inverse_factor_is_dropped() {
        let m = atomic("m", 1.0).unwrap();
        let merged = UnitExpression::from_factors(vec![m.clone(), m.invert()]);
        assert!(merged.is_unitless());
    }

    #[test]
    fn test_velocity_times_time_cancels_to_length() {
        let result = units("m/s").multiply(&units("s"));
        assert_eq!(result, units("m"));
        assert_eq!(result.to_string(), "m");
    }

    #[test]
    fn test_merge_is_order_independent() {
        let m2 = atomic("m", 2.0).unwrap();
        let m_inv = atomic("m", -1.0).unwrap();
        let s = atomic("s", 1.0).unwrap();
        let forward = UnitExpression::from_factors(vec![m2.clone(), m_inv.clone(), s.clone()]);
        let backward = UnitExpression::from_factors(vec![s, m_inv, m2]);
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_pow_scales_every_exponent() {
        let squared = units("kg*m/s^2").pow(2.0);
        assert_eq!(squared, units("kg^2*m^2/s^4"));
        assert!(units("kg*m").pow(0.0).is_unitless());
    }

    #[test]
    fn test_dimension_signature() {
        assert_eq!(units("kg*m/s^2").dimension_signature(), "mass length time^-2");
        assert_eq!(units("m^2").dimension_signature(), "length^2");
        assert_eq!(units("m^0.5").dimension_signature(), "length^0.5");
        assert_eq!(units("").dimension_signature(), "");
    }

    #[test]
    fn test_signature_is_symbol_independent() {
        // Different symbols, same kind of quantity.
        assert_eq!(
            units("km/h").dimension_signature(),
            units("m/s").dimension_signature()
        );
    }

    #[test]
    fn test_display_order_is_exponent_descending() {
        assert_eq!(units("s^-2*m*kg^2").to_string(), "kg^2 m s^-2");
    }

    #[test]
    fn test_simplify_full_cancellation() {
        // kg and g^-1 cancel dimensionally even though the symbols differ.
        let result = units("kg/g").simplify();
        assert!(result.is_unitless());
    }

    #[test]
    fn test_simplify_partial_cancellation() {
        // m and ft share a dimension; ft folds its exponent into m.
        let result = units("m*ft").simplify();
        assert_eq!(result, units("m^2"));
    }

    #[test]
    fn test_simplify_keeps_unrelated_units() {
        let result = units("kg*m/s^2").simplify();
        assert_eq!(result, units("kg*m/s^2"));
    }

    #[test]
    fn test_simplify_mixed() {
        // The s/min pair cancels, kg survives.
        let result = units("kg*s/min").simplify();
        assert_eq!(result, units("kg"));
    }

    #[test]
    fn test_simplify_is_idempotent() {
        for text in ["kg/g", "m*ft", "kg*m/s^2", "kg*s/min", "m*ft*s/min*kg"] {
            let once = units(text).simplify();
            let twice = once.simplify();
            assert_eq!(once, twice, "simplify not idempotent for {}", text);
        }
    }

    #[test]
    fn test_expand_newton_to_base_dimensions() {
        let (expanded, modifier) = units("N").expand_all();
        assert_eq!(expanded, units("kg*m/s^2"));
        assert_eq!(modifier, 1.0);
    }

    #[test]
    fn test_expand_rebases_before_expanding() {
        // kN rebases to N (factor 1000), then expands.
        let (expanded, modifier) = units("kN").expand_all();
        assert_eq!(expanded, units("kg*m/s^2"));
        assert_eq!(modifier, 1000.0);
    }

    #[test]
    fn test_expand_accumulates_across_members() {
        // J/s: J rebases and expands to kg m^2 s^-2; the s^-1 stays.
        let (expanded, modifier) = units("J/s").expand_all();
        assert_eq!(expanded, units("kg*m^2/s^3"));
        assert_eq!(modifier, 1.0);
    }

    #[test]
    fn test_expand_non_compound_units() {
        let (expanded, modifier) = units("km").expand_all();
        assert_eq!(expanded, units("m"));
        assert_eq!(modifier, 1000.0);
    }

    #[test]
    fn test_unitless_display() {
        assert_eq!(units("").to_string(), "(unitless)");
        assert_eq!(units("m/m").to_string(), "(unitless)");
    }
}
