use crate::quantity::sigfigs::round_sigfigs;
use crate::quantity::Quantity;

/// Rendering preferences, passed explicitly rather than kept in process-wide
/// state. Rounding applies only to the rendered string; the stored value
/// keeps full precision.
#[derive(Debug, Clone, Default)]
pub struct FormatOptions {
    /// Round the displayed value to the quantity's tracked sigfig count.
    pub use_sigfigs: bool,
}

/// Renders quantities according to a set of [`FormatOptions`].
pub struct QuantityFormatter {
    options: FormatOptions,
}

impl QuantityFormatter {
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn format(&self, quantity: &Quantity) -> String {
        let value = if self.options.use_sigfigs {
            round_sigfigs(quantity.value(), quantity.sigfigs())
        } else {
            quantity.value()
        };
        format!("{} {}", value, quantity.units())
    }
}

impl Default for QuantityFormatter {
    fn default() -> Self {
        Self::new(FormatOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_formatting() {
        let q = Quantity::new(1234.5678, "m/s").unwrap();
        let formatter = QuantityFormatter::default();
        assert_eq!(formatter.format(&q), "1234.5678 m s^-1");
    }

    #[test]
    fn test_sigfig_formatting() {
        let q = Quantity::parse("2.0 km").unwrap().multiply(1.23456);
        let formatter = QuantityFormatter::new(FormatOptions { use_sigfigs: true });
        assert_eq!(formatter.format(&q), "2.5 km");
    }

    #[test]
    fn test_formatting_does_not_mutate_the_value() {
        let q = Quantity::parse("3 m").unwrap().divide(7.0);
        let formatter = QuantityFormatter::new(FormatOptions { use_sigfigs: true });
        let _ = formatter.format(&q);
        assert!((q.value() - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_unitless_formatting() {
        let q = Quantity::unitless(0.5);
        let formatter = QuantityFormatter::default();
        assert_eq!(formatter.format(&q), "0.5 (unitless)");
    }
}
