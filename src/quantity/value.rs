use crate::convert::resolve;
use crate::error::UnitError;
use crate::quantity::sigfigs::{count_sigfigs, count_sigfigs_of};
use crate::unit::expression::UnitExpression;
use crate::unit::parser::split_quantity_string;
use std::fmt;
use std::ops;

/// Relative tolerance for approximate equality: floating round-trip error
/// from repeated conversions must not make equal quantities unequal.
pub const DEFAULT_EPSILON: f64 = 0.005;

/// A number tied to a unit expression, with a tracked significant-figure
/// count.
///
/// Quantities are immutable: every arithmetic or conversion operation
/// returns a new value and never mutates an operand. Precision never
/// increases through computation; binary operations take the minimum of
/// their operands' sigfig counts.
#[derive(Debug, Clone)]
pub struct Quantity {
    value: f64,
    units: UnitExpression,
    sigfigs: u32,
}

/// The two kinds of value accepted where a quantity is expected. Bare
/// numbers are coerced at the arithmetic boundary with a single documented
/// fallback policy; see [`Quantity::add`].
#[derive(Debug, Clone)]
pub enum Operand {
    Number(f64),
    Quantity(Quantity),
}

impl From<f64> for Operand {
    fn from(n: f64) -> Self {
        Operand::Number(n)
    }
}

impl From<i64> for Operand {
    fn from(n: i64) -> Self {
        Operand::Number(n as f64)
    }
}

impl From<Quantity> for Operand {
    fn from(q: Quantity) -> Self {
        Operand::Quantity(q)
    }
}

impl From<&Quantity> for Operand {
    fn from(q: &Quantity) -> Self {
        Operand::Quantity(q.clone())
    }
}

impl Quantity {
    /// Build from a value and a unit expression string. Sigfigs are counted
    /// from the value's shortest display form.
    pub fn new(value: f64, units: &str) -> Result<Quantity, UnitError> {
        Ok(Quantity {
            value,
            units: UnitExpression::parse(units)?,
            sigfigs: count_sigfigs_of(value),
        })
    }

    /// Build from already-constructed parts.
    pub fn from_parts(value: f64, units: UnitExpression, sigfigs: u32) -> Quantity {
        Quantity {
            value,
            units,
            sigfigs,
        }
    }

    /// A quantity with no units.
    pub fn unitless(value: f64) -> Quantity {
        Quantity {
            value,
            units: UnitExpression::unitless(),
            sigfigs: count_sigfigs_of(value),
        }
    }

    /// Parse a combined quantity string such as `"100 bar"` or
    /// `"5 kg m/s^2"`. Sigfigs are counted from the numeric literal as
    /// written, so `"2.0 km"` carries two and `"2000 g"` carries one.
    pub fn parse(text: &str) -> Result<Quantity, UnitError> {
        let (number, units) = split_quantity_string(text).ok_or_else(|| {
            UnitError::ParseError(format!("not a quantity string: '{}'", text))
        })?;
        let value: f64 = number
            .parse()
            .map_err(|_| UnitError::ParseError(format!("invalid number: '{}'", number)))?;
        Ok(Quantity {
            value,
            units: UnitExpression::parse(units)?,
            sigfigs: count_sigfigs(number),
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn units(&self) -> &UnitExpression {
        &self.units
    }

    pub fn sigfigs(&self) -> u32 {
        self.sigfigs
    }

    /// Convert into `target` units, supplying `bridge` when the conversion
    /// needs an auxiliary factor such as a molar mass. The resolved factor
    /// is exact, so the sigfig count carries over unchanged.
    pub fn convert(
        &self,
        target: &UnitExpression,
        bridge: Option<&Quantity>,
    ) -> Result<Quantity, UnitError> {
        let transform = resolve(&self.units, target, bridge)?;
        Ok(Quantity {
            value: transform.apply(self.value),
            units: target.clone(),
            sigfigs: self.sigfigs,
        })
    }

    /// Convert into the units named by `target`.
    pub fn to(&self, target: &str) -> Result<Quantity, UnitError> {
        self.convert(&UnitExpression::parse(target)?, None)
    }

    /// Convert into the units named by `target` with a bridging quantity.
    pub fn to_with_bridge(&self, target: &str, bridge: &Quantity) -> Result<Quantity, UnitError> {
        self.convert(&UnitExpression::parse(target)?, Some(bridge))
    }

    /// Coerce an operand into a quantity relative to this one. A bare number
    /// becomes unitless when this quantity's units cancel dimensionally;
    /// otherwise it inherits these units, with a printed warning. The
    /// inherit-with-warning fallback exists so dimensionless literals can
    /// combine with dimensioned values in additive contexts.
    fn coerce(&self, operand: Operand) -> Result<Quantity, UnitError> {
        match operand {
            Operand::Quantity(q) => Ok(q),
            Operand::Number(n) => {
                if !n.is_finite() {
                    return Err(UnitError::InvalidOperand(format!(
                        "{} is not a finite number",
                        n
                    )));
                }
                if self.units.dimensions_cancel() {
                    Ok(Quantity::from_parts(
                        n,
                        UnitExpression::unitless(),
                        count_sigfigs_of(n),
                    ))
                } else {
                    eprintln!(
                        "Warning: operand {} is a bare number. Assuming units are {}",
                        n, self.units
                    );
                    Ok(Quantity::from_parts(n, self.units.clone(), count_sigfigs_of(n)))
                }
            }
        }
    }

    /// Add, converting the right operand into these units first.
    pub fn add(&self, rhs: impl Into<Operand>) -> Result<Quantity, UnitError> {
        let rhs = self.coerce(rhs.into())?.convert(&self.units, None)?;
        Ok(Quantity {
            value: self.value + rhs.value,
            units: self.units.clone(),
            sigfigs: self.sigfigs.min(rhs.sigfigs),
        })
    }

    /// Subtract, converting the right operand into these units first.
    pub fn subtract(&self, rhs: impl Into<Operand>) -> Result<Quantity, UnitError> {
        let rhs = self.coerce(rhs.into())?.convert(&self.units, None)?;
        Ok(Quantity {
            value: self.value - rhs.value,
            units: self.units.clone(),
            sigfigs: self.sigfigs.min(rhs.sigfigs),
        })
    }

    /// Multiply. Units compose, so no conversion is needed. A bare-number
    /// factor scales the value and leaves units and sigfigs untouched.
    pub fn multiply(&self, rhs: impl Into<Operand>) -> Quantity {
        match rhs.into() {
            Operand::Number(n) => Quantity {
                value: self.value * n,
                units: self.units.clone(),
                sigfigs: self.sigfigs,
            },
            Operand::Quantity(q) => Quantity {
                value: self.value * q.value,
                units: self.units.multiply(&q.units),
                sigfigs: self.sigfigs.min(q.sigfigs),
            },
        }
    }

    /// Divide. Units compose, so no conversion is needed.
    pub fn divide(&self, rhs: impl Into<Operand>) -> Quantity {
        match rhs.into() {
            Operand::Number(n) => Quantity {
                value: self.value / n,
                units: self.units.clone(),
                sigfigs: self.sigfigs,
            },
            Operand::Quantity(q) => Quantity {
                value: self.value / q.value,
                units: self.units.divide(&q.units),
                sigfigs: self.sigfigs.min(q.sigfigs),
            },
        }
    }

    /// Raise to a power: the value is exponentiated and every unit exponent
    /// scales by the same power. A quantity exponent contributes its raw
    /// value.
    pub fn pow(&self, exp: impl Into<Operand>) -> Quantity {
        let k = match exp.into() {
            Operand::Number(n) => n,
            Operand::Quantity(q) => q.value,
        };
        Quantity {
            value: self.value.powf(k),
            units: self.units.pow(k),
            sigfigs: self.sigfigs,
        }
    }

    /// Strict comparison after converting the right operand into these units.
    pub fn less_than(&self, rhs: impl Into<Operand>) -> Result<bool, UnitError> {
        let other = self.coerce(rhs.into())?.convert(&self.units, None)?;
        Ok(self.value < other.value)
    }

    /// Strict comparison after converting the right operand into these units.
    pub fn greater_than(&self, rhs: impl Into<Operand>) -> Result<bool, UnitError> {
        let other = self.coerce(rhs.into())?.convert(&self.units, None)?;
        Ok(self.value > other.value)
    }

    /// Approximate equality within the default relative tolerance, after
    /// unit conversion. Deliberately not bit-exact: repeated conversions
    /// accumulate floating round-trip error.
    pub fn approx_eq(&self, rhs: impl Into<Operand>) -> Result<bool, UnitError> {
        self.approx_eq_within(rhs, DEFAULT_EPSILON)
    }

    /// Approximate equality within a caller-chosen relative tolerance.
    pub fn approx_eq_within(
        &self,
        rhs: impl Into<Operand>,
        epsilon: f64,
    ) -> Result<bool, UnitError> {
        let other = self.coerce(rhs.into())?.convert(&self.units, None)?;
        if self.value == 0.0 {
            return Ok(other.value.abs() < epsilon);
        }
        Ok(((self.value - other.value) / self.value).abs() < epsilon)
    }

    /// Cancel dimensionally redundant units and convert the value into the
    /// simplified expression.
    pub fn simplify_units(&self) -> Result<Quantity, UnitError> {
        let simplified = self.units.simplify();
        self.convert(&simplified, None)
    }

    /// Rebase every unit onto its dimension base and expand compound units,
    /// applying the accumulated modifier to the value.
    pub fn expand_all(&self) -> Quantity {
        let (expanded, modifier) = self.units.expand_all();
        Quantity {
            value: self.value * modifier,
            units: expanded,
            sigfigs: self.sigfigs,
        }
    }

    /// Round the stored value to `decimals` decimal places.
    pub fn round_decimals(&self, decimals: i32) -> Quantity {
        let scale = 10f64.powi(decimals);
        Quantity {
            value: (self.value * scale).round() / scale,
            units: self.units.clone(),
            sigfigs: self.sigfigs,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.units)
    }
}

// Operator sugar for the infallible operations. Additive operations convert
// units and can fail, so they stay as named methods.

impl ops::Mul for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: Quantity) -> Quantity {
        self.multiply(rhs)
    }
}

impl ops::Mul<f64> for Quantity {
    type Output = Quantity;
    fn mul(self, rhs: f64) -> Quantity {
        self.multiply(rhs)
    }
}

impl ops::Mul<Quantity> for f64 {
    type Output = Quantity;
    fn mul(self, rhs: Quantity) -> Quantity {
        rhs.multiply(self)
    }
}

impl ops::Div for Quantity {
    type Output = Quantity;
    fn div(self, rhs: Quantity) -> Quantity {
        self.divide(rhs)
    }
}

impl ops::Div<f64> for Quantity {
    type Output = Quantity;
    fn div(self, rhs: f64) -> Quantity {
        self.divide(rhs)
    }
}

impl ops::Div<Quantity> for f64 {
    type Output = Quantity;
    fn div(self, rhs: Quantity) -> Quantity {
        Quantity {
            value: self / rhs.value,
            units: rhs.units.invert(),
            sigfigs: rhs.sigfigs,
        }
    }
}

impl ops::Neg for Quantity {
    type Output = Quantity;
    fn neg(self) -> Quantity {
        Quantity {
            value: -self.value,
            units: self.units,
            sigfigs: self.sigfigs,
        }
    }
}
