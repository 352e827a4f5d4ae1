use crate::error::UnitError;
use crate::unit::expression::UnitExpression;
use crate::unit::registry;
use std::cmp::Ordering;
use std::fmt;

/// Tolerance below which an exponent counts as zero.
pub(crate) const EXP_EPSILON: f64 = 1e-9;

/// One dimensioned factor with an exponent, e.g. "m" with exponent 2.
///
/// Atomic units are value types: every operation returns a fresh copy.
#[derive(Debug, Clone)]
pub struct AtomicUnit {
    /// Canonical symbol, e.g. "kg".
    pub symbol: String,
    /// Dimension category key, e.g. "mass".
    pub dimension: String,
    /// Exponent; may be fractional. A zero exponent means the unit is cancelled.
    pub exp: f64,
    /// Factor converting one of this unit into the dimension's base unit.
    pub magnitude: f64,
    /// Affine shift for temperature-like units.
    pub offset: Option<f64>,
    /// Decomposition recipe when this unit is itself compound.
    pub expansion: Option<Expansion>,
}

/// Recipe decomposing a compound unit into more-base factors.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub factors: Vec<AtomicUnit>,
    pub magnitude: f64,
}

impl AtomicUnit {
    /// True when the exponent has cancelled to zero. Cancelled units must not
    /// be retained inside a unit expression.
    pub fn is_cancelled(&self) -> bool {
        self.exp.abs() < EXP_EPSILON
    }

    /// Merge with a same-symbol unit, summing exponents. Returns `None` when
    /// the exponents cancel. Callers must have checked symbol equality.
    pub(crate) fn combined_with(&self, other: &AtomicUnit) -> Option<AtomicUnit> {
        let exp = self.exp + other.exp;
        if exp.abs() < EXP_EPSILON {
            return None;
        }
        let mut merged = self.clone();
        merged.exp = exp;
        Some(merged)
    }

    /// Combine two same-symbol units by summing exponents. `None` is the
    /// cancelled sentinel. Mismatched symbols are an internal invariant
    /// violation, never silently miscombined.
    pub fn multiply(&self, other: &AtomicUnit) -> Result<Option<AtomicUnit>, UnitError> {
        if self.symbol != other.symbol {
            return Err(UnitError::MalformedUnitMerge(format!(
                "cannot merge '{}' with '{}'",
                self.symbol, other.symbol
            )));
        }
        Ok(self.combined_with(other))
    }

    /// Copy with the exponent negated.
    pub fn invert(&self) -> AtomicUnit {
        self.update_exponent(-1.0)
    }

    /// Copy with the exponent scaled by `k` (raising the unit to a power).
    pub fn update_exponent(&self, k: f64) -> AtomicUnit {
        let mut new = self.clone();
        new.exp *= k;
        new
    }

    /// Rebase onto the dimension's canonical base unit, preserving the
    /// exponent. Returns the rebased unit and the factor by which a numeric
    /// value must be multiplied: `magnitude ^ exp`.
    pub fn to_dimension_base(&self) -> (AtomicUnit, f64) {
        let base = registry::base_symbol(&self.dimension)
            .and_then(|symbol| registry::atomic(symbol, self.exp).ok());
        match base {
            Some(base) => (base, self.magnitude.powf(self.exp)),
            // Already the base, or the dimension has no registered base.
            None => (self.clone(), 1.0),
        }
    }

    /// True when this unit has a compound decomposition.
    pub fn can_expand(&self) -> bool {
        self.expansion.is_some()
    }

    /// Expand a compound unit into its recipe, scaling every factor's
    /// exponent by this unit's exponent. The returned modifier is the
    /// recipe magnitude raised to this unit's exponent.
    pub fn full_expand(&self) -> Option<(UnitExpression, f64)> {
        let expansion = self.expansion.as_ref()?;
        let factors: Vec<AtomicUnit> = expansion
            .factors
            .iter()
            .map(|f| f.update_exponent(self.exp))
            .collect();
        Some((
            UnitExpression::from_factors(factors),
            expansion.magnitude.powf(self.exp),
        ))
    }

    /// Display order: exponent descending, ties broken by symbol. Larger
    /// powers print first.
    pub fn display_cmp(&self, other: &AtomicUnit) -> Ordering {
        other
            .exp
            .partial_cmp(&self.exp)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.symbol.cmp(&other.symbol))
    }
}

/// Exponent rendering shared with dimension signatures: omit `^1`, use
/// integer formatting when integral.
pub(crate) fn format_exponent(f: &mut fmt::Formatter<'_>, label: &str, exp: f64) -> fmt::Result {
    if (exp - 1.0).abs() < EXP_EPSILON {
        write!(f, "{}", label)
    } else if (exp - exp.round()).abs() < EXP_EPSILON {
        write!(f, "{}^{}", label, exp.round() as i64)
    } else {
        write!(f, "{}^{}", label, exp)
    }
}

impl fmt::Display for AtomicUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_exponent(f, &self.symbol, self.exp)
    }
}
