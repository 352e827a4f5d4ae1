use crate::error::UnitError;
use crate::unit::atomic::{format_exponent, AtomicUnit, EXP_EPSILON};
use crate::unit::parser;
use std::collections::HashMap;
use std::fmt;

/// A product of atomic units with at most one entry per symbol.
///
/// Multiplication merges exponents of matching symbols; entries whose
/// exponents sum to zero are removed. Copies are deep, so mutating one
/// expression never affects another.
#[derive(Debug, Clone, Default)]
pub struct UnitExpression {
    units: Vec<AtomicUnit>,
}

impl UnitExpression {
    /// The empty (unitless) expression.
    pub fn unitless() -> Self {
        Self { units: Vec::new() }
    }

    /// Parse a textual expression such as `"kg*m/s^2"`.
    pub fn parse(text: &str) -> Result<Self, UnitError> {
        let (_, factors) = parser::parse_units(text)?;
        Ok(Self::from_factors(factors))
    }

    /// Build from a list of factors, merging duplicate symbols and dropping
    /// zero exponents. The merge is order-independent: multiplication of
    /// same-symbol units is commutative and associative.
    pub fn from_factors(factors: Vec<AtomicUnit>) -> Self {
        let mut units: Vec<AtomicUnit> = Vec::new();
        for factor in factors {
            if factor.is_cancelled() {
                continue;
            }
            match units.iter().position(|u| u.symbol == factor.symbol) {
                Some(pos) => match units[pos].combined_with(&factor) {
                    Some(merged) => units[pos] = merged,
                    None => {
                        units.remove(pos);
                    }
                },
                None => units.push(factor),
            }
        }
        Self { units }
    }

    /// The atomic units of this expression, in insertion order.
    pub fn units(&self) -> &[AtomicUnit] {
        &self.units
    }

    pub fn is_unitless(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The member sharing `symbol`, if any.
    pub fn get(&self, symbol: &str) -> Option<&AtomicUnit> {
        self.units.iter().find(|u| u.symbol == symbol)
    }

    /// The sole atomic unit, when the expression has exactly one.
    pub fn single(&self) -> Option<&AtomicUnit> {
        match self.units.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }

    /// Multiply two expressions: matching symbols merge exponents (dropping
    /// cancelled entries), all other factors carry through. Commutative and
    /// associative as a symbol -> exponent mapping.
    pub fn multiply(&self, other: &UnitExpression) -> UnitExpression {
        let mut units: Vec<AtomicUnit> = Vec::new();
        for u in &self.units {
            match other.get(&u.symbol) {
                Some(same) => {
                    if let Some(merged) = u.combined_with(same) {
                        units.push(merged);
                    }
                }
                None => units.push(u.clone()),
            }
        }
        for u in &other.units {
            if self.get(&u.symbol).is_none() {
                units.push(u.clone());
            }
        }
        UnitExpression { units }
    }

    /// `A / B = A * invert(B)`.
    pub fn divide(&self, other: &UnitExpression) -> UnitExpression {
        self.multiply(&other.invert())
    }

    /// Copy with every exponent negated.
    pub fn invert(&self) -> UnitExpression {
        UnitExpression {
            units: self.units.iter().map(|u| u.invert()).collect(),
        }
    }

    /// Raise the whole expression to a power: every exponent scales by `k`.
    pub fn pow(&self, k: f64) -> UnitExpression {
        if k.abs() < EXP_EPSILON {
            return Self::unitless();
        }
        UnitExpression {
            units: self.units.iter().map(|u| u.update_exponent(k)).collect(),
        }
    }

    /// Net exponent per dimension across all members.
    pub fn dimension_exponents(&self) -> HashMap<&str, f64> {
        let mut dims: HashMap<&str, f64> = HashMap::new();
        for u in &self.units {
            *dims.entry(u.dimension.as_str()).or_insert(0.0) += u.exp;
        }
        dims
    }

    /// True when every dimension's summed exponent is zero, i.e. the
    /// expression is convertible to unitless by a pure numeric factor.
    pub fn dimensions_cancel(&self) -> bool {
        self.dimension_exponents()
            .values()
            .all(|e| e.abs() < EXP_EPSILON)
    }

    /// Human-readable dimensional signature, e.g. `"mass length time^-2"`,
    /// independent of which symbols were used. Canonical member order.
    pub fn dimension_signature(&self) -> String {
        let mut parts = Vec::with_capacity(self.units.len());
        for u in self.sorted_units() {
            parts.push(format!("{}", SignaturePart(&u.dimension, u.exp)));
        }
        parts.join(" ")
    }

    /// Cancel members that are dimensionally redundant with each other even
    /// though they are not the same symbol (e.g. `kg/lb` or `m ft`).
    ///
    /// Pops the first remaining unit and scans the rest for a partner whose
    /// product cancels to unitless (both are discarded) or whose quotient
    /// does (the partner's exponent folds into the survivor, and the scan
    /// continues from the same position). First matching partner wins.
    /// Idempotent. The numeric factor this implies is recovered by
    /// converting a quantity into the simplified units.
    pub fn simplify(&self) -> UnitExpression {
        let mut remaining = self.units.clone();
        let mut keep: Vec<AtomicUnit> = Vec::new();

        while !remaining.is_empty() {
            let mut u = remaining.remove(0);
            let mut cancelled = false;

            let mut i = 0;
            while i < remaining.len() {
                let product =
                    UnitExpression::from_factors(vec![u.clone(), remaining[i].clone()]);
                if product.dimensions_cancel() {
                    remaining.remove(i);
                    cancelled = true;
                    break;
                }
                let quotient =
                    UnitExpression::from_factors(vec![u.clone(), remaining[i].invert()]);
                if quotient.dimensions_cancel() {
                    let partner = remaining.remove(i);
                    u.exp += partner.exp;
                } else {
                    i += 1;
                }
            }

            if !cancelled {
                keep.push(u);
            }
        }

        UnitExpression::from_factors(keep)
    }

    /// Rebase every member onto its dimension's base unit, then recursively
    /// replace compound members with their expansion recipes. Returns the
    /// fully expanded expression and the factor by which a value expressed
    /// in the original units must be multiplied.
    pub fn expand_all(&self) -> (UnitExpression, f64) {
        let mut expanded: Vec<AtomicUnit> = Vec::new();
        let mut modifier = 1.0;

        for u in &self.units {
            let (rebased, rebase_modifier) = u.to_dimension_base();
            modifier *= rebase_modifier;

            let mut pending = vec![rebased];
            while let Some(unit) = pending.pop() {
                match unit.full_expand() {
                    Some((recipe, recipe_modifier)) => {
                        modifier *= recipe_modifier;
                        pending.extend(recipe.units().iter().cloned());
                    }
                    None => expanded.push(unit),
                }
            }
        }

        (UnitExpression::from_factors(expanded), modifier)
    }

    fn sorted_units(&self) -> Vec<AtomicUnit> {
        let mut sorted = self.units.clone();
        sorted.sort_by(|a, b| a.display_cmp(b));
        sorted
    }
}

struct SignaturePart<'a>(&'a str, f64);

impl fmt::Display for SignaturePart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_exponent(f, self.0, self.1)
    }
}

impl fmt::Display for UnitExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unitless() {
            return write!(f, "(unitless)");
        }
        let rendered: Vec<String> = self.sorted_units().iter().map(|u| u.to_string()).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Two expressions are equal when they describe the same symbol -> exponent
/// mapping, regardless of member order.
impl PartialEq for UnitExpression {
    fn eq(&self, other: &UnitExpression) -> bool {
        if self.units.len() != other.units.len() {
            return false;
        }
        self.units.iter().all(|u| match other.get(&u.symbol) {
            Some(same) => (u.exp - same.exp).abs() < EXP_EPSILON,
            None => false,
        })
    }
}
