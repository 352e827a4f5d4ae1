use std::fmt;

/// Errors raised by the unit algebra and quantity arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum UnitError {
    /// A unit expression string could not be tokenized.
    ParseError(String),
    /// A unit symbol is not present in the definition table.
    UnknownUnit(String),
    /// No multiplicative or bridged factor exists between the two expressions.
    IncompatibleUnits { from: String, to: String },
    /// A bridging quantity (e.g. a molar mass) is required but was not supplied.
    MissingBridgeQuantity(String),
    /// An arithmetic operand was not usable as a quantity.
    InvalidOperand(String),
    /// Two atomic units with different symbols were merged. Internal invariant violation.
    MalformedUnitMerge(String),
}

impl fmt::Display for UnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            UnitError::UnknownUnit(symbol) => write!(f, "Unknown unit: {}", symbol),
            UnitError::IncompatibleUnits { from, to } => {
                write!(f, "The units ({}) can't be converted to the new units ({})", from, to)
            }
            UnitError::MissingBridgeQuantity(msg) => {
                write!(f, "Needs a bridge quantity to convert but none was provided: {}", msg)
            }
            UnitError::InvalidOperand(msg) => write!(f, "Invalid operand: {}", msg),
            UnitError::MalformedUnitMerge(msg) => write!(f, "Malformed unit merge: {}", msg),
        }
    }
}

impl std::error::Error for UnitError {}
