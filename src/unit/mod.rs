// Unit algebra: atomic dimensioned factors, composite expressions, the
// static definition table, and the unit-string parser.

pub mod atomic;
pub mod expression;
pub mod parser;
pub mod registry;

#[cfg(test)]
mod tests;

pub use atomic::{AtomicUnit, Expansion};
pub use expression::UnitExpression;
pub use parser::{looks_like_quantity_string, parse_units, split_quantity_string};
pub use registry::{lookup, UnitDef};
