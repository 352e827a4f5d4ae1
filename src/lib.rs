pub mod convert;
pub mod error;
pub mod quantity;
pub mod unit;

pub use convert::{resolve, Transform};
pub use error::UnitError;
pub use quantity::{FormatOptions, Quantity, QuantityFormatter};
pub use unit::{AtomicUnit, UnitExpression};
