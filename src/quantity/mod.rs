// Quantities: number + units + tracked precision, with arithmetic that
// enforces or auto-converts units, and the display-side sigfig layer.

pub mod format;
pub mod sigfigs;
pub mod value;


pub use format::{FormatOptions, QuantityFormatter};
pub use sigfigs::{count_sigfigs, round_sigfigs};
pub use value::{Operand, Quantity, DEFAULT_EPSILON};
