// Conversion-factor resolution: dimensional compatibility, bridging-factor
// detection, and affine (temperature) conversions.

pub mod affine;
pub mod resolver;

pub use affine::is_affine_conversion;
pub use resolver::{resolve, Transform};
