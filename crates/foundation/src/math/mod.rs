pub mod angle;
pub mod precision;
pub mod range;

pub use angle::*;
pub use precision::*;
pub use range::*;
