//! Device orientation classification and sensor angle normalization.
//!
//! Raw `deviceorientation` angles jump at ±180° of front-back tilt, and when a
//! phone is held sideways the roles of the tilt axes swap. This crate turns a
//! raw sample plus the current screen pose into continuous angles that the
//! scroll mappers can consume directly.

pub mod classifier;
pub mod normalize;
pub mod sample;

pub use classifier::*;
pub use normalize::*;
pub use sample::*;
