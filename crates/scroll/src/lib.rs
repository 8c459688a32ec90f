//! Orientation-to-scroll mapping.
//!
//! Turns normalized device angles into a `(top, left)` page scroll offset:
//! tilt is clamped to a usable window and mapped onto the vertical range,
//! heading is mapped onto the horizontal range, and both are smoothed against
//! the previous position in portrait.
//!
//! [`ScrollPipeline`] is the pure per-sample state machine.
//! [`TiltController`] wraps it with a geometry source, a scroll sink and the
//! deferred layout recompute timers a page host needs.

pub mod config;
pub mod controller;
pub mod error;
pub mod geometry;
pub mod horizontal;
pub mod host;
pub mod phase;
pub mod pipeline;
pub mod replay;
pub mod smoother;
pub mod vertical;

pub use config::*;
pub use controller::*;
pub use error::*;
pub use geometry::*;
pub use horizontal::*;
pub use host::*;
pub use phase::*;
pub use pipeline::*;
pub use smoother::*;
pub use vertical::*;
