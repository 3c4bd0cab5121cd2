//! Logging for the loader and renderer.
//!
//! Call sites write `log::debug!` / `log::warn!` with tracing's field syntax.
//! The `tracing` feature (on in `dwgsim-draw-cli`) routes them to `tracing`;
//! otherwise they expand to nothing.

#[cfg(feature = "tracing")]
pub use tracing::{debug, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, warn};
