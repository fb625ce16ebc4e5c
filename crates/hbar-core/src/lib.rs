#![forbid(unsafe_code)]

//! Core: geometry primitives, resolved style values, and logging.

pub mod geometry;
pub mod logging;
pub mod style;

pub use geometry::{BoxMetrics, Sides, finite_or_zero};
pub use style::{Length, ResolvedStyle};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span, warn};
