#![forbid(unsafe_code)]

//! Layout decisions for three-region header bars.
//!
//! - [`should_wrap_center`] - pure wrap/no-wrap predicate over a
//!   [`MeasurementSnapshot`]
//! - [`WrapPolicy`] - selects the equal-share or plain-sum predicate
//! - [`GeometryPort`] - read-only access to rendered widths and styles
//! - [`RegionMeasurer`] - turns a [`HeaderNodes`] tree into a snapshot
//!
//! # Example
//!
//! ```
//! use hbar_layout::{MeasurementSnapshot, WrapPolicy};
//!
//! let snapshot = MeasurementSnapshot::new(440.0, 300.0, 20.0, 100.0, 10.0);
//! assert!(WrapPolicy::EqualShare.should_wrap(&snapshot));
//! assert!(!WrapPolicy::PlainSum.should_wrap(&snapshot));
//! ```

pub mod measure;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;
pub mod wrap;

pub use hbar_core::geometry::{BoxMetrics, Sides};
pub use hbar_core::style::{Length, ResolvedStyle};
pub use measure::{
    CenterNodes, GeometryPort, HeaderNodes, RegionMeasurer, RegionNodes, RegionWidth,
};
pub use wrap::{MeasurementSnapshot, ParseWrapPolicyError, WrapPolicy, should_wrap_center};
