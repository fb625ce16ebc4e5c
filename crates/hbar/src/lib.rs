#![forbid(unsafe_code)]

//! Header bar center-wrap engine: public facade.
//!
//! Re-exports the stable surface of the `hbar-*` crates and a prelude.
//!
//! ```
//! use hbar::prelude::*;
//!
//! let snapshot = MeasurementSnapshot::new(1000.0, 260.0, 240.0, 300.0, 8.0);
//! assert!(!should_wrap_center(&snapshot));
//! assert!(should_wrap_center(&snapshot.with_container_width(700.0)));
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use hbar_core::geometry::{BoxMetrics, Sides, finite_or_zero};
pub use hbar_core::style::{Length, ParseLengthError, ResolvedStyle};

// --- Layout re-exports -----------------------------------------------------

pub use hbar_layout::{
    CenterNodes, GeometryPort, HeaderNodes, MeasurementSnapshot, ParseWrapPolicyError,
    RegionMeasurer, RegionNodes, RegionWidth, WrapPolicy, should_wrap_center,
};

// --- Runtime re-exports ----------------------------------------------------

pub use hbar_runtime::{
    ChangeSource, ClassList, ConfigError, HeaderConfig, HeaderLayout, LayoutStateController,
    ManualTaskQueue, Notify, ObservationMode, ObservationScheduler, ObserveError, PassOutcome,
    RecordingObserver, SchedulerState, SchedulerStats, SizeObserver, StateSink, Task, TaskQueue,
    Teardown, WrapState,
};

/// Install the JSON log subscriber (`HBAR_LOG` filter).
#[cfg(feature = "tracing-json")]
pub use hbar_core::logging::init_json as init_logging;

// --- Errors ---------------------------------------------------------------

/// Top-level error type.
#[derive(Debug)]
pub enum Error {
    /// Invalid configuration.
    Config(ConfigError),
    /// A style value could not be parsed.
    Length(ParseLengthError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Length(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Length(err) => Some(err),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<ParseWrapPolicyError> for Error {
    fn from(err: ParseWrapPolicyError) -> Self {
        Self::Config(ConfigError::from(err))
    }
}

impl From<ParseLengthError> for Error {
    fn from(err: ParseLengthError) -> Self {
        Self::Length(err)
    }
}

/// Standard result type for hbar APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        ClassList, Error, GeometryPort, HeaderConfig, HeaderLayout, HeaderNodes,
        MeasurementSnapshot, RegionNodes, Result, StateSink, TaskQueue, WrapPolicy, WrapState,
        should_wrap_center,
    };
}
