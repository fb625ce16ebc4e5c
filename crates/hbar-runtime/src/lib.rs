#![forbid(unsafe_code)]

//! Header bar runtime.
//!
//! Keeps the center-wrap decision of a three-region header correct while
//! its container resizes.
//!
//! # Key Components
//!
//! - [`ObservationScheduler`] - coalesces size-change notifications into at
//!   most one pending recomputation
//! - [`TaskQueue`] - defers the recomputation to a later turn;
//!   [`ManualTaskQueue`] steps it deterministically
//! - [`LayoutStateController`] - measure, decide, apply
//! - [`HeaderLayout`] - lifecycle handle with the mount/resize/destroy hooks
//! - [`StateSink`] - receives the `wrapped`/`measuring` flag toggles
//!
//! # Role
//! The runtime sits on top of `hbar-layout`: it owns no geometry and no
//! policy, only the ordering of reads and writes. All work is
//! single-threaded and driven by the host's event loop.

pub mod config;
pub mod controller;
pub mod layout;
pub mod observe;
pub mod scheduler;
pub mod sink;
pub mod task;

pub use config::{ConfigError, HeaderConfig};
pub use controller::{LayoutStateController, PassOutcome, Teardown, WrapState};
pub use layout::HeaderLayout;
pub use observe::{ObserveError, RecordingObserver, SizeObserver};
pub use scheduler::{
    ChangeSource, Notify, ObservationMode, ObservationScheduler, SchedulerState, SchedulerStats,
};
pub use sink::{ClassList, StateSink};
pub use task::{ManualTaskQueue, Task, TaskQueue};
