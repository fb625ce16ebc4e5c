#![forbid(unsafe_code)]

//! Layout state controller.
//!
//! Runs one measurement pass and applies its result as presentation flags.
//!
//! # Pass
//!
//! 1. Empty center: clear `wrapped` and `measuring`, stop.
//! 2. Enter the neutral hypothesis: `wrapped = false`, `measuring = true`.
//!    The host reflows to a single row before any width is read, so the
//!    center's intrinsic width is never taken from a wrapped layout.
//! 3. Measure a [`MeasurementSnapshot`].
//! 4. Evaluate the configured [`WrapPolicy`](hbar_layout::WrapPolicy).
//! 5. Leave `measuring`, set `wrapped` to the decision.
//!
//! Flags are written to the [`StateSink`] only when their value changes.
//! Once the [`Teardown`] flag fires, passes become no-ops and nothing is
//! written.

use std::cell::Cell;
use std::rc::Rc;

use hbar_layout::{GeometryPort, HeaderNodes, MeasurementSnapshot, RegionMeasurer};
use tracing::{debug, debug_span};

use crate::config::HeaderConfig;
use crate::sink::StateSink;

/// Presentation state of one header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WrapState {
    /// Center is on its own row.
    pub wrapped: bool,
    /// A measurement pass is forcing the single-row hypothesis.
    pub measuring: bool,
}

/// Result of one pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PassOutcome {
    /// The instance was torn down; nothing was written.
    Skipped,
    /// No content in the center; state cleared.
    EmptyCenter,
    /// A full measurement ran.
    Measured {
        /// Widths read during the pass.
        snapshot: MeasurementSnapshot,
        /// Decision applied.
        wrapped: bool,
        /// Whether `wrapped` differs from its value before the pass.
        changed: bool,
    },
}

/// Shared teardown flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct Teardown(Rc<Cell<bool>>);

impl Teardown {
    /// A flag that has not fired.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the instance destroyed. Idempotent.
    pub fn fire(&self) {
        self.0.set(true);
    }

    /// Whether [`fire`](Self::fire) was called on any clone.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.0.get()
    }
}

/// Orchestrates measurement, decision and state application.
pub struct LayoutStateController<P: GeometryPort, S> {
    measurer: RegionMeasurer<P>,
    nodes: HeaderNodes<P::Node>,
    sink: S,
    config: HeaderConfig,
    state: WrapState,
    teardown: Teardown,
    passes: u64,
}

impl<P: GeometryPort, S: StateSink> LayoutStateController<P, S> {
    /// Create a controller in the initial `wrapped = false` state.
    pub fn new(port: P, nodes: HeaderNodes<P::Node>, sink: S, config: HeaderConfig) -> Self {
        Self {
            measurer: RegionMeasurer::new(port),
            nodes,
            sink,
            config,
            state: WrapState::default(),
            teardown: Teardown::new(),
            passes: 0,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> WrapState {
        self.state
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &HeaderConfig {
        &self.config
    }

    /// Nodes measured by this controller.
    #[must_use]
    pub fn nodes(&self) -> &HeaderNodes<P::Node> {
        &self.nodes
    }

    /// The sink receiving flag writes.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The geometry port.
    #[must_use]
    pub fn port(&self) -> &P {
        self.measurer.port()
    }

    /// Number of passes that measured or cleared state.
    #[must_use]
    pub const fn passes(&self) -> u64 {
        self.passes
    }

    /// Handle to this controller's teardown flag.
    #[must_use]
    pub fn teardown(&self) -> Teardown {
        self.teardown.clone()
    }

    /// Whether the instance was torn down.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.teardown.is_fired()
    }

    /// Disable further state writes.
    pub fn destroy(&mut self) {
        self.teardown.fire();
    }

    /// Run one pass.
    pub fn run_pass(&mut self) -> PassOutcome {
        if self.teardown.is_fired() {
            return PassOutcome::Skipped;
        }
        let span = debug_span!("hbar.pass", pass = self.passes);
        let _guard = span.enter();
        self.passes += 1;

        if !self.measurer.port().has_content(&self.nodes.center.region) {
            self.apply(WrapState::default());
            debug!("center empty, state cleared");
            return PassOutcome::EmptyCenter;
        }

        let before = self.state.wrapped;
        self.apply(WrapState {
            wrapped: false,
            measuring: true,
        });

        let snapshot = self.measurer.snapshot(&self.nodes);
        let wrapped = self.config.policy.should_wrap(&snapshot);

        // The sink may have torn the instance down while we measured.
        if self.teardown.is_fired() {
            return PassOutcome::Skipped;
        }
        self.apply(WrapState {
            wrapped,
            measuring: false,
        });

        debug!(
            container = snapshot.container_width,
            leading = snapshot.leading_width,
            trailing = snapshot.trailing_width,
            center = snapshot.center_content_width,
            gap = snapshot.gap,
            policy = self.config.policy.as_str(),
            wrapped,
            "measurement pass"
        );
        PassOutcome::Measured {
            snapshot,
            wrapped,
            changed: wrapped != before,
        }
    }

    fn apply(&mut self, next: WrapState) {
        if next.wrapped != self.state.wrapped {
            self.sink.set_flag(&self.config.wrapped_flag, next.wrapped);
        }
        if next.measuring != self.state.measuring {
            self.sink.set_flag(&self.config.measuring_flag, next.measuring);
        }
        self.state = next;
    }
}

impl<P: GeometryPort, S> std::fmt::Debug for LayoutStateController<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStateController")
            .field("state", &self.state)
            .field("policy", &self.config.policy)
            .field("destroyed", &self.teardown.is_fired())
            .field("passes", &self.passes)
            .finish()
    }
}
