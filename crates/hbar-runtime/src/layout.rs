#![forbid(unsafe_code)]

//! Lifecycle handle for one header instance.
//!
//! [`HeaderLayout`] ties the pieces together:
//!
//! ```text
//! notification ─▶ ObservationScheduler ─▶ TaskQueue (next turn)
//!                                             │
//!                                             ▼
//!                          LayoutStateController::run_pass ─▶ StateSink
//! ```
//!
//! Hooks for the embedding component:
//!
//! - [`on_mount`](HeaderLayout::on_mount): start observation, schedule the
//!   first pass.
//! - [`on_size_change`](HeaderLayout::on_size_change): forward a size
//!   observer callback.
//! - [`on_external_resize`](HeaderLayout::on_external_resize): explicit
//!   surface resize (the only trigger besides mount in one-shot mode).
//! - [`on_content_change`](HeaderLayout::on_content_change): content was
//!   projected into or removed from a region.
//! - [`on_destroy`](HeaderLayout::on_destroy): release observation and
//!   disable every further state write.
//!
//! Everything is single-threaded. The scheduler, controller and observer
//! sit in separate cells. While a pass runs the controller is mutably
//! borrowed; a sink calling back into the handle reads the last applied
//! [`WrapState`] from a mirror instead, and
//! [`with_controller`](HeaderLayout::with_controller) returns `None`.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use hbar_layout::{GeometryPort, HeaderNodes};

use crate::config::HeaderConfig;
use crate::controller::{LayoutStateController, PassOutcome, Teardown, WrapState};
use crate::observe::SizeObserver;
use crate::scheduler::{
    ChangeSource, Notify, ObservationMode, ObservationScheduler, SchedulerStats,
};
use crate::sink::StateSink;
use crate::task::TaskQueue;

type Observer<N> = Box<dyn SizeObserver<N>>;

struct Shared<P: GeometryPort, S> {
    scheduler: RefCell<ObservationScheduler>,
    controller: RefCell<LayoutStateController<P, S>>,
    observer: RefCell<Option<Observer<P::Node>>>,
    teardown: Teardown,
    mounted: Cell<bool>,
    applied: Cell<WrapState>,
    last_outcome: RefCell<Option<PassOutcome>>,
}

impl<P: GeometryPort, S: StateSink> Shared<P, S> {
    fn run_scheduled(&self) {
        if !self.scheduler.borrow_mut().take_pending() {
            tracing::trace!("deferred pass discarded");
            return;
        }
        if self.teardown.is_fired() {
            return;
        }
        let Ok(mut controller) = self.controller.try_borrow_mut() else {
            tracing::warn!("pass already running, deferred pass dropped");
            return;
        };
        let outcome = controller.run_pass();
        self.applied.set(controller.state());
        drop(controller);
        tracing::trace!(?outcome, "deferred pass finished");
        *self.last_outcome.borrow_mut() = Some(outcome);
    }
}

/// One header instance bound to a geometry port, a sink and a task queue.
pub struct HeaderLayout<P: GeometryPort, S> {
    shared: Rc<Shared<P, S>>,
    queue: Rc<dyn TaskQueue>,
}

impl<P, S> HeaderLayout<P, S>
where
    P: GeometryPort + 'static,
    S: StateSink + 'static,
{
    /// Create an instance. Without an `observer` the instance runs in
    /// one-shot mode: it measures after mount and on explicit resizes only.
    pub fn new(
        port: P,
        nodes: HeaderNodes<P::Node>,
        sink: S,
        config: HeaderConfig,
        queue: Rc<dyn TaskQueue>,
        observer: Option<Observer<P::Node>>,
    ) -> Self {
        let mode = if observer.is_some() {
            ObservationMode::Continuous
        } else {
            ObservationMode::OneShot
        };
        let controller = LayoutStateController::new(port, nodes, sink, config);
        let teardown = controller.teardown();
        Self {
            shared: Rc::new(Shared {
                scheduler: RefCell::new(ObservationScheduler::new(mode)),
                controller: RefCell::new(controller),
                observer: RefCell::new(observer),
                teardown,
                mounted: Cell::new(false),
                applied: Cell::new(WrapState::default()),
                last_outcome: RefCell::new(None),
            }),
            queue,
        }
    }

    /// Start observing and schedule the first pass.
    ///
    /// Observation is acquired once per instance. A repeated mount only
    /// schedules a pass; a mount after [`on_destroy`](Self::on_destroy)
    /// does nothing.
    pub fn on_mount(&self) {
        if self.shared.teardown.is_fired() {
            tracing::debug!("mount after destroy ignored");
            return;
        }
        if !self.shared.mounted.replace(true) {
            self.start_observing();
        }
        self.notify(ChangeSource::Mount);
    }

    /// A watched node changed size.
    pub fn on_size_change(&self) {
        self.notify(ChangeSource::Element);
    }

    /// The whole surface was resized.
    pub fn on_external_resize(&self) {
        self.notify(ChangeSource::Surface);
    }

    /// Content in a region changed.
    pub fn on_content_change(&self) {
        self.notify(ChangeSource::Content);
    }

    /// Release observation and make any pending pass a no-op. Idempotent.
    pub fn on_destroy(&self) {
        self.shared.teardown.fire();
        self.shared.scheduler.borrow_mut().release();
        let observer = self.shared.observer.borrow_mut().take();
        if let Some(mut observer) = observer {
            observer.disconnect();
        }
        tracing::debug!("header layout destroyed");
    }

    /// Current presentation state. During a pass this is the state applied
    /// by the previous pass.
    #[must_use]
    pub fn state(&self) -> WrapState {
        match self.shared.controller.try_borrow() {
            Ok(controller) => controller.state(),
            Err(_) => self.shared.applied.get(),
        }
    }

    /// Scheduler counters.
    #[must_use]
    pub fn stats(&self) -> SchedulerStats {
        self.shared.scheduler.borrow().stats()
    }

    /// Observation mode in effect.
    #[must_use]
    pub fn mode(&self) -> ObservationMode {
        self.shared.scheduler.borrow().mode()
    }

    /// Outcome of the most recent pass.
    #[must_use]
    pub fn last_outcome(&self) -> Option<PassOutcome> {
        *self.shared.last_outcome.borrow()
    }

    /// Whether [`on_destroy`](Self::on_destroy) was called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.shared.teardown.is_fired()
    }

    /// Inspect the controller (sink, port, pass count). `None` while a
    /// pass is running.
    pub fn with_controller<T>(
        &self,
        f: impl FnOnce(&LayoutStateController<P, S>) -> T,
    ) -> Option<T> {
        let controller = self.shared.controller.try_borrow().ok()?;
        Some(f(&controller))
    }

    fn start_observing(&self) {
        let targets = {
            let controller = self.shared.controller.borrow();
            if controller.config().observe_regions {
                controller.nodes().observed()
            } else {
                vec![controller.nodes().container.clone()]
            }
        };
        let mut slot = self.shared.observer.borrow_mut();
        let Some(observer) = slot.as_mut() else {
            return;
        };
        for node in &targets {
            if let Err(err) = observer.observe(node) {
                tracing::debug!(error = %err, ?node, "observe failed");
                observer.disconnect();
                self.shared.scheduler.borrow_mut().degrade();
                return;
            }
        }
        tracing::trace!(targets = targets.len(), "observing");
    }

    fn notify(&self, source: ChangeSource) {
        let decision = self.shared.scheduler.borrow_mut().notify(source);
        if decision != Notify::Scheduled {
            return;
        }
        let weak: Weak<Shared<P, S>> = Rc::downgrade(&self.shared);
        self.queue.defer(Box::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.run_scheduled();
            }
        }));
    }
}

impl<P: GeometryPort, S> std::fmt::Debug for HeaderLayout<P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeaderLayout")
            .field("scheduler", &self.shared.scheduler.borrow())
            .field("destroyed", &self.shared.teardown.is_fired())
            .finish()
    }
}
