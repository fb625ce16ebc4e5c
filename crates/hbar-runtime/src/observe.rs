#![forbid(unsafe_code)]

//! Continuous size observation capability.
//!
//! The platform's element-size observer only registers interest here; the
//! host forwards each resulting notification to
//! [`HeaderLayout::on_size_change`](crate::HeaderLayout::on_size_change).
//! Hosts without such a facility pass no observer at all and the scheduler
//! runs in one-shot mode.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Why a node could not be observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObserveError {
    reason: String,
}

impl ObserveError {
    /// Create an error with a human-readable reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// The reason given by the observer.
    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for ObserveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "size observation unavailable: {}", self.reason)
    }
}

impl std::error::Error for ObserveError {}

/// Registers nodes with the platform's size-change notification facility.
pub trait SizeObserver<N> {
    /// Start observing `node`.
    fn observe(&mut self, node: &N) -> Result<(), ObserveError>;

    /// Stop observing every node. Must be safe to call more than once.
    fn disconnect(&mut self);
}

impl<N, O: SizeObserver<N> + ?Sized> SizeObserver<N> for Rc<RefCell<O>> {
    fn observe(&mut self, node: &N) -> Result<(), ObserveError> {
        self.borrow_mut().observe(node)
    }

    fn disconnect(&mut self) {
        self.borrow_mut().disconnect();
    }
}

/// Observer that records what it was asked to watch.
///
/// Useful for hosts that poll sizes themselves, and in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingObserver<N> {
    observed: Vec<N>,
    disconnects: u32,
    fail_on: Option<usize>,
}

impl<N> Default for RecordingObserver<N> {
    fn default() -> Self {
        Self {
            observed: Vec::new(),
            disconnects: 0,
            fail_on: None,
        }
    }
}

impl<N> RecordingObserver<N> {
    /// An observer that accepts every node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An observer that refuses the `index`-th `observe` call (0-based).
    #[must_use]
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_on: Some(index),
            ..Self::default()
        }
    }

    /// Nodes currently observed.
    #[must_use]
    pub fn observed(&self) -> &[N] {
        &self.observed
    }

    /// How many times `disconnect` was called.
    #[must_use]
    pub fn disconnects(&self) -> u32 {
        self.disconnects
    }
}

impl<N: Clone> SizeObserver<N> for RecordingObserver<N> {
    fn observe(&mut self, node: &N) -> Result<(), ObserveError> {
        if self.fail_on == Some(self.observed.len()) {
            return Err(ObserveError::new("observer refused node"));
        }
        self.observed.push(node.clone());
        Ok(())
    }

    fn disconnect(&mut self) {
        self.observed.clear();
        self.disconnects += 1;
    }
}
