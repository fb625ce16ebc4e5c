#![forbid(unsafe_code)]

//! Presentation state output.
//!
//! The controller never touches content; its only side effect is toggling
//! named boolean flags (for example classes on the host element) that an
//! external stylesheet keys off.

use std::collections::BTreeSet;

/// Receives flag toggles from the controller.
///
/// Called only when a flag actually changes value.
pub trait StateSink {
    /// Turn `flag` on or off.
    fn set_flag(&mut self, flag: &str, on: bool);
}

impl<F: FnMut(&str, bool)> StateSink for F {
    fn set_flag(&mut self, flag: &str, on: bool) {
        self(flag, on);
    }
}

/// In-memory set of active flags, e.g. mirrored into a class attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    active: BTreeSet<String>,
    writes: u64,
}

impl ClassList {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `flag` is currently on.
    #[must_use]
    pub fn contains(&self, flag: &str) -> bool {
        self.active.contains(flag)
    }

    /// Number of toggles received.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Space-separated active flags, sorted.
    #[must_use]
    pub fn to_class_string(&self) -> String {
        self.active.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
    }
}

impl StateSink for ClassList {
    fn set_flag(&mut self, flag: &str, on: bool) {
        self.writes += 1;
        if on {
            self.active.insert(flag.to_string());
        } else {
            self.active.remove(flag);
        }
    }
}
