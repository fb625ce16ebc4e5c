#![forbid(unsafe_code)]

//! Deferred task execution.
//!
//! A recomputation is never run inside the notification that triggered it;
//! it is handed to a [`TaskQueue`] and runs on a later turn, once the host's
//! own layout has settled. Hosts supply their own queue (a zero-delay
//! timer, a microtask, an event-loop callback). [`ManualTaskQueue`] is a
//! deterministic queue that the caller steps explicitly.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// A unit of deferred work.
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks on a later turn of the host's event loop.
///
/// Implementations must never run `task` synchronously inside `defer`.
pub trait TaskQueue {
    /// Schedule `task` for a later turn.
    fn defer(&self, task: Task);
}

impl<Q: TaskQueue + ?Sized> TaskQueue for Rc<Q> {
    fn defer(&self, task: Task) {
        (**self).defer(task);
    }
}

/// FIFO queue stepped by the caller, one turn at a time.
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct ManualTaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl fmt::Debug for ManualTaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualTaskQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

impl ManualTaskQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run the tasks that were queued before this call. Tasks deferred
    /// while the turn runs wait for the next turn. Returns how many ran.
    pub fn run_turn(&self) -> usize {
        let batch: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Run turns until the queue is empty or `max_turns` is reached.
    /// Returns the total number of tasks run.
    pub fn run_until_idle(&self, max_turns: usize) -> usize {
        let mut total = 0;
        for _ in 0..max_turns {
            let ran = self.run_turn();
            if ran == 0 {
                break;
            }
            total += ran;
        }
        total
    }

    /// Drop every pending task without running it.
    pub fn clear(&self) {
        self.tasks.borrow_mut().clear();
    }
}

impl TaskQueue for ManualTaskQueue {
    fn defer(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn defer_does_not_run_synchronously() {
        let queue = ManualTaskQueue::new();
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        queue.defer(Box::new(move || flag.set(true)));
        assert!(!ran.get());
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.run_turn(), 1);
        assert!(ran.get());
    }

    #[test]
    fn tasks_run_in_fifo_order() {
        let queue = ManualTaskQueue::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        for i in 0..3 {
            let log = Rc::clone(&log);
            queue.defer(Box::new(move || log.borrow_mut().push(i)));
        }
        queue.run_turn();
        assert_eq!(*log.borrow(), vec![0, 1, 2]);
    }

    #[test]
    fn tasks_deferred_during_turn_wait_for_next_turn() {
        let queue = ManualTaskQueue::new();
        let inner = queue.clone();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        queue.defer(Box::new(move || {
            c.set(c.get() + 1);
            let c2 = Rc::clone(&c);
            inner.defer(Box::new(move || c2.set(c2.get() + 1)));
        }));
        assert_eq!(queue.run_turn(), 1);
        assert_eq!(count.get(), 1);
        assert_eq!(queue.pending(), 1);
        assert_eq!(queue.run_until_idle(8), 1);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn run_until_idle_respects_turn_limit() {
        fn reschedule(queue: ManualTaskQueue) {
            let next = queue.clone();
            queue.defer(Box::new(move || reschedule(next)));
        }
        let queue = ManualTaskQueue::new();
        reschedule(queue.clone());
        assert_eq!(queue.run_until_idle(5), 5);
        assert_eq!(queue.pending(), 1);
        queue.clear();
        assert_eq!(queue.pending(), 0);
    }
}
