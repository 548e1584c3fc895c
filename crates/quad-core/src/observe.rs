//! Observer hooks used by iterative routines to report intermediate state.

use serde::{Deserialize, Serialize};

/// Receives events emitted by an iterative routine.
///
/// Closures implement this trait directly; [`Silent`] discards events and
/// [`Trace`] records them.
pub trait Observer<E> {
    /// Called once per event, in emission order.
    fn observe(&mut self, event: &E);
}

impl<E, F> Observer<E> for F
where
    F: FnMut(&E),
{
    fn observe(&mut self, event: &E) {
        self(event)
    }
}

/// Observer that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl<E> Observer<E> for Silent {
    fn observe(&mut self, _event: &E) {}
}

/// Observer that keeps a copy of every event.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace<E> {
    events: Vec<E>,
}

impl<E> Trace<E> {
    /// Creates an empty trace.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Recorded events in emission order.
    pub fn events(&self) -> &[E] {
        &self.events
    }

    /// Consumes the trace and returns the recorded events.
    pub fn into_events(self) -> Vec<E> {
        self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl<E> Default for Trace<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> Observer<E> for Trace<E> {
    fn observe(&mut self, event: &E) {
        self.events.push(event.clone());
    }
}

/// One refinement of the adaptive trapezoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Refinement {
    /// Refinement index, starting at 1.
    pub level: u32,
    /// Subinterval count after the refinement.
    pub subintervals: usize,
    /// Running estimate `h * s` after the refinement.
    pub estimate: f64,
    /// Convergence measure `|h * (old_s - 0.5 * s)|` compared against the tolerance.
    pub change: f64,
}

/// One step of a root-finding algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootStep {
    /// Step index, zero for the initial guess.
    pub step: usize,
    /// Current guess for the root.
    pub x: f64,
    /// Current step size.
    pub dx: f64,
    /// Function value at the current guess.
    pub fx: f64,
}
