//! UI event types.
//!
//! Every input (terminal, timer, finished render) becomes a `UiEvent` before it
//! reaches the reducer.
//!
//! ## Task Lifecycle Events
//!
//! Renders use a uniform lifecycle:
//! - The runtime emits `UiEvent::TaskStarted` once a task is spawned
//! - The runtime emits `UiEvent::TaskCompleted` wrapping the result event
//! - The reducer is the only place that mutates `TaskState`

use crossterm::event::Event as CrosstermEvent;
use figart_core::generator::{RenderOutcome, RenderRequest};

use crate::common::{TaskCompleted, TaskKind, TaskStarted};

#[derive(Debug)]
pub enum UiEvent {
    /// Frame cadence; also expires the copy flash.
    Tick,

    Terminal(CrosstermEvent),

    TaskStarted {
        kind: TaskKind,
        started: TaskStarted,
    },
    TaskCompleted {
        kind: TaskKind,
        completed: TaskCompleted<Box<UiEvent>>,
    },

    /// A render finished. `request` is the snapshot it was computed from.
    BannerRendered {
        request: RenderRequest,
        outcome: RenderOutcome,
    },

    /// A render was cancelled before it finished.
    RenderCancelled,
}
