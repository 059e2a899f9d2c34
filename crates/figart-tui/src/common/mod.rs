//! Pieces shared across features: async task bookkeeping and clipboard access.

pub mod clipboard;
pub mod task;

pub use clipboard::{Clipboard, ClipboardError};
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskStarted, TaskState, Tasks};
