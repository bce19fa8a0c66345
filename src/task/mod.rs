//! Task lifecycle management.
//!
//! A task is one trackable unit of agent work: a direct agent
//! invocation or an entire workflow run, executed in the background and
//! observable through a five-state lifecycle
//! (`Pending → Running → Completed | Failed | Cancelled`).
//!
//! The [`TaskManager`] owns the only shared mutable state in the crate
//! (the id→record and id→cancellation-handle maps); no other component
//! reaches into task state directly.

mod manager;
mod types;

pub use manager::TaskManager;
pub use types::{now_string, StartTask, Task, TaskStatus, WorkError, WorkUnit};
