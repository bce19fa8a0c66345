//! The task lifecycle manager.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use super::types::{now_string, StartTask, Task, TaskStatus, WorkError, WorkUnit};

/// Tracks, cancels and reports status for in-flight units of work.
///
/// # Invariants
/// - Exactly one terminal transition is committed per task; whichever
///   writer (completion callback or cancel call) lands first wins and
///   the other is discarded silently
/// - Terminal records are immutable on every subsequent observation
/// - Every map mutation is atomic with respect to concurrent status
///   queries and cancel calls
pub struct TaskManager {
    tasks: RwLock<HashMap<String, Task>>,
    running: RwLock<HashMap<String, CancellationToken>>,
}

impl TaskManager {
    pub fn new() -> Self {
        Self {
            tasks: RwLock::new(HashMap::new()),
            running: RwLock::new(HashMap::new()),
        }
    }

    /// Allocate a task, schedule its unit of work in the background and
    /// promote it to Running.
    ///
    /// Scheduling failures (blank input, id collision) yield a record
    /// already in Failed; they never propagate to the caller.
    pub async fn start_task(self: &Arc<Self>, request: StartTask, work: WorkUnit) -> Task {
        let id = request
            .id
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let input = request.input;

        if input.trim().is_empty() {
            tracing::warn!(task = %id, "rejecting task with blank input");
            let task = Task::failed_at_start(id, input, "input text is empty");
            self.tasks
                .write()
                .await
                .entry(task.id.clone())
                .or_insert_with(|| task.clone());
            return task;
        }

        let cancel = CancellationToken::new();
        {
            let mut tasks = self.tasks.write().await;
            if tasks.contains_key(&id) {
                // Existing records are never clobbered; reusing an id is
                // a scheduling failure reported on the returned record.
                tracing::warn!(task = %id, "rejecting task with duplicate id");
                return Task::failed_at_start(id, input, "task id already exists");
            }
            tasks.insert(id.clone(), Task::pending(id.clone(), input.clone()));
            self.running.write().await.insert(id.clone(), cancel.clone());
        }

        tracing::info!(task = %id, "task scheduled");

        let manager = Arc::clone(self);
        let task_id = id.clone();
        tokio::spawn(async move {
            let outcome = work.run(&input, &cancel).await;
            manager.finish(&task_id, outcome).await;
        });

        let mut tasks = self.tasks.write().await;
        let task = tasks
            .get_mut(&id)
            .expect("record inserted above and never removed");
        // Skip the promotion if the work already committed a terminal
        // state between spawn and here; both observations are valid.
        if task.status == TaskStatus::Pending {
            task.status = TaskStatus::Running;
        }
        task.clone()
    }

    /// Pure lookup; safe to call concurrently with in-flight work.
    pub async fn get_status(&self, id: &str) -> Option<Task> {
        self.tasks.read().await.get(id).cloned()
    }

    /// All task records, most recent first.
    pub async fn list_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.tasks.read().await.values().cloned().collect();
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        tasks
    }

    /// Signal cancellation to a task's unit of work.
    ///
    /// Returns `false` when the task is unknown or already terminal;
    /// cancelling a finished task is a no-op, not an error. The task is
    /// marked Cancelled immediately from the caller's perspective; a
    /// late result from abandoned work is discarded when it arrives.
    pub async fn cancel(&self, id: &str) -> bool {
        {
            let mut tasks = self.tasks.write().await;
            let Some(task) = tasks.get_mut(id) else {
                return false;
            };
            if task.status.is_terminal() {
                return false;
            }
            task.status = TaskStatus::Cancelled;
            task.completed_at = Some(now_string());
        }

        if let Some(token) = self.running.write().await.remove(id) {
            token.cancel();
        }
        tracing::info!(task = %id, "task cancelled");
        true
    }

    /// Commit the outcome of a finished unit of work.
    ///
    /// Single-writer discipline: a commit that finds the task already
    /// terminal (an explicit cancel won the race) is discarded.
    async fn finish(&self, id: &str, outcome: Result<String, WorkError>) {
        {
            let mut tasks = self.tasks.write().await;
            let Some(task) = tasks.get_mut(id) else {
                tracing::warn!(task = %id, "finished work for unknown task");
                return;
            };
            if task.status.is_terminal() {
                tracing::debug!(task = %id, "late result discarded, task already terminal");
                return;
            }
            match outcome {
                Ok(result) => {
                    task.status = TaskStatus::Completed;
                    task.result = Some(result);
                }
                Err(e) => {
                    tracing::warn!(task = %id, error = %e, "task failed");
                    task.status = TaskStatus::Failed;
                    task.error = Some(e.to_string());
                }
            }
            task.completed_at = Some(now_string());
        }

        self.running.write().await.remove(id);
    }
}

impl Default for TaskManager {
    fn default() -> Self {
        Self::new()
    }
}
