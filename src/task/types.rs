//! Task records, status and units of work.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::agents::{AgentRef, InvocationError};
use crate::workflow::{Workflow, WorkflowError};

/// Get current timestamp as RFC3339 string.
pub fn now_string() -> String {
    Utc::now().to_rfc3339()
}

/// Task status enumeration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is created, background work not yet scheduled
    Pending,
    /// Task is currently running
    Running,
    /// Task completed successfully
    Completed,
    /// Task failed with an error
    Failed,
    /// Task was cancelled
    Cancelled,
}

impl TaskStatus {
    /// Terminal statuses are immutable: once committed, no later
    /// transition is permitted.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Full task record as observed by status queries.
///
/// The owning cancellation handle is tracked separately by the manager
/// and never serialized.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    /// Opaque unique task identifier
    pub id: String,

    /// Current status
    pub status: TaskStatus,

    /// Original input text
    pub input: String,

    /// Result payload, set when status is Completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Error description, set when status is Failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Creation timestamp (RFC3339)
    pub created_at: String,

    /// Terminal-transition timestamp (RFC3339)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl Task {
    pub(crate) fn pending(id: String, input: String) -> Self {
        Self {
            id,
            status: TaskStatus::Pending,
            input,
            result: None,
            error: None,
            created_at: now_string(),
            completed_at: None,
        }
    }

    /// Record for a request whose scheduling failed outright.
    pub(crate) fn failed_at_start(id: String, input: String, error: impl Into<String>) -> Self {
        let now = now_string();
        Self {
            id,
            status: TaskStatus::Failed,
            input,
            result: None,
            error: Some(error.into()),
            created_at: now.clone(),
            completed_at: Some(now),
        }
    }
}

/// Request to start a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct StartTask {
    /// Caller-supplied opaque id; generated when absent
    pub id: Option<String>,
    /// The query text handed to the unit of work
    pub input: String,
}

/// Error from a unit of work.
#[derive(Debug, thiserror::Error)]
pub enum WorkError {
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

/// The cancellable unit of work wrapped by a task: a single agent call
/// or an entire workflow run.
#[derive(Clone)]
pub enum WorkUnit {
    Agent(AgentRef),
    Workflow(Arc<Workflow>),
}

impl WorkUnit {
    pub(crate) async fn run(
        &self,
        input: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WorkError> {
        match self {
            Self::Agent(agent) => Ok(agent.invoke(input, cancel).await?),
            Self::Workflow(workflow) => Ok(workflow.run(input, cancel).await?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::Running).unwrap(),
            "\"running\""
        );
        assert_eq!(
            serde_json::to_string(&TaskStatus::Cancelled).unwrap(),
            "\"cancelled\""
        );
        assert_eq!(TaskStatus::Running.to_string(), "running");
    }

    #[test]
    fn exactly_three_statuses_are_terminal() {
        assert!(!TaskStatus::Pending.is_terminal());
        assert!(!TaskStatus::Running.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
    }

    #[test]
    fn terminal_record_omits_empty_fields() {
        let task = Task::pending("t1".to_string(), "hello".to_string());
        let json = serde_json::to_value(&task).unwrap();
        assert!(json.get("result").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["status"], "pending");
    }
}
