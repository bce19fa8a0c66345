//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;

/// Request to start a new single-agent task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Optional caller-supplied task id (generated if not specified)
    pub id: Option<String>,

    /// The query text handed to the agent
    pub input_text: String,
}

/// Response after starting a task.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskResponse {
    /// Task identifier
    pub id: String,

    /// Status observed at scheduling time
    pub status: TaskStatus,
}

/// Response to a cancellation request.
#[derive(Debug, Clone, Serialize)]
pub struct CancelTaskResponse {
    pub id: String,

    /// False when the task is unknown or already terminal
    pub cancelled: bool,
}

/// Request to run the compliance workflow.
#[derive(Debug, Clone, Deserialize)]
pub struct RunWorkflowRequest {
    /// Inbound analysis query
    pub query: String,
}

/// Outcome label for a synchronous workflow run.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    Error,
}

/// Response of a synchronous workflow run.
#[derive(Debug, Clone, Serialize)]
pub struct RunWorkflowResponse {
    pub status: RunStatus,

    /// Terminal output on success, error description otherwise
    pub result: String,
}

/// Request to run the compliance workflow as a tracked task.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowTaskRequest {
    /// Optional caller-supplied task id (generated if not specified)
    pub id: Option<String>,

    /// Inbound analysis query
    pub query: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,

    /// Service name
    pub service: String,

    /// Configured remote financial-agent endpoint (absent when mocked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_agent_url: Option<String>,

    /// Configured remote policy-agent endpoint (absent when mocked)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_agent_url: Option<String>,
}
