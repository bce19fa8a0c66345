//! HTTP API for the agent orchestrator.
//!
//! ## Endpoints
//!
//! - `GET  /api/health` - Health check
//! - `POST /api/task` - Start a single-agent task
//! - `GET  /api/task/{id}` - Get task status and result
//! - `POST /api/task/{id}/cancel` - Cancel a task
//! - `GET  /api/task/{id}/stream` - Stream task progress via SSE
//! - `GET  /api/tasks` - List all tasks
//! - `POST /api/workflow/run` - Execute the compliance workflow synchronously
//! - `POST /api/workflow/task` - Run the compliance workflow as a tracked task

mod routes;
pub mod types;

pub use routes::serve;
pub use types::*;
