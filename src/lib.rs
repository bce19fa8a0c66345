//! # finflow
//!
//! Orchestrator for financial analysis AI agents: runs agent work as
//! asynchronous, trackable tasks and chains agents into a conditional
//! compliance workflow.
//!
//! ## Architecture
//!
//! ```text
//!        ┌──────────────────────────────────┐
//!        │           HTTP API               │
//!        └───────┬──────────────────┬───────┘
//!                │                  │
//!                ▼                  ▼
//!       ┌───────────────┐  ┌────────────────┐
//!       │  TaskManager  │  │    Workflow    │
//!       │ (lifecycle +  │  │ (conditional   │
//!       │ cancellation) │  │  DAG routing)  │
//!       └───────┬───────┘  └───────┬────────┘
//!               │                  │
//!               └───────┬──────────┘
//!                       ▼
//!               ┌───────────────┐
//!               │ AgentInvoker  │
//!               │ (remote/mock) │
//!               └───────────────┘
//! ```
//!
//! ## Modules
//! - `agents`: text-in/text-out agent invocation (remote HTTP + mocks)
//! - `task`: task lifecycle manager (start/status/cancel)
//! - `workflow`: conditional workflow graph engine and the shipped
//!   financial-compliance graph
//! - `api`: axum HTTP boundary
//! - `config`: environment-based configuration

pub mod agents;
pub mod api;
pub mod config;
pub mod task;
pub mod workflow;

pub use agents::{AgentInvoker, AgentRef, InvocationError};
pub use config::Config;
pub use task::{TaskManager, TaskStatus};
pub use workflow::{Workflow, WorkflowBuilder, WorkflowError};
