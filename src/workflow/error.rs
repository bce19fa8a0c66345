//! Workflow error types.

use crate::agents::InvocationError;

/// Failures surfaced by a workflow run.
///
/// A routing dead end is deliberately a distinct variant from a node
/// execution failure: the former is a reachability outcome, the latter
/// a downstream fault.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("no outgoing edge accepted the message produced by node '{node}'")]
    NoRoute { node: String },

    #[error("run routed back to already-visited node '{node}'")]
    NodeRevisited { node: String },

    #[error("terminal node '{node}' has no content to yield")]
    EmptyOutput { node: String },

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("workflow run was cancelled")]
    Cancelled,
}

/// Graph construction errors, reported by [`WorkflowBuilder::build`].
///
/// [`WorkflowBuilder::build`]: super::WorkflowBuilder::build
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("duplicate node name '{0}'")]
    DuplicateNode(String),

    #[error("edge references unknown node '{0}'")]
    UnknownNode(String),

    #[error("no entry node designated")]
    MissingEntry,
}
