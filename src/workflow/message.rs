//! Messages carried between workflow nodes.

use serde::{Deserialize, Serialize};

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Inbound query or a rewritten request headed to an agent
    User,
    /// An agent's response
    Agent,
}

/// A role-tagged text payload flowing along workflow edges.
///
/// Messages are immutable once produced; every hop constructs a new
/// message rather than mutating the previous one in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowMessage {
    pub role: MessageRole,
    pub content: String,
}

impl WorkflowMessage {
    /// Build a user-role message (inbound query or agent request).
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Build an agent-role message (agent response).
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
        }
    }
}
