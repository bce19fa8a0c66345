//! Agent invocation layer.
//!
//! Everything upstream of this module treats an agent as an opaque
//! text-in/text-out service: hand it a prompt, await a textual result,
//! optionally abort via a cancellation token. The task manager and the
//! workflow engine both consume agents exclusively through the
//! [`AgentInvoker`] trait.
//!
//! Implementations:
//! - [`RemoteAgent`]: calls a remote agent service over HTTP
//! - [`MockFinancialAgent`] / [`MockPolicyAgent`]: canned responders
//!   used when no remote endpoint is configured

mod mock;
mod remote;

pub use mock::{MockFinancialAgent, MockPolicyAgent};
pub use remote::RemoteAgent;

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Shared handle to an agent implementation.
pub type AgentRef = Arc<dyn AgentInvoker>;

/// An external text-in/text-out agent.
///
/// # Invariants
/// - `invoke()` never panics; all failures are returned as `Err`
/// - A successful invocation returns non-empty text
/// - Implementations must observe `cancel` at their suspension points
///   and return [`InvocationError::Cancelled`] once it fires
#[async_trait]
pub trait AgentInvoker: Send + Sync {
    /// Human-readable agent name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Send a prompt to the agent and await its textual response.
    async fn invoke(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, InvocationError>;
}

/// Errors from a downstream agent call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InvocationError {
    #[error("network error calling agent '{agent}': {message}")]
    Network { agent: String, message: String },

    #[error("agent '{agent}' returned HTTP {status}: {message}")]
    Status {
        agent: String,
        status: u16,
        message: String,
    },

    #[error("unusable response from agent '{agent}': {message}")]
    BadResponse { agent: String, message: String },

    #[error("invocation of agent '{agent}' was cancelled")]
    Cancelled { agent: String },
}

impl InvocationError {
    /// Whether this error was caused by cooperative cancellation rather
    /// than a genuine downstream failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}
