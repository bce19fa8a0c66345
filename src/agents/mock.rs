//! Canned agent implementations.
//!
//! Stand-ins for the remote financial-analysis and policy-lookup
//! services. The server falls back to these when no remote endpoint is
//! configured, and the workflow tests use them to exercise routing
//! without network access. The financial responder echoes the query
//! context into its answer, so routing keywords present in the inbound
//! query surface in the analysis text the same way the real agent's
//! answers do.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::{AgentInvoker, InvocationError};

/// Canned financial-analysis responder.
pub struct MockFinancialAgent;

impl MockFinancialAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockFinancialAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentInvoker for MockFinancialAgent {
    fn name(&self) -> &str {
        "financial_analysis"
    }

    async fn invoke(
        &self,
        prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, InvocationError> {
        if cancel.is_cancelled() {
            return Err(InvocationError::Cancelled {
                agent: self.name().to_string(),
            });
        }

        Ok(format!(
            "Q4 2024 Financial Analysis\n\
             --------------------------\n\
             Total revenue: $4.85M (12.3% growth quarter over quarter)\n\
             Profit margin: 18.2%\n\
             Top performing products: Enterprise Suite, Analytics Add-on, Support Plus\n\
             \n\
             Query context: {}",
            prompt
        ))
    }
}

/// Canned policy-lookup responder.
pub struct MockPolicyAgent;

impl MockPolicyAgent {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockPolicyAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AgentInvoker for MockPolicyAgent {
    fn name(&self) -> &str {
        "policy_lookup"
    }

    async fn invoke(
        &self,
        _prompt: &str,
        cancel: &CancellationToken,
    ) -> Result<String, InvocationError> {
        if cancel.is_cancelled() {
            return Err(InvocationError::Cancelled {
                agent: self.name().to_string(),
            });
        }

        Ok("Relevant policies:\n\
            - Revenue Recognition Policy (ASC 606 alignment)\n\
            - Sales Commission Policy (quarterly payout rules)\n\
            - International Sales Compliance Policy\n\
            \n\
            Compliance requirements:\n\
            - Recognize enterprise contract revenue over the service period\n\
            - Document commission calculations for deals above $100K\n\
            - Review cross-border deals against export control lists\n\
            \n\
            Policies last updated: 2024-11-01"
            .to_string())
    }
}
