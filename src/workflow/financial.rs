//! The financial-compliance workflow shipped with the server.
//!
//! ```text
//! financial_analysis ──[policy keywords]──► to_policy_lookup ──► policy_lookup
//!          │                                                          │
//!          └──[no keywords]──► financial_only          to_compliance_report
//!                                                                     │
//!                                                           compliance_report
//! ```
//!
//! The financial agent classifies the query; when its analysis mentions
//! policy-relevant terms the run detours through the policy-lookup
//! agent and ends at a compliance-report terminal, otherwise it goes
//! straight to a financial-only report.

use crate::agents::AgentRef;

use super::graph::{Workflow, WorkflowBuilder};
use super::node::{Node, Terminal, Transform};
use super::predicate::KeywordPredicate;

const POLICY_LOOKUP_TEMPLATE: &str = "\
Based on the following financial analysis:

{response}

Please find relevant policies that apply to the financial metrics, \
products, and business areas mentioned above. Focus on:
- Revenue recognition policies
- Sales commission policies
- International sales compliance
- Financial reporting standards
- Any regulatory requirements mentioned

Provide specific policy names and compliance requirements.";

const POLICY_LOOKUP_FALLBACK: &str =
    "Please lookup general sales and revenue recognition policies.";

const COMPLIANCE_REPORT_TEMPLATE: &str = "\
Generate a comprehensive compliance report based on the following policy analysis:

{response}

Please create a compliance report that includes:
- Executive summary of compliance status
- Key policy findings and requirements
- Risk assessment and mitigation recommendations
- Action items for maintaining compliance
- Overall compliance status (compliant/needs-attention/non-compliant)

Format the response as a clear, executive-level compliance report.";

const COMPLIANCE_REPORT_FALLBACK: &str = "Please generate a basic compliance report.";

/// Fixed, policy-compliant report emitted by the compliance terminal.
const MOCK_COMPLIANCE_REPORT: &str = "\
FINANCIAL ANALYSIS & COMPLIANCE REPORT
====================================

EXECUTIVE SUMMARY:
All financial activities are in full compliance with company policies and \
regulatory requirements. No issues detected.

FINANCIAL HIGHLIGHTS:
- Compliance Score: 100%
- Risk Level: Low
- Last Audit: 2024-Q4
- Status: Fully Compliant

COMPLIANCE STATUS: COMPLIANT

POLICY ALIGNMENT:
- Revenue recognition practices fully align with ASC 606 standards
- Sales commission structures meet all regulatory requirements
- International sales comply with all applicable jurisdictions
- Financial reporting meets SOX compliance standards

ACTION ITEMS:
- Continue quarterly compliance monitoring
- Maintain current best practices
- Schedule next routine audit for Q1 2025

PRIORITY AREAS:
- Routine Monitoring
- Best Practice Maintenance";

/// Build the compliance workflow around the given financial-analysis
/// and policy-lookup agents.
pub fn compliance_workflow(financial: AgentRef, policy: AgentRef) -> Workflow {
    WorkflowBuilder::new()
        .node(Node::agent("financial_analysis", financial))
        .node(Node::transform(
            "to_policy_lookup",
            Transform::new(POLICY_LOOKUP_TEMPLATE, POLICY_LOOKUP_FALLBACK),
        ))
        .node(Node::agent("policy_lookup", policy))
        .node(Node::transform(
            "to_compliance_report",
            Transform::new(COMPLIANCE_REPORT_TEMPLATE, COMPLIANCE_REPORT_FALLBACK),
        ))
        .node(Node::mock_terminal("compliance_report", MOCK_COMPLIANCE_REPORT))
        .node(Node::terminal(
            "financial_only",
            Terminal::new("FINANCIAL ANALYSIS REPORT")
                .with_footer("STATUS: No policy compliance review required."),
        ))
        .entry("financial_analysis")
        // Policy review path
        .edge_when(
            "financial_analysis",
            "to_policy_lookup",
            KeywordPredicate::policy_review(true),
        )
        .edge("to_policy_lookup", "policy_lookup")
        .edge("policy_lookup", "to_compliance_report")
        .edge("to_compliance_report", "compliance_report")
        // No policy review path
        .edge_when(
            "financial_analysis",
            "financial_only",
            KeywordPredicate::policy_review(false),
        )
        .build()
        .expect("compliance workflow graph is statically valid")
}
