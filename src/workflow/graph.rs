//! Graph construction and traversal.

use std::collections::{HashMap, HashSet};

use tokio_util::sync::CancellationToken;

use super::error::{GraphError, WorkflowError};
use super::message::WorkflowMessage;
use super::node::{Node, NodeKind};
use super::predicate::EdgePredicate;

struct Edge {
    to: String,
    predicate: Option<Box<dyn EdgePredicate>>,
}

impl Edge {
    fn accepts(&self, message: &WorkflowMessage) -> bool {
        match &self.predicate {
            Some(predicate) => predicate.accepts(message),
            // Edges with no predicate are unconditional.
            None => true,
        }
    }
}

/// Builder for a [`Workflow`].
///
/// Construction happens once, before any run starts; `build()` checks
/// that the entry node and every edge endpoint name a registered node.
pub struct WorkflowBuilder {
    nodes: Vec<Node>,
    edges: Vec<(String, Edge)>,
    entry: Option<String>,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            entry: None,
        }
    }

    /// Register a node.
    pub fn node(mut self, node: Node) -> Self {
        self.nodes.push(node);
        self
    }

    /// Designate the entry node.
    pub fn entry(mut self, name: impl Into<String>) -> Self {
        self.entry = Some(name.into());
        self
    }

    /// Add an unconditional edge.
    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push((
            from.into(),
            Edge {
                to: to.into(),
                predicate: None,
            },
        ));
        self
    }

    /// Add an edge taken only when `predicate` accepts the message
    /// produced by the source node.
    pub fn edge_when(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        predicate: impl EdgePredicate + 'static,
    ) -> Self {
        self.edges.push((
            from.into(),
            Edge {
                to: to.into(),
                predicate: Some(Box::new(predicate)),
            },
        ));
        self
    }

    /// Validate and freeze the graph.
    pub fn build(self) -> Result<Workflow, GraphError> {
        let mut nodes: HashMap<String, Node> = HashMap::new();
        for node in self.nodes {
            if nodes.contains_key(node.name()) {
                return Err(GraphError::DuplicateNode(node.name().to_string()));
            }
            nodes.insert(node.name().to_string(), node);
        }

        let entry = self.entry.ok_or(GraphError::MissingEntry)?;
        if !nodes.contains_key(&entry) {
            return Err(GraphError::UnknownNode(entry));
        }

        // Per-source registration order is preserved; it is also the
        // edge evaluation order during routing.
        let mut edges: HashMap<String, Vec<Edge>> = HashMap::new();
        for (from, edge) in self.edges {
            if !nodes.contains_key(&from) {
                return Err(GraphError::UnknownNode(from));
            }
            if !nodes.contains_key(&edge.to) {
                return Err(GraphError::UnknownNode(edge.to));
            }
            edges.entry(from).or_default().push(edge);
        }

        Ok(Workflow {
            nodes,
            edges,
            entry,
        })
    }
}

impl Default for WorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

enum StepOutcome {
    Message(WorkflowMessage),
    Output(String),
}

/// One execution instance traversing the graph.
///
/// Owns its position, the accumulated message, and the set of nodes
/// already visited; never shared between runs.
struct WorkflowRun {
    current: String,
    message: WorkflowMessage,
    visited: HashSet<String>,
}

impl WorkflowRun {
    fn new(entry: &str, message: WorkflowMessage) -> Self {
        let mut visited = HashSet::new();
        visited.insert(entry.to_string());
        Self {
            current: entry.to_string(),
            message,
            visited,
        }
    }

    /// Move to `next`, failing if the run has already executed it.
    fn advance(&mut self, next: &str, message: WorkflowMessage) -> Result<(), WorkflowError> {
        if !self.visited.insert(next.to_string()) {
            return Err(WorkflowError::NodeRevisited {
                node: next.to_string(),
            });
        }
        self.current = next.to_string();
        self.message = message;
        Ok(())
    }
}

/// An immutable, validated workflow graph.
pub struct Workflow {
    nodes: HashMap<String, Node>,
    edges: HashMap<String, Vec<Edge>>,
    entry: String,
}

impl Workflow {
    /// Name of the designated entry node.
    pub fn entry_node(&self) -> &str {
        &self.entry
    }

    /// Execute one run from the entry node until a terminal node yields
    /// output or the run fails.
    pub async fn run(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<String, WorkflowError> {
        let mut run = WorkflowRun::new(&self.entry, WorkflowMessage::user(query));

        loop {
            if cancel.is_cancelled() {
                return Err(WorkflowError::Cancelled);
            }

            let node = self
                .nodes
                .get(&run.current)
                .expect("run position validated against registered nodes at build time");

            tracing::debug!(node = %run.current, "executing workflow node");

            let outcome = self.execute_node(node, &run.message, cancel).await?;
            match outcome {
                StepOutcome::Output(output) => {
                    tracing::debug!(node = %run.current, "workflow run reached terminal output");
                    return Ok(output);
                }
                StepOutcome::Message(message) => {
                    let next = self.route(&run.current, &message)?;
                    run.advance(&next, message)?;
                }
            }
        }
    }

    async fn execute_node(
        &self,
        node: &Node,
        message: &WorkflowMessage,
        cancel: &CancellationToken,
    ) -> Result<StepOutcome, WorkflowError> {
        match &node.kind {
            NodeKind::AgentCall(agent) => {
                let text = agent.invoke(&message.content, cancel).await?;
                Ok(StepOutcome::Message(WorkflowMessage::agent(text)))
            }
            NodeKind::Transform(transform) => Ok(StepOutcome::Message(WorkflowMessage::user(
                transform.apply(message),
            ))),
            NodeKind::TerminalOutput(terminal) => {
                if message.content.trim().is_empty() {
                    return Err(WorkflowError::EmptyOutput {
                        node: node.name().to_string(),
                    });
                }
                Ok(StepOutcome::Output(terminal.render(message)))
            }
            NodeKind::MockTerminal(output) => {
                if output.trim().is_empty() {
                    return Err(WorkflowError::EmptyOutput {
                        node: node.name().to_string(),
                    });
                }
                Ok(StepOutcome::Output(output.clone()))
            }
        }
    }

    /// Pick the destination of the first accepting outgoing edge, in
    /// registration order.
    fn route(&self, from: &str, message: &WorkflowMessage) -> Result<String, WorkflowError> {
        let edges = self.edges.get(from).map(Vec::as_slice).unwrap_or(&[]);
        edges
            .iter()
            .find(|edge| edge.accepts(message))
            .map(|edge| edge.to.clone())
            .ok_or_else(|| WorkflowError::NoRoute {
                node: from.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use crate::agents::{AgentInvoker, AgentRef, InvocationError};
    use crate::workflow::node::Terminal;
    use crate::workflow::predicate::KeywordPredicate;

    use super::*;

    /// Test agent that replies with a fixed string.
    struct EchoAgent {
        name: &'static str,
        reply: &'static str,
    }

    impl EchoAgent {
        fn agent_ref(name: &'static str, reply: &'static str) -> AgentRef {
            Arc::new(Self { name, reply })
        }
    }

    #[async_trait]
    impl AgentInvoker for EchoAgent {
        fn name(&self) -> &str {
            self.name
        }

        async fn invoke(
            &self,
            _prompt: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, InvocationError> {
            Ok(self.reply.to_string())
        }
    }

    /// Test agent that always fails.
    struct FailingAgent;

    #[async_trait]
    impl AgentInvoker for FailingAgent {
        fn name(&self) -> &str {
            "failing"
        }

        async fn invoke(
            &self,
            _prompt: &str,
            _cancel: &CancellationToken,
        ) -> Result<String, InvocationError> {
            Err(InvocationError::Network {
                agent: "failing".to_string(),
                message: "connection refused".to_string(),
            })
        }
    }

    fn two_way_graph(reply: &'static str) -> Workflow {
        WorkflowBuilder::new()
            .node(Node::agent("classify", EchoAgent::agent_ref("classify", reply)))
            .node(Node::mock_terminal("policy_path", "policy output"))
            .node(Node::terminal("direct_path", Terminal::new("DIRECT")))
            .entry("classify")
            .edge_when("classify", "policy_path", KeywordPredicate::policy_review(true))
            .edge_when("classify", "direct_path", KeywordPredicate::policy_review(false))
            .build()
            .expect("valid test graph")
    }

    #[tokio::test]
    async fn keyword_response_selects_policy_path() {
        let workflow = two_way_graph("quarterly compliance review required");
        let output = workflow
            .run("analyze Q4", &CancellationToken::new())
            .await
            .expect("run should reach terminal output");
        assert_eq!(output, "policy output");
    }

    #[tokio::test]
    async fn keyword_free_response_selects_direct_path() {
        let workflow = two_way_graph("revenue grew 12% on enterprise demand");
        let output = workflow
            .run("analyze Q4", &CancellationToken::new())
            .await
            .expect("run should reach terminal output");
        assert!(output.starts_with("DIRECT\n======"));
        assert!(output.contains("revenue grew 12%"));
    }

    #[tokio::test]
    async fn run_with_no_accepting_edge_reports_dead_end() {
        let workflow = WorkflowBuilder::new()
            .node(Node::agent("classify", EchoAgent::agent_ref("classify", "plain text")))
            .node(Node::mock_terminal("out", "done"))
            .entry("classify")
            .edge_when("classify", "out", KeywordPredicate::policy_review(true))
            .build()
            .expect("valid test graph");

        let err = workflow
            .run("query", &CancellationToken::new())
            .await
            .expect_err("no edge should accept");
        assert!(matches!(err, WorkflowError::NoRoute { node } if node == "classify"));
    }

    #[tokio::test]
    async fn cycle_reachable_via_unconditional_edges_fails_instead_of_looping() {
        let workflow = WorkflowBuilder::new()
            .node(Node::agent("a", EchoAgent::agent_ref("a", "ping")))
            .node(Node::agent("b", EchoAgent::agent_ref("b", "pong")))
            .entry("a")
            .edge("a", "b")
            .edge("b", "a")
            .build()
            .expect("cycles are a run-time failure, not a build-time one");

        let err = workflow
            .run("query", &CancellationToken::new())
            .await
            .expect_err("revisit must fail the run");
        assert!(matches!(err, WorkflowError::NodeRevisited { node } if node == "a"));
    }

    #[tokio::test]
    async fn node_failure_is_distinct_from_dead_end() {
        let workflow = WorkflowBuilder::new()
            .node(Node::agent("bad", Arc::new(FailingAgent)))
            .node(Node::mock_terminal("out", "done"))
            .entry("bad")
            .edge("bad", "out")
            .build()
            .expect("valid test graph");

        let err = workflow
            .run("query", &CancellationToken::new())
            .await
            .expect_err("agent failure should fail the run");
        assert!(matches!(err, WorkflowError::Invocation(_)));
    }

    #[tokio::test]
    async fn cancelled_token_aborts_the_run() {
        let workflow = two_way_graph("anything");
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = workflow
            .run("query", &cancel)
            .await
            .expect_err("pre-cancelled run should abort");
        assert!(matches!(err, WorkflowError::Cancelled));
    }

    #[tokio::test]
    async fn empty_terminal_content_is_rejected() {
        let workflow = WorkflowBuilder::new()
            .node(Node::agent("echo", EchoAgent::agent_ref("echo", "   ")))
            .node(Node::terminal("out", Terminal::new("REPORT")))
            .entry("echo")
            .edge("echo", "out")
            .build()
            .expect("valid test graph");

        let err = workflow
            .run("query", &CancellationToken::new())
            .await
            .expect_err("blank content must not be yielded");
        assert!(matches!(err, WorkflowError::EmptyOutput { node } if node == "out"));
    }

    #[test]
    fn build_rejects_unknown_edge_endpoints() {
        let err = WorkflowBuilder::new()
            .node(Node::mock_terminal("only", "out"))
            .entry("only")
            .edge("only", "missing")
            .build()
            .err()
            .expect("unknown destination must be rejected");
        assert_eq!(err, GraphError::UnknownNode("missing".to_string()));
    }

    #[test]
    fn build_rejects_duplicate_nodes_and_missing_entry() {
        let err = WorkflowBuilder::new()
            .node(Node::mock_terminal("n", "a"))
            .node(Node::mock_terminal("n", "b"))
            .entry("n")
            .build()
            .err()
            .expect("duplicate name must be rejected");
        assert_eq!(err, GraphError::DuplicateNode("n".to_string()));

        let err = WorkflowBuilder::new()
            .node(Node::mock_terminal("n", "a"))
            .build()
            .err()
            .expect("entry is required");
        assert_eq!(err, GraphError::MissingEntry);
    }
}
