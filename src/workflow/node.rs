//! Workflow nodes: the processing units sitting on the graph.

use crate::agents::AgentRef;

use super::message::WorkflowMessage;

/// Placeholder substituted with the upstream response text when a
/// transform template is applied.
pub const RESPONSE_PLACEHOLDER: &str = "{response}";

/// Message-rewriting step: substitutes the upstream response into a
/// prompt template to produce the next agent request.
///
/// Substitution can fail (template without a placeholder, or an
/// upstream message with no usable text); when it does, the predefined
/// fallback request is sent instead of aborting the run.
pub struct Transform {
    template: String,
    fallback: String,
}

impl Transform {
    pub fn new(template: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            fallback: fallback.into(),
        }
    }

    pub(crate) fn apply(&self, message: &WorkflowMessage) -> String {
        if !self.template.contains(RESPONSE_PLACEHOLDER) || message.content.trim().is_empty() {
            tracing::warn!("transform substitution failed, sending fallback request");
            return self.fallback.clone();
        }
        self.template.replace(RESPONSE_PLACEHOLDER, &message.content)
    }
}

/// Terminal formatting step: frames the final message as the run's
/// output.
pub struct Terminal {
    header: String,
    footer: Option<String>,
}

impl Terminal {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            footer: None,
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    pub(crate) fn render(&self, message: &WorkflowMessage) -> String {
        let mut out = format!(
            "{}\n{}\n\n{}",
            self.header,
            "=".repeat(self.header.len()),
            message.content.trim()
        );
        if let Some(footer) = &self.footer {
            out.push_str("\n\n");
            out.push_str(footer);
        }
        out
    }
}

/// What a node does when the run reaches it.
pub enum NodeKind {
    /// Invoke an agent with the current message and forward its response
    AgentCall(AgentRef),
    /// Rewrite the current message into a new request
    Transform(Transform),
    /// Format the current message into the run's output and stop
    TerminalOutput(Terminal),
    /// Emit a fixed output and stop; decouples routing tests from any
    /// specific agent's answers
    MockTerminal(String),
}

/// A named processing unit in the workflow graph.
pub struct Node {
    name: String,
    pub(crate) kind: NodeKind,
}

impl Node {
    pub fn agent(name: impl Into<String>, agent: AgentRef) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::AgentCall(agent),
        }
    }

    pub fn transform(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Transform(transform),
        }
    }

    pub fn terminal(name: impl Into<String>, terminal: Terminal) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::TerminalOutput(terminal),
        }
    }

    pub fn mock_terminal(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::MockTerminal(output.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_substitutes_response_text() {
        let transform = Transform::new("Look up policies for:\n\n{response}", "fallback");
        let message = WorkflowMessage::agent("Q4 revenue grew 12%");

        assert_eq!(
            transform.apply(&message),
            "Look up policies for:\n\nQ4 revenue grew 12%"
        );
    }

    #[test]
    fn transform_without_placeholder_falls_back() {
        let transform = Transform::new("static template", "Please look up general policies.");
        let message = WorkflowMessage::agent("anything");

        assert_eq!(transform.apply(&message), "Please look up general policies.");
    }

    #[test]
    fn transform_of_empty_message_falls_back() {
        let transform = Transform::new("{response}", "Please look up general policies.");
        let message = WorkflowMessage::agent("  ");

        assert_eq!(transform.apply(&message), "Please look up general policies.");
    }

    #[test]
    fn terminal_frames_content_with_header_and_footer() {
        let terminal =
            Terminal::new("FINANCIAL ANALYSIS REPORT").with_footer("STATUS: no review required.");
        let rendered = terminal.render(&WorkflowMessage::agent("Revenue grew 12%.\n"));

        assert!(rendered.starts_with("FINANCIAL ANALYSIS REPORT\n========================="));
        assert!(rendered.contains("Revenue grew 12%."));
        assert!(rendered.ends_with("STATUS: no review required."));
    }
}
