//! Conditional workflow graph engine.
//!
//! A small DAG executor for chaining agents: messages enter at a
//! designated entry node, each node either invokes an agent, rewrites
//! the message into a new request, or emits terminal output, and
//! routing edges decide the next hop from the content of the latest
//! response.
//!
//! ```text
//! WorkflowBuilder ──► Workflow ──► run()
//!                                   │
//!                                   ├─► Node (agent / transform / terminal)
//!                                   └─► Edge predicates (keyword routing)
//! ```
//!
//! Graphs are built once up front and shared immutably (`Arc<Workflow>`);
//! every `run()` owns its own [`WorkflowRun`] state, so any number of
//! runs may be in flight concurrently.

mod error;
pub mod financial;
mod graph;
mod message;
mod node;
mod predicate;

pub use error::{GraphError, WorkflowError};
pub use graph::{Workflow, WorkflowBuilder};
pub use message::{MessageRole, WorkflowMessage};
pub use node::{Node, NodeKind, Terminal, Transform, RESPONSE_PLACEHOLDER};
pub use predicate::{EdgePredicate, KeywordPredicate, POLICY_KEYWORDS};
