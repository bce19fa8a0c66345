//! Routing predicates for workflow edges.
//!
//! The traversal engine is agnostic to how conditions are computed: an
//! edge carries anything implementing [`EdgePredicate`], a pure function
//! of the message under consideration. The reference policy is keyword
//! membership over the latest response text, which realizes two-way
//! branching from a single classification signal.

use super::message::WorkflowMessage;

/// A pure routing condition evaluated against the message produced by
/// the source node.
pub trait EdgePredicate: Send + Sync {
    fn accepts(&self, message: &WorkflowMessage) -> bool;
}

impl<F> EdgePredicate for F
where
    F: Fn(&WorkflowMessage) -> bool + Send + Sync,
{
    fn accepts(&self, message: &WorkflowMessage) -> bool {
        self(message)
    }
}

/// Domain vocabulary indicating a response may need policy review.
pub const POLICY_KEYWORDS: &[&str] = &[
    "compliance",
    "policy",
    "regulation",
    "risk",
    "audit",
    "legal",
    "governance",
    "sox",
    "asc 606",
    "revenue recognition",
    "commission",
    "international",
    "regulatory",
    "standards",
];

/// Keyword-membership routing predicate.
///
/// Checks the message text for any vocabulary term (case-insensitive
/// substring match) and accepts when the presence result equals
/// `expected`. A message whose text cannot be inspected (empty or
/// whitespace-only) is treated as "keyword absent" rather than an
/// error, so routing stays total over non-terminal nodes.
pub struct KeywordPredicate {
    vocabulary: Vec<String>,
    expected: bool,
}

impl KeywordPredicate {
    /// Predicate over a custom vocabulary.
    pub fn new<I, S>(vocabulary: I, expected: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            vocabulary: vocabulary
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
            expected,
        }
    }

    /// Predicate over the default policy-review vocabulary.
    pub fn policy_review(expected: bool) -> Self {
        Self::new(POLICY_KEYWORDS.iter().copied(), expected)
    }

    fn keyword_present(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.vocabulary.iter().any(|k| lowered.contains(k.as_str()))
    }
}

impl EdgePredicate for KeywordPredicate {
    fn accepts(&self, message: &WorkflowMessage) -> bool {
        self.keyword_present(&message.content) == self.expected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        let predicate = KeywordPredicate::policy_review(true);
        let message = WorkflowMessage::agent("Quarterly results need a SOX review");
        assert!(predicate.accepts(&message));
    }

    #[test]
    fn keyword_free_text_takes_the_negated_edge() {
        let found = KeywordPredicate::policy_review(true);
        let not_found = KeywordPredicate::policy_review(false);
        let message = WorkflowMessage::agent("Revenue grew 12% on strong enterprise demand");

        assert!(!found.accepts(&message));
        assert!(not_found.accepts(&message));
    }

    #[test]
    fn uninspectable_text_defaults_to_keyword_absent() {
        let found = KeywordPredicate::policy_review(true);
        let not_found = KeywordPredicate::policy_review(false);
        let message = WorkflowMessage::agent("   ");

        assert!(!found.accepts(&message));
        assert!(not_found.accepts(&message));
    }

    #[test]
    fn custom_vocabulary_is_lowercased_once() {
        let predicate = KeywordPredicate::new(["GDPR"], true);
        let message = WorkflowMessage::agent("flagged for gdpr exposure");
        assert!(predicate.accepts(&message));
    }

    #[test]
    fn closures_work_as_predicates() {
        let predicate = |m: &WorkflowMessage| m.content.len() > 3;
        assert!(predicate.accepts(&WorkflowMessage::agent("long enough")));
        assert!(!predicate.accepts(&WorkflowMessage::agent("no")));
    }
}
