//! Configuration for commit processing.

/// Configuration for the commit pipeline and the condition evaluator
#[derive(Debug, Clone)]
pub struct CommitConfig {
    /// How many ancestor answer containers a reference operand may search,
    /// starting at the parent of the answer section being evaluated
    pub answer_search_depth: usize,
    /// Whether to enforce the questionnaire's required subject types on new
    /// forms; disabling this skips the only commit-rejecting check
    pub enforce_required_subject_types: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            answer_search_depth: 1,
            enforce_required_subject_types: true,
        }
    }
}
