//! Conditional visibility of answer sections.
//!
//! A questionnaire Section may be guarded by a condition tree (nested
//! [`ConditionalGroup`](crate::store::NodeType::ConditionalGroup) /
//! [`Conditional`](crate::store::NodeType::Conditional) nodes). This module
//! decides whether the guard of a given AnswerSection instance is satisfied
//! by the answers already present in the Form being edited.
//!
//! Evaluation is a pure function of the condition tree and the in-flight
//! answers: the result is returned to the caller and never written back into
//! the tree. It is also total — a missing section, a missing answer, a
//! malformed date or a mismatched type all evaluate to `false`; no error
//! escapes this module.

pub mod comparator;
mod date;
mod eval;
mod operand;

pub use comparator::Comparator;

use crate::commit::WalkContext;
use crate::config::CommitConfig;
use crate::store::{ContentSource, NodeId};

const PROP_SECTION: &str = "section";
const CHILD_CONDITION: &str = "condition";

/// Decide whether the guard condition of an AnswerSection is satisfied.
///
/// `ctx` must be the walk context at the AnswerSection itself; reference
/// operands search the containers above it, nearest first, up to
/// `config.answer_search_depth` levels. An AnswerSection whose section has
/// no `condition` child yields `false` — callers treat unguarded sections as
/// their own fast path and only consult this for guarded ones.
#[must_use]
pub fn is_condition_satisfied<S: ContentSource>(
    store: &S,
    answer_section: NodeId,
    ctx: &WalkContext,
    config: &CommitConfig,
) -> bool {
    let scopes: Vec<NodeId> = ctx
        .ancestors_above()
        .take(config.answer_search_depth)
        .collect();

    let Ok(Some(answer_node)) = store.node(answer_section) else {
        return false;
    };
    let Some(section_id) = answer_node.reference(PROP_SECTION) else {
        return false;
    };
    let Ok(Some(section)) = store.node(section_id) else {
        return false;
    };
    let Some(condition_id) = section.child(CHILD_CONDITION) else {
        return false;
    };
    let Ok(Some(condition)) = store.node(condition_id) else {
        return false;
    };

    eval::evaluate_node(store, condition, section, &scopes)
}
