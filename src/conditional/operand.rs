//! Operand resolution for condition evaluation.
//!
//! An operand either carries inline literal values or references a sibling
//! question's answer by a free-text key. Every failure mode resolves to
//! [`ResolvedOperand::Missing`] — the "absent" outcome with length −1 — and
//! never to an error.

use crate::conditional::date;
use crate::store::{ContentNode, ContentSource, NodeId, Value};

pub(crate) const PROP_VALUE: &str = "value";
pub(crate) const PROP_REQUIRE_ALL: &str = "requireAll";
const PROP_IS_REFERENCE: &str = "isReference";
const PROP_QUESTION: &str = "question";

/// The values an operand resolved to, or the explicit "absent" outcome.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ResolvedOperand {
    /// Reference resolution failed; length is −1
    Missing,
    /// Inline or referenced values, in stored order
    Values(Vec<Value>),
}

impl ResolvedOperand {
    /// Count of resolved values, or −1 when unresolved.
    pub(crate) fn length(&self) -> isize {
        match self {
            Self::Missing => -1,
            Self::Values(values) => values.len() as isize,
        }
    }

    /// Whether this operand counts as empty: zero values or unresolved.
    pub(crate) fn is_empty_or_missing(&self) -> bool {
        self.length() <= 0
    }

    pub(crate) fn values(&self) -> &[Value] {
        match self {
            Self::Missing => &[],
            Self::Values(values) => values,
        }
    }
}

/// Reduce a free-text reference key to a valid node name: characters whose
/// lowercase form is a letter, digit, space, underscore or hyphen are kept
/// (original case preserved), everything else is dropped.
pub(crate) fn sanitize_node_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| {
            matches!(c.to_ascii_lowercase(), 'a'..='z' | '0'..='9' | ' ' | '_' | '-')
        })
        .collect()
}

/// Resolve an operand against the form being edited.
///
/// `section` is the definition of the guarded section; `scopes` are the
/// candidate answer containers from the walk context, nearest first.
pub(crate) fn resolve_operand<S: ContentSource>(
    store: &S,
    operand: &ContentNode,
    section: &ContentNode,
    scopes: &[NodeId],
) -> ResolvedOperand {
    if operand.bool_property(PROP_IS_REFERENCE).unwrap_or(false) {
        resolve_reference(store, operand, section, scopes)
    } else {
        match operand.property(PROP_VALUE) {
            Some(prop) => ResolvedOperand::Values(normalize_values(prop.values())),
            None => ResolvedOperand::Missing,
        }
    }
}

/// Quantifier flag of an operand: ALL (true) vs ANY (false) over its values.
pub(crate) fn require_all(operand: &ContentNode) -> bool {
    operand.bool_property(PROP_REQUIRE_ALL).unwrap_or(false)
}

// Date-typed values carry day precision once resolved; see the date module.
fn normalize_values(values: &[Value]) -> Vec<Value> {
    values
        .iter()
        .map(|value| match value {
            Value::DateTime(dt) => Value::DateTime(date::truncate_to_day(dt)),
            other => other.clone(),
        })
        .collect()
}

fn resolve_reference<S: ContentSource>(
    store: &S,
    operand: &ContentNode,
    section: &ContentNode,
    scopes: &[NodeId],
) -> ResolvedOperand {
    // The stored value is a free-text key naming a sibling question.
    let Some(key) = operand
        .property(PROP_VALUE)
        .and_then(|prop| prop.first())
        .and_then(Value::as_str)
    else {
        return ResolvedOperand::Missing;
    };
    let key = sanitize_node_name(key);

    let Some(parent_id) = section.parent() else {
        return ResolvedOperand::Missing;
    };
    let Ok(Some(parent)) = store.node(parent_id) else {
        return ResolvedOperand::Missing;
    };
    let Some(question_id) = parent.child(&key) else {
        log::debug!("No question named {key:?} next to section {}", section.id());
        return ResolvedOperand::Missing;
    };

    // Find the answer to that question among the in-progress answers,
    // starting at the nearest container.
    for &scope in scopes {
        let Ok(Some(container)) = store.node(scope) else {
            continue;
        };
        for child_id in container.child_ids() {
            let Ok(Some(child)) = store.node(child_id) else {
                continue;
            };
            if child.reference(PROP_QUESTION) == Some(question_id) {
                return match child.property(PROP_VALUE) {
                    Some(prop) => ResolvedOperand::Values(normalize_values(prop.values())),
                    None => ResolvedOperand::Missing,
                };
            }
        }
    }
    ResolvedOperand::Missing
}
