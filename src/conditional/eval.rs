//! Recursive evaluation of condition trees.

use itertools::iproduct;

use crate::conditional::comparator::{self, Comparator};
use crate::conditional::operand::{self, PROP_REQUIRE_ALL};
use crate::store::{ContentNode, ContentSource, NodeId, NodeType};

const PROP_COMPARATOR: &str = "comparator";
const CHILD_OPERAND_A: &str = "operandA";
const CHILD_OPERAND_B: &str = "operandB";

/// Evaluate one node of a condition tree.
///
/// Groups fold their children left to right: AND seeded `true` when
/// `requireAll` is set, OR seeded `false` otherwise. A zero-child AND group
/// is therefore `true` and a zero-child OR group `false`. Anything that is
/// neither a group nor a condition evaluates to `false`.
pub(crate) fn evaluate_node<S: ContentSource>(
    store: &S,
    node: &ContentNode,
    section: &ContentNode,
    scopes: &[NodeId],
) -> bool {
    match node.node_type() {
        NodeType::ConditionalGroup => {
            let require_all = node.bool_property(PROP_REQUIRE_ALL).unwrap_or(false);
            let mut result = require_all;
            for child_id in node.child_ids() {
                let Ok(Some(child)) = store.node(child_id) else {
                    continue;
                };
                let partial = evaluate_node(store, child, section, scopes);
                result = if require_all {
                    result && partial
                } else {
                    result || partial
                };
            }
            result
        }
        NodeType::Conditional => evaluate_condition(store, node, section, scopes),
        _ => false,
    }
}

fn evaluate_condition<S: ContentSource>(
    store: &S,
    node: &ContentNode,
    section: &ContentNode,
    scopes: &[NodeId],
) -> bool {
    let Some(comparator) = node
        .string_property(PROP_COMPARATOR)
        .and_then(Comparator::parse)
    else {
        log::debug!("Condition {} has no usable comparator", node.id());
        return false;
    };
    let Some(operand_a) = child_node(store, node, CHILD_OPERAND_A) else {
        return false;
    };
    let Some(operand_b) = child_node(store, node, CHILD_OPERAND_B) else {
        return false;
    };

    let resolved_a = operand::resolve_operand(store, operand_a, section, scopes);
    let resolved_b = operand::resolve_operand(store, operand_b, section, scopes);

    // Presence comparators look only at operand lengths; the quantifier
    // flags do not apply to them.
    if comparator.is_presence() {
        let empty = resolved_a.is_empty_or_missing() || resolved_b.is_empty_or_missing();
        return if comparator == Comparator::IsEmpty {
            empty
        } else {
            !empty
        };
    }

    // ALL semantics if either operand demands it, ANY otherwise. The seed
    // doubles as the result of an empty product.
    let require_all = operand::require_all(operand_a) || operand::require_all(operand_b);
    for (a, b) in iproduct!(resolved_a.values(), resolved_b.values()) {
        if comparator::compare(comparator, a, b) != require_all {
            return !require_all;
        }
    }
    require_all
}

fn child_node<'a, S: ContentSource>(
    store: &'a S,
    node: &ContentNode,
    name: &str,
) -> Option<&'a ContentNode> {
    let id = node.child(name)?;
    store.node(id).ok().flatten()
}
