//! Derivation of the denormalized `fullIdentifier` property on Subject nodes.
//!
//! A Subject sits in its own hierarchy (e.g. site → patient → visit) linked
//! by the `parents` reference property. When a commit leaves a Subject node,
//! the chain is walked upwards collecting each `identifier`, and the joined
//! result is written back to the node. Derivation is best-effort: any broken
//! link stops the walk with a warning and the identifier collected so far is
//! still written. It never aborts the commit.

use itertools::Itertools;
use rustc_hash::FxHashSet;

use crate::store::{ContentSource, NodeId, Value};

/// Property receiving the derived identifier
pub const PROP_FULL_IDENTIFIER: &str = "fullIdentifier";

const PROP_IDENTIFIER: &str = "identifier";
const PROP_PARENTS: &str = "parents";

/// Separator between the identifiers of a subject chain
pub const IDENTIFIER_SEPARATOR: &str = " / ";

/// Recompute and write the `fullIdentifier` of a Subject node.
///
/// Walks the `parents` chain starting at `subject`, following the first
/// value of each `parents` reference. The walk stops at the root of the
/// chain, or early on an unresolvable link, a missing `identifier`, a store
/// failure, or a revisited node (cyclic chains terminate instead of
/// looping). `scratch` is the commit-scoped visited set; it is cleared here
/// before use and again by the worker when the commit ends.
pub fn derive_full_identifier<S: ContentSource>(
    store: &mut S,
    subject: NodeId,
    scratch: &mut FxHashSet<NodeId>,
) {
    scratch.clear();

    // Collected leaf first; reversed when joining.
    let mut identifiers: Vec<String> = Vec::new();
    let mut current = Some(subject);

    while let Some(id) = current {
        if !scratch.insert(id) {
            log::warn!("Cyclic parents chain detected at subject {id}, stopping derivation");
            break;
        }
        let node = match store.node(id) {
            Ok(Some(node)) => node,
            Ok(None) => {
                log::warn!("Subject {id} in parents chain cannot be resolved, stopping derivation");
                break;
            }
            Err(e) => {
                log::warn!("Store failure while resolving subject {id}: {e}");
                break;
            }
        };
        match node.string_property(PROP_IDENTIFIER) {
            Some(identifier) => identifiers.push(identifier.to_string()),
            None => {
                log::warn!("Subject {id} has no identifier, stopping derivation");
                break;
            }
        }
        // The first value of a multi-valued parents reference is authoritative.
        current = match node.property(PROP_PARENTS) {
            None => None,
            Some(prop) => match prop.first().and_then(Value::as_reference) {
                Some(parent) => Some(parent),
                None => {
                    log::warn!("Subject {id} has a non-reference parents value, stopping derivation");
                    None
                }
            },
        };
    }

    if identifiers.is_empty() {
        return;
    }

    let full = identifiers.iter().rev().join(IDENTIFIER_SEPARATOR);
    if let Err(e) = store.set_property(subject, PROP_FULL_IDENTIFIER, Value::String(full).into()) {
        log::warn!("Could not write {PROP_FULL_IDENTIFIER} on subject {subject}: {e}");
    }
}
