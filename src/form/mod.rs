//! Referential validation of new Form nodes.

use anyhow::Context;

use crate::error::{CommitError, ConflictKind, Result};
use crate::store::{ContentNode, ContentSource, NodeType};

const PROP_QUESTIONNAIRE: &str = "questionnaire";
const PROP_SUBJECT: &str = "subject";
const PROP_TYPE: &str = "type";
const PROP_REQUIRED_SUBJECT_TYPES: &str = "requiredSubjectTypes";

/// Enforces that the Subject of a newly added Form has a type permitted by
/// the Form's Questionnaire.
///
/// The check is asymmetric: an unresolvable questionnaire or subject
/// reference is fail-open (logged, commit allowed), while a store failure
/// during the check is fail-closed and aborts the commit.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredSubjectTypesValidator;

impl RequiredSubjectTypesValidator {
    /// Validate a node added by the commit. Non-Form nodes pass untouched.
    ///
    /// # Errors
    /// Returns [`CommitError::Conflict`] when the Subject's type is not
    /// listed by the Questionnaire's `requiredSubjectTypes`, and
    /// [`CommitError::Internal`] when the store fails while performing the
    /// check.
    pub fn validate_added_node<S: ContentSource>(
        &self,
        store: &S,
        node: &ContentNode,
    ) -> Result<()> {
        if !matches!(node.node_type(), NodeType::Form) {
            return Ok(());
        }

        let Some(questionnaire_ref) = node.reference(PROP_QUESTIONNAIRE) else {
            log::warn!("Form {} has no questionnaire reference, skipping subject-type check", node.id());
            return Ok(());
        };
        let Some(subject_ref) = node.reference(PROP_SUBJECT) else {
            log::warn!("Form {} has no subject reference, skipping subject-type check", node.id());
            return Ok(());
        };

        let subject = store
            .node(subject_ref)
            .with_context(|| format!("resolving subject {subject_ref} of form {}", node.id()))?;
        let Some(subject) = subject else {
            log::warn!("Subject {subject_ref} of form {} cannot be resolved, skipping subject-type check", node.id());
            return Ok(());
        };

        let questionnaire = store.node(questionnaire_ref).with_context(|| {
            format!("resolving questionnaire {questionnaire_ref} of form {}", node.id())
        })?;
        let Some(questionnaire) = questionnaire else {
            log::warn!("Questionnaire {questionnaire_ref} of form {} cannot be resolved, skipping subject-type check", node.id());
            return Ok(());
        };

        let subject_type = subject.reference(PROP_TYPE);
        let required = questionnaire.references(PROP_REQUIRED_SUBJECT_TYPES);
        let permitted = subject_type.is_some_and(|ty| required.contains(&ty));
        if permitted {
            Ok(())
        } else {
            Err(CommitError::conflict(
                ConflictKind::State,
                400,
                "The type is not listed by the associated questionnaire's requiredSubjectTypes property",
            ))
        }
    }
}
