//! Shared fixtures for integration tests: small questionnaire/form trees
//! built the way the data-entry collaborators would stage them.

#![allow(dead_code)]

use record_tree::{ContentSource, ContentTree, NodeId, NodeType, Value};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// How an operand of a test condition should be stored.
pub struct OperandSpec {
    pub values: Vec<Value>,
    pub is_reference: bool,
    pub require_all: bool,
}

impl OperandSpec {
    pub fn literal(values: Vec<Value>) -> Self {
        Self {
            values,
            is_reference: false,
            require_all: false,
        }
    }

    pub fn literal_one(value: Value) -> Self {
        Self::literal(vec![value])
    }

    /// A reference operand holding the (unsanitized) key of a sibling question.
    pub fn reference(key: &str) -> Self {
        Self {
            values: vec![Value::from(key)],
            is_reference: false,
            require_all: false,
        }
        .as_reference()
    }

    pub fn as_reference(mut self) -> Self {
        self.is_reference = true;
        self
    }

    pub fn require_all(mut self) -> Self {
        self.require_all = true;
        self
    }
}

/// A questionnaire with one guarded section, and a form instantiating it.
pub struct Fixture {
    pub tree: ContentTree,
    pub questionnaire: NodeId,
    /// The guarded section definition; its `condition` child is the guard.
    pub section: NodeId,
    pub form: NodeId,
    /// The AnswerSection instance referencing `section`.
    pub answer_section: NodeId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut tree = ContentTree::new();
        let questionnaire = tree.add_root(NodeType::Questionnaire);
        let section = tree
            .add_child(questionnaire, "guarded_section", NodeType::Section)
            .unwrap();
        let form = tree.add_root(NodeType::Form);
        let answer_section = tree
            .add_child(form, "guarded_section_1", NodeType::AnswerSection)
            .unwrap();
        tree.put_property(answer_section, "section", Value::Reference(section))
            .unwrap();
        Self {
            tree,
            questionnaire,
            section,
            form,
            answer_section,
        }
    }

    /// Add a question definition next to the guarded section.
    pub fn question(&mut self, name: &str) -> NodeId {
        self.tree
            .add_child(self.questionnaire, name, NodeType::Question)
            .unwrap()
    }

    /// Record an answer to `question` directly on the form.
    pub fn answer(&mut self, name: &str, question: NodeId, values: Vec<Value>) -> NodeId {
        answer_in(&mut self.tree, self.form, name, question, values)
    }

    /// Install a single condition as the section's guard.
    pub fn guard_condition(&mut self, comparator: &str, a: OperandSpec, b: OperandSpec) -> NodeId {
        let condition = self
            .tree
            .add_child(self.section, "condition", NodeType::Conditional)
            .unwrap();
        self.fill_condition(condition, comparator, a, b);
        condition
    }

    /// Install a group as the section's guard; conditions go in via
    /// [`Fixture::group_condition`].
    pub fn guard_group(&mut self, require_all: bool) -> NodeId {
        let group = self
            .tree
            .add_child(self.section, "condition", NodeType::ConditionalGroup)
            .unwrap();
        self.tree
            .put_property(group, "requireAll", Value::from(require_all))
            .unwrap();
        group
    }

    /// Append a condition to a group.
    pub fn group_condition(
        &mut self,
        group: NodeId,
        name: &str,
        comparator: &str,
        a: OperandSpec,
        b: OperandSpec,
    ) -> NodeId {
        let condition = self
            .tree
            .add_child(group, name, NodeType::Conditional)
            .unwrap();
        self.fill_condition(condition, comparator, a, b);
        condition
    }

    fn fill_condition(&mut self, condition: NodeId, comparator: &str, a: OperandSpec, b: OperandSpec) {
        self.tree
            .put_property(condition, "comparator", Value::from(comparator))
            .unwrap();
        self.add_operand(condition, "operandA", a);
        self.add_operand(condition, "operandB", b);
    }

    fn add_operand(&mut self, condition: NodeId, name: &str, spec: OperandSpec) -> NodeId {
        let operand = self
            .tree
            .add_child(condition, name, NodeType::Operand)
            .unwrap();
        self.tree
            .put_property(operand, "isReference", Value::from(spec.is_reference))
            .unwrap();
        self.tree
            .put_property(operand, "requireAll", Value::from(spec.require_all))
            .unwrap();
        self.tree.put_property(operand, "value", spec.values).unwrap();
        operand
    }
}

/// Record an answer to `question` inside an arbitrary container node.
pub fn answer_in(
    tree: &mut ContentTree,
    container: NodeId,
    name: &str,
    question: NodeId,
    values: Vec<Value>,
) -> NodeId {
    let answer = tree.add_child(container, name, NodeType::Answer).unwrap();
    tree.put_property(answer, "question", Value::Reference(question))
        .unwrap();
    tree.put_property(answer, "value", values).unwrap();
    answer
}

/// Build a Subject node with an `identifier` and optional `parents` link.
pub fn subject(tree: &mut ContentTree, identifier: &str, parent: Option<NodeId>) -> NodeId {
    let id = tree.add_root(NodeType::Subject);
    tree.put_property(id, "identifier", Value::from(identifier))
        .unwrap();
    if let Some(parent) = parent {
        tree.put_property(id, "parents", Value::Reference(parent))
            .unwrap();
    }
    id
}

pub fn full_identifier(tree: &ContentTree, id: NodeId) -> Option<String> {
    tree.node(id)
        .unwrap()
        .unwrap()
        .string_property("fullIdentifier")
        .map(str::to_string)
}

pub fn date_value(s: &str) -> Value {
    Value::DateTime(chrono::DateTime::parse_from_rfc3339(s).unwrap())
}
