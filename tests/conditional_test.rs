//! End-to-end behavior of the conditional visibility evaluator against
//! staged questionnaire/form trees.

mod common;

use common::{Fixture, OperandSpec, date_value};
use record_tree::{CommitConfig, NodeType, Value, WalkContext, is_condition_satisfied};

fn satisfied(fx: &Fixture) -> bool {
    satisfied_with(fx, &CommitConfig::default())
}

fn satisfied_with(fx: &Fixture, config: &CommitConfig) -> bool {
    let ctx = WalkContext::at_node(&fx.tree, fx.answer_section).unwrap();
    is_condition_satisfied(&fx.tree, fx.answer_section, &ctx, config)
}

#[test]
fn test_unguarded_section_is_not_satisfied() {
    common::init_logging();
    let fx = Fixture::new();
    assert!(!satisfied(&fx));
}

#[test]
fn test_literal_equality() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(satisfied(&fx));

    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_inequality_is_negated_equality() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "<>",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_unknown_comparator_is_false() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        ">=",
        OperandSpec::literal_one(Value::from(2)),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_empty_and_group_is_true() {
    let mut fx = Fixture::new();
    fx.guard_group(true);
    assert!(satisfied(&fx));
}

#[test]
fn test_empty_or_group_is_false() {
    let mut fx = Fixture::new();
    fx.guard_group(false);
    assert!(!satisfied(&fx));
}

#[test]
fn test_single_child_group_follows_child() {
    for require_all in [true, false] {
        let mut fx = Fixture::new();
        let group = fx.guard_group(require_all);
        fx.group_condition(
            group,
            "c1",
            "=",
            OperandSpec::literal_one(Value::from(1)),
            OperandSpec::literal_one(Value::from(1)),
        );
        assert!(satisfied(&fx), "requireAll={require_all}");
    }
}

#[test]
fn test_and_group_needs_every_child() {
    let mut fx = Fixture::new();
    let group = fx.guard_group(true);
    fx.group_condition(
        group,
        "c1",
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(1)),
    );
    fx.group_condition(
        group,
        "c2",
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(2)),
    );
    fx.group_condition(
        group,
        "c3",
        "=",
        OperandSpec::literal_one(Value::from(3)),
        OperandSpec::literal_one(Value::from(3)),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_or_group_needs_any_child() {
    let mut fx = Fixture::new();
    let group = fx.guard_group(false);
    fx.group_condition(
        group,
        "c1",
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(2)),
    );
    fx.group_condition(
        group,
        "c2",
        "=",
        OperandSpec::literal_one(Value::from(3)),
        OperandSpec::literal_one(Value::from(3)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_nested_groups() {
    // AND( OR(false, true), 1=1 )
    let mut fx = Fixture::new();
    let outer = fx.guard_group(true);
    let inner = fx.tree.add_child(outer, "g1", NodeType::ConditionalGroup).unwrap();
    fx.tree.put_property(inner, "requireAll", Value::from(false)).unwrap();
    fx.group_condition(
        inner,
        "c1",
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(2)),
    );
    fx.group_condition(
        inner,
        "c2",
        "=",
        OperandSpec::literal_one(Value::from(2)),
        OperandSpec::literal_one(Value::from(2)),
    );
    fx.group_condition(
        outer,
        "c3",
        "=",
        OperandSpec::literal_one(Value::from(1)),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_is_empty_on_unresolved_reference() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "is empty",
        OperandSpec::reference("no_such_question"),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(satisfied(&fx));

    let mut fx = Fixture::new();
    fx.guard_condition(
        "is not empty",
        OperandSpec::reference("no_such_question"),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_is_empty_on_zero_values() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "is empty",
        OperandSpec::literal(vec![]),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_is_empty_ignores_quantifier_flags() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "is empty",
        OperandSpec::reference("no_such_question").require_all(),
        OperandSpec::literal_one(Value::from(1)).require_all(),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_is_not_empty_when_answered() {
    let mut fx = Fixture::new();
    let age = fx.question("age");
    fx.answer("a_age", age, vec![Value::from(40)]);
    fx.guard_condition(
        "is not empty",
        OperandSpec::reference("age"),
        OperandSpec::literal_one(Value::from(1)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_any_quantifier_needs_one_match() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal(vec![Value::from(1), Value::from(2), Value::from(3)]),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_all_quantifier_needs_every_pair() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal(vec![Value::from(1), Value::from(2), Value::from(3)]).require_all(),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(!satisfied(&fx));

    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal(vec![Value::from(2), Value::from(2)]).require_all(),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_require_all_on_either_operand_selects_all_semantics() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal(vec![Value::from(1), Value::from(2)]),
        OperandSpec::literal_one(Value::from(2)).require_all(),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_unresolved_operand_returns_the_quantifier_seed() {
    // No pairs to compare: ANY yields false, ALL yields true.
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::reference("no_such_question"),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(!satisfied(&fx));

    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::reference("no_such_question").require_all(),
        OperandSpec::literal_one(Value::from(2)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_reference_operand_reads_sibling_answer() {
    let mut fx = Fixture::new();
    let age = fx.question("age");
    fx.answer("a_age", age, vec![Value::from(40)]);
    fx.guard_condition(
        "=",
        OperandSpec::reference("age"),
        OperandSpec::literal_one(Value::from(40)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_reference_key_is_sanitized() {
    let mut fx = Fixture::new();
    let age = fx.question("age");
    fx.answer("a_age", age, vec![Value::from(40)]);
    fx.guard_condition(
        "=",
        OperandSpec::reference("age!?"),
        OperandSpec::literal_one(Value::from(40)),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_reference_to_unanswered_question_is_absent() {
    let mut fx = Fixture::new();
    fx.question("age");
    fx.guard_condition(
        "=",
        OperandSpec::reference("age"),
        OperandSpec::literal_one(Value::from(40)),
    );
    assert!(!satisfied(&fx));
}

#[test]
fn test_date_answers_lose_time_of_day() {
    let mut fx = Fixture::new();
    let visit = fx.question("visit_date");
    fx.answer(
        "a_visit",
        visit,
        vec![date_value("2020-01-01T15:30:00+00:00")],
    );
    fx.guard_condition(
        "=",
        OperandSpec::reference("visit_date"),
        OperandSpec::literal_one(Value::from("2020-01-01")),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_string_dates_keep_time_of_day() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "=",
        OperandSpec::literal_one(date_value("2020-01-01T00:00:00+00:00")),
        OperandSpec::literal_one(Value::from("2020-01-01T10:30:00+00:00")),
    );
    assert!(!satisfied(&fx));

    let mut fx = Fixture::new();
    fx.guard_condition(
        "<",
        OperandSpec::literal_one(date_value("2020-01-01T00:00:00+00:00")),
        OperandSpec::literal_one(Value::from("2020-01-01T10:30:00+00:00")),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_date_ordering() {
    let mut fx = Fixture::new();
    fx.guard_condition(
        "<",
        OperandSpec::literal_one(date_value("2020-01-01T00:00:00+00:00")),
        OperandSpec::literal_one(Value::from("2020-06-01")),
    );
    assert!(satisfied(&fx));
}

#[test]
fn test_malformed_date_evaluates_false() {
    for comparator in ["=", "<", ">"] {
        let mut fx = Fixture::new();
        fx.guard_condition(
            comparator,
            OperandSpec::literal_one(date_value("2020-01-01T00:00:00+00:00")),
            OperandSpec::literal_one(Value::from("06/01/2020")),
        );
        assert!(!satisfied(&fx), "comparator {comparator}");
    }
}

#[test]
fn test_answer_search_depth_is_configurable() {
    let mut fx = Fixture::new();
    let age = fx.question("age");
    fx.answer("a_age", age, vec![Value::from(40)]);
    fx.guard_condition(
        "=",
        OperandSpec::reference("age"),
        OperandSpec::literal_one(Value::from(40)),
    );

    // Nest another AnswerSection inside the form and guard it with the same
    // section definition; its answers live two levels up.
    let outer = fx
        .tree
        .add_child(fx.form, "outer", NodeType::AnswerSection)
        .unwrap();
    let inner = fx
        .tree
        .add_child(outer, "inner", NodeType::AnswerSection)
        .unwrap();
    fx.tree
        .put_property(inner, "section", Value::Reference(fx.section))
        .unwrap();

    let ctx = WalkContext::at_node(&fx.tree, inner).unwrap();
    let shallow = CommitConfig::default();
    assert!(!is_condition_satisfied(&fx.tree, inner, &ctx, &shallow));

    let deep = CommitConfig {
        answer_search_depth: 2,
        ..CommitConfig::default()
    };
    assert!(is_condition_satisfied(&fx.tree, inner, &ctx, &deep));
}
