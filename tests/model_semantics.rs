mod common;
use crate::common::init_tracing;

use std::error::Error;

use pplc::compile;
use pplc::model::{index_from_name, Anchor};
use pplc::schedule::Strictness;
use pplc::syntax::parse_document;
use pplc_test_utils::builders::DocumentBuilder;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn range_expansion_produces_inclusive_named_instances() -> TestResult {
    init_tracing();

    let source = DocumentBuilder::new()
        .class("Work", 1.0, "")
        .range("Work", "t", 10, 12, Some("shared"))
        .build();

    let pipeline = parse_document(&source)?;
    let names: Vec<&str> = pipeline.tasks().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["t10", "t11", "t12"]);
    for (task, expected) in pipeline.tasks().zip(10u32..) {
        assert_eq!(task.index, expected);
        assert_eq!(task.label, "shared");
    }
    Ok(())
}

#[test]
fn instance_index_agrees_with_name_digits() -> TestResult {
    init_tracing();

    // The index is re-parsed from the generated name, not taken from the
    // loop variable; the two must agree by construction.
    let source = DocumentBuilder::new()
        .class("Work", 1.0, "")
        .range("Work", "job", 7, 9, None)
        .build();

    let pipeline = parse_document(&source)?;
    for task in pipeline.tasks() {
        assert_eq!(Some(task.index), index_from_name(&task.name));
    }
    Ok(())
}

#[test]
fn index_from_name_finds_first_digit_run() {
    init_tracing();

    assert_eq!(index_from_name("job12"), Some(12));
    assert_eq!(index_from_name("a1b2"), Some(1));
    assert_eq!(index_from_name("job"), None);
}

#[test]
fn inverted_range_instantiates_nothing() -> TestResult {
    init_tracing();

    let source = DocumentBuilder::new()
        .class("Work", 1.0, "")
        .range("Work", "t", 3, 2, None)
        .build();

    let pipeline = parse_document(&source)?;
    assert_eq!(pipeline.tasks().count(), 0);
    Ok(())
}

#[test]
fn class_redeclaration_overwrites_silently() -> TestResult {
    init_tracing();

    // Instances resolve their class by name, so the second declaration's
    // duration wins even for instances created before it.
    let source = DocumentBuilder::new()
        .class("Work", 1.0, "old")
        .range("Work", "t", 1, 1, None)
        .class("Work", 4.0, "new")
        .after_null("t1")
        .build();

    let model = compile(&source, Strictness::Strict)?;
    assert_eq!(model.tasks[0].finish_time, 4.0);
    assert_eq!(model.tasks[0].group, "new");
    Ok(())
}

#[test]
fn event_redeclaration_overwrites_silently() -> TestResult {
    init_tracing();

    let source = DocumentBuilder::new()
        .class("Work", 2.0, "")
        .range("Work", "t", 1, 2, None)
        .after_null("t1")
        .after("t2", &["t1"])
        .event("e", "t1", "start", None)
        .event("e", "t2", "finish", None)
        .build();

    let pipeline = parse_document(&source)?;
    assert_eq!(pipeline.events().count(), 1);
    let event = pipeline.event("e").expect("event e");
    assert_eq!(event.task, "t2");
    assert_eq!(event.anchor, Anchor::Finish);

    let model = compile(&source, Strictness::Strict)?;
    assert_eq!(model.events[0].time, 4.0);
    Ok(())
}

#[test]
fn second_period_overwrites_first() -> TestResult {
    init_tracing();

    let source = DocumentBuilder::new()
        .class("Work", 2.0, "")
        .range("Work", "t", 1, 1, None)
        .after_null("t1")
        .event("a", "t1", "start", None)
        .event("b", "t1", "finish", None)
        .period("a", "b", Some("first"))
        .period("b", "a", Some("second"))
        .build();

    let model = compile(&source, Strictness::Strict)?;
    let period = model.period.as_ref().expect("period missing");
    assert_eq!(period.label, "second");
    assert_eq!((period.start_time, period.finish_time), (2.0, 0.0));
    Ok(())
}

#[test]
fn labels_default_to_empty() -> TestResult {
    init_tracing();

    let source = DocumentBuilder::new()
        .empty_class("Work")
        .range("Work", "t", 1, 1, None)
        .after_null("t1")
        .event("e", "t1", "start", None)
        .build();

    let model = compile(&source, Strictness::Strict)?;
    assert_eq!(model.tasks[0].label, "");
    assert_eq!(model.tasks[0].group, "");
    assert_eq!(model.tasks[0].finish_time, 0.0); // duration defaults to 0
    assert_eq!(model.events[0].label, "");
    Ok(())
}
