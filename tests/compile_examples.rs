mod common;
use crate::common::init_tracing;

use std::error::Error;
use std::io::Write;

use pplc::schedule::{ResolvedModel, ScheduledTask, Strictness};
use pplc::{compile, compile_file};
use pplc_test_utils::builders::chained_jobs_document;

type TestResult = Result<(), Box<dyn Error>>;

fn task<'a>(model: &'a ResolvedModel, name: &str) -> &'a ScheduledTask {
    model
        .tasks
        .iter()
        .find(|t| t.name == name)
        .unwrap_or_else(|| panic!("task {name} missing from model"))
}

fn event_time(model: &ResolvedModel, name: &str) -> f64 {
    model
        .events
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("event {name} missing from model"))
        .time
}

#[test]
fn chained_jobs_round_trip() -> TestResult {
    init_tracing();

    let model = compile(&chained_jobs_document(), Strictness::Lenient)?;

    assert_eq!(model.tasks.len(), 3);
    let job1 = task(&model, "job1");
    assert_eq!((job1.start_time, job1.finish_time), (0.0, 2.5));
    let job2 = task(&model, "job2");
    assert_eq!((job2.start_time, job2.finish_time), (2.5, 5.0));
    let job3 = task(&model, "job3");
    assert_eq!((job3.start_time, job3.finish_time), (5.0, 7.5));

    assert_eq!(job1.class_name, "Step");
    assert_eq!(job1.group, "here");
    assert_eq!(job1.label, "Job");
    assert_eq!(job1.index, 1);

    assert_eq!(event_time(&model, "e1"), 0.0);
    assert_eq!(event_time(&model, "e2"), 7.5);

    let period = model.period.as_ref().expect("period missing");
    assert_eq!((period.start_time, period.finish_time), (0.0, 7.5));
    assert_eq!(period.label, "Total");

    Ok(())
}

#[test]
fn raw_document_with_comments_and_whitespace() -> TestResult {
    init_tracing();

    // Statement layout and comments must be insignificant.
    let source = r#"
        // the template
        task Step {
          duration: 2.5;
          group: "here";
        };
        Step job range 1-3 label "Job"; // three jobs
        job1 after null;
        job2 after job1;
        job3 after job1 job2;
        event e1 at job1 start label "Begin";
        event e2 at job3 finish label "End";
        period e1 to e2 label "Total";
    "#;

    let model = compile(source, Strictness::Strict)?;
    assert_eq!(model.tasks.len(), 3);
    assert_eq!(task(&model, "job3").finish_time, 7.5);
    Ok(())
}

#[test]
fn compile_file_reads_document_from_disk() -> TestResult {
    init_tracing();

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(chained_jobs_document().as_bytes())?;

    let model = compile_file(file.path(), Strictness::Lenient)?;
    assert_eq!(model.tasks.len(), 3);
    assert_eq!(event_time(&model, "e2"), 7.5);
    Ok(())
}

#[test]
fn events_resolve_against_their_anchor() -> TestResult {
    init_tracing();

    let source = pplc_test_utils::builders::DocumentBuilder::new()
        .class("Step", 4.0, "")
        .range("Step", "job", 1, 2, None)
        .after_null("job1")
        .after("job2", &["job1"])
        .event("begin", "job2", "start", None)
        .event("end", "job2", "finish", None)
        .build();

    let model = compile(&source, Strictness::Strict)?;
    assert_eq!(event_time(&model, "begin"), task(&model, "job2").start_time);
    assert_eq!(event_time(&model, "end"), task(&model, "job2").finish_time);
    Ok(())
}

#[test]
fn period_bounds_follow_declared_event_order() -> TestResult {
    init_tracing();

    // Period from a late event to an early one; no ordering is enforced.
    let source = pplc_test_utils::builders::DocumentBuilder::new()
        .class("Step", 1.0, "")
        .range("Step", "job", 1, 2, None)
        .after_null("job1")
        .after("job2", &["job1"])
        .event("late", "job2", "finish", None)
        .event("early", "job1", "start", None)
        .period("late", "early", None)
        .build();

    let model = compile(&source, Strictness::Strict)?;
    let period = model.period.as_ref().expect("period missing");
    assert_eq!((period.start_time, period.finish_time), (2.0, 0.0));
    Ok(())
}

#[test]
fn event_group_comes_from_owning_task() -> TestResult {
    init_tracing();

    let source = pplc_test_utils::builders::DocumentBuilder::new()
        .class("Step", 1.0, "there")
        .range("Step", "job", 1, 1, None)
        .after_null("job1")
        .event("e", "job1", "start", None)
        .build();

    let model = compile(&source, Strictness::Strict)?;
    assert_eq!(model.events[0].group, "there");
    Ok(())
}

#[test]
fn model_serializes_to_json() -> TestResult {
    init_tracing();

    let model = compile(&chained_jobs_document(), Strictness::Lenient)?;
    let json: serde_json::Value = serde_json::from_str(&serde_json::to_string(&model)?)?;

    assert_eq!(json["tasks"].as_array().map(|a| a.len()), Some(3));
    assert_eq!(json["tasks"][0]["name"], "job1");
    assert_eq!(json["period"]["finish_time"], 7.5);
    Ok(())
}
