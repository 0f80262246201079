#![allow(dead_code)]

//! Builders that assemble pipeline document source text, to keep test setup
//! readable and to drive property tests with generated documents.

use std::fmt::Write;

/// Builder for a pipeline document. Statements are emitted in the order the
/// builder methods are called, which matters for reference resolution and
/// the scheduler's declaration-order tie-break.
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    source: String,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `task <name> { duration: ...; group: "..."; };`
    pub fn class(mut self, name: &str, duration: f64, group: &str) -> Self {
        writeln!(
            self.source,
            "task {name} {{\n  duration: {duration};\n  group: \"{group}\";\n}};"
        )
        .expect("writing to String");
        self
    }

    /// `task <name> { };` — all attributes defaulted.
    pub fn empty_class(mut self, name: &str) -> Self {
        writeln!(self.source, "task {name} {{ }};").expect("writing to String");
        self
    }

    /// `<class> <obj> range <start>-<end> [label "..."];`
    pub fn range(
        mut self,
        class: &str,
        obj: &str,
        start: u32,
        end: u32,
        label: Option<&str>,
    ) -> Self {
        write!(self.source, "{class} {obj} range {start}-{end}").expect("writing to String");
        if let Some(label) = label {
            write!(self.source, " label \"{label}\"").expect("writing to String");
        }
        writeln!(self.source, ";").expect("writing to String");
        self
    }

    /// `<task> after <p1> <p2> ...;`
    pub fn after(mut self, task: &str, prereqs: &[&str]) -> Self {
        write!(self.source, "{task} after").expect("writing to String");
        for prereq in prereqs {
            write!(self.source, " {prereq}").expect("writing to String");
        }
        writeln!(self.source, ";").expect("writing to String");
        self
    }

    /// `<task> after null;`
    pub fn after_null(self, task: &str) -> Self {
        self.after(task, &["null"])
    }

    /// `event <name> at <task> start|finish [label "..."];`
    pub fn event(mut self, name: &str, task: &str, anchor: &str, label: Option<&str>) -> Self {
        write!(self.source, "event {name} at {task} {anchor}").expect("writing to String");
        if let Some(label) = label {
            write!(self.source, " label \"{label}\"").expect("writing to String");
        }
        writeln!(self.source, ";").expect("writing to String");
        self
    }

    /// `period <e1> to <e2> [label "..."];`
    pub fn period(mut self, start: &str, finish: &str, label: Option<&str>) -> Self {
        write!(self.source, "period {start} to {finish}").expect("writing to String");
        if let Some(label) = label {
            write!(self.source, " label \"{label}\"").expect("writing to String");
        }
        writeln!(self.source, ";").expect("writing to String");
        self
    }

    /// Verbatim line, for comments and deliberately malformed statements.
    pub fn raw(mut self, line: &str) -> Self {
        writeln!(self.source, "{line}").expect("writing to String");
        self
    }

    pub fn build(self) -> String {
        self.source
    }
}

/// The worked example document: three chained 2.5-long jobs, begin/end
/// events and a period spanning them.
pub fn chained_jobs_document() -> String {
    DocumentBuilder::new()
        .class("Step", 2.5, "here")
        .range("Step", "job", 1, 3, Some("Job"))
        .after_null("job1")
        .after("job2", &["job1"])
        .after("job3", &["job1", "job2"])
        .event("e1", "job1", "start", Some("Begin"))
        .event("e2", "job3", "finish", Some("End"))
        .period("e1", "e2", Some("Total"))
        .build()
}
