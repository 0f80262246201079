// src/model/builder.rs

use std::collections::BTreeSet;

use tracing::debug;

use crate::errors::{CompileError, Result};
use crate::model::{
    index_from_name, Anchor, DependencyEntry, Event, Period, Pipeline, TaskClass, TaskInstance,
};

/// Applies parsed statements to a growing [`Pipeline`].
///
/// The parser calls one method per recognized statement, in document order,
/// so every referential check here sees exactly the entities declared before
/// the statement being applied.
#[derive(Debug, Default)]
pub struct PipelineBuilder {
    pipeline: Pipeline,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `task <Name> { duration: ...; group: "..."; };`
    ///
    /// Re-declaring a class silently replaces the previous one; existing
    /// instances keep pointing at the class by name and therefore pick up the
    /// new attributes. This matches the original language.
    pub fn declare_class(&mut self, name: String, duration: f64, group: String) {
        debug!(class = %name, duration, group = %group, "declaring task class");
        self.pipeline
            .classes
            .insert(name.clone(), TaskClass { name, duration, group });
    }

    /// `<Class> <obj> range <start>-<end> [label "..."];`
    ///
    /// Creates `{obj}{i}` for each `i` in `start..=end`; an inverted range
    /// creates nothing. Each instance's index is re-parsed from its own name
    /// rather than taken from the loop variable.
    pub fn instantiate(
        &mut self,
        class: &str,
        obj: &str,
        start: u32,
        end: u32,
        label: &str,
    ) -> Result<()> {
        if !self.pipeline.classes.contains_key(class) {
            return Err(CompileError::UndefinedClass {
                name: class.to_string(),
                statement: format!("{class} {obj} range {start}-{end}"),
            });
        }

        for i in start..=end {
            let name = format!("{obj}{i}");
            if self.pipeline.tasks.contains_key(&name) {
                return Err(CompileError::DuplicateTask { name });
            }
            let index = index_from_name(&name).unwrap_or(i);
            debug!(task = %name, class = %class, index, "instantiating task");
            self.pipeline.task_order.push(name.clone());
            self.pipeline.tasks.insert(
                name.clone(),
                TaskInstance {
                    name,
                    class: class.to_string(),
                    index,
                    label: label.to_string(),
                },
            );
        }
        Ok(())
    }

    /// `<task> after (null | <task>+);`
    ///
    /// Prerequisites are deduplicated into a set. A second `after` statement
    /// for the same task replaces its prerequisite set but keeps the original
    /// declaration slot (which drives the scheduler's tie-break).
    pub fn declare_dependency(&mut self, task: &str, prereqs: &[String]) -> Result<()> {
        let statement = format!("{task} after");
        if !self.pipeline.tasks.contains_key(task) {
            return Err(CompileError::UndefinedTask {
                name: task.to_string(),
                statement,
            });
        }
        let mut set = BTreeSet::new();
        for prereq in prereqs {
            if !self.pipeline.tasks.contains_key(prereq) {
                return Err(CompileError::UndefinedTask {
                    name: prereq.clone(),
                    statement,
                });
            }
            set.insert(prereq.clone());
        }

        debug!(task = %task, prereqs = ?set, "declaring dependency entry");
        match self
            .pipeline
            .dependencies
            .iter_mut()
            .find(|entry| entry.task == task)
        {
            Some(entry) => entry.prereqs = set,
            None => self.pipeline.dependencies.push(DependencyEntry {
                task: task.to_string(),
                prereqs: set,
            }),
        }
        Ok(())
    }

    /// `event <name> at <task> start|finish [label "..."];`
    ///
    /// A duplicate event name silently replaces the previous event.
    pub fn declare_event(
        &mut self,
        name: &str,
        task: &str,
        anchor: Anchor,
        label: &str,
    ) -> Result<()> {
        if !self.pipeline.tasks.contains_key(task) {
            return Err(CompileError::UndefinedTask {
                name: task.to_string(),
                statement: format!("event {name}"),
            });
        }
        debug!(event = %name, task = %task, ?anchor, "declaring event");
        if !self.pipeline.events.contains_key(name) {
            self.pipeline.event_order.push(name.to_string());
        }
        self.pipeline.events.insert(
            name.to_string(),
            Event {
                name: name.to_string(),
                task: task.to_string(),
                anchor,
                label: label.to_string(),
            },
        );
        Ok(())
    }

    /// `period <e1> to <e2> [label "..."];`
    ///
    /// At most one period per document; a second declaration overwrites the
    /// first without warning.
    pub fn declare_period(&mut self, start: &str, finish: &str, label: &str) -> Result<()> {
        let statement = format!("period {start} to {finish}");
        for event in [start, finish] {
            if !self.pipeline.events.contains_key(event) {
                return Err(CompileError::UndefinedEvent {
                    name: event.to_string(),
                    statement,
                });
            }
        }
        debug!(start = %start, finish = %finish, "declaring period");
        self.pipeline.period = Some(Period {
            start_event: start.to_string(),
            finish_event: finish.to_string(),
            label: label.to_string(),
        });
        Ok(())
    }

    pub fn finish(self) -> Pipeline {
        self.pipeline
    }
}
