// src/model/mod.rs

//! Semantic model for a pipeline document.
//!
//! - This module defines the value types: task classes, task instances,
//!   dependency entries, events and the optional period.
//! - [`builder`] applies parsed statements to a growing [`Pipeline`] and
//!   enforces referential invariants.
//!
//! A [`Pipeline`] is built once by the parser and then handed immutably to
//! the scheduler and resolver; computed times never live on the instances
//! themselves.

pub mod builder;

pub use builder::PipelineBuilder;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Which end of a task an event is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Start,
    Finish,
}

/// A named task template declared with `task <Name> { ... };`.
///
/// Instances share the class's duration and group; the language has no
/// per-instance overrides.
#[derive(Debug, Clone)]
pub struct TaskClass {
    pub name: String,
    pub duration: f64,
    pub group: String,
}

/// One task created by range expansion, named `{base}{index}`.
#[derive(Debug, Clone)]
pub struct TaskInstance {
    pub name: String,
    pub class: String,
    pub index: u32,
    pub label: String,
}

/// One `<task> after ...;` statement: the task plus its prerequisite set.
///
/// Only tasks that appear on the left of an `after` statement have an entry;
/// a task without one is excluded from scheduling entirely.
#[derive(Debug, Clone)]
pub struct DependencyEntry {
    pub task: String,
    pub prereqs: BTreeSet<String>,
}

/// An `event <name> at <task> start|finish;` declaration.
#[derive(Debug, Clone)]
pub struct Event {
    pub name: String,
    pub task: String,
    pub anchor: Anchor,
    pub label: String,
}

/// The single `period <e1> to <e2>;` declaration, if any.
#[derive(Debug, Clone)]
pub struct Period {
    pub start_event: String,
    pub finish_event: String,
    pub label: String,
}

/// All registries for one compiled document.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    classes: BTreeMap<String, TaskClass>,
    tasks: BTreeMap<String, TaskInstance>,
    task_order: Vec<String>,
    dependencies: Vec<DependencyEntry>,
    events: BTreeMap<String, Event>,
    event_order: Vec<String>,
    period: Option<Period>,
}

impl Pipeline {
    pub fn class(&self, name: &str) -> Option<&TaskClass> {
        self.classes.get(name)
    }

    pub fn task(&self, name: &str) -> Option<&TaskInstance> {
        self.tasks.get(name)
    }

    /// Task instances in declaration order.
    pub fn tasks(&self) -> impl Iterator<Item = &TaskInstance> {
        self.task_order.iter().filter_map(|name| self.tasks.get(name))
    }

    /// Dependency entries in declaration order.
    pub fn dependencies(&self) -> &[DependencyEntry] {
        &self.dependencies
    }

    pub fn event(&self, name: &str) -> Option<&Event> {
        self.events.get(name)
    }

    /// Events in declaration order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.event_order.iter().filter_map(|name| self.events.get(name))
    }

    pub fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    /// Duration of a task, via its class. `0.0` if either lookup misses
    /// (cannot happen for tasks created through the builder).
    pub fn duration_of(&self, task: &str) -> f64 {
        self.tasks
            .get(task)
            .and_then(|t| self.classes.get(&t.class))
            .map(|c| c.duration)
            .unwrap_or(0.0)
    }

    /// Group of a task, via its class.
    pub fn group_of(&self, task: &str) -> &str {
        self.tasks
            .get(task)
            .and_then(|t| self.classes.get(&t.class))
            .map(|c| c.group.as_str())
            .unwrap_or("")
    }
}

/// First contiguous run of decimal digits anywhere in `name`.
///
/// This is how instances get their vertical/ordering slot: `job12` → 12.
/// `None` if the name contains no digits or the run overflows `u32`.
pub fn index_from_name(name: &str) -> Option<u32> {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let re = DIGITS.get_or_init(|| Regex::new(r"\d+").expect("static regex"));
    re.find(name)?.as_str().parse().ok()
}
