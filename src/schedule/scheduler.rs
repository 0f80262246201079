// src/schedule/scheduler.rs

use std::collections::BTreeMap;

use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use serde::Serialize;
use tracing::{debug, warn};

use crate::errors::{CompileError, Result};
use crate::model::{DependencyEntry, Pipeline};

/// How to treat tasks whose dependency chain cannot be fully resolved.
///
/// The original language silently leaves such tasks unscheduled; `Strict`
/// turns each of those situations into a named error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Reference behaviour: cycles and dangling prerequisites are dropped
    /// from the schedule, events on unscheduled tasks resolve to `0.0`.
    #[default]
    Lenient,
    /// Fail with [`CompileError::UnresolvedDependency`],
    /// [`CompileError::CyclicDependency`] or
    /// [`CompileError::UnscheduledTask`] as appropriate.
    Strict,
}

/// Computed start/finish pair for one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TaskTimes {
    pub start: f64,
    pub finish: f64,
}

/// The scheduler's output: task name → times, for scheduled tasks only.
///
/// Tasks without a dependency entry never appear here.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    times: BTreeMap<String, TaskTimes>,
}

impl Schedule {
    pub fn get(&self, task: &str) -> Option<TaskTimes> {
        self.times.get(task).copied()
    }

    pub fn contains(&self, task: &str) -> bool {
        self.times.contains_key(task)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TaskTimes)> {
        self.times.iter().map(|(name, times)| (name.as_str(), *times))
    }
}

/// Assign start/finish times to every task that has a dependency entry.
///
/// Repeatedly picks the **first declared** entry whose every prerequisite has
/// left the remaining set (fixed tie-break, so the schedule is deterministic
/// for a given document), then:
///
/// `start = max(finish of each prerequisite, default 0)` and
/// `finish = start + class duration`.
///
/// A prerequisite without an entry of its own counts as satisfied with finish
/// `0.0` under [`Strictness::Lenient`]; entries still remaining when no
/// progress is possible form one or more dependency cycles.
pub fn schedule(pipeline: &Pipeline, strictness: Strictness) -> Result<Schedule> {
    let entries = pipeline.dependencies();

    if strictness == Strictness::Strict {
        for entry in entries {
            for prereq in &entry.prereqs {
                if !entries.iter().any(|e| e.task == *prereq) {
                    return Err(CompileError::UnresolvedDependency {
                        task: entry.task.clone(),
                        prereq: prereq.clone(),
                    });
                }
            }
        }
    }

    let mut remaining: Vec<&DependencyEntry> = entries.iter().collect();
    let mut times: BTreeMap<String, TaskTimes> = BTreeMap::new();

    loop {
        let ready = remaining.iter().position(|entry| {
            entry
                .prereqs
                .iter()
                .all(|prereq| !remaining.iter().any(|r| r.task == *prereq))
        });
        let Some(ready) = ready else { break };

        let entry = remaining.remove(ready);
        let start = entry
            .prereqs
            .iter()
            .map(|prereq| times.get(prereq).map(|t| t.finish).unwrap_or(0.0))
            .fold(0.0, f64::max);
        let finish = start + pipeline.duration_of(&entry.task);
        debug!(task = %entry.task, start, finish, "task scheduled");
        times.insert(entry.task.clone(), TaskTimes { start, finish });
    }

    if !remaining.is_empty() {
        match strictness {
            Strictness::Lenient => {
                let stuck: Vec<&str> = remaining.iter().map(|e| e.task.as_str()).collect();
                warn!(tasks = ?stuck, "dependency cycle; tasks left unscheduled");
            }
            Strictness::Strict => {
                return Err(CompileError::CyclicDependency {
                    tasks: cycle_members(&remaining),
                });
            }
        }
    }

    Ok(Schedule { times })
}

/// Names of the tasks that actually sit on a cycle among the stuck entries
/// (stuck tasks that merely depend on a cycle are not included), sorted for
/// stable error messages.
fn cycle_members(remaining: &[&DependencyEntry]) -> Vec<String> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for entry in remaining {
        graph.add_node(entry.task.as_str());
    }
    for entry in remaining {
        for prereq in &entry.prereqs {
            // Self-dependencies are collected separately below.
            if *prereq != entry.task && remaining.iter().any(|r| r.task == *prereq) {
                graph.add_edge(prereq.as_str(), entry.task.as_str(), ());
            }
        }
    }

    let mut members: Vec<String> = tarjan_scc(&graph)
        .into_iter()
        .filter(|scc| scc.len() > 1)
        .flatten()
        .map(|name| name.to_string())
        .collect();
    members.extend(
        remaining
            .iter()
            .filter(|entry| entry.prereqs.contains(&entry.task))
            .map(|entry| entry.task.clone()),
    );
    members.sort();
    members.dedup();
    if members.is_empty() {
        // Unreachable in practice: a stuck set always contains a cycle.
        members = remaining.iter().map(|e| e.task.clone()).collect();
        members.sort();
    }
    members
}
