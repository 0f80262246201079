// src/schedule/resolve.rs

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::warn;

use crate::errors::{CompileError, Result};
use crate::model::{Anchor, Pipeline};
use crate::schedule::scheduler::{Schedule, Strictness};

/// One scheduled task as handed to rendering tooling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduledTask {
    pub name: String,
    pub class_name: String,
    pub label: String,
    pub group: String,
    pub index: u32,
    pub start_time: f64,
    pub finish_time: f64,
}

/// One resolved event; `group` comes from the owning task's class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEvent {
    pub name: String,
    pub label: String,
    pub time: f64,
    pub group: String,
}

/// The resolved period, bounds in declared event order (no validation that
/// start precedes finish).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPeriod {
    pub label: String,
    pub start_time: f64,
    pub finish_time: f64,
}

/// Read-only output of a compilation: everything the rendering side needs,
/// nothing it can mutate back into the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedModel {
    /// Scheduled tasks in declaration order. Tasks without a dependency
    /// entry are absent.
    pub tasks: Vec<ScheduledTask>,
    /// Events in declaration order.
    pub events: Vec<ResolvedEvent>,
    pub period: Option<ResolvedPeriod>,
}

/// Derive event and period times from a finished schedule and assemble the
/// handoff model.
///
/// An event's time is its task's start or finish time, per the event's
/// anchor. Under [`Strictness::Lenient`] an event on an unscheduled task
/// resolves to `0.0` (the original's default field value); under
/// [`Strictness::Strict`] it is an error.
pub fn resolve(
    pipeline: &Pipeline,
    schedule: &Schedule,
    strictness: Strictness,
) -> Result<ResolvedModel> {
    let mut tasks = Vec::new();
    for instance in pipeline.tasks() {
        let Some(times) = schedule.get(&instance.name) else {
            continue;
        };
        tasks.push(ScheduledTask {
            name: instance.name.clone(),
            class_name: instance.class.clone(),
            label: instance.label.clone(),
            group: pipeline.group_of(&instance.name).to_string(),
            index: instance.index,
            start_time: times.start,
            finish_time: times.finish,
        });
    }

    let mut events = Vec::new();
    let mut event_times: BTreeMap<&str, f64> = BTreeMap::new();
    for event in pipeline.events() {
        let time = match schedule.get(&event.task) {
            Some(times) => match event.anchor {
                Anchor::Start => times.start,
                Anchor::Finish => times.finish,
            },
            None => match strictness {
                Strictness::Strict => {
                    return Err(CompileError::UnscheduledTask {
                        event: event.name.clone(),
                        task: event.task.clone(),
                    });
                }
                Strictness::Lenient => {
                    warn!(
                        event = %event.name,
                        task = %event.task,
                        "event references an unscheduled task; resolving to 0.0"
                    );
                    0.0
                }
            },
        };
        event_times.insert(event.name.as_str(), time);
        events.push(ResolvedEvent {
            name: event.name.clone(),
            label: event.label.clone(),
            time,
            group: pipeline.group_of(&event.task).to_string(),
        });
    }

    // The builder guarantees both period events exist.
    let period = pipeline.period().map(|period| ResolvedPeriod {
        label: period.label.clone(),
        start_time: event_times
            .get(period.start_event.as_str())
            .copied()
            .unwrap_or(0.0),
        finish_time: event_times
            .get(period.finish_event.as_str())
            .copied()
            .unwrap_or(0.0),
    });

    Ok(ResolvedModel {
        tasks,
        events,
        period,
    })
}
