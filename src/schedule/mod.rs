// src/schedule/mod.rs

//! Timing computation over the finished semantic model.
//!
//! - [`scheduler`] walks the dependency entries and assigns start/finish
//!   times to every task that has one.
//! - [`resolve`] derives event and period times from the schedule and
//!   assembles the read-only handoff model for rendering tooling.

pub mod resolve;
pub mod scheduler;

pub use resolve::{resolve, ResolvedEvent, ResolvedModel, ResolvedPeriod, ScheduledTask};
pub use scheduler::{schedule, Schedule, Strictness, TaskTimes};
