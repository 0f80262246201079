// src/errors.rs

//! Crate-wide error types.
//!
//! Every failure mode of a compilation is a variant of [`CompileError`];
//! compilation is all-or-nothing, so callers receive either a fully resolved
//! model or exactly one of these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompileError {
    /// Input does not match the grammar at the given position.
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unknown task class '{name}' in '{statement}'")]
    UndefinedClass { name: String, statement: String },

    #[error("unknown task '{name}' in '{statement}'")]
    UndefinedTask { name: String, statement: String },

    #[error("unknown event '{name}' in '{statement}'")]
    UndefinedEvent { name: String, statement: String },

    /// Range instantiation would create two tasks with the same derived name.
    #[error("duplicate task '{name}'")]
    DuplicateTask { name: String },

    /// Strict mode only: a prerequisite has no dependency entry of its own,
    /// so it can never be scheduled.
    #[error("task '{task}' depends on '{prereq}', which has no dependency entry")]
    UnresolvedDependency { task: String, prereq: String },

    /// Strict mode only: the scheduler got stuck with entries remaining.
    #[error("dependency cycle involving tasks {tasks:?}")]
    CyclicDependency { tasks: Vec<String> },

    /// Strict mode only: an event references a task the scheduler never saw.
    #[error("event '{event}' references task '{task}', which was never scheduled")]
    UnscheduledTask { event: String, task: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CompileError>;
