// src/lib.rs

pub mod cli;
pub mod errors;
pub mod logging;
pub mod model;
pub mod schedule;
pub mod syntax;

use std::fs;
use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::cli::{CliArgs, OutputFormat};
use crate::schedule::{resolve, schedule, ResolvedModel, Strictness};
use crate::syntax::parse_document;

/// Compile one document into its resolved model.
///
/// This is the whole pipeline: tokenize + parse + build the semantic model,
/// schedule every task with a dependency entry, then resolve events and the
/// period against the schedule.
pub fn compile(source: &str, strictness: Strictness) -> errors::Result<ResolvedModel> {
    let pipeline = parse_document(source)?;
    let timings = schedule(&pipeline, strictness)?;
    resolve(&pipeline, &timings, strictness)
}

/// Convenience wrapper: read a document from disk and compile it.
pub fn compile_file(
    path: impl AsRef<Path>,
    strictness: Strictness,
) -> errors::Result<ResolvedModel> {
    let source = fs::read_to_string(path)?;
    compile(&source, strictness)
}

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - document loading
/// - compilation (parse / schedule / resolve)
/// - output in the requested format
pub fn run(args: CliArgs) -> anyhow::Result<()> {
    let strictness = if args.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading pipeline document at {:?}", args.input))?;
    let model = compile(&source, strictness)
        .with_context(|| format!("compiling {:?}", args.input))?;

    info!(
        tasks = model.tasks.len(),
        events = model.events.len(),
        period = model.period.is_some(),
        "document compiled"
    );

    if args.dry_run {
        println!(
            "pplc dry-run: {} scheduled task(s), {} event(s), period: {}",
            model.tasks.len(),
            model.events.len(),
            if model.period.is_some() { "yes" } else { "no" }
        );
        return Ok(());
    }

    match args.format {
        OutputFormat::Text => print_model(&model),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout().lock(), &model)
                .context("serializing resolved model")?;
            println!();
        }
    }

    Ok(())
}

/// Human-readable model listing, one task per line as `Class(name, start, finish)`.
fn print_model(model: &ResolvedModel) {
    println!("tasks ({}):", model.tasks.len());
    for task in &model.tasks {
        println!(
            "  {}({}, {:>5.1}, {:>5.1})",
            task.class_name, task.name, task.start_time, task.finish_time
        );
        if !task.label.is_empty() {
            println!("      label: {}", task.label);
        }
        if !task.group.is_empty() {
            println!("      group: {}", task.group);
        }
    }

    println!("events ({}):", model.events.len());
    for event in &model.events {
        println!("  - {} at {:.1}", event.name, event.time);
        if !event.label.is_empty() {
            println!("      label: {}", event.label);
        }
    }

    if let Some(ref period) = model.period {
        println!("period: {:.1} -> {:.1}", period.start_time, period.finish_time);
        if !period.label.is_empty() {
            println!("    label: {}", period.label);
        }
    }
}
