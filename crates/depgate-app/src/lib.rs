//! Use case orchestration for depgate.
//!
//! This crate provides the application layer: use cases that coordinate the domain, repo,
//! remote, and render layers. Collaborators come in as trait objects so every use case can
//! run against fakes.
//!
//! The CLI crate depends on this; it only handles argument parsing and process I/O.

#![forbid(unsafe_code)]

mod changeset;
mod check;
mod explain;
mod render;
mod report;

pub use changeset::{ChangeSetError, EventSourceInput, collect_event_files};
pub use check::{
    CheckError, CheckInput, CheckOutput, config_data, run_check, verdict_exit_code,
};
pub use explain::{ExplainOutput, format_explanation, format_not_found, run_explain};
pub use render::{
    render_annotations, render_console, render_fatal_annotation, render_markdown,
    violations_output,
};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
