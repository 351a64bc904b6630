//! Rendering utilities for CI surfaces (console log, Markdown, GitHub annotations).

#![forbid(unsafe_code)]

mod console;
mod gha;
mod markdown;
mod model;

pub use console::{render_console, render_policy_table};
pub use gha::{render_error_command, render_github_annotations};
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableManifest, RenderableManifestStatus,
    RenderableReport, RenderableSeverity, RenderableVerdictStatus,
};
