//! Render use cases: console log, markdown, annotations, and the `violations` output.

use anyhow::Context;
use depgate_render::RenderableReport;
use depgate_types::DepgateReportV1;

pub fn render_console(report: &RenderableReport) -> String {
    depgate_render::render_console(report)
}

pub fn render_markdown(report: &RenderableReport) -> String {
    depgate_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    depgate_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

/// Workflow command that surfaces a fatal run error in the Actions UI.
pub fn render_fatal_annotation(message: &str) -> String {
    depgate_render::render_error_command(message)
}

/// JSON value of the `violations` step output; `None` when there is nothing to report.
pub fn violations_output(report: &DepgateReportV1) -> anyhow::Result<Option<String>> {
    if report.violations.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(&report.violations)
        .map(Some)
        .context("serialize violations output")
}
