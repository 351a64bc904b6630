//! GitHub Actions runner file commands.

use anyhow::Context;
use camino::Utf8Path;
use std::io::Write;
use time::OffsetDateTime;

/// Append `name` to the step outputs file using the multiline delimiter syntax.
pub fn append_output(path: &Utf8Path, name: &str, value: &str) -> anyhow::Result<()> {
    let mut delimiter = format!(
        "depgate_{}_{}",
        std::process::id(),
        OffsetDateTime::now_utc().unix_timestamp_nanos()
    );
    while value.contains(&delimiter) {
        delimiter.push('_');
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open step output file: {path}"))?;
    write!(file, "{name}<<{delimiter}\n{value}\n{delimiter}\n")
        .with_context(|| format!("write step output: {path}"))?;
    Ok(())
}

/// `GITHUB_ACTIONS` is the string `true` on hosted and self-hosted runners.
pub fn running_in_actions(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
