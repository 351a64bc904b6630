//! Change-sets from local git history and plain path lists.

use anyhow::Context;
use camino::Utf8Path;
use std::process::Command;

/// Paths added or modified by the non-merge commits in `base..head`, oldest commit first.
pub fn git_changed_files(repo_root: &Utf8Path, base: &str, head: &str) -> anyhow::Result<Vec<String>> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args([
            "-c",
            "core.quotePath=false",
            "log",
            "--no-merges",
            "--name-status",
            "--format=",
            "--reverse",
            &format!("{base}..{head}"),
        ])
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git log returned non-zero exit status: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(parse_name_status(&String::from_utf8_lossy(&output.stdout)))
}

/// Keep the `A` and `M` entries of `git log --name-status` output.
pub fn parse_name_status(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let (status, path) = line.split_once('\t')?;
            matches!(status, "A" | "M").then(|| path.trim().to_string())
        })
        .filter(|p| !p.is_empty())
        .collect()
}

/// One path per line; blank lines are skipped.
pub fn read_changed_files_list(path: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read changed files list: {path}"))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect())
}
