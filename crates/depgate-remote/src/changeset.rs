use crate::event::ChangeSetEvent;
use crate::github::{CommitSource, SourceError};

const LOG_TARGET: &str = "depgate::changeset";

/// A commit to inspect: its ref and how many parents it has.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Candidate {
    sha: String,
    parents: usize,
}

/// Paths added or modified by the single-parent commits of `event`, in commit order.
///
/// Paths are not de-duplicated across commits.
pub fn collect_changed_files(
    event: &ChangeSetEvent,
    source: &dyn CommitSource,
) -> Result<Vec<String>, SourceError> {
    let candidates: Vec<Candidate> = match event {
        ChangeSetEvent::Push { commits } => commits
            .iter()
            .filter(|c| c.distinct)
            .map(|c| Candidate {
                sha: c.id.clone(),
                parents: c.parents.len(),
            })
            .collect(),
        ChangeSetEvent::PullRequest { commits_url } => source
            .list_pull_request_commits(commits_url)?
            .into_iter()
            .map(|c| Candidate {
                parents: c.parents.len(),
                sha: c.sha,
            })
            .collect(),
        ChangeSetEvent::Other { name } => {
            log::info!(target: LOG_TARGET, "event '{name}' carries no commits to inspect");
            Vec::new()
        }
    };

    let mut files = Vec::new();
    for commit in candidates {
        if commit.parents > 1 {
            log::debug!(target: LOG_TARGET, "skipping merge commit {}", commit.sha);
            continue;
        }
        let changed = source.changed_files(&commit.sha)?;
        log::debug!(
            target: LOG_TARGET,
            "commit {} touched {} file(s)",
            commit.sha,
            changed.len()
        );
        files.extend(
            changed
                .into_iter()
                .filter(|f| f.status.is_added_or_modified())
                .map(|f| f.filename),
        );
    }

    Ok(files)
}
