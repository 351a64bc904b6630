use depgate_types::RepoPath;
use std::collections::BTreeSet;

/// Base filename (compared case-insensitively) that marks a dependency manifest.
pub const MANIFEST_FILENAME: &str = "package.json";

/// A manifest found among the changed files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestLocation {
    /// Lowercased path, used for reporting and de-duplication.
    pub path: RepoPath,
    /// Path as the change-set spelled it, used to read the file on case-sensitive filesystems.
    pub source: RepoPath,
}

/// Filter changed paths down to manifests, distinct by first occurrence of the lowercased path.
pub fn locate_manifests<I, P>(paths: I) -> Vec<ManifestLocation>
where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
{
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();

    for raw in paths {
        let source = RepoPath::new(raw.as_ref());
        let path = source.to_lowercase();

        if path.file_name() != Some(MANIFEST_FILENAME) {
            continue;
        }
        if seen.insert(path.clone()) {
            out.push(ManifestLocation { path, source });
        }
    }

    out
}
