//! Repository adapters: pick manifests out of a change-set, read them, extract declarations.
//!
//! This crate is allowed to do filesystem IO. It does not talk to git or the network;
//! the changed paths are supplied by the caller.

#![forbid(unsafe_code)]

mod locate;
mod parse;

use camino::Utf8PathBuf;
use depgate_domain::model::ManifestRecord;
use depgate_types::RepoPath;
use depgate_types::ids;

pub use locate::{MANIFEST_FILENAME, ManifestLocation, locate_manifests};
pub use parse::{ManifestParseError, extract_dependencies};

/// Fuzz-friendly API for parsing robustness without filesystem access.
pub mod fuzz {
    /// Parse arbitrary text as a package.json manifest. **Never panics** on any input.
    pub fn parse_manifest(text: &str, include_dev: bool) -> Result<usize, super::ManifestParseError> {
        super::extract_dependencies(text, include_dev).map(|refs| refs.len())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("failed to read '{path}': {source}")]
pub struct ManifestReadError {
    pub path: String,
    #[source]
    pub source: std::io::Error,
}

/// Source of manifest text at a repo-relative path.
pub trait ManifestReader {
    fn read_manifest(&self, path: &RepoPath) -> Result<String, ManifestReadError>;
}

/// Reads manifests from a checked-out working tree.
#[derive(Clone, Debug)]
pub struct FsManifestReader {
    root: Utf8PathBuf,
}

impl FsManifestReader {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ManifestReader for FsManifestReader {
    fn read_manifest(&self, path: &RepoPath) -> Result<String, ManifestReadError> {
        let abs = self.root.join(path.to_utf8_pathbuf());
        std::fs::read_to_string(&abs).map_err(|source| ManifestReadError {
            path: path.as_str().to_string(),
            source,
        })
    }
}

/// Reading or parsing one manifest failed. Scoped to that manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error(transparent)]
    Read(#[from] ManifestReadError),
    #[error("{path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ManifestParseError,
    },
}

impl ManifestError {
    pub fn code(&self) -> &'static str {
        match self {
            ManifestError::Read(_) => ids::CODE_MANIFEST_UNREADABLE,
            ManifestError::Parse { .. } => ids::CODE_MANIFEST_INVALID,
        }
    }
}

/// Read and parse the manifest at `location` into a record keyed by its lowercased path.
pub fn load_manifest(
    reader: &dyn ManifestReader,
    location: &ManifestLocation,
    include_dev: bool,
) -> Result<ManifestRecord, ManifestError> {
    let text = reader.read_manifest(&location.source)?;
    let packages = extract_dependencies(&text, include_dev).map_err(|source| {
        ManifestError::Parse {
            path: location.path.as_str().to_string(),
            source,
        }
    })?;

    Ok(ManifestRecord {
        file_path: location.path.as_str().to_string(),
        packages,
    })
}
