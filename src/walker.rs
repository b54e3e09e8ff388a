//! Deterministic traversal of the template tree.

use std::path::{Path, PathBuf};

use globset::GlobSet;
use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::ignore::{is_denylisted, ExclusionSet};

/// One entry reachable from the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    pub is_dir: bool,
    pub is_symlink: bool,
}

/// Enumerates entries under a root, honoring the exclusion set and the
/// file name denylist.
///
/// Siblings are visited in file name order, so two walks over an unchanged
/// tree yield the same sequence.
pub struct TreeWalker<'a> {
    root: &'a Path,
    exclusions: &'a ExclusionSet,
    denylist: &'a GlobSet,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker over `root`.
    ///
    /// # Arguments
    /// * `root` - Directory to enumerate
    /// * `exclusions` - Prefixes whose subtrees are never entered
    /// * `denylist` - File name globs filtered out of the results
    pub fn new(root: &'a Path, exclusions: &'a ExclusionSet, denylist: &'a GlobSet) -> Self {
        Self { root, exclusions, denylist }
    }

    pub fn root(&self) -> &Path {
        self.root
    }

    /// Lazily walks the tree. The root itself is not yielded.
    ///
    /// Excluded directories are pruned, so nothing beneath them is visited.
    /// Denylisted names only filter files; directories always pass.
    ///
    /// # Returns
    /// * Iterator of `Result<WalkEntry>`, in deterministic order
    ///
    /// # Errors
    /// * `Error::IoError` with the offending path if an entry cannot be read
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkEntry>> + '_ {
        let exclusions = self.exclusions;
        WalkDir::new(self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                let excluded = exclusions.is_excluded(entry.path());
                if excluded {
                    debug!("Skipping excluded path {}", entry.path().display());
                }
                !excluded
            })
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    let is_dir = file_type.is_dir();
                    if !is_dir && is_denylisted(self.denylist, entry.path()) {
                        debug!("Skipping denylisted file {}", entry.path().display());
                        return None;
                    }
                    Some(Ok(WalkEntry {
                        path: entry.into_path(),
                        is_dir,
                        is_symlink: file_type.is_symlink(),
                    }))
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.to_path_buf());
                    Some(Err(Error::io(path, err.into())))
                }
            })
    }

    /// Regular files only, in walk order.
    pub fn files(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        self.walk().filter_map(|entry| match entry {
            Ok(entry) if entry.is_dir || entry.is_symlink => None,
            Ok(entry) => Some(Ok(entry.path)),
            Err(e) => Some(Err(e)),
        })
    }
}
