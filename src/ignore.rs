//! Exclusion rules for the template tree.
//! Directories listed in the settings are skipped entirely, and files whose
//! name matches the denylist (lockfiles, binary images) are never rewritten
//! or renamed.

use crate::constants::DEFAULT_DENYLIST;
use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use log::debug;
use std::path::Path;

/// Absolute path prefixes excluded from every walk.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    prefixes: Vec<String>,
}

impl ExclusionSet {
    /// Joins each root-relative entry onto `root`.
    ///
    /// # Arguments
    /// * `root` - Absolute root of the walk
    /// * `skip_dirs` - Root-relative directories to exclude
    ///
    /// # Returns
    /// * `ExclusionSet` - Absolute prefixes checked on every walk
    pub fn from_root<P, S>(root: P, skip_dirs: &[S]) -> Self
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let root = root.as_ref();
        let prefixes = skip_dirs
            .iter()
            .map(|dir| root.join(dir.as_ref()).to_string_lossy().into_owned())
            .collect();
        Self { prefixes }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// A path is excluded when its string form contains any prefix.
    ///
    /// This is a substring test, not a directory-boundary match: with
    /// `/work/target` configured, `/work/targets/x` is excluded too.
    pub fn is_excluded<P: AsRef<Path>>(&self, path: P) -> bool {
        let path = path.as_ref().to_string_lossy();
        self.prefixes.iter().any(|prefix| path.contains(prefix.as_str()))
    }
}

/// Builds the file name denylist from the defaults plus `extra` patterns.
///
/// # Arguments
/// * `extra` - Additional file name globs from the settings
///
/// # Returns
/// * `Result<GlobSet>` - Compiled set matched against file names only
///
/// # Errors
/// * `Error::IgnoreError` if a pattern is not a valid glob
///
/// # Example
/// ```ignore
/// let denylist = build_denylist(&["*.svg".to_string()])?;
/// assert!(denylist.is_match("logo.svg"));
/// assert!(denylist.is_match("Cargo.lock"));
/// ```
pub fn build_denylist(extra: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    let patterns = DEFAULT_DENYLIST.iter().copied().chain(extra.iter().map(String::as_str));
    for pattern in patterns {
        debug!("Denylist pattern: {}", pattern);
        builder.add(
            Glob::new(pattern)
                .map_err(|e| Error::IgnoreError(format!("invalid pattern '{pattern}': {e}")))?,
        );
    }
    builder
        .build()
        .map_err(|e| Error::IgnoreError(format!("denylist loading failed: {e}")))
}

/// Whether the file name of `path` is denylisted.
pub fn is_denylisted<P: AsRef<Path>>(denylist: &GlobSet, path: P) -> bool {
    path.as_ref().file_name().is_some_and(|name| denylist.is_match(name))
}
