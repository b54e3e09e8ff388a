//! In-place substitution of placeholder tokens in file contents.

use log::{debug, info};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::variables::VariableMap;
use crate::walker::TreeWalker;

/// Counters for a content pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteReport {
    pub scanned: usize,
    pub rewritten: usize,
}

/// Rewrites a single file. Returns whether the file changed.
///
/// The file is only written when the substituted text differs, so a file with
/// no tokens left is never touched.
///
/// # Errors
/// * `Error::IoError` if the file cannot be read as UTF-8 text or written back
pub fn rewrite_file(path: &Path, variables: &VariableMap) -> Result<bool> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let rewritten = variables.apply(&content);
    if rewritten == content {
        return Ok(false);
    }
    fs::write(path, rewritten).map_err(|e| Error::io(path, e))?;
    debug!("Rewrote {}", path.display());
    Ok(true)
}

/// Rewrites every file yielded by the walker.
///
/// Stops at the first failure; files already rewritten stay rewritten.
///
/// # Arguments
/// * `walker` - Walker over the template root
/// * `variables` - Token map applied to every file
///
/// # Returns
/// * `Result<RewriteReport>` - Files scanned and files actually changed
///
/// # Errors
/// * `Error::IoError` for the first file that cannot be read, decoded or written
pub fn rewrite_tree(walker: &TreeWalker, variables: &VariableMap) -> Result<RewriteReport> {
    let mut report = RewriteReport::default();
    for path in walker.files() {
        let path = path?;
        report.scanned += 1;
        if rewrite_file(&path, variables)? {
            report.rewritten += 1;
        }
    }
    info!(
        "Content pass complete: {} of {} files rewritten",
        report.rewritten, report.scanned
    );
    Ok(report)
}
