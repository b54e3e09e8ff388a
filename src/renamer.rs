//! Renaming of files and directories whose base name embeds a token.
//!
//! The whole tree is snapshotted before the first rename. Renames are then
//! applied deepest path first: only the base name of an entry changes, so
//! every entry is renamed while all of its ancestors still carry the names
//! recorded in the snapshot.

use log::{debug, error, info, warn};
use std::cmp::Reverse;
use std::fs;
use std::path::{PathBuf, MAIN_SEPARATOR};

use crate::error::{Error, Result};
use crate::variables::VariableMap;
use crate::walker::TreeWalker;

/// A single planned rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of applying a rename plan.
#[derive(Debug, Default)]
pub struct RenameReport {
    pub renamed: Vec<Rename>,
    pub failures: Vec<Error>,
}

impl RenameReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

fn is_single_component(name: &str) -> bool {
    !name.is_empty() && !name.contains('/') && !name.contains(MAIN_SEPARATOR)
}

/// Collects every rename the tree needs, deepest first.
///
/// The walk is fully consumed before this returns, so the plan never observes
/// a partially renamed tree.
///
/// # Arguments
/// * `walker` - Walker over the template root, contents already rewritten
/// * `variables` - Token map applied to base names
///
/// # Returns
/// * `Result<Vec<Rename>>` - Renames sorted by path depth, deepest first
///
/// # Errors
/// * `Error::IoError` if the walk fails
pub fn plan_renames(walker: &TreeWalker, variables: &VariableMap) -> Result<Vec<Rename>> {
    let mut plan = Vec::new();
    for entry in walker.walk() {
        let entry = entry?;
        let Some(name) = entry.path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !variables.matches(name) {
            continue;
        }
        let new_name = variables.apply(name);
        if new_name == name {
            continue;
        }
        if !is_single_component(&new_name) {
            warn!(
                "Not renaming {}: substituted name '{}' is not a single path component",
                entry.path.display(),
                new_name
            );
            continue;
        }
        let to = entry.path.with_file_name(&new_name);
        plan.push(Rename { from: entry.path, to });
    }

    plan.sort_by_key(|rename| Reverse(rename.from.components().count()));
    debug!("Planned {} rename(s)", plan.len());
    Ok(plan)
}

/// Applies a plan in order. A failed rename is recorded and the remaining
/// renames are still attempted.
///
/// # Arguments
/// * `plan` - Renames in application order, usually from `plan_renames`
///
/// # Returns
/// * `RenameReport` - Renames applied and one error per failed entry
///   (`Error::RenameConflict` when the target exists, `Error::IoError` otherwise)
pub fn apply_renames(plan: Vec<Rename>) -> RenameReport {
    let mut report = RenameReport::default();
    for rename in plan {
        if fs::symlink_metadata(&rename.to).is_ok() {
            let err = Error::RenameConflict { from: rename.from, to: rename.to };
            error!("{}", err);
            report.failures.push(err);
            continue;
        }
        match fs::rename(&rename.from, &rename.to) {
            Ok(()) => {
                info!("Renamed '{}' -> '{}'", rename.from.display(), rename.to.display());
                report.renamed.push(rename);
            }
            Err(e) => {
                let err = Error::io(&rename.from, e);
                error!("{}", err);
                report.failures.push(err);
            }
        }
    }
    report
}

/// Plans and applies all renames under the walker's root.
pub fn rename_tree(walker: &TreeWalker, variables: &VariableMap) -> Result<RenameReport> {
    let plan = plan_renames(walker, variables)?;
    let report = apply_renames(plan);
    info!(
        "Rename pass complete: {} renamed, {} failed",
        report.renamed.len(),
        report.failures.len()
    );
    Ok(report)
}
